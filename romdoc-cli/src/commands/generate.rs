use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romdoc_snapshot::{
    generate_entities, generate_gameroms, generate_projects, generate_schema,
};
use romdoc_store::{StoreClient, StoreConfig};

use crate::error::CliError;

/// Shared arguments for generation commands.
pub(crate) struct GenerateArgs {
    pub(crate) out_dir: PathBuf,
    pub(crate) store_url: Option<String>,
    pub(crate) api_key: Option<String>,
}

impl GenerateArgs {
    fn client(&self) -> Result<StoreClient, CliError> {
        let config = StoreConfig::load()?
            .with_overrides(self.store_url.clone(), self.api_key.clone());
        Ok(StoreClient::new(config)?)
    }
}

fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {e}")))
}

pub(crate) fn run_entities(args: &GenerateArgs) -> Result<(), CliError> {
    let client = args.client()?;
    let rt = runtime()?;
    rt.block_on(generate_entities(&client, &args.out_dir))?;
    done("entity documents");
    Ok(())
}

pub(crate) fn run_gameroms(args: &GenerateArgs) -> Result<(), CliError> {
    let client = args.client()?;
    let rt = runtime()?;
    let n = rt.block_on(generate_gameroms(&client, &args.out_dir))?;
    log::info!("Wrote gameroms.json ({n} entries)");
    done("gameroms.json");
    Ok(())
}

pub(crate) fn run_projects(args: &GenerateArgs) -> Result<(), CliError> {
    let client = args.client()?;
    let rt = runtime()?;
    let n = rt.block_on(generate_projects(&client, &args.out_dir))?;
    log::info!("Wrote projects.json ({n} projects)");
    done("projects.json");
    Ok(())
}

pub(crate) fn run_schema(args: &GenerateArgs) -> Result<(), CliError> {
    let client = args.client()?;
    let rt = runtime()?;
    let n = rt.block_on(generate_schema(&client, &args.out_dir))?;
    log::info!("Wrote schema.json ({n} models)");
    done("schema.json");
    Ok(())
}

pub(crate) fn run_all(args: &GenerateArgs) -> Result<(), CliError> {
    let client = args.client()?;
    let rt = runtime()?;
    rt.block_on(async {
        generate_entities(&client, &args.out_dir).await?;
        let n = generate_gameroms(&client, &args.out_dir).await?;
        log::info!("Wrote gameroms.json ({n} entries)");
        let n = generate_projects(&client, &args.out_dir).await?;
        log::info!("Wrote projects.json ({n} projects)");
        let n = generate_schema(&client, &args.out_dir).await?;
        log::info!("Wrote schema.json ({n} models)");
        Ok::<(), CliError>(())
    })?;
    done("all documents");
    Ok(())
}

fn done(what: &str) {
    log::info!(
        "{} Generated {what}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
    );
}
