//! romdoc CLI
//!
//! Generates the denormalized JSON snapshots consumed by the statically
//! rendered documentation site: entity listings with resolved active
//! branches, game-ROM layout tables, project configurations, and the parsed
//! schema reference.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

mod commands;
mod error;

use commands::config::{run_config_path, run_config_show};
use commands::generate::{
    GenerateArgs, run_all, run_entities, run_gameroms, run_projects, run_schema,
};

#[derive(Parser)]
#[command(name = "romdoc")]
#[command(about = "Generate JSON snapshots for the ROM-modding docs site", long_about = None)]
struct Cli {
    /// Output directory for generated JSON documents
    #[arg(short, long, global = true, default_value = "generated")]
    out_dir: PathBuf,

    /// Store base URL (overrides ROMDOC_STORE_URL and the config file)
    #[arg(long, global = true)]
    store_url: Option<String>,

    /// Publishable API key (overrides ROMDOC_API_KEY and the config file)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the entity documents (platforms, baseroms, games, developers, regions)
    Entities,

    /// Generate gameroms.json (active game-ROM branches with layout tables)
    Gameroms,

    /// Generate projects.json (projects with deep active-branch context)
    Projects,

    /// Generate schema.json from the remote schema text
    Schema,

    /// Generate every document
    All,

    /// Manage store configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration values and their sources
    Show,

    /// Print the config file path
    Path,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let args = GenerateArgs {
        out_dir: cli.out_dir,
        store_url: cli.store_url,
        api_key: cli.api_key,
    };

    let result = match cli.command {
        Commands::Entities => run_entities(&args),
        Commands::Gameroms => run_gameroms(&args),
        Commands::Projects => run_projects(&args),
        Commands::Schema => run_schema(&args),
        Commands::All => run_all(&args),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                run_config_show();
                Ok(())
            }
            ConfigAction::Path => {
                run_config_path();
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        log::error!(
            "{} {e}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
        );
        std::process::exit(1);
    }
}
