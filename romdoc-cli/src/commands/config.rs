use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romdoc_store::{ConfigSource, config_path, config_sources};

/// Show current configuration values and where each comes from.
pub(crate) fn run_config_show() {
    let sources = config_sources();

    log::info!(
        "{}",
        "Store configuration:".if_supports_color(Stdout, |t| t.bold()),
    );
    print_field("store URL", &sources.url);
    print_field("API key", &sources.api_key);
    print_field("schema URL", &sources.schema_url);

    if matches!(sources.url, ConfigSource::Missing)
        || matches!(sources.api_key, ConfigSource::Missing)
    {
        log::info!("");
        log::warn!(
            "Required values are missing. Set ROMDOC_STORE_URL / ROMDOC_API_KEY env vars \
             or add them to the config file."
        );
        if let Some(path) = config_path() {
            log::info!("Config file: {}", path.display());
        }
    }
}

/// Print the config file path.
pub(crate) fn run_config_path() {
    match config_path() {
        Some(path) => log::info!("{}", path.display()),
        None => log::warn!("Could not determine config directory"),
    }
}

fn print_field(label: &str, source: &ConfigSource) {
    let rendered = source.to_string();
    if matches!(source, ConfigSource::Missing) {
        log::info!(
            "  {label}: {}",
            rendered.if_supports_color(Stdout, |t| t.red()),
        );
    } else {
        log::info!(
            "  {label}: {}",
            rendered.if_supports_color(Stdout, |t| t.cyan()),
        );
    }
}
