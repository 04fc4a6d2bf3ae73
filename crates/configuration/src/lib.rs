use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    Config, DataSettings, LoggingSettings, MAX_LOOKBACK_DAYS, OutputFormat, ReferenceSpec,
    ScanSettings,
};

/// File read when no explicit path is given. Missing is fine; defaults apply.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Loads and validates the application configuration.
///
/// Values come from, in increasing priority: built-in defaults, the TOML file,
/// and `AGRISCAN__SECTION__KEY` environment variables. An explicitly supplied
/// path must exist.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("AGRISCAN")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    finish(builder)
}

/// Loads configuration from TOML text, without consulting the environment.
pub fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    finish(builder)
}

fn finish(builder: config::Config) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        references = config.reference_universe().len(),
        lags = config.scan.lags.len(),
        min_rows = config.scan.min_rows,
        "Configuration loaded"
    );
    Ok(config)
}
