mod settings;

use config::{Config, Environment, File};

use crate::utils::error::BoardError;

pub use settings::{BoardSettings, LoggingSettings, PartialSettings, ServerSettings, Settings};

/// Environment variables look like `BOARD__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "BOARD";

/// Loads `config/default` (any format the `config` crate understands) and
/// environment overrides, then fills the gaps with defaults.
pub fn load_config() -> Result<Settings, BoardError> {
    load_config_from("config/default")
}

pub fn load_config_from(file: &str) -> Result<Settings, BoardError> {
    let builder = Config::builder()
        .add_source(File::with_name(file).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    Ok(partial.merge(Settings::default()))
}

#[cfg(test)]
mod tests;
