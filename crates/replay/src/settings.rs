//! Threshold loading: preset, then file, then `DMS_` environment variables

use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use config::{Config, Environment, File};
use dms::DmsConfig;
use tracing::info;

/// Base threshold set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preset {
    #[default]
    Default,
    Strict,
    Lenient,
}

impl Preset {
    pub fn config(self) -> DmsConfig {
        match self {
            Preset::Default => DmsConfig::default(),
            Preset::Strict => DmsConfig::strict(),
            Preset::Lenient => DmsConfig::lenient(),
        }
    }
}

/// Build the engine configuration
///
/// Environment keys nest with a double underscore, e.g.
/// `DMS_EYE__DROWSY_FRAMES=20` or `DMS_MOUTH__OPEN_THRESHOLD=0.25`.
pub fn load_config(preset: Preset, file: Option<&Path>) -> anyhow::Result<DmsConfig> {
    let base = Config::try_from(&preset.config()).context("encoding preset thresholds")?;

    let mut builder = Config::builder().add_source(base);
    if let Some(path) = file {
        info!("Loading thresholds from {}", path.display());
        builder = builder.add_source(File::from(path));
    }
    builder = builder.add_source(
        Environment::with_prefix("DMS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config: DmsConfig = builder
        .build()
        .context("reading threshold configuration")?
        .try_deserialize()
        .context("decoding threshold configuration")?;
    config.validate()?;
    Ok(config)
}
