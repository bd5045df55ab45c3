//! Configuration loading and parsing

use anyhow::{Context, Result};
use canaero_decoder::{parse_can_id, DecoderConfig, ParameterCatalog, TimestampFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub decoder: DecoderSection,
    #[serde(default)]
    pub output: OutputConfig,
    /// Extra catalog entries, added on top of the standard assignments
    #[serde(default)]
    pub parameters: Vec<ParameterConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DecoderSection {
    #[serde(default)]
    pub raw: bool,
    /// CAN identifiers as hex strings ("0x154")
    #[serde(default)]
    pub can_ids: Vec<String>,
    pub timestamp: Option<TimestampFormat>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParameterConfig {
    /// CAN identifier as hex string
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub unit: String,
}

impl AppConfig {
    /// Build the decoder configuration from the `[decoder]` section
    pub fn decoder_config(&self) -> Result<DecoderConfig> {
        let mut config = DecoderConfig::new()
            .with_raw_mode(self.decoder.raw)
            .with_timestamp_format(self.decoder.timestamp.unwrap_or_default());

        if !self.decoder.can_ids.is_empty() {
            let ids = self
                .decoder
                .can_ids
                .iter()
                .map(|s| parse_can_id(s))
                .collect::<canaero_decoder::Result<Vec<u32>>>()
                .context("Invalid CAN id in [decoder] section")?;
            config = config.with_id_filter(ids);
        }

        Ok(config)
    }

    /// Build the parameter catalog, standard entries plus `[[parameters]]`
    pub fn catalog(&self) -> Result<ParameterCatalog> {
        let mut catalog = ParameterCatalog::standard();
        for param in &self.parameters {
            let id = parse_can_id(&param.id)
                .with_context(|| format!("Invalid id for parameter {:?}", param.name))?;
            catalog = catalog.with_entry(id, param.name.clone(), param.unit.clone());
        }
        Ok(catalog)
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}
