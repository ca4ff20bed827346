use crate::error::{CliError, Result};
use chembal::engine::config::RescaleStrategy;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileSolverConfig {
    #[serde(rename = "zero-tolerance")]
    pub zero_tolerance: Option<f64>,
    #[serde(rename = "integer-tolerance")]
    pub integer_tolerance: Option<f64>,
    #[serde(rename = "max-multiplier")]
    pub max_multiplier: Option<u64>,
    #[serde(rename = "rescale-strategy")]
    pub rescale_strategy: Option<RescaleStrategy>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub solver: Option<FileSolverConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
