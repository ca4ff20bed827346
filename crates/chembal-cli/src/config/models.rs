use chembal::engine::config::SolverConfig;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// The file the configuration was read from, if any.
    pub source: Option<PathBuf>,
    pub solver: SolverConfig,
}
