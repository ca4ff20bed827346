//! Solver configuration layering for the CLI.
//!
//! Values are resolved from built-in defaults, then an optional TOML file,
//! then `-S KEY=VALUE` overrides, and finally validated by the core
//! [`SolverConfigBuilder`](chembal::engine::config::SolverConfigBuilder).

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::AppConfig;
