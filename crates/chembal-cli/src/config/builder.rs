use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::error::{CliError, Result};
use chembal::engine::config::{RescaleStrategy, SolverConfigBuilder};
use std::path::Path;
use std::str::FromStr;

pub fn build_config(config_path: Option<&Path>, set_values: &[String]) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(path) = config_path {
        FileConfig::from_file(path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, set_values)?;
    let solver_file = file_config.solver.take().unwrap_or_default();

    let solver = SolverConfigBuilder::new()
        .zero_tolerance(solver_file.zero_tolerance.unwrap_or(defaults.zero_tolerance))
        .integer_tolerance(
            solver_file
                .integer_tolerance
                .unwrap_or(defaults.integer_tolerance),
        )
        .max_multiplier(solver_file.max_multiplier.unwrap_or(defaults.max_multiplier))
        .rescale_strategy(
            solver_file
                .rescale_strategy
                .unwrap_or(defaults.rescale_strategy),
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        source: config_path.map(Path::to_path_buf),
        solver,
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let solver = config.solver.get_or_insert_with(Default::default);

        match key {
            "solver.zero-tolerance" => {
                solver.zero_tolerance = Some(parse_value(key, value_str, "float")?);
            }
            "solver.integer-tolerance" => {
                solver.integer_tolerance = Some(parse_value(key, value_str, "float")?);
            }
            "solver.max-multiplier" => {
                solver.max_multiplier = Some(parse_value(key, value_str, "integer")?);
            }
            "solver.rescale-strategy" => {
                solver.rescale_strategy = Some(parse_strategy(value_str)?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

fn parse_strategy(value_str: &str) -> Result<RescaleStrategy> {
    match value_str {
        "least-common-multiple" => Ok(RescaleStrategy::LeastCommonMultiple),
        "largest-multiplier" => Ok(RescaleStrategy::LargestMultiplier),
        other => Err(CliError::Config(format!(
            "Unknown rescale strategy '{}'. Expected 'least-common-multiple' or 'largest-multiplier'.",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chembal::engine::config::SolverConfig;
    use std::fs;
    use tempfile::tempdir;

    fn set(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn build_config_without_sources_uses_defaults() {
        let app = build_config(None, &[]).expect("build ok");
        assert!(app.source.is_none());
        assert_eq!(app.solver, SolverConfig::default());
    }

    #[test]
    fn build_config_reads_file_and_merges() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(
            &cfg_path,
            r#"
            [solver]
            integer-tolerance = 1e-4
            max-multiplier = 250
            "#,
        )
        .unwrap();

        let app = build_config(Some(&cfg_path), &[]).expect("build ok");
        let defaults = DefaultsConfig::default();

        assert_eq!(app.source.as_deref(), Some(cfg_path.as_path()));
        assert_eq!(app.solver.zero_tolerance, defaults.zero_tolerance);
        assert_eq!(app.solver.integer_tolerance, 1e-4);
        assert_eq!(app.solver.max_multiplier, 250);
        assert_eq!(app.solver.rescale_strategy, defaults.rescale_strategy);
    }

    #[test]
    fn set_values_override_file_values() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(
            &cfg_path,
            "[solver]\nmax-multiplier = 250\nrescale-strategy = \"least-common-multiple\"\n",
        )
        .unwrap();

        let app = build_config(
            Some(&cfg_path),
            &set(&[
                "solver.max-multiplier=40",
                "solver.rescale-strategy=largest-multiplier",
                "solver.zero-tolerance=1e-12",
            ]),
        )
        .expect("build ok");

        assert_eq!(app.solver.max_multiplier, 40);
        assert_eq!(app.solver.rescale_strategy, RescaleStrategy::LargestMultiplier);
        assert!((app.solver.zero_tolerance - 1e-12).abs() < 1e-24);
    }

    #[test]
    fn malformed_set_value_is_rejected() {
        let result = build_config(None, &set(&["solver.max-multiplier"]));
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("KEY=VALUE")));
    }

    #[test]
    fn unknown_set_key_is_rejected() {
        let result = build_config(None, &set(&["solver.pivot=1"]));
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("Unsupported")));
    }

    #[test]
    fn unparsable_values_are_rejected() {
        assert!(build_config(None, &set(&["solver.max-multiplier=lots"])).is_err());
        assert!(build_config(None, &set(&["solver.rescale-strategy=fastest"])).is_err());
    }

    #[test]
    fn invalid_values_fail_core_validation() {
        let result = build_config(None, &set(&["solver.integer-tolerance=0.75"]));
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("integer_tolerance")));
    }
}
