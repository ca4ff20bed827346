use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ZERO_TOLERANCE: f64 = 1e-9;
pub const DEFAULT_INTEGER_TOLERANCE: f64 = 1e-6;
pub const DEFAULT_MAX_MULTIPLIER: u64 = 9999;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// How a floating-point null-space vector is turned into integer coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RescaleStrategy {
    /// Scale by the least common multiple of every entry's denominator, then
    /// divide out the common factor. Always yields coefficients in lowest terms.
    #[default]
    LeastCommonMultiple,
    /// For each entry accept the smallest multiplier not below the one already
    /// accepted; the last accepted multiplier scales the whole vector.
    LargestMultiplier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Magnitude below which pivots, matrix entries and singular values count as zero.
    pub zero_tolerance: f64,
    /// Maximum distance from the nearest integer for a scaled value to count as integral.
    pub integer_tolerance: f64,
    /// Upper bound (inclusive) of the multiplier search during rescaling.
    pub max_multiplier: u64,
    pub rescale_strategy: RescaleStrategy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
            integer_tolerance: DEFAULT_INTEGER_TOLERANCE,
            max_multiplier: DEFAULT_MAX_MULTIPLIER,
            rescale_strategy: RescaleStrategy::default(),
        }
    }
}

#[derive(Default)]
pub struct SolverConfigBuilder {
    zero_tolerance: Option<f64>,
    integer_tolerance: Option<f64>,
    max_multiplier: Option<u64>,
    rescale_strategy: Option<RescaleStrategy>,
}

impl SolverConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zero_tolerance(mut self, tolerance: f64) -> Self {
        self.zero_tolerance = Some(tolerance);
        self
    }
    pub fn integer_tolerance(mut self, tolerance: f64) -> Self {
        self.integer_tolerance = Some(tolerance);
        self
    }
    pub fn max_multiplier(mut self, multiplier: u64) -> Self {
        self.max_multiplier = Some(multiplier);
        self
    }
    pub fn rescale_strategy(mut self, strategy: RescaleStrategy) -> Self {
        self.rescale_strategy = Some(strategy);
        self
    }

    /// Builds the configuration, filling unset parameters with their defaults.
    pub fn build(self) -> Result<SolverConfig, ConfigError> {
        let zero_tolerance = self.zero_tolerance.unwrap_or(DEFAULT_ZERO_TOLERANCE);
        let integer_tolerance = self.integer_tolerance.unwrap_or(DEFAULT_INTEGER_TOLERANCE);
        let max_multiplier = self.max_multiplier.unwrap_or(DEFAULT_MAX_MULTIPLIER);

        check_tolerance("zero_tolerance", zero_tolerance)?;
        check_tolerance("integer_tolerance", integer_tolerance)?;
        if integer_tolerance >= 0.5 {
            return Err(ConfigError::InvalidParameter {
                name: "integer_tolerance",
                reason: format!("must be below 0.5, got {}", integer_tolerance),
            });
        }
        if max_multiplier == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_multiplier",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(SolverConfig {
            zero_tolerance,
            integer_tolerance,
            max_multiplier,
            rescale_strategy: self.rescale_strategy.unwrap_or_default(),
        })
    }
}

fn check_tolerance(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be a positive finite number, got {}", value),
        })
    }
}
