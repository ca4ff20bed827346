use super::config::{RescaleStrategy, SolverConfig};
use malachite::num::arithmetic::traits::{CheckedLcm, Gcd};
use tracing::{trace, warn};

/// Converts a floating-point solution vector into whole numbers.
///
/// The returned values are integral `f64`s with the signs of `raw`. With
/// [`RescaleStrategy::LeastCommonMultiple`] they share no common factor
/// greater than one.
///
/// Entries for which no multiplier up to `config.max_multiplier` produces an
/// integer do not constrain the scale; the result is then a best-effort
/// rounding rather than an error.
pub fn rescale(raw: &[f64], config: &SolverConfig) -> Vec<f64> {
    let scale = scale_factor(raw, config);
    let scaled: Vec<f64> = raw.iter().map(|v| (v * scale as f64).round()).collect();

    let result = match config.rescale_strategy {
        RescaleStrategy::LeastCommonMultiple => reduce_common_factor(scaled),
        RescaleStrategy::LargestMultiplier => scaled,
    };
    trace!(?raw, scale, ?result, "Rescaled coefficients.");
    result
}

/// The multiplier `rescale` applies to `raw` before rounding.
pub fn scale_factor(raw: &[f64], config: &SolverConfig) -> u64 {
    let tolerance = config.integer_tolerance;
    let mut scale: u64 = 1;

    for &value in raw {
        if is_integral(value, tolerance) {
            continue;
        }
        match config.rescale_strategy {
            RescaleStrategy::LeastCommonMultiple => {
                let Some(denominator) = smallest_multiplier(value, 1, config) else {
                    warn!(value, "No integer multiplier found within the search bound.");
                    continue;
                };
                match scale.checked_lcm(denominator) {
                    Some(combined) => scale = combined,
                    None => warn!(scale, denominator, "Common multiple overflowed, keeping scale."),
                }
            }
            RescaleStrategy::LargestMultiplier => {
                if scale > config.max_multiplier {
                    continue;
                }
                match smallest_multiplier(value, scale, config) {
                    Some(multiplier) => scale = multiplier,
                    None => warn!(value, "No integer multiplier found within the search bound."),
                }
            }
        }
    }

    scale
}

/// Smallest `k` in `start..=max_multiplier` such that `value * k` is integral.
fn smallest_multiplier(value: f64, start: u64, config: &SolverConfig) -> Option<u64> {
    (start..=config.max_multiplier)
        .find(|&k| is_integral(value * k as f64, config.integer_tolerance))
}

fn is_integral(value: f64, tolerance: f64) -> bool {
    (value - value.round()).abs() <= tolerance
}

fn reduce_common_factor(values: Vec<f64>) -> Vec<f64> {
    let divisor = values
        .iter()
        .map(|v| v.abs() as u64)
        .fold(0u64, |acc, v| acc.gcd(v));
    if divisor <= 1 {
        return values;
    }
    values.into_iter().map(|v| v / divisor as f64).collect()
}
