use chembal::engine::config::{
    DEFAULT_INTEGER_TOLERANCE, DEFAULT_MAX_MULTIPLIER, DEFAULT_ZERO_TOLERANCE, RescaleStrategy,
};

pub struct DefaultsConfig {
    pub zero_tolerance: f64,
    pub integer_tolerance: f64,
    pub max_multiplier: u64,
    pub rescale_strategy: RescaleStrategy,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
            integer_tolerance: DEFAULT_INTEGER_TOLERANCE,
            max_multiplier: DEFAULT_MAX_MULTIPLIER,
            rescale_strategy: RescaleStrategy::LeastCommonMultiple,
        }
    }
}
