//! Route planner configuration.

/// Configuration parameters for route planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Reject graphs containing negative or non-finite edge weights.
    /// When off, such weights give unspecified (but non-panicking) results.
    pub validate_weights: bool,

    /// Log every computed route at debug level.
    pub log_routes: bool,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(validate_weights: bool, log_routes: bool) -> Self {
        Self {
            validate_weights,
            log_routes,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            validate_weights: true,
            log_routes: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();
        assert!(config.validate_weights);
        assert!(!config.log_routes);
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(false, true);
        assert!(!config.validate_weights);
        assert!(config.log_routes);
    }
}
