//! Configuration for duality resolution.

use hf_dice::RngAlgorithm;

/// Lowest difficulty accepted unless configured otherwise.
pub const DEFAULT_MIN_DIFFICULTY: i32 = 0;

/// Tunable bounds and defaults for duality resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesConfig {
    /// Lowest accepted difficulty (inclusive).
    pub min_difficulty: i32,
    /// Highest accepted difficulty (inclusive). `None` = unbounded.
    pub max_difficulty: Option<i32>,
    /// Algorithm used for rolls whose directive does not name one.
    pub rng_algorithm: RngAlgorithm,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            min_difficulty: DEFAULT_MIN_DIFFICULTY,
            max_difficulty: None,
            rng_algorithm: RngAlgorithm::default(),
        }
    }
}

impl RulesConfig {
    /// Set the lowest accepted difficulty.
    pub fn with_min_difficulty(mut self, min: i32) -> Self {
        self.min_difficulty = min;
        self
    }

    /// Set the highest accepted difficulty.
    pub fn with_max_difficulty(mut self, max: Option<i32>) -> Self {
        self.max_difficulty = max;
        self
    }

    /// Set the default RNG algorithm.
    pub fn with_rng_algorithm(mut self, algorithm: RngAlgorithm) -> Self {
        self.rng_algorithm = algorithm;
        self
    }

    /// Returns true if `difficulty` lies within the configured bounds.
    pub fn accepts_difficulty(&self, difficulty: i32) -> bool {
        difficulty >= self.min_difficulty && self.max_difficulty.is_none_or(|max| difficulty <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = RulesConfig::default();
        assert_eq!(cfg.min_difficulty, 0);
        assert_eq!(cfg.max_difficulty, None);
        assert_eq!(cfg.rng_algorithm, RngAlgorithm::ChaCha8V1);
    }

    #[test]
    fn builder_methods() {
        let cfg = RulesConfig::default()
            .with_min_difficulty(5)
            .with_max_difficulty(Some(30));
        assert_eq!(cfg.min_difficulty, 5);
        assert_eq!(cfg.max_difficulty, Some(30));
    }

    #[test]
    fn difficulty_bounds() {
        let cfg = RulesConfig::default();
        assert!(cfg.accepts_difficulty(0));
        assert!(cfg.accepts_difficulty(i32::MAX));
        assert!(!cfg.accepts_difficulty(-1));

        let cfg = cfg.with_min_difficulty(5).with_max_difficulty(Some(30));
        assert!(!cfg.accepts_difficulty(4));
        assert!(cfg.accepts_difficulty(5));
        assert!(cfg.accepts_difficulty(30));
        assert!(!cfg.accepts_difficulty(31));
    }
}
