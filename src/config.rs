use crate::{level::GeometricLevels, Error, Result};

/// Upper bound accepted for [`Config::max_level`].
///
/// With the geometric level distribution, a list would need on the order of
/// `(1 / p)^64` entries before it could profit from more levels.
pub const MAX_LEVEL_LIMIT: usize = 64;

/// Default maximum level, enough for ~65k entries at `p = 0.5` before the
/// top level becomes crowded.
pub const DEFAULT_MAX_LEVEL: usize = 16;

/// Default level probability.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Skip list configuration builder
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Upper bound of any node's level
    ///
    /// Once the list is constructed, the maximum level is fixed.
    pub max_level: usize,

    /// Probability that a new node stops growing at its current level
    pub probability: f64,

    /// Seed of the level generator
    ///
    /// If `None`, the generator is seeded from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}

impl Config {
    /// Initializes a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum level a node can be assigned.
    ///
    /// Must be in `1..=MAX_LEVEL_LIMIT`.
    ///
    /// Defaults to 16.
    #[must_use]
    pub fn max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    /// Sets the level probability.
    ///
    /// Lower values produce taller towers and fewer nodes per level.
    /// Must be inside the open interval (0, 1).
    ///
    /// Defaults to 0.5.
    #[must_use]
    pub fn probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Seeds the level generator, making the list's shape reproducible.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the config for contract violations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMaxLevel`] or [`Error::InvalidProbability`].
    pub fn validate(&self) -> Result<()> {
        validate_params(self.max_level, self.probability)
    }

    pub(crate) fn level_generator(&self) -> Result<GeometricLevels> {
        match self.seed {
            Some(seed) => GeometricLevels::seeded(self.max_level, self.probability, seed),
            None => GeometricLevels::new(self.max_level, self.probability),
        }
    }
}

pub(crate) fn validate_max_level(max_level: usize) -> Result<()> {
    if max_level == 0 || max_level > MAX_LEVEL_LIMIT {
        return Err(Error::InvalidMaxLevel(max_level));
    }
    Ok(())
}

pub(crate) fn validate_params(max_level: usize, probability: f64) -> Result<()> {
    validate_max_level(max_level)?;

    // NaN fails both comparisons
    if !(probability > 0.0 && probability < 1.0) {
        return Err(Error::InvalidProbability(probability));
    }

    Ok(())
}

#[cfg(test)]
mod config_test {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = Config::new().max_level(32).probability(0.25).seed(7);

        assert_eq!(config.max_level, 32);
        assert_eq!(config.probability, 0.25);
        assert_eq!(config.seed, Some(7));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_max_level() {
        assert_eq!(
            Config::new().max_level(0).validate(),
            Err(Error::InvalidMaxLevel(0))
        );
        assert_eq!(
            Config::new().max_level(MAX_LEVEL_LIMIT + 1).validate(),
            Err(Error::InvalidMaxLevel(MAX_LEVEL_LIMIT + 1))
        );
        assert!(Config::new().max_level(MAX_LEVEL_LIMIT).validate().is_ok());
        assert!(Config::new().max_level(1).validate().is_ok());
    }

    #[test]
    fn test_invalid_probability() {
        for p in [0.0, 1.0, -0.5, 1.5, f64::INFINITY] {
            assert_eq!(
                Config::new().probability(p).validate(),
                Err(Error::InvalidProbability(p))
            );
        }

        assert!(matches!(
            Config::new().probability(f64::NAN).validate(),
            Err(Error::InvalidProbability(_))
        ));
    }
}
