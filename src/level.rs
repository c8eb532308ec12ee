//! Level assignment for newly inserted nodes.
//!
//! Every node occupies level 0. Each level above holds a random subset of the
//! level beneath it, which is what makes the expected search path logarithmic.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{config::validate_params, Result};

/// Picks the level (number of forward links) of a node about to be inserted.
pub trait LevelGenerator {
    /// The highest level this generator will ever return.
    fn max_level(&self) -> usize;

    /// Draws a level in `[1, self.max_level()]`.
    fn random_level(&mut self) -> usize;
}

/// Produces geometrically distributed levels.
///
/// Starting at level 1, a uniform sample in `[0, 1)` is drawn; as long as it is
/// at least `probability` and the maximum has not been reached, the level is
/// raised and another sample is drawn. The chance of level `k` is therefore
/// proportional to `(1 - p)^(k - 1) * p`, truncated at the maximum level.
///
/// The generator owns its RNG, seeded once on construction.
pub struct GeometricLevels {
    max_level: usize,
    probability: f64,
    rng: StdRng,
}

impl GeometricLevels {
    /// Creates a generator seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Fails if `max_level` is not in `1..=MAX_LEVEL_LIMIT` or `probability`
    /// is not in (0, 1).
    pub fn new(max_level: usize, probability: f64) -> Result<Self> {
        validate_params(max_level, probability)?;

        Ok(Self {
            max_level,
            probability,
            rng: StdRng::from_entropy(),
        })
    }

    /// Creates a generator with a fixed seed, so the drawn levels are reproducible.
    ///
    /// # Errors
    ///
    /// See [`GeometricLevels::new`].
    pub fn seeded(max_level: usize, probability: f64, seed: u64) -> Result<Self> {
        validate_params(max_level, probability)?;

        Ok(Self {
            max_level,
            probability,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl LevelGenerator for GeometricLevels {
    fn max_level(&self) -> usize {
        self.max_level
    }

    fn random_level(&mut self) -> usize {
        let mut level = 1;

        while level < self.max_level && self.rng.gen::<f64>() >= self.probability {
            level += 1;
        }

        level
    }
}

impl std::fmt::Debug for GeometricLevels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeometricLevels")
            .field("max_level", &self.max_level)
            .field("probability", &self.probability)
            .finish_non_exhaustive()
    }
}
