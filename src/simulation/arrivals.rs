//! Random vehicle arrivals

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::error::{SimError, SimResult};

/// Yields `true` with a fixed probability, once per lane per time step
#[derive(Debug, Clone)]
pub struct BooleanSource {
    probability: f64,
    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,
}

impl BooleanSource {
    pub fn new(probability: f64) -> SimResult<Self> {
        Self::check_probability(probability)?;
        Ok(Self {
            probability,
            rng: None,
        })
    }

    /// Create a source with a seeded RNG for reproducible simulations
    pub fn with_seed(probability: f64, seed: u64) -> SimResult<Self> {
        Self::check_probability(probability)?;
        Ok(Self {
            probability,
            rng: Some(StdRng::seed_from_u64(seed)),
        })
    }

    fn check_probability(probability: f64) -> SimResult<()> {
        if probability > 0.0 && probability <= 1.0 {
            Ok(())
        } else {
            Err(SimError::invalid(format!(
                "arrival probability must be in (0, 1], got {probability}"
            )))
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn set_probability(&mut self, probability: f64) -> SimResult<()> {
        Self::check_probability(probability)?;
        self.probability = probability;
        Ok(())
    }

    /// Whether an arrival happens this time
    pub fn occurs(&mut self) -> bool {
        match &mut self.rng {
            Some(rng) => rng.random_bool(self.probability),
            None => rand::rng().random_bool(self.probability),
        }
    }
}
