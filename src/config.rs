//! Configuration management for cluster formation and population generation

use crate::error::ClusterError;
use std::ops::Range;

/// Default radius threshold for joining a seed's cluster
pub const DEFAULT_RADIUS: f64 = 250.0;

/// Weights of the head election score `alpha*energy - beta*meanDistance - gamma*load`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Reward for remaining energy
    pub alpha: f64,

    /// Penalty for mean distance to the other members
    pub beta: f64,

    /// Penalty for current load
    pub gamma: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            beta: 0.3,
            gamma: 0.2,
        }
    }
}

impl ScoreWeights {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    /// Weighted score of a candidate head
    pub fn score(&self, energy: f64, mean_distance: f64, load: f64) -> f64 {
        self.alpha * energy - self.beta * mean_distance - self.gamma * load
    }

    pub fn validate(&self) -> Result<(), ClusterError> {
        let weights = [self.alpha, self.beta, self.gamma];
        let well_formed = weights.iter().all(|w| w.is_finite() && *w >= 0.0);

        if !well_formed || weights.iter().sum::<f64>() <= 0.0 {
            return Err(ClusterError::InvalidWeights {
                alpha: self.alpha,
                beta: self.beta,
                gamma: self.gamma,
            });
        }

        Ok(())
    }
}

/// Configuration of a cluster formation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterConfig {
    /// Maximum seed-to-device distance for joining a cluster (inclusive)
    pub radius: f64,

    /// Head election weights
    pub weights: ScoreWeights,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            weights: ScoreWeights::default(),
        }
    }
}

impl ClusterConfig {
    /// Create a new configuration with custom values
    pub fn new(radius: f64, weights: ScoreWeights) -> Self {
        Self { radius, weights }
    }

    /// Reject configurations that cannot produce a meaningful partition
    pub fn validate(&self) -> Result<(), ClusterError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ClusterError::InvalidRadius(self.radius));
        }
        self.weights.validate()
    }
}

/// Parameters of the seeded synthetic device population
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of devices to create
    pub device_count: usize,

    /// RNG seed; the same seed always yields the same population
    pub seed: u64,

    /// Side length of the square area devices are placed in
    pub area: f64,

    pub energy: Range<f64>,
    pub load: Range<f64>,
    pub capacity: Range<u32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            device_count: 20,
            seed: 42,
            area: 1000.0,
            energy: 70.0..100.0,
            load: 0.0..50.0,
            capacity: 1000..3000,
        }
    }
}

impl GeneratorConfig {
    /// Default ranges with a custom population size and seed
    pub fn new(device_count: usize, seed: u64) -> Self {
        Self {
            device_count,
            seed,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ClusterError> {
        if !self.area.is_finite() || self.area <= 0.0 {
            return Err(ClusterError::InvalidGenerator(format!(
                "area must be finite and > 0, got {}",
                self.area
            )));
        }
        if !valid_float_range(&self.energy) {
            return Err(ClusterError::InvalidGenerator(format!(
                "energy range {:?} is empty",
                self.energy
            )));
        }
        if !valid_float_range(&self.load) {
            return Err(ClusterError::InvalidGenerator(format!(
                "load range {:?} is empty",
                self.load
            )));
        }
        if self.capacity.is_empty() || self.capacity.start == 0 {
            return Err(ClusterError::InvalidGenerator(format!(
                "capacity range {:?} must be non-empty and positive",
                self.capacity
            )));
        }
        Ok(())
    }
}

fn valid_float_range(range: &Range<f64>) -> bool {
    range.start.is_finite() && range.end.is_finite() && range.start < range.end
}
