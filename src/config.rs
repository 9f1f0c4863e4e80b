//! Configuration parameters for the local search.

use crate::moves::OperatorKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

/// Configuration settings for the threshold-accepting local search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wall-clock budget of the whole search
    pub time_limit: Duration,
    /// Time without incumbent improvement before the schedule is reset
    pub stagnation_window: Duration,
    /// Candidates requested per operator once multi-move mode is on
    pub neighborhood_size: usize,
    /// Tolerance below which multi-move mode is switched on
    pub multi_move_threshold: f64,
    /// Lower bound of the acceptance tolerance
    pub min_tolerance: f64,
    /// Largest power of ten used as initial tolerance
    pub max_tolerance_exponent: u32,
    /// Operators in the order they are queried
    pub operators: Vec<OperatorKind>,
    /// Offset added to every operator's base seed
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            time_limit: Duration::from_secs(295),
            stagnation_window: Duration::from_secs(10),
            neighborhood_size: 10,
            multi_move_threshold: 10.0,
            min_tolerance: 0.5,
            max_tolerance_exponent: 3,
            operators: OperatorKind::default_roster(),
            seed: 0,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Set the time limit.
    pub fn with_time_limit(mut self, duration: Duration) -> Self {
        self.time_limit = duration;
        self
    }

    /// Set the stagnation window.
    pub fn with_stagnation_window(mut self, duration: Duration) -> Self {
        self.stagnation_window = duration;
        self
    }

    /// Set the number of candidates per operator in multi-move mode.
    pub fn with_neighborhood_size(mut self, size: usize) -> Self {
        self.neighborhood_size = size;
        self
    }

    /// Set the tolerance threshold that enables multi-move mode.
    pub fn with_multi_move_threshold(mut self, threshold: f64) -> Self {
        self.multi_move_threshold = threshold;
        self
    }

    /// Set the minimum tolerance.
    pub fn with_min_tolerance(mut self, tolerance: f64) -> Self {
        self.min_tolerance = tolerance;
        self
    }

    /// Set the largest initial tolerance exponent.
    pub fn with_max_tolerance_exponent(mut self, exponent: u32) -> Self {
        self.max_tolerance_exponent = exponent;
        self
    }

    /// Set the operator roster.
    pub fn with_operators(mut self, operators: Vec<OperatorKind>) -> Self {
        self.operators = operators;
        self
    }

    /// Set the seed offset.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
