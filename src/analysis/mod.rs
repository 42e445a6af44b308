//! Solver options and stacking-sequence analysis

pub mod layup;

use serde::{Deserialize, Serialize};

pub use layup::analyze_layup;

/// Options for the laminate response solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverOptions {
    /// Largest accepted condition estimate of the diagonally scaled ABD
    /// matrix before the laminate is reported as singular
    pub condition_limit: f64,
    /// Enable logging of each solve
    pub log: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            condition_limit: 1e12,
            log: false,
        }
    }
}

impl SolverOptions {
    /// Set the condition limit
    pub fn with_condition_limit(mut self, limit: f64) -> Self {
        self.condition_limit = limit;
        self
    }

    /// Enable logging
    pub fn with_logging(mut self) -> Self {
        self.log = true;
        self
    }
}
