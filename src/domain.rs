//! Domain sequence construction
//!
//! Builds the independent-variable axis of a measurement: an evenly spaced
//! grid, optionally floored to integers and jittered to look hand-set.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::noise::{perturb, NoiseFactor};
use crate::LabgenError;

/// `count` evenly spaced values from `start` to `stop`, both included
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut grid: Vec<f64> = (0..count).map(|idx| start + step * idx as f64).collect();
            grid[count - 1] = stop;
            grid
        }
    }
}

/// Round every value toward negative infinity, as an integer-typed grid does
pub fn floor(values: &mut [f64]) {
    for value in values.iter_mut() {
        *value = value.floor();
    }
}

/// Perturb every value with bounded uniform noise
pub fn jitter<R: Rng + ?Sized>(values: &mut [f64], factor: NoiseFactor, rng: &mut R) {
    perturb(values, factor, rng);
}

/// Configured measurement axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSpec {
    pub start: f64,
    pub stop: f64,
    pub count: usize,
    /// Setting error added to each grid point
    #[serde(default)]
    pub jitter: NoiseFactor,
    /// Floor grid points to integers before jittering
    #[serde(default)]
    pub integer: bool,
}

impl DomainSpec {
    pub fn new(start: f64, stop: f64, count: usize) -> Self {
        Self {
            start,
            stop,
            count,
            jitter: NoiseFactor::ZERO,
            integer: false,
        }
    }

    pub fn with_jitter(mut self, jitter: NoiseFactor) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn integer(mut self) -> Self {
        self.integer = true;
        self
    }

    pub fn validate(&self) -> Result<(), LabgenError> {
        if !self.start.is_finite() || !self.stop.is_finite() {
            return Err(LabgenError::InvalidArgument(
                "domain start and stop must be finite".to_string(),
            ));
        }
        if self.count == 0 {
            return Err(LabgenError::InvalidArgument(
                "domain count must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        let mut grid = linspace(self.start, self.stop, self.count);
        if self.integer {
            floor(&mut grid);
        }
        jitter(&mut grid, self.jitter, rng);
        grid
    }
}
