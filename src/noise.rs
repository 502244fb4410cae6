//! Bounded uniform noise injection
//!
//! A noise factor `f` is the half-width of a symmetric uniform band: each
//! perturbed value receives an independent draw from `[-f, f]`.

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use crate::LabgenError;

/// Validated, non-negative noise half-width
///
/// The default is zero, which leaves values untouched and draws nothing from
/// the random source.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct NoiseFactor(f64);

impl NoiseFactor {
    /// No perturbation
    pub const ZERO: NoiseFactor = NoiseFactor(0.0);

    /// Largest accepted half-width; the uniform sampler scales the band width
    /// `2f` by slightly more than one, which must stay finite
    pub const MAX: f64 = f64::MAX / 4.0;

    /// Create a noise factor, rejecting negative and non-finite values and
    /// anything above [`NoiseFactor::MAX`]
    pub fn new(factor: f64) -> Result<Self, LabgenError> {
        if !factor.is_finite() {
            return Err(LabgenError::InvalidArgument(format!(
                "noise factor must be finite, got {factor}"
            )));
        }
        if factor < 0.0 {
            return Err(LabgenError::InvalidArgument(format!(
                "noise factor must be non-negative, got {factor}"
            )));
        }
        if factor > Self::MAX {
            return Err(LabgenError::InvalidArgument(format!(
                "noise factor must not exceed {}, got {factor}",
                Self::MAX
            )));
        }
        // Normalises -0.0
        Ok(Self(factor.abs()))
    }

    /// Built-in presets; `factor` must already be finite and non-negative
    pub(crate) const fn from_literal(factor: f64) -> Self {
        Self(factor)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Uniform distribution over `[-f, f]`, or `None` for a zero factor
    fn distribution(self) -> Option<Uniform<f64>> {
        if self.is_zero() {
            None
        } else {
            Some(Uniform::new_inclusive(-self.0, self.0))
        }
    }
}

impl TryFrom<f64> for NoiseFactor {
    type Error = LabgenError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NoiseFactor> for f64 {
    fn from(noise: NoiseFactor) -> Self {
        noise.0
    }
}

/// Add an independent uniform draw to every value in place
///
/// With a zero factor this is a no-op and the random source does not advance.
pub fn perturb<R: Rng + ?Sized>(values: &mut [f64], noise: NoiseFactor, rng: &mut R) {
    let Some(dist) = noise.distribution() else {
        return;
    };
    for value in values.iter_mut() {
        *value += dist.sample(rng);
    }
}
