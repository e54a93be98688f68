//! Linear interpolation objects for adaptive runs.
//!
//! An [`Interpolator`] is built worker-side from one run's `(time, output)`
//! samples and later evaluated on the common time base chosen by the
//! aligner. Points beyond the sampled range are extrapolated linearly from
//! the nearest end segment, so a coarse run can be resampled onto a finer,
//! longer common axis without truncation.

use serde::{Deserialize, Serialize};

use crate::error::InterpolateError;

/// Piecewise-linear interpolant over one run's time samples.
///
/// Times are assumed to be in ascending order; this is the contract for
/// time axes throughout the engine and is not re-validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpolator {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl Interpolator {
    /// Build an interpolant from matching time and value samples.
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self, InterpolateError> {
        if times.len() != values.len() {
            return Err(InterpolateError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        if times.len() < 2 {
            return Err(InterpolateError::TooFewPoints(times.len()));
        }
        Ok(Self { times, values })
    }

    /// Number of sample points backing the interpolant.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Evaluate the interpolant at `x`.
    ///
    /// Inside the sampled range this is exact piecewise-linear
    /// interpolation; outside it the first or last segment's slope is
    /// extended.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        // Index of the segment [t[i], t[i+1]] containing x, clamped so the
        // end segments also serve extrapolation.
        let upper = self.times.partition_point(|&t| t < x);
        let i = upper.clamp(1, self.times.len() - 1) - 1;

        let (t0, t1) = (self.times[i], self.times[i + 1]);
        let (u0, u1) = (self.values[i], self.values[i + 1]);
        if t1 == t0 {
            return u0;
        }
        u0 + (x - t0) * (u1 - u0) / (t1 - t0)
    }

    /// Evaluate the interpolant at every point of `xs`.
    #[must_use]
    pub fn sample(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}
