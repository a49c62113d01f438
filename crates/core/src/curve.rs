//! Piecewise-linear curves keyed by dungeon depth.
//!
//! A [`Curve`] is a sorted set of control points. Between two adjacent inputs
//! the output is linearly interpolated; outside the covered range the output is
//! clamped to the nearest end point. Curves are built once and then only read,
//! so a shared `&Curve` can be evaluated from any number of threads.

pub mod lerp;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use self::lerp::lerp_xy;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub input: f64,
    pub output: f64,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum CurveError {
    #[error("attempted to evaluate a curve with no points")]
    Empty,
    #[error("curve input must not be NaN")]
    NanInput,
    #[error("control point ({input}, {output}) is not finite")]
    NonFinitePoint { input: f64, output: f64 },
}

/// Ordered control points, always sorted ascending by input.
///
/// Points sharing an input are kept in insertion order. Evaluating exactly at
/// a shared input yields the first-inserted point's output; just above it the
/// last-inserted point becomes the left interpolation anchor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct Curve {
    points: Vec<ControlPoint>,
}

impl Curve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut curve = Self::new();
        for (input, output) in points {
            curve.add_point(input, output);
        }
        curve
    }

    /// Inserts a point after any existing points with an equal input.
    pub fn add_point(&mut self, input: f64, output: f64) {
        let index = self.points.partition_point(|point| point.input.total_cmp(&input).is_le());
        self.points.insert(index, ControlPoint { input, output });
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Checks that the curve can be evaluated for every non-NaN input.
    pub fn validate(&self) -> Result<(), CurveError> {
        if self.points.is_empty() {
            return Err(CurveError::Empty);
        }
        match self.points.iter().find(|p| !p.input.is_finite() || !p.output.is_finite()) {
            Some(point) => {
                Err(CurveError::NonFinitePoint { input: point.input, output: point.output })
            }
            None => Ok(()),
        }
    }

    pub fn evaluate(&self, n: f64) -> Result<f64, CurveError> {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return Err(CurveError::Empty);
        };
        if self.points.len() == 1 {
            return Ok(first.output);
        }
        if n.is_nan() {
            return Err(CurveError::NanInput);
        }
        if n <= first.input {
            return Ok(first.output);
        }
        if n > last.input {
            return Ok(last.output);
        }

        // first.input < n <= last.input, so the upper anchor has a predecessor
        // with a strictly smaller input.
        let upper = self.points.partition_point(|point| point.input < n);
        let high = self.points[upper];
        if high.input == n {
            return Ok(high.output);
        }
        let low = self.points[upper - 1];
        Ok(lerp_xy(low.input, high.input, low.output, high.output, n))
    }
}

impl From<Vec<(f64, f64)>> for Curve {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::from_points(points)
    }
}

impl From<Curve> for Vec<(f64, f64)> {
    fn from(curve: Curve) -> Self {
        curve.points.into_iter().map(|point| (point.input, point.output)).collect()
    }
}
