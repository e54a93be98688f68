//! Value, shape and time-axis types shared by every pipeline stage.
//!
//! Model and feature collaborators report their output as a [`Signal`]:
//! either a concrete [`Values`] payload or an explicit invalid placeholder
//! carrying the shape the regularizer will widen to the ensemble's
//! reference. The time component travels separately as a [`TimeAxis`].

use serde::{Deserialize, Serialize};

/// Shape of a single run's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Scalar,
    OneDim(usize),
    /// Row-major 2-D output (rows, cols).
    TwoDim(usize, usize),
}

impl Shape {
    /// Number of dimensions: 0, 1 or 2.
    #[must_use]
    pub fn ndim(&self) -> usize {
        match self {
            Shape::Scalar => 0,
            Shape::OneDim(_) => 1,
            Shape::TwoDim(_, _) => 2,
        }
    }

    /// Total number of elements a value of this shape holds.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Shape::Scalar => 1,
            Shape::OneDim(n) => *n,
            Shape::TwoDim(rows, cols) => rows * cols,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A concrete numeric output: scalar, 1-D series, or row-major 2-D array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Values {
    Scalar(f64),
    OneDim(Vec<f64>),
    TwoDim {
        rows: usize,
        cols: usize,
        data: Vec<f64>,
    },
}

impl Values {
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Values::Scalar(_) => Shape::Scalar,
            Values::OneDim(v) => Shape::OneDim(v.len()),
            Values::TwoDim { rows, cols, .. } => Shape::TwoDim(*rows, *cols),
        }
    }

    /// Flatten into a freshly allocated row-major vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Values::Scalar(v) => vec![*v],
            Values::OneDim(v) => v.clone(),
            Values::TwoDim { data, .. } => data.clone(),
        }
    }
}

/// Output of one run: a concrete value or the sanctioned invalid placeholder.
///
/// `Invalid` is the collaborator's way of reporting a non-fatal per-run
/// problem (the quantity is undefined for this parameter set) without
/// aborting the batch. The carried [`Shape`] starts out as whatever the
/// collaborator produced (usually `Scalar`) and is rewritten by the
/// regularizer to match the valid entries of the ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Signal {
    Valid(Values),
    Invalid(Shape),
}

impl Signal {
    /// The canonical invalid placeholder as produced by collaborators.
    #[must_use]
    pub fn invalid() -> Self {
        Signal::Invalid(Shape::Scalar)
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Signal::Invalid(_))
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Signal::Valid(values) => values.shape(),
            Signal::Invalid(shape) => *shape,
        }
    }
}

/// Time component of one run's output.
///
/// `Missing` is the explicit "not applicable" marker: zero-dimensional
/// features have no time dependence, and failed runs produce no axis.
/// The regularizer replaces a `Missing` axis with a NaN-filled `Points`
/// of the ensemble's reference length when one exists, so lifting the
/// first run's axis into the container is always shape-correct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TimeAxis {
    Points(Vec<f64>),
    Missing,
}

impl TimeAxis {
    #[must_use]
    pub fn points(&self) -> Option<&[f64]> {
        match self {
            TimeAxis::Points(t) => Some(t),
            TimeAxis::Missing => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> Option<usize> {
        self.points().map(<[f64]>::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len().unwrap_or(0) == 0
    }

    /// True when this axis carries no usable time points: `Missing`, empty,
    /// or composed entirely of NaN (a regularized placeholder axis).
    #[must_use]
    pub fn is_unusable(&self) -> bool {
        match self {
            TimeAxis::Missing => true,
            TimeAxis::Points(t) => t.is_empty() || t.iter().all(|v| v.is_nan()),
        }
    }
}
