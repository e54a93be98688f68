//! Fan-out of parameter sets to a bounded worker pool.
//!
//! Each unit of work is one parameter set; workers share nothing but the
//! read-only model and feature collaborators. Results are collected in
//! strict submission order regardless of worker completion order, because
//! downstream stages zip records positionally with the sample columns.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::debug;

use crate::config::RunConfig;
use crate::error::{ConfigError, RunError};
use crate::evaluate::{Feature, Model, evaluate_single};
use crate::graphics::GraphicsSuppression;
use crate::model::{ParameterSet, Parameters, RunRecord};

/// Progress tracking for one dispatch round.
///
/// Counters are shared atomics, so a caller can hold a clone and poll while
/// the dispatch call blocks. Observation never alters result ordering.
#[derive(Debug, Clone)]
pub struct DispatchProgress {
    completed: Arc<AtomicUsize>,
    total: Arc<AtomicUsize>,
}

impl DispatchProgress {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            completed: Arc::new(AtomicUsize::new(0)),
            total: Arc::new(AtomicUsize::new(total)),
        }
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// Completed fraction in [0, 1]; zero when the total is unknown.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.completed() as f64 / total as f64
        }
    }

    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reset(&self, total: usize) {
        self.completed.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }
}

impl Default for DispatchProgress {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Sample matrix: one row per uncertain parameter, one column per run.
#[derive(Debug, Clone, PartialEq)]
pub struct Nodes {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Nodes {
    /// Build from row-major data with `rows` parameters and `cols` runs.
    pub fn matrix(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, ConfigError> {
        if data.len() != rows * cols {
            return Err(ConfigError::NodeShape {
                expected: rows * cols,
                found: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Samples for a single uncertain parameter, one value per run.
    #[must_use]
    pub fn vector(values: Vec<f64>) -> Self {
        Self {
            rows: 1,
            cols: values.len(),
            data: values,
        }
    }

    /// A degenerate zero-dimensional sample: one parameter, one run.
    #[must_use]
    pub fn scalar(value: f64) -> Self {
        Self::vector(vec![value])
    }

    /// Number of runs (columns).
    #[must_use]
    pub fn runs(&self) -> usize {
        self.cols
    }

    /// Number of uncertain parameters (rows).
    #[must_use]
    pub fn parameters(&self) -> usize {
        self.rows
    }

    /// Gather one run's column of parameter values.
    #[must_use]
    pub fn column(&self, run: usize) -> Vec<f64> {
        (0..self.rows)
            .map(|row| self.data[row * self.cols + run])
            .collect()
    }
}

/// Overlay each sample column onto the declared defaults, one parameter
/// set per run, in column order.
pub fn build_parameter_sets(
    nodes: &Nodes,
    uncertain: &[String],
    defaults: &Parameters,
) -> Result<Vec<ParameterSet>, ConfigError> {
    if nodes.parameters() != uncertain.len() {
        return Err(ConfigError::NodeArity {
            rows: nodes.parameters(),
            names: uncertain.len(),
        });
    }
    if nodes.runs() == 0 {
        return Err(ConfigError::EmptyNodes);
    }

    Ok((0..nodes.runs())
        .map(|run| ParameterSet::overlay(&nodes.column(run), uncertain, defaults))
        .collect())
}

/// Evaluate every parameter set on the worker pool and return the records
/// in submission order. The first collaborator error aborts the batch.
pub fn evaluate_nodes(
    model: &dyn Model,
    features: &[Box<dyn Feature>],
    config: &RunConfig,
    parameter_sets: &[ParameterSet],
    progress: Option<&DispatchProgress>,
) -> Result<Vec<RunRecord>, RunError> {
    let _guard = config
        .suppress_graphics
        .then(GraphicsSuppression::acquire);

    if let Some(p) = progress {
        p.reset(parameter_sets.len());
    }

    debug!(
        runs = parameter_sets.len(),
        workers = config.workers,
        model = model.name(),
        "dispatching ensemble evaluation"
    );

    let records = run_pool(model, features, config, parameter_sets, progress)?;

    debug!(runs = records.len(), "ensemble evaluation complete");
    Ok(records)
}

#[cfg(feature = "parallel")]
fn run_pool(
    model: &dyn Model,
    features: &[Box<dyn Feature>],
    config: &RunConfig,
    parameter_sets: &[ParameterSet],
    progress: Option<&DispatchProgress>,
) -> Result<Vec<RunRecord>, RunError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()
        .map_err(|e| ConfigError::ThreadPool(e.to_string()))?;

    // Indexed fallible collect keeps records in submission order and
    // short-circuits on the first collaborator error.
    let records = pool.install(|| {
        parameter_sets
            .par_iter()
            .map(|parameters| {
                let record = evaluate_single(model, features, config, parameters);
                if let Some(p) = progress {
                    p.increment();
                }
                record
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    Ok(records)
}

#[cfg(not(feature = "parallel"))]
fn run_pool(
    model: &dyn Model,
    features: &[Box<dyn Feature>],
    config: &RunConfig,
    parameter_sets: &[ParameterSet],
    progress: Option<&DispatchProgress>,
) -> Result<Vec<RunRecord>, RunError> {
    let mut records = Vec::with_capacity(parameter_sets.len());
    for parameters in parameter_sets {
        records.push(evaluate_single(model, features, config, parameters)?);
        if let Some(p) = progress {
            p.increment();
        }
    }
    Ok(records)
}
