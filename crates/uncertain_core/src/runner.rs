//! Caller-facing entry point tying dispatch, regularization and assembly
//! together.

use crate::assemble::assemble_results;
use crate::config::RunConfig;
use crate::dispatch::{DispatchProgress, Nodes, build_parameter_sets, evaluate_nodes};
use crate::error::RunError;
use crate::evaluate::{Feature, Model};
use crate::model::{EnsembleData, Parameters};

/// Evaluates a model and its features across an ensemble of sampled
/// parameter sets and assembles the results into an [`EnsembleData`]
/// container.
pub struct EnsembleRunner<M: Model> {
    model: M,
    features: Vec<Box<dyn Feature>>,
    parameters: Parameters,
    config: RunConfig,
    progress: Option<DispatchProgress>,
}

impl<M: Model> EnsembleRunner<M> {
    pub fn new(model: M, parameters: Parameters) -> Self {
        Self {
            model,
            features: Vec::new(),
            parameters,
            config: RunConfig::default(),
            progress: None,
        }
    }

    #[must_use]
    pub fn with_feature(mut self, feature: impl Feature + 'static) -> Self {
        self.features.push(Box::new(feature));
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach a progress tracker. The caller keeps a clone and polls it
    /// while `run` blocks.
    #[must_use]
    pub fn with_progress(mut self, progress: DispatchProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Evaluate the model and all features for every column of `nodes` and
    /// assemble the uniform result container.
    ///
    /// `uncertain_parameters` names the sampled parameters, one per node
    /// row; a single name is accepted as shorthand for a one-element list.
    pub fn run(
        &self,
        nodes: &Nodes,
        uncertain_parameters: impl IntoNames,
    ) -> Result<EnsembleData, RunError> {
        let uncertain = uncertain_parameters.into_names();

        let parameter_sets = build_parameter_sets(nodes, &uncertain, &self.parameters)?;
        let records = evaluate_nodes(
            &self.model,
            &self.features,
            &self.config,
            &parameter_sets,
            self.progress.as_ref(),
        )?;
        let data = assemble_results(&self.model, &self.config, records, uncertain)?;

        Ok(data)
    }
}

/// Accepts a single parameter name as shorthand for a one-element list.
pub trait IntoNames {
    fn into_names(self) -> Vec<String>;
}

impl IntoNames for &str {
    fn into_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoNames for String {
    fn into_names(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoNames for Vec<String> {
    fn into_names(self) -> Vec<String> {
        self
    }
}

impl IntoNames for &[String] {
    fn into_names(self) -> Vec<String> {
        self.to_vec()
    }
}

impl IntoNames for &[&str] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(|&name| name.to_string()).collect()
    }
}

impl<const N: usize> IntoNames for [&str; N] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(|&name| name.to_string()).collect()
    }
}
