use std::fmt;

/// Boxed collaborator failure, propagated unmodified through the batch.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Fatal configuration errors: the caller must change the run setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A feature's output shape varies between runs without the feature
    /// being declared adaptive.
    UndeclaredAdaptive(String),
    /// Interpolation was requested for an output dimensionality it does not
    /// support.
    UnsupportedDimension { feature: String, ndim: usize },
    /// Neither the feature nor the model produced a usable time axis for
    /// resampling.
    NoUsableTimeAxis(String),
    /// An adaptive run carried no interpolation object for a valid output.
    MissingInterpolator(String),
    /// Node matrix rows do not match the named uncertain parameters.
    NodeArity { rows: usize, names: usize },
    /// Node matrix data does not fill the declared dimensions.
    NodeShape { expected: usize, found: usize },
    /// The node matrix contains no runs.
    EmptyNodes,
    /// The worker pool could not be constructed.
    ThreadPool(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UndeclaredAdaptive(feature) => write!(
                f,
                "{feature}: the number of points varies between runs; \
                 declare {feature} as adaptive in the run configuration"
            ),
            ConfigError::UnsupportedDimension { feature, ndim } => {
                write!(f, "{feature}: no support for {ndim}-D interpolation")
            }
            ConfigError::NoUsableTimeAxis(feature) => write!(
                f,
                "{feature}: neither the feature nor the model has time values \
                 to use in interpolation"
            ),
            ConfigError::MissingInterpolator(feature) => write!(
                f,
                "{feature}: adaptive run produced no interpolation object"
            ),
            ConfigError::NodeArity { rows, names } => write!(
                f,
                "node matrix has {rows} parameter rows but {names} uncertain \
                 parameters were named"
            ),
            ConfigError::NodeShape { expected, found } => write!(
                f,
                "node matrix holds {found} values but its dimensions require {expected}"
            ),
            ConfigError::EmptyNodes => write!(f, "node matrix contains no runs"),
            ConfigError::ThreadPool(msg) => write!(f, "failed to build worker pool: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A model or feature collaborator raised during a run; fatal to the whole
/// batch, no retry at this layer.
#[derive(Debug)]
pub enum EvaluateError {
    Model { name: String, source: BoxError },
    Feature { name: String, source: BoxError },
}

impl fmt::Display for EvaluateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluateError::Model { name, source } => {
                write!(f, "model {name} failed during evaluation: {source}")
            }
            EvaluateError::Feature { name, source } => {
                write!(f, "feature {name} failed during evaluation: {source}")
            }
        }
    }
}

impl std::error::Error for EvaluateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvaluateError::Model { source, .. } | EvaluateError::Feature { source, .. } => {
                Some(source.as_ref())
            }
        }
    }
}

/// Errors constructing an interpolation object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolateError {
    TooFewPoints(usize),
    LengthMismatch { times: usize, values: usize },
}

impl fmt::Display for InterpolateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpolateError::TooFewPoints(n) => {
                write!(f, "interpolation requires at least 2 points, got {n}")
            }
            InterpolateError::LengthMismatch { times, values } => write!(
                f,
                "time axis has {times} points but output has {values} values"
            ),
        }
    }
}

impl std::error::Error for InterpolateError {}

/// Top-level error for a quantification run.
#[derive(Debug)]
pub enum RunError {
    Config(ConfigError),
    Evaluate(EvaluateError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Config(e) => write!(f, "{e}"),
            RunError::Evaluate(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Config(e) => Some(e),
            RunError::Evaluate(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(err: ConfigError) -> Self {
        RunError::Config(err)
    }
}

impl From<EvaluateError> for RunError {
    fn from(err: EvaluateError) -> Self {
        RunError::Evaluate(err)
    }
}
