//! Error types. All fallible operations return [`ScmResult`].

mod config_error;
mod graph_error;

pub use config_error::ConfigError;
pub use graph_error::GraphError;

/// Top-level error for the covariance engine.
///
/// Every variant is a precondition failure: the computations are
/// deterministic, so none of these are worth retrying.
#[derive(Debug, thiserror::Error)]
pub enum ScmError {
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("singular model: {reason}")]
    SingularModel { reason: String },

    #[error("uninitialized state: {operation} requires {required} to run first")]
    UninitializedState {
        operation: &'static str,
        required: &'static str,
    },

    #[error("unknown symbol: {symbol}")]
    UnknownSymbol { symbol: String },

    #[error("no value bound for symbol {symbol}")]
    UnboundSymbol { symbol: String },

    #[error("integer coefficient overflow in polynomial {operation}")]
    CoefficientOverflow { operation: &'static str },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("graph error: {0}")]
    GraphError(#[from] GraphError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the workspace.
pub type ScmResult<T> = Result<T, ScmError>;
