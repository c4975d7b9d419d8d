//! Error types. Each subsystem has its own enum; [`CompassError`] folds them
//! together for `?` propagation across crate boundaries.

mod config_error;
mod graph_error;
mod storage_error;

pub use config_error::ConfigError;
pub use graph_error::GraphError;
pub use storage_error::StorageError;

/// Top-level error for the Compass workspace.
#[derive(Debug, thiserror::Error)]
pub enum CompassError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("unknown adaptation action: {name}")]
    UnknownAction { name: String },
}

/// Result alias used throughout the workspace.
pub type CompassResult<T> = Result<T, CompassError>;
