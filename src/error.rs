use std::fmt::Display;

/// Errors raised while configuring or running a fixed grid integration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ODEError {
    #[error("a fixed grid needs at least 2 points (got {num_grids})")]
    InvalidGrid { num_grids: usize },

    #[error("integration bounds must be finite (got {start} to {end})")]
    InvalidTime { start: String, end: String },

    #[error("phase point arity mismatch: expected {expected} components, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("phase point kind mismatch: expected a {expected} state, found a {found} state")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown step method '{0}' (expected one of euler, rk2, heun, rk4)")]
    UnknownMethod(String),

    #[error("cannot stack an empty trajectory")]
    EmptyTrajectory,

    #[error("shape error: {0}")]
    Shape(String),

    #[error("vector field evaluation failed: {0}")]
    VectorField(String),
}

impl ODEError {
    pub fn invalid_time<T: Display>(start: T, end: T) -> Self {
        ODEError::InvalidTime {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// Wraps a failure reported by a user supplied vector field
    pub fn vector_field<E: Display>(err: E) -> Self {
        ODEError::VectorField(err.to_string())
    }
}

impl From<ndarray::ShapeError> for ODEError {
    fn from(err: ndarray::ShapeError) -> Self {
        ODEError::Shape(err.to_string())
    }
}
