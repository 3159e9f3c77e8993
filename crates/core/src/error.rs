//! Engine error type.

use thiserror::Error;

/// Errors surfaced at the engine's API boundary.
///
/// Engine state is never modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A caller passed a value the engine cannot interpret (unknown direction,
    /// unsupported board size, malformed prepared board).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
