//! Error types for the environment abstraction layer.

use thiserror::Error;

/// Errors surfaced by the Sans-IO capabilities (clock, parameter store,
/// message bus) that the production and test implementations share.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The parameter store has no value for this key.
    #[error("missing parameter: {0}")]
    MissingParam(String),

    /// The parameter value could not be interpreted as the expected type.
    #[error("malformed parameter {key}: {reason}")]
    MalformedParam { key: String, reason: String },

    /// Reading `CarParams` at startup failed, or it named an unsupported car.
    #[error("car params error: {0}")]
    CarParams(String),

    /// The message bus failed to deliver a batch of frames.
    #[error("bus error: {0}")]
    Bus(String),
}
