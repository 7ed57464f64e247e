//! Error types for the radar fusion core.

use thiserror::Error;

/// Configuration-fatal errors raised while constructing core engines.
///
/// These are only ever returned at startup (see the orchestrator in `radard`);
/// a running cycle never produces one.
#[derive(Debug, Error)]
pub enum RadarCoreError {
    /// The radar cycle period fell outside the supported Kalman gain table range.
    #[error("radar cycle period {dt}s out of supported range (0.01, 0.20)")]
    CyclePeriodOutOfRange { dt: f64 },
}
