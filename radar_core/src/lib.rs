//! Radar/vision lead-fusion core.
//!
//! Pure engines only: Kalman smoothing of per-identifier radar tracks,
//! probabilistic vision-to-track association, and path-relative corridor
//! classification. No I/O — the cycle orchestrator in the `radard` binary
//! drives these engines against the message bus and parameter store.

pub mod error;
pub mod kalman;
pub mod lead;
pub mod path;
pub mod track;
pub mod vision;

pub use error::RadarCoreError;
pub use kalman::{KalmanParams, Kf1d};
pub use lead::{get_lead, LeadOutcome};
pub use path::{get_path_adjacent_leads, AdjacentLeads, LaneLine, ModelPath, PathLead};
pub use track::Track;
pub use vision::{lead_from_track, lead_from_vision, match_vision_to_track, LeadRecord, MixMode, VisionLead};
