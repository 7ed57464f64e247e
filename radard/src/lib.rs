//! Cycle orchestrator for the radar/vision lead-fusion core.
//!
//! Wires the pure engines in `radar_core` to the Sans-IO capabilities in
//! `radar_env`: pacing (`ratekeeper`), the per-cycle state machine
//! (`orchestrator`), and a scripted message source for tests (`harness`).

pub mod harness;
pub mod orchestrator;
pub mod ratekeeper;

pub use orchestrator::{RadarD, RadarStateMsg};
pub use ratekeeper::RateKeeper;
