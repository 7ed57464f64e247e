//! Sans-IO environment abstraction for the radar fusion core.
//!
//! Production code and the deterministic test harness both implement these
//! traits; the cycle orchestrator in `radard` depends only on them, never on
//! a concrete clock, parameter daemon, or message bus.

mod clock;
mod error;
mod messages;
mod params;

pub use clock::{Clock, SystemClock, VirtualClock};
pub use error::EnvError;
pub use messages::{
    CarStateMsg, CycleSnapshot, LaneLineMsg, LateralPlanMsg, LiveTrackEntry, MessageSource,
    ModelV2Msg, MonoTimes, RadarData, RadarPoint, VisionLeadMsg,
};
pub use params::{CarParams, InMemoryParamStore, ParamStore};
