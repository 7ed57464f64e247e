//! Data contracts crossing the boundary between the core and its external
//! collaborators: the car-state/model/lateral-plan publishers, the
//! vendor radar interface, and the bus the orchestrator publishes onto.
//!
//! These are plain data — the actual transport (the inter-process message
//! bus) is an external collaborator and is not specified here.

use serde::{Deserialize, Serialize};

/// `carState` — only the field the core consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarStateMsg {
    pub v_ego: f64,
}

/// Wire shape of one `modelV2.leadsV3[]` entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VisionLeadMsg {
    pub x: f64,
    pub y: f64,
    pub v: f64,
    pub a: f64,
    pub x_std: f64,
    pub y_std: f64,
    pub v_std: f64,
    pub prob: f64,
}

/// One lane-line prediction sampled at fixed longitudinal stations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaneLineMsg {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// `modelV2` — only the fields the core consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelV2Msg {
    pub leads_v3: Vec<VisionLeadMsg>,
    pub lane_lines: [LaneLineMsg; 4],
    pub lane_line_probs: [f64; 4],
    pub position_x: Vec<f64>,
    pub position_y: Vec<f64>,
    pub temporal_pose_trans: Vec<f64>,
}

/// `lateralPlan` — only the field the core consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LateralPlanMsg {
    pub lane_width: f64,
}

/// One decoded radar return, produced by the external radar interface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarPoint {
    pub track_id: i64,
    pub d_rel: f64,
    pub y_rel: f64,
    pub v_rel: f64,
    pub measured: bool,
}

/// The external radar interface's decoded output for one cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadarData {
    pub points: Vec<RadarPoint>,
    pub errors: Vec<String>,
}

/// Mono timestamps of the upstream messages observed this cycle, used to
/// compute the output record's `mdMonoTime`/`carStateMonoTime` and freshness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonoTimes {
    pub car_state_mono_time: u64,
    pub md_mono_time: u64,
}

impl MonoTimes {
    pub fn max_secs(&self) -> f64 {
        self.car_state_mono_time.max(self.md_mono_time) as f64 * 1e-9
    }
}

/// One polled snapshot of the subscribed messages, as the orchestrator sees
/// them at the top of a cycle: which messages updated this cycle, their
/// contents, and whether every subscription's freshness check passed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleSnapshot {
    pub car_state_updated: bool,
    pub car_state: CarStateMsg,
    pub model_updated: bool,
    pub model: ModelV2Msg,
    pub lateral_plan: LateralPlanMsg,
    pub radar: RadarData,
    pub mono_times: MonoTimes,
    pub all_checks_pass: bool,
}

impl Default for CarStateMsg {
    fn default() -> Self {
        Self { v_ego: 0.0 }
    }
}

impl Default for LateralPlanMsg {
    fn default() -> Self {
        Self { lane_width: 3.6 }
    }
}

/// Capability for polling the subscribed upstream messages and the raw
/// radar transport once per cycle. The vendor radar decode and the bus
/// transport itself are external collaborators; this trait is the seam.
pub trait MessageSource: Send {
    fn poll(&mut self) -> CycleSnapshot;
}

/// `liveTracks` — debug dump of all live tracks, sorted by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveTrackEntry {
    pub track_id: i64,
    pub d_rel: f64,
    pub y_rel: f64,
    pub v_rel: f64,
}
