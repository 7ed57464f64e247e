//! Drives one radar cycle: ingest, evict, update, select, publish.
//!
//! This is the only place that owns the track map; it converts the wire
//! messages from `radar_env` into the pure `radar_core` domain types, runs
//! the fusion pipeline, and lowers the results back into the published
//! `RadarStateMsg`/`liveTracks` shape.

use std::collections::{HashMap, VecDeque};

use radar_core::{
    get_lead, get_path_adjacent_leads, KalmanParams, LaneLine, LeadRecord, ModelPath, MixMode,
    Track, VisionLead,
};
use radar_env::{CycleSnapshot, LiveTrackEntry, ModelV2Msg, ParamStore, VisionLeadMsg};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The flat `radarState` record published each cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadarStateMsg {
    pub valid: bool,
    pub md_mono_time: u64,
    pub car_state_mono_time: u64,
    pub radar_errors: Vec<String>,
    pub cum_lag_ms: f64,
    pub lead_one: Option<LeadRecord>,
    pub lead_two: Option<LeadRecord>,
    pub leads_left: Vec<LeadRecord>,
    pub leads_center: Vec<LeadRecord>,
    pub leads_right: Vec<LeadRecord>,
}

fn to_vision_lead(msg: &VisionLeadMsg) -> VisionLead {
    VisionLead {
        x: msg.x,
        y: msg.y,
        v: msg.v,
        a: msg.a,
        x_std: msg.x_std,
        y_std: msg.y_std,
        v_std: msg.v_std,
        prob: msg.prob,
    }
}

fn to_model_path(model: &ModelV2Msg) -> ModelPath {
    let lane_lines = std::array::from_fn(|i| LaneLine {
        x: model.lane_lines[i].x.clone(),
        y: model.lane_lines[i].y.clone(),
    });
    ModelPath {
        lane_lines,
        lane_line_probs: model.lane_line_probs,
        position_x: model.position_x.clone(),
        position_y: model.position_y.clone(),
    }
}

/// Per-core-instance state: the Kalman parameter table, the track map, and
/// the bookkeeping the distilled spec calls out (ego-velocity history,
/// latching readiness, cached config flags).
pub struct RadarD {
    kalman_params: KalmanParams,
    tracks: HashMap<i64, Track>,

    v_ego: f64,
    v_ego_hist: VecDeque<f64>,
    hist_cap: usize,

    ready: bool,
    show_radar_info: i32,
    mix_radar_info: i32,
}

impl RadarD {
    pub fn new(radar_ts: f64, delay: usize) -> Result<Self, radar_core::RadarCoreError> {
        let kalman_params = KalmanParams::new(radar_ts)?;
        let hist_cap = delay + 1;
        let mut v_ego_hist = VecDeque::with_capacity(hist_cap);
        v_ego_hist.push_back(0.0);

        Ok(Self {
            kalman_params,
            tracks: HashMap::new(),
            v_ego: 0.0,
            v_ego_hist,
            hist_cap,
            ready: false,
            show_radar_info: 0,
            mix_radar_info: 0,
        })
    }

    /// Exposed for the deterministic harness and for `liveTracks` publication.
    pub fn tracks(&self) -> &HashMap<i64, Track> {
        &self.tracks
    }

    pub fn live_tracks(&self) -> Vec<LiveTrackEntry> {
        let mut ids: Vec<_> = self.tracks.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter()
            .map(|id| {
                let t = &self.tracks[&id];
                LiveTrackEntry {
                    track_id: id,
                    d_rel: t.d_rel,
                    y_rel: t.y_rel,
                    v_rel: t.v_rel,
                }
            })
            .collect()
    }

    /// Runs one full cycle and returns the record to publish as `radarState`.
    pub fn update(&mut self, params: &dyn ParamStore, snapshot: &CycleSnapshot) -> RadarStateMsg {
        self.show_radar_info = params.show_radar_info();
        self.mix_radar_info = params.mix_radar_info();

        if snapshot.car_state_updated {
            self.v_ego = snapshot.car_state.v_ego;
            if self.v_ego_hist.len() == self.hist_cap {
                self.v_ego_hist.pop_front();
            }
            self.v_ego_hist.push_back(self.v_ego);
        }
        if snapshot.model_updated {
            self.ready = true;
        }

        // Evict first: a track cannot be read after this point unless its
        // identifier reappeared in this frame.
        let seen: std::collections::HashSet<i64> =
            snapshot.radar.points.iter().map(|p| p.track_id).collect();
        self.tracks.retain(|id, _| seen.contains(id));

        let v_ego_seed = *self.v_ego_hist.front().unwrap_or(&self.v_ego);
        for pt in &snapshot.radar.points {
            let v_lead = pt.v_rel + v_ego_seed;
            let track = self
                .tracks
                .entry(pt.track_id)
                .or_insert_with(|| Track::create(pt.track_id, v_lead, &self.kalman_params));
            track.update(pt.d_rel, pt.y_rel, pt.v_rel, v_lead, pt.measured);
        }
        debug!(tracks = self.tracks.len(), "radar cycle ingested");

        let radar_state_valid = snapshot.all_checks_pass && snapshot.radar.errors.is_empty();
        if !radar_state_valid {
            warn!(errors = ?snapshot.radar.errors, "radar state invalid this cycle");
        }

        let model_v_ego = snapshot
            .model
            .temporal_pose_trans
            .first()
            .copied()
            .unwrap_or(self.v_ego);

        let mix = MixMode::from_param(self.mix_radar_info);

        let mut msg = RadarStateMsg {
            valid: radar_state_valid,
            md_mono_time: snapshot.mono_times.md_mono_time,
            car_state_mono_time: snapshot.mono_times.car_state_mono_time,
            radar_errors: snapshot.radar.errors.clone(),
            cum_lag_ms: 0.0,
            lead_one: None,
            lead_two: None,
            leads_left: Vec::new(),
            leads_center: Vec::new(),
            leads_right: Vec::new(),
        };

        if snapshot.model.leads_v3.len() > 1 {
            let lead0 = to_vision_lead(&snapshot.model.leads_v3[0]);
            let lead1 = to_vision_lead(&snapshot.model.leads_v3[1]);

            msg.lead_one = Some(get_lead(
                self.v_ego,
                self.ready,
                &self.tracks,
                &lead0,
                model_v_ego,
                true,
                mix,
            ));
            msg.lead_two = Some(get_lead(
                self.v_ego,
                self.ready,
                &self.tracks,
                &lead1,
                model_v_ego,
                false,
                mix,
            ));

            if self.ready && self.show_radar_info != 0 {
                let model_path = to_model_path(&snapshot.model);
                let adjacent =
                    get_path_adjacent_leads(&self.tracks, &model_path, snapshot.lateral_plan.lane_width, &lead0, mix);
                msg.leads_left = adjacent.left.into_iter().map(|p| p.lead).collect();
                msg.leads_center = adjacent.center.into_iter().map(|p| p.lead).collect();
                msg.leads_right = adjacent.right.into_iter().map(|p| p.lead).collect();
            }
        }

        msg
    }
}
