//! Vision hypotheses, association to radar tracks, and lead-record projection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::track::Track;

/// Camera-to-radar longitudinal offset, metres.
pub const RADAR_TO_CAMERA: f64 = 1.52;

/// A single model-predicted lead hypothesis from the forward camera network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisionLead {
    pub x: f64,
    pub y: f64,
    pub v: f64,
    pub a: f64,
    pub x_std: f64,
    pub y_std: f64,
    pub v_std: f64,
    pub prob: f64,
}

/// Whether lead records mix in vision-derived acceleration/lateral values
/// when the model is confident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixMode {
    Off,
    On,
}

impl MixMode {
    pub fn from_param(value: i32) -> Self {
        if value > 0 {
            MixMode::On
        } else {
            MixMode::Off
        }
    }

    fn is_on(self) -> bool {
        matches!(self, MixMode::On)
    }
}

fn laplacian_pdf(residual: f64, scale: f64) -> f64 {
    (-residual.abs() / scale.max(1e-4)).exp()
}

/// Score candidate tracks against a vision hypothesis and return the
/// best-scoring track, gated by the distance/velocity sanity checks.
///
/// Returns `None` if the gates reject the best candidate (or there are no
/// tracks) — this is "no match", not an error.
pub fn match_vision_to_track<'a>(
    v_ego: f64,
    lead: &VisionLead,
    tracks: &'a HashMap<i64, Track>,
) -> Option<&'a Track> {
    let offset_vision_dist = lead.x - RADAR_TO_CAMERA;

    let score = |t: &Track| {
        let p_d = laplacian_pdf(t.d_rel - offset_vision_dist, lead.x_std);
        let p_y = laplacian_pdf(t.y_rel - (-lead.y), lead.y_std);
        let p_v = laplacian_pdf(t.v_rel + v_ego - lead.v, lead.v_std);
        p_d * p_y * p_v
    };

    let track = tracks.values().max_by(|a, b| {
        score(a)
            .partial_cmp(&score(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    })?;

    let dist_sane = (track.d_rel - offset_vision_dist).abs() < (0.35 * offset_vision_dist).max(5.0);
    let vel_sane = (track.v_rel + v_ego - lead.v).abs() < 10.0 || v_ego + track.v_rel > 3.0;

    if dist_sane && vel_sane {
        Some(track)
    } else {
        None
    }
}

/// Output record for one lead, the unified shape carried by `radarState`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub status: bool,
    pub d_rel: f64,
    pub y_rel: f64,
    pub v_rel: f64,
    pub v_lead: f64,
    pub v_lead_k: f64,
    pub a_lead_k: f64,
    pub a_lead_tau: f64,
    pub fcw: bool,
    pub model_prob: f64,
    pub radar: bool,
    pub radar_track_id: i64,
}

impl LeadRecord {
    pub fn none() -> Self {
        Self {
            status: false,
            d_rel: 0.0,
            y_rel: 0.0,
            v_rel: 0.0,
            v_lead: 0.0,
            v_lead_k: 0.0,
            a_lead_k: 0.0,
            a_lead_tau: 0.0,
            fcw: false,
            model_prob: 0.0,
            radar: false,
            radar_track_id: -1,
        }
    }
}

/// Projects a radar-matched track into a `LeadRecord`, mixing in vision
/// acceleration/lateral values when `mix` is on and the model is confident.
pub fn lead_from_track(track: &Track, lead: &VisionLead, mix: MixMode) -> LeadRecord {
    let y_rel = if mix == MixMode::Off || track.y_rel != 0.0 {
        track.y_rel
    } else {
        -lead.y
    };

    let use_vision_a =
        mix.is_on() && lead.prob > 0.5 && track.a_lead_k.abs() < lead.a.abs();
    let a_lead_k = if use_vision_a { lead.a } else { track.a_lead_k };

    LeadRecord {
        status: true,
        d_rel: track.d_rel,
        y_rel,
        v_rel: track.v_rel,
        v_lead: track.v_lead,
        v_lead_k: track.v_lead_k,
        a_lead_k,
        a_lead_tau: track.a_lead_tau,
        fcw: track.is_potential_fcw(lead.prob),
        model_prob: lead.prob,
        radar: true,
        radar_track_id: track.id,
    }
}

/// Projects a vision-only hypothesis (no radar match) into a `LeadRecord`.
pub fn lead_from_vision(lead: &VisionLead, v_ego: f64, model_v_ego: f64) -> LeadRecord {
    let v_rel = lead.v - model_v_ego;
    let v_lead = v_ego + v_rel;

    LeadRecord {
        status: true,
        d_rel: lead.x - RADAR_TO_CAMERA,
        y_rel: -lead.y,
        v_rel,
        v_lead,
        v_lead_k: v_lead,
        a_lead_k: 0.0,
        a_lead_tau: 0.3,
        fcw: false,
        model_prob: lead.prob,
        radar: false,
        radar_track_id: -1,
    }
}
