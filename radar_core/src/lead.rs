//! Combines vision association, vision fallback, and the low-speed override
//! into one lead record per vision hypothesis.

use std::collections::HashMap;

use crate::track::Track;
use crate::vision::{lead_from_track, lead_from_vision, match_vision_to_track, LeadRecord, MixMode, VisionLead};

/// Which input produced a lead, before it is lowered into the flat
/// `LeadRecord` the orchestrator publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadOutcome {
    None,
    VisionOnly,
    Fused(i64),
}

/// Stage 1: decide which input wins (vision association vs. vision-only
/// fallback vs. no lead), without yet producing the flat output record.
fn select_lead<'a>(
    v_ego: f64,
    ready: bool,
    tracks: &'a HashMap<i64, Track>,
    lead_msg: &VisionLead,
) -> (LeadOutcome, Option<&'a Track>) {
    let confident = ready && lead_msg.prob > 0.5;

    let matched = if !tracks.is_empty() && confident {
        match_vision_to_track(v_ego, lead_msg, tracks)
    } else {
        None
    };

    match matched {
        Some(track) => (LeadOutcome::Fused(track.id), Some(track)),
        None if confident => (LeadOutcome::VisionOnly, None),
        None => (LeadOutcome::None, None),
    }
}

/// Stage 2: lower a selection outcome into the flat record the orchestrator
/// publishes, applying the acceleration/lateral vision mix along the way.
fn lower_outcome(
    outcome: LeadOutcome,
    track: Option<&Track>,
    lead_msg: &VisionLead,
    v_ego: f64,
    model_v_ego: f64,
    mix: MixMode,
) -> LeadRecord {
    match outcome {
        LeadOutcome::Fused(_) => lead_from_track(track.expect("Fused outcome carries a track"), lead_msg, mix),
        LeadOutcome::VisionOnly => lead_from_vision(lead_msg, v_ego, model_v_ego),
        LeadOutcome::None => LeadRecord::none(),
    }
}

/// Runs the full lead-selection pipeline for one vision hypothesis.
#[allow(clippy::too_many_arguments)]
pub fn get_lead(
    v_ego: f64,
    ready: bool,
    tracks: &HashMap<i64, Track>,
    lead_msg: &VisionLead,
    model_v_ego: f64,
    low_speed_override: bool,
    mix: MixMode,
) -> LeadRecord {
    let (outcome, track) = select_lead(v_ego, ready, tracks, lead_msg);
    let mut record = lower_outcome(outcome, track, lead_msg, v_ego, model_v_ego, mix);

    if low_speed_override {
        let closest = tracks
            .values()
            .filter(|t| t.potential_low_speed_lead(v_ego))
            .min_by(|a, b| a.d_rel.partial_cmp(&b.d_rel).unwrap_or(std::cmp::Ordering::Equal));

        if let Some(closest) = closest {
            if !record.status || closest.d_rel < record.d_rel {
                record = lead_from_track(closest, lead_msg, mix);
            }
        }
    }

    record
}
