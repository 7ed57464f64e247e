//! Integration tests driving the orchestrator through the deterministic
//! harness: each test scripts a sequence of cycle snapshots, replays them
//! through `ScriptedMessageSource`, and feeds the polled snapshots into
//! `RadarD::update` exactly as `radard`'s main loop does.

use radar_env::{
    CarParams, CarStateMsg, CycleSnapshot, InMemoryParamStore, LateralPlanMsg, MessageSource,
    ModelV2Msg, RadarData, RadarPoint, VisionLeadMsg,
};
use radard::harness::ScriptedMessageSource;
use radard::RadarD;

fn store() -> InMemoryParamStore {
    InMemoryParamStore::new(CarParams {
        car_name: "testcar".into(),
        radar_time_step: 0.05,
    })
}

fn base_snapshot(v_ego: f64, points: Vec<RadarPoint>, leads: Vec<VisionLeadMsg>) -> CycleSnapshot {
    CycleSnapshot {
        car_state_updated: true,
        car_state: CarStateMsg { v_ego },
        model_updated: true,
        model: ModelV2Msg {
            leads_v3: leads,
            ..Default::default()
        },
        lateral_plan: LateralPlanMsg { lane_width: 3.6 },
        radar: RadarData {
            points,
            errors: vec![],
        },
        mono_times: Default::default(),
        all_checks_pass: true,
    }
}

fn no_vision() -> Vec<VisionLeadMsg> {
    vec![VisionLeadMsg::default(), VisionLeadMsg::default()]
}

/// Scenario 1: single track, no vision.
#[test]
fn single_track_no_vision() {
    let store = store();
    let mut rd = RadarD::new(0.05, 0).unwrap();
    let mut source = ScriptedMessageSource::new(vec![base_snapshot(
        20.0,
        vec![RadarPoint {
            track_id: 7,
            d_rel: 40.0,
            y_rel: 0.0,
            v_rel: -2.0,
            measured: true,
        }],
        no_vision(),
    )]);

    let mut msg = rd.update(&store, &source.poll());
    for _ in 0..2 {
        msg = rd.update(&store, &source.poll());
    }

    assert!(!msg.lead_one.unwrap().status);
    let live = rd.live_tracks();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].track_id, 7);
    assert_eq!(live[0].d_rel, 40.0);
    assert_eq!(live[0].y_rel, 0.0);
    assert_eq!(live[0].v_rel, -2.0);
}

/// Scenario 2: vision-only, no radar tracks at all.
#[test]
fn vision_only() {
    let store = store();
    let mut rd = RadarD::new(0.05, 0).unwrap();
    let mut source = ScriptedMessageSource::new(vec![{
        let mut snap = base_snapshot(
            10.0,
            vec![],
            vec![
                VisionLeadMsg {
                    x: 50.0,
                    y: 0.0,
                    v: 15.0,
                    a: 0.0,
                    x_std: 1.0,
                    y_std: 1.0,
                    v_std: 1.0,
                    prob: 0.9,
                },
                VisionLeadMsg::default(),
            ],
        );
        snap.model.temporal_pose_trans = vec![10.0];
        snap
    }]);

    let msg = rd.update(&store, &source.poll());
    let lead = msg.lead_one.unwrap();
    assert!(lead.status);
    assert!(!lead.radar);
    assert!((lead.d_rel - 48.48).abs() < 1e-9);
    assert_eq!(lead.y_rel, 0.0);
    assert_eq!(lead.v_rel, 5.0);
    assert_eq!(lead.v_lead, 15.0);
    assert_eq!(lead.v_lead_k, 15.0);
    assert_eq!(lead.a_lead_k, 0.0);
    assert_eq!(lead.a_lead_tau, 0.3);
    assert!(!lead.fcw);
    assert_eq!(lead.model_prob, 0.9);
    assert_eq!(lead.radar_track_id, -1);
}

/// Scenario 3: the vision hypothesis associates to a matching radar track.
#[test]
fn association_match() {
    let store = store();
    let mut rd = RadarD::new(0.05, 0).unwrap();
    let mut source = ScriptedMessageSource::new(vec![{
        let mut snap = base_snapshot(
            10.0,
            vec![RadarPoint {
                track_id: 9,
                d_rel: 48.48,
                y_rel: 0.0,
                v_rel: 5.0,
                measured: true,
            }],
            vec![
                VisionLeadMsg {
                    x: 50.0,
                    y: 0.0,
                    v: 15.0,
                    a: 0.0,
                    x_std: 1.0,
                    y_std: 1.0,
                    v_std: 1.0,
                    prob: 0.9,
                },
                VisionLeadMsg::default(),
            ],
        );
        snap.model.temporal_pose_trans = vec![10.0];
        snap
    }]);

    let msg = rd.update(&store, &source.poll());
    let lead = msg.lead_one.unwrap();
    assert!(lead.radar);
    assert_eq!(lead.radar_track_id, 9);
}

/// Scenario 4: low ego speed overrides a weak vision hypothesis with the
/// closest qualifying stationary track.
#[test]
fn low_speed_override() {
    let store = store();
    let mut rd = RadarD::new(0.05, 0).unwrap();
    let mut source = ScriptedMessageSource::new(vec![base_snapshot(
        2.0,
        vec![
            RadarPoint {
                track_id: 1,
                d_rel: 5.0,
                y_rel: 0.2,
                v_rel: 0.0,
                measured: true,
            },
            RadarPoint {
                track_id: 2,
                d_rel: 10.0,
                y_rel: 0.0,
                v_rel: 0.0,
                measured: true,
            },
        ],
        no_vision(),
    )]);

    let msg = rd.update(&store, &source.poll());
    let lead = msg.lead_one.unwrap();
    assert!(lead.status);
    assert_eq!(lead.radar_track_id, 1);
    assert!((lead.d_rel - 5.0).abs() < 1e-9);
}

/// Scenario 5: tracks split into left/center/right corridors relative to
/// the predicted path (raw lateral split, no confident lanes or path).
#[test]
fn corridor_split() {
    let store = store();
    store.set_show_radar_info(1);
    let mut rd = RadarD::new(0.05, 0).unwrap();
    let mut source = ScriptedMessageSource::new(vec![base_snapshot(
        20.0,
        vec![
            RadarPoint {
                track_id: 1,
                d_rel: 30.0,
                y_rel: 0.5,
                v_rel: 0.0,
                measured: true,
            },
            RadarPoint {
                track_id: 2,
                d_rel: 30.0,
                y_rel: -2.5,
                v_rel: 0.0,
                measured: true,
            },
        ],
        no_vision(),
    )]);

    let msg = rd.update(&store, &source.poll());
    assert_eq!(msg.leads_center.len(), 1);
    assert_eq!(msg.leads_right.len(), 1);
    assert_eq!(msg.leads_center[0].radar_track_id, 1);
    assert_eq!(msg.leads_right[0].radar_track_id, 2);
}

/// Scenario 6: mix mode lets a confident vision acceleration override the
/// radar-smoothed value once a track is associated through the full
/// selection pipeline. (The low-confidence "vision ignored" half of this
/// scenario exercises the mix threshold in isolation, below the
/// association pipeline's own 0.5 confidence gate — that is covered at
/// the unit level by `vision::tests::mix_mode_prefers_stronger_vision_acceleration`.)
#[test]
fn mix_mode_overrides_radar_acceleration_when_confident() {
    let store = store();
    store.set_mix_radar_info(1);
    let mut rd = RadarD::new(0.05, 0).unwrap();

    // Settle a track at a constant closing speed, so its smoothed
    // acceleration converges near zero and is dwarfed by vision's -3.0.
    let mut source = ScriptedMessageSource::new(
        (0..10)
            .map(|i| {
                base_snapshot(
                    20.0,
                    vec![RadarPoint {
                        track_id: 42,
                        d_rel: 40.0 - i as f64,
                        y_rel: 0.0,
                        v_rel: -1.0,
                        measured: true,
                    }],
                    no_vision(),
                )
            })
            .collect(),
    );
    for _ in 0..10 {
        rd.update(&store, &source.poll());
    }

    let confident_snap = {
        let mut snap = base_snapshot(
            20.0,
            vec![RadarPoint {
                track_id: 42,
                d_rel: 29.0,
                y_rel: 0.0,
                v_rel: -1.0,
                measured: true,
            }],
            vec![
                VisionLeadMsg {
                    x: 29.0 + 1.52,
                    y: 0.0,
                    v: 19.0,
                    a: -3.0,
                    x_std: 1.0,
                    y_std: 1.0,
                    v_std: 1.0,
                    prob: 0.8,
                },
                VisionLeadMsg::default(),
            ],
        );
        snap.model.temporal_pose_trans = vec![20.0];
        snap
    };
    let msg = rd.update(&store, &confident_snap);
    let lead = msg.lead_one.unwrap();
    assert!(lead.radar);
    assert_eq!(lead.a_lead_k, -3.0);
}
