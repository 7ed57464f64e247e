//! Per-identifier smoothed radar track state.

use crate::kalman::{Kf1d, KalmanParams};

const LEAD_ACCEL_TAU: f64 = 1.5;
const V_EGO_STATIONARY: f64 = 4.0;

/// A time-smoothed estimate of one target, keyed by a radar-assigned identifier.
#[derive(Debug, Clone)]
pub struct Track {
    pub id: i64,

    pub d_rel: f64,
    pub y_rel: f64,
    pub v_rel: f64,
    pub v_lead: f64,
    pub measured: bool,

    pub v_lead_k: f64,
    pub a_lead_k: f64,
    pub a_lead_tau: f64,

    kf: Kf1d,
    cnt: u64,
}

impl Track {
    /// Creates a track, taking the initial velocity as truth (the filter is
    /// not stepped until the first `update`).
    pub fn create(id: i64, v_lead: f64, params: &KalmanParams) -> Self {
        let kf = Kf1d::new(v_lead, 0.0, params);
        Self {
            id,
            d_rel: 0.0,
            y_rel: 0.0,
            v_rel: 0.0,
            v_lead,
            measured: false,
            v_lead_k: v_lead,
            a_lead_k: 0.0,
            a_lead_tau: LEAD_ACCEL_TAU,
            kf,
            cnt: 0,
        }
    }

    /// Stores this cycle's raw radar measurement and, after the first call,
    /// steps the Kalman filter with the new velocity observation.
    pub fn update(&mut self, d_rel: f64, y_rel: f64, v_rel: f64, v_lead: f64, measured: bool) {
        self.d_rel = d_rel;
        self.y_rel = y_rel;
        self.v_rel = v_rel;
        self.v_lead = v_lead;
        self.measured = measured;

        if self.cnt > 0 {
            self.kf.update(v_lead);
        }
        self.v_lead_k = self.kf.x[0];
        self.a_lead_k = self.kf.x[1];

        if self.a_lead_k.abs() < 0.5 {
            self.a_lead_tau = LEAD_ACCEL_TAU;
        } else {
            self.a_lead_tau *= 0.9;
        }

        self.cnt += 1;
    }

    /// Rebuilds the filter around an externally-supplied acceleration seed.
    pub fn reset_a_lead(&mut self, a_lead_k: f64, a_lead_tau: f64, params: &KalmanParams) {
        self.kf = Kf1d::new(self.v_lead, a_lead_k, params);
        self.a_lead_k = a_lead_k;
        self.a_lead_tau = a_lead_tau;
    }

    /// Clustering key, weighting lateral offset 2x since radar is inaccurate there.
    pub fn cluster_key(&self) -> (f64, f64, f64) {
        (self.d_rel, self.y_rel * 2.0, self.v_rel)
    }

    /// True if this track is a plausible low-speed stop-and-go lead even
    /// without vision confirmation.
    pub fn potential_low_speed_lead(&self, v_ego: f64) -> bool {
        self.y_rel.abs() < 1.0 && v_ego < V_EGO_STATIONARY && self.d_rel > 0.75 && self.d_rel < 25.0
    }

    /// True if a confident vision hypothesis makes this track an imminent hazard.
    pub fn is_potential_fcw(&self, model_prob: f64) -> bool {
        model_prob > 0.9
    }
}
