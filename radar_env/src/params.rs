//! Sans-IO parameter-store abstraction.
//!
//! Mirrors the external parameter/configuration daemon: a handful of flags
//! read every cycle, plus one blocking read of `CarParams` at startup.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::EnvError;

/// Startup-only configuration, read once and blocking (the daemon may not
/// have published it yet when the process starts).
#[derive(Debug, Clone, PartialEq)]
pub struct CarParams {
    pub car_name: String,
    pub radar_time_step: f64,
}

/// Capability for reading the external parameter store.
///
/// Implementations own whatever I/O (socket, shared memory, file) the real
/// daemon uses; the orchestrator only depends on this trait.
pub trait ParamStore: Send + Sync {
    /// Blocking read of `CarParams` at startup.
    fn car_params(&self) -> Result<CarParams, EnvError>;

    /// Per-cycle read of the `ShowRadarInfo` flag.
    fn show_radar_info(&self) -> i32;

    /// Per-cycle read of the `MixRadarInfo` flag.
    fn mix_radar_info(&self) -> i32;
}

/// In-memory parameter store for local runs and the deterministic test
/// harness. Flags can be mutated between cycles to exercise reconfiguration.
pub struct InMemoryParamStore {
    car_params: CarParams,
    flags: Mutex<HashMap<&'static str, i32>>,
}

impl InMemoryParamStore {
    pub fn new(car_params: CarParams) -> Self {
        let mut flags = HashMap::new();
        flags.insert("ShowRadarInfo", 0);
        flags.insert("MixRadarInfo", 0);
        Self {
            car_params,
            flags: Mutex::new(flags),
        }
    }

    pub fn set_show_radar_info(&self, value: i32) {
        self.flags.lock().unwrap().insert("ShowRadarInfo", value);
    }

    pub fn set_mix_radar_info(&self, value: i32) {
        self.flags.lock().unwrap().insert("MixRadarInfo", value);
    }
}

impl ParamStore for InMemoryParamStore {
    fn car_params(&self) -> Result<CarParams, EnvError> {
        if self.car_params.car_name.trim().is_empty() {
            return Err(EnvError::CarParams(format!(
                "unknown car name {:?}",
                self.car_params.car_name
            )));
        }
        Ok(self.car_params.clone())
    }

    fn show_radar_info(&self) -> i32 {
        *self.flags.lock().unwrap().get("ShowRadarInfo").unwrap_or(&0)
    }

    fn mix_radar_info(&self) -> i32 {
        *self.flags.lock().unwrap().get("MixRadarInfo").unwrap_or(&0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_default_to_off_and_can_be_toggled() {
        let store = InMemoryParamStore::new(CarParams {
            car_name: "testcar".into(),
            radar_time_step: 0.05,
        });
        assert_eq!(store.show_radar_info(), 0);
        store.set_show_radar_info(1);
        assert_eq!(store.show_radar_info(), 1);
    }

    #[test]
    fn car_params_round_trips() {
        let params = CarParams {
            car_name: "testcar".into(),
            radar_time_step: 0.05,
        };
        let store = InMemoryParamStore::new(params.clone());
        assert_eq!(store.car_params().unwrap(), params);
    }

    #[test]
    fn unknown_car_name_is_fatal() {
        let store = InMemoryParamStore::new(CarParams {
            car_name: "  ".into(),
            radar_time_step: 0.05,
        });
        assert!(matches!(store.car_params(), Err(EnvError::CarParams(_))));
    }
}
