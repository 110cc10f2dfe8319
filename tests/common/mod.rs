#![allow(dead_code)]

use std::collections::BTreeMap;

use towing_tank_toolbox::calibration::{CalibrationSet, Channel, ChannelCalibration};
use towing_tank_toolbox::config::AnalysisConfig;
use towing_tank_toolbox::run_record::{build_run_record, RunInput, RunRecord};
use towing_tank_toolbox::waterjet::WakeFractionTable;

pub fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.8} got {actual:.8} (diff {diff:.3e}, tol {tol:.1e})"
    );
}

pub fn identity_calibrations() -> CalibrationSet {
    Channel::ALL
        .iter()
        .map(|&ch| (ch, ChannelCalibration::new(0.0, 1.0)))
        .collect()
}

/// 교정값이 항등(영점 0, 계수 1)인 평균값 입력.
pub fn means_input(run: u32, speed: f64, drag_g: f64, kiel: f64) -> RunInput {
    let means: BTreeMap<Channel, f64> = [
        (Channel::Speed, speed),
        (Channel::LvdtFwd, 1.2),
        (Channel::LvdtAft, -0.8),
        (Channel::Drag, drag_g),
        (Channel::RpmPort, 1850.0),
        (Channel::RpmStbd, 1845.0),
        (Channel::ThrustPort, 6.1),
        (Channel::ThrustStbd, 6.0),
        (Channel::TorquePort, 0.12),
        (Channel::TorqueStbd, 0.11),
        (Channel::KielPort, kiel),
        (Channel::KielStbd, kiel),
    ]
    .into_iter()
    .collect();
    RunInput::from_raw_means(run, 4000, 20.0, &means, identity_calibrations())
}

/// 기본 설정으로 만든 결과 행 하나.
pub fn base_record() -> RunRecord {
    let cfg = AnalysisConfig::default();
    let table = WakeFractionTable::from_buckets(&cfg.wake_buckets).expect("wake table");
    build_run_record(&means_input(1, 1.55, 1500.0, 2.0), &cfg, &table).expect("base record")
}

/// 프루드수/총추력/저항만 바꾼 결과 행.
pub fn record_with(run: u32, froude: f64, thrust: f64, drag_n: f64, towing_force: f64) -> RunRecord {
    RunRecord {
        run_number: run,
        froude_number: froude,
        gross_thrust_a_total_n: thrust,
        gross_thrust_b_total_n: thrust * 0.6,
        drag_n,
        towing_force_n: towing_force,
        ..base_record()
    }
}
