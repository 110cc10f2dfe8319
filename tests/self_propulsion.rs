//! 속도 구간 분할, 자항점 회귀, 전체 집계 조건 테스트.
mod common;

use common::{assert_close, record_with};
use towing_tank_toolbox::analysis::{
    ensure_complete, solve, split, FroudeKey, InsufficientDataError, SeaTrialCurve,
};
use towing_tank_toolbox::app::solve_all;
use towing_tank_toolbox::config::AnalysisConfig;
use towing_tank_toolbox::run_record::{RunRecord, ThrustDefinition};

fn linear_group(froude: f64) -> Vec<RunRecord> {
    // 저항 = 20 − 0.5·추력, F_D = 8
    [0.0, 10.0, 20.0, 30.0]
        .iter()
        .enumerate()
        .map(|(i, &tg)| record_with(100 + i as u32, froude, tg, 20.0 - 0.5 * tg, 8.0))
        .collect()
}

fn ols(x: &[f64], y: &[f64]) -> (f64, f64) {
    let n = x.len() as f64;
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;
    let sxy: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    let sxx: f64 = x.iter().map(|a| (a - mx).powi(2)).sum();
    let slope = sxy / sxx;
    (my - slope * mx, slope)
}

#[test]
fn split_groups_by_rounded_froude_in_input_order() {
    let records = vec![
        record_with(1, 0.26, 10.0, 5.0, 3.0),
        record_with(2, 0.24, 11.0, 5.0, 3.0),
        record_with(3, 0.26, 12.0, 5.0, 3.0),
        record_with(4, 0.26, 12.0, 5.0, 3.0),
    ];
    let groups = split(&records);
    assert_eq!(groups.len(), 2);
    let g26 = &groups[&FroudeKey::from_froude(0.26)];
    assert_close("Fr", g26.froude_number, 0.26, 1e-12);
    // 중복 런도 그대로 유지
    let runs: Vec<u32> = g26.records.iter().map(|r| r.run_number).collect();
    assert_eq!(runs, vec![1, 3, 4]);
    assert_eq!(groups[&FroudeKey::from_froude(0.24)].len(), 1);
}

#[test]
fn froude_key_absorbs_float_noise() {
    assert_eq!(
        FroudeKey::from_froude(0.24 + 0.02 * 3.0),
        FroudeKey::from_froude(0.30)
    );
    assert_close("key", FroudeKey::from_froude(0.38).froude(), 0.38, 1e-12);
}

#[test]
fn exact_line_gives_exact_self_propulsion_point() {
    let records = linear_group(0.30);
    let groups = split(&records);
    let point = solve(&groups[&FroudeKey::from_froude(0.30)], ThrustDefinition::A)
        .expect("point");

    assert_close("F_D", point.towing_force, 8.0, 0.0);
    // 20 − 0.5·T = 8 → T = 24
    assert_close("TG@F_D", point.gross_thrust_at_towing_force, 24.0, 1e-9);
    assert_close("R0", point.towing_force_at_zero_thrust, 20.0, 1e-9);
    assert_close("t", point.thrust_deduction.expect("t"), 0.5, 1e-9);
}

#[test]
fn scattered_data_follows_least_squares_lines() {
    let thrust = [5.0, 10.0, 15.0, 20.0];
    let drag = [18.2, 14.9, 12.1, 8.8];
    let records: Vec<RunRecord> = thrust
        .iter()
        .zip(drag)
        .enumerate()
        .map(|(i, (&tg, d))| record_with(200 + i as u32, 0.32, tg, d, 8.0))
        .collect();
    let groups = split(&records);
    let point = solve(&groups[&FroudeKey::from_froude(0.32)], ThrustDefinition::A)
        .expect("point");

    let (b_dt, m_dt) = ols(&thrust, &drag);
    let (b_td, m_td) = ols(&drag, &thrust);
    assert_close("R0", point.towing_force_at_zero_thrust, b_dt, 1e-9);
    assert_close("R0 hand", point.towing_force_at_zero_thrust, 21.25, 1e-9);
    assert_close("m", m_dt, -0.62, 1e-12);
    assert_close(
        "TG@F_D",
        point.gross_thrust_at_towing_force,
        b_td + m_td * 8.0,
        1e-9,
    );
}

#[test]
fn solve_is_deterministic() {
    let records = linear_group(0.28);
    let groups = split(&records);
    let group = &groups[&FroudeKey::from_froude(0.28)];
    for definition in ThrustDefinition::ALL {
        let first = solve(group, definition).expect("first");
        let second = solve(group, definition).expect("second");
        assert_eq!(first, second);
    }
}

#[test]
fn definition_b_uses_its_own_thrust_column() {
    let records = linear_group(0.30);
    let groups = split(&records);
    let group = &groups[&FroudeKey::from_froude(0.30)];
    let a = solve(group, ThrustDefinition::A).expect("A");
    let b = solve(group, ThrustDefinition::B).expect("B");
    // B 열은 A 열의 0.6배
    assert_close("TG B", b.gross_thrust_at_towing_force, 0.6 * a.gross_thrust_at_towing_force, 1e-9);
    assert_close("R0", b.towing_force_at_zero_thrust, a.towing_force_at_zero_thrust, 1e-9);
}

#[test]
fn single_run_group_is_insufficient() {
    let records = vec![record_with(1, 0.34, 10.0, 5.0, 3.0)];
    let groups = split(&records);
    assert_eq!(
        solve(&groups[&FroudeKey::from_froude(0.34)], ThrustDefinition::A),
        Err(InsufficientDataError::TooFewRuns {
            froude: 0.34,
            count: 1
        })
    );
}

#[test]
fn repeated_identical_runs_are_degenerate() {
    let records = vec![
        record_with(1, 0.36, 10.0, 5.0, 3.0),
        record_with(2, 0.36, 10.0, 5.0, 3.0),
    ];
    let groups = split(&records);
    assert!(matches!(
        solve(&groups[&FroudeKey::from_froude(0.36)], ThrustDefinition::A),
        Err(InsufficientDataError::DegenerateFit { .. })
    ));
}

fn dataset(froude_numbers: &[f64]) -> Vec<RunRecord> {
    froude_numbers
        .iter()
        .flat_map(|&fr| linear_group(fr))
        .collect()
}

#[test]
fn all_nine_groups_enable_full_scale_predictions() {
    let cfg = AnalysisConfig::default();
    let records = dataset(&cfg.expected_froude_numbers);
    let report = solve_all(&records, &cfg, None);

    assert_eq!(report.completeness, Ok(()));
    assert!(report.failures.is_empty());
    assert_eq!(report.points.len(), 18);
    assert_eq!(report.predictions.len(), 18);
    for p in &report.predictions {
        assert!(p.effective_power_kw.is_finite());
        assert!(p.ship_speed_knots > 0.0);
    }
}

#[test]
fn missing_group_skips_full_scale_predictions() {
    let cfg = AnalysisConfig::default();
    let present = &cfg.expected_froude_numbers[..8];
    let records = dataset(present);
    let report = solve_all(&records, &cfg, None);

    // 구간별 자항점은 그대로 계산된다.
    assert_eq!(report.points.len(), 16);
    assert!(report.predictions.is_empty());
    match report.completeness {
        Err(InsufficientDataError::IncompleteSpeedGroups {
            found,
            expected,
            missing,
        }) => {
            assert_eq!((found, expected), (8, 9));
            assert_eq!(missing.len(), 1);
            assert_close("missing Fr", missing[0], 0.40, 1e-9);
        }
        other => panic!("expected incomplete groups, got {other:?}"),
    }

    let groups = split(&records);
    assert!(ensure_complete(&groups, present).is_ok());
}

#[test]
fn sea_trial_curve_adds_propulsive_efficiency() {
    let cfg = AnalysisConfig::default();
    let records = dataset(&cfg.expected_froude_numbers);
    let speeds: Vec<f64> = (0..12).map(|i| 10.0 + i as f64).collect();
    let power: Vec<f64> = speeds.iter().map(|v| 40.0 * v + 2.5 * v * v * v).collect();
    let curve = SeaTrialCurve::fit(&speeds, &power).expect("curve");

    let report = solve_all(&records, &cfg, Some(&curve));
    assert_eq!(report.efficiencies.len(), report.predictions.len());
    assert_eq!(report.efficiencies.len(), 18);
    for (e, p) in report.efficiencies.iter().zip(&report.predictions) {
        let v = p.ship_speed_knots;
        let delivered = 40.0 * v + 2.5 * v * v * v;
        assert_close("P_D", e.delivered_power_kw, delivered, 1e-6 * delivered);
        assert_close(
            "eta_D",
            e.propulsive_efficiency.expect("eta"),
            p.effective_power_kw / delivered,
            1e-9,
        );
        assert_eq!(e.definition, p.definition);
    }

    // 시운전 곡선이 없으면 비교도 없다.
    assert!(solve_all(&records, &cfg, None).efficiencies.is_empty());
}
