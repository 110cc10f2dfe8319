//! 계산 결과를 터미널 표로 출력한다.

use crate::analysis::full_scale::ComparisonReport;
use crate::analysis::{EfficiencyComparison, FullScalePrediction, SelfPropulsionPoint};
use crate::app::{BatchReport, SolveReport};
use crate::config::HullCondition;

/// 해석에 쓴 선형 조건.
pub fn print_hull(hull: &HullCondition) {
    println!("선형 조건: {}", hull.summary());
}

/// 런 일괄 처리 요약과 실패 목록.
pub fn print_batch(report: &BatchReport) {
    println!("\n-- 런 처리 결과 --");
    println!("성공: {}  실패: {}", report.records.len(), report.failures.len());
    for record in report.records.values() {
        println!(
            "런 {:>4}  Fr {:.2}  V {:.3} m/s  Drag {:>8.3} N  F_D {:>7.3} N  TG(A) {:>8.3} N  TG(B) {:>8.3} N",
            record.run_number,
            record.froude_number,
            record.model_speed_mps,
            record.drag_n,
            record.towing_force_n,
            record.gross_thrust_a_total_n,
            record.gross_thrust_b_total_n,
        );
    }
    print_failures(report.failures.iter().map(|f| {
        let run = f
            .run_number
            .map(|r| format!("런 {r}"))
            .unwrap_or_else(|| "-".into());
        format!("{run}: {}", f.error)
    }));
}

fn print_failures<I: IntoIterator<Item = String>>(lines: I) {
    let mut lines = lines.into_iter().peekable();
    if lines.peek().is_none() {
        return;
    }
    println!("\n실패 목록:");
    for line in lines {
        println!("  - {line}");
    }
}

fn print_point(point: &SelfPropulsionPoint) {
    let t = point
        .thrust_deduction
        .map(|t| format!("{t:>7.3}"))
        .unwrap_or_else(|| "    -  ".into());
    println!(
        "Fr {:.2}  [{}]  F_D {:>7.3} N  TG@F_D {:>8.3} N  F@T=0 {:>8.3} N  t {t}",
        point.froude_number,
        point.definition.label(),
        point.towing_force,
        point.gross_thrust_at_towing_force,
        point.towing_force_at_zero_thrust,
    );
}

fn print_prediction(p: &FullScalePrediction) {
    println!(
        "Fr {:.2}  [{}]  Vs {:>5.2} kn  C_TM {:.5}  C_TS {:.5}  R_TS {:>8.2} kN  P_E {:>9.1} kW",
        p.froude_number,
        p.definition.label(),
        p.ship_speed_knots,
        p.resistance_coefficient_model,
        p.resistance_coefficient_full,
        p.total_resistance_kn,
        p.effective_power_kw,
    );
}

fn print_efficiency(e: &EfficiencyComparison) {
    let eta = e
        .propulsive_efficiency
        .map(|v| format!("{v:.3}"))
        .unwrap_or_else(|| "-".into());
    println!(
        "Fr {:.2}  [{}]  Vs {:>5.2} kn  P_E {:>9.1} kW  P_D {:>9.1} kW  η_D {eta}",
        e.froude_number,
        e.definition.label(),
        e.ship_speed_knots,
        e.effective_power_kw,
        e.delivered_power_kw,
    );
}

/// 자항점, 구간 실패, 집계 조건, 실선 추정값을 출력한다.
pub fn print_solve(report: &SolveReport) {
    println!("\n-- 자항점 --");
    for point in &report.points {
        print_point(point);
    }
    print_failures(report.failures.iter().map(|f| {
        format!(
            "Fr {:.2} [{}]: {}",
            f.froude_number,
            f.definition.label(),
            f.error
        )
    }));
    match &report.completeness {
        Ok(()) => {
            println!("\n-- 실선 유효동력 (ITTC-78) --");
            for p in &report.predictions {
                print_prediction(p);
            }
            if !report.efficiencies.is_empty() {
                println!("\n-- 추진효율 (시운전 곡선 대비) --");
                for e in &report.efficiencies {
                    print_efficiency(e);
                }
            }
        }
        Err(err) => println!("\n전체 집계 생략: {err}"),
    }
}

/// 시운전 곡선과 조건 세트 통계를 출력한다.
pub fn print_comparison(report: &ComparisonReport) {
    println!("\n-- 해상 시운전 보정 동력 (5차 회귀) --");
    for point in &report.fitted_curve {
        println!("{:>5.1} kn  {:>10.1} kW", point.speed_knots, point.power_kw);
    }
    for triplet in &report.triplets {
        println!(
            "\n-- 조건 세트 {:?}: {} 평균 ± 표준편차 --",
            triplet.sets,
            report.field.name()
        );
        for band in &triplet.bands {
            println!(
                "행 {:>2}  {:>5.2} kn  {:>10.4} ± {:.4}",
                band.row, band.speed_knots, band.mean, band.std_dev
            );
        }
    }
}
