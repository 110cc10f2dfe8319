//! 속도 구간별 자항점 결정.
//!
//! 구간 내 런들의 총추력(x)과 저항 동력계 값(y)으로 1차 최소제곱 회귀를 양방향으로 수행한 뒤,
//! 회귀선 위의 점들을 PCHIP으로 보간해 두 값을 구한다.
//! - 예인력에서의 총추력: x-on-y 회귀선을 y = F_D에서 평가
//! - 추력 0에서의 예인력: y-on-x 회귀선을 x = 0에서 평가

use super::speed_groups::SpeedGroup;
use super::InsufficientDataError;
use crate::math::{polyfit, FitError, Pchip};
use crate::run_record::ThrustDefinition;

/// 구간 하나, 추력 정의 하나에 대한 자항점.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfPropulsionPoint {
    pub froude_number: f64,
    pub definition: ThrustDefinition,
    /// 구간의 예인력 F_D(N)
    pub towing_force: f64,
    /// 저항 동력계가 F_D를 가리킬 때의 총추력(N)
    pub gross_thrust_at_towing_force: f64,
    /// 총추력 0에서의 저항 동력계 값(N)
    pub towing_force_at_zero_thrust: f64,
    /// 추력감소계수 t = 1 − (R₀ − F_D) / T_G. 총추력이 양수가 아니면 `None`.
    pub thrust_deduction: Option<f64>,
}

fn fit_then_interpolate(
    froude: f64,
    x: &[f64],
    y: &[f64],
    xq: f64,
) -> Result<f64, InsufficientDataError> {
    let degenerate = |source: FitError| InsufficientDataError::DegenerateFit { froude, source };
    let line = polyfit(x, y, 1).map_err(degenerate)?;
    let fitted: Vec<f64> = x.iter().map(|&xi| line.eval(xi)).collect();
    let interp = Pchip::new(x, &fitted).map_err(degenerate)?;
    Ok(interp.eval(xq))
}

/// 구간 하나의 자항점을 구한다. 입력이 같으면 결과도 같다.
pub fn solve(
    group: &SpeedGroup,
    definition: ThrustDefinition,
) -> Result<SelfPropulsionPoint, InsufficientDataError> {
    let froude = group.froude_number;
    if group.len() < 2 {
        return Err(InsufficientDataError::TooFewRuns {
            froude,
            count: group.len(),
        });
    }

    let thrust: Vec<f64> = group
        .records
        .iter()
        .map(|r| r.total_gross_thrust(definition))
        .collect();
    let drag: Vec<f64> = group.records.iter().map(|r| r.drag_n).collect();

    // F_D는 프루드수에만 의존하므로 구간 내에서 같다.
    let towing_force = group.records[0].towing_force_n;

    let gross_thrust_at_towing_force = fit_then_interpolate(froude, &drag, &thrust, towing_force)?;
    let towing_force_at_zero_thrust = fit_then_interpolate(froude, &thrust, &drag, 0.0)?;

    let thrust_deduction = (gross_thrust_at_towing_force > 0.0).then(|| {
        1.0 - (towing_force_at_zero_thrust - towing_force) / gross_thrust_at_towing_force
    });

    tracing::debug!(
        froude,
        ?definition,
        gross_thrust_at_towing_force,
        towing_force_at_zero_thrust,
        "자항점 계산"
    );

    Ok(SelfPropulsionPoint {
        froude_number: froude,
        definition,
        towing_force,
        gross_thrust_at_towing_force,
        towing_force_at_zero_thrust,
        thrust_deduction,
    })
}
