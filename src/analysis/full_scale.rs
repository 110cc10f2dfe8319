//! 실선 확장과 해상 시운전 곡선 비교.
//!
//! 해상 시운전 보정 동력을 속도에 대해 5차 다항식으로 회귀하고, 반복 측정 조건 세트(3개 한 묶음)의
//! 속도 행별 평균/모집단 표준편차를 구한다. ITTC-78 형상계수법으로 유효동력을 추정하는 보조 계산도 포함한다.

use thiserror::Error;

use super::self_propulsion::SelfPropulsionPoint;
use super::speed_groups::{FroudeKey, SpeedGroup};
use crate::config::AnalysisConfig;
use crate::math::{mean, polyfit, population_std_dev, FitError, Polynomial};
use crate::run_record::{RecordField, RunRecord, ThrustDefinition};
use crate::units::mps_to_knots;

/// 해상 시운전 곡선 회귀 차수.
pub const SEA_TRIAL_DEGREE: usize = 5;

/// 실선 비교 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComparisonError {
    #[error("해상 시운전 곡선 회귀 실패: {0}")]
    Fit(#[from] FitError),
    #[error("조건 세트 {index}이(가) 없습니다 (전체 {available}개)")]
    MissingConditionSet { index: usize, available: usize },
    #[error("조건 세트 {sets:?}의 속도 행 수가 다릅니다 ({lengths:?})")]
    MismatchedRows {
        sets: [usize; 3],
        lengths: [usize; 3],
    },
    #[error("속도 행 {row}의 프루드수가 조건 세트마다 다릅니다 ({froude:?})")]
    MisalignedRow { row: usize, froude: [f64; 3] },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub speed_knots: f64,
    pub power_kw: f64,
}

/// 해상 시운전 보정 동력 곡선.
#[derive(Debug, Clone, PartialEq)]
pub struct SeaTrialCurve {
    pub polynomial: Polynomial,
    pub min_speed_knots: f64,
    pub max_speed_knots: f64,
}

impl SeaTrialCurve {
    pub fn fit(speeds_knots: &[f64], power_kw: &[f64]) -> Result<Self, FitError> {
        let polynomial = polyfit(speeds_knots, power_kw, SEA_TRIAL_DEGREE)?;
        let min_speed_knots = speeds_knots.iter().copied().fold(f64::INFINITY, f64::min);
        let max_speed_knots = speeds_knots
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        Ok(Self {
            polynomial,
            min_speed_knots,
            max_speed_knots,
        })
    }

    pub fn power_at(&self, speed_knots: f64) -> f64 {
        self.polynomial.eval(speed_knots)
    }

    /// 시운전 속도 범위 안의 정수 knot마다 곡선 값을 뽑는다.
    pub fn sample_integer_knots(&self) -> Vec<CurvePoint> {
        let start = self.min_speed_knots.ceil() as i64;
        let end = self.max_speed_knots.floor() as i64;
        (start..=end)
            .map(|v| {
                let speed_knots = v as f64;
                CurvePoint {
                    speed_knots,
                    power_kw: self.power_at(speed_knots),
                }
            })
            .collect()
    }
}

/// 조건 세트 묶음의 속도 행 하나에 대한 통계.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedBand {
    pub row: usize,
    /// 세 조건의 평균 실선 속도(knots)
    pub speed_knots: f64,
    pub mean: f64,
    /// 모집단 표준편차(분모 N)
    pub std_dev: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripletBands {
    pub sets: [usize; 3],
    pub bands: Vec<SpeedBand>,
}

/// 시운전 곡선과 모형 시험 조건 통계 비교 결과. 그리기는 호출 측에서 한다.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub sea_trial: SeaTrialCurve,
    pub fitted_curve: Vec<CurvePoint>,
    pub field: RecordField,
    pub triplets: Vec<TripletBands>,
}

/// 조건 세트 3개의 속도 행별 평균과 모집단 표준편차를 구한다.
///
/// 같은 행은 세 세트에서 같은 속도 구간(프루드수)이어야 한다.
pub fn band_statistics(
    condition_sets: &[Vec<RunRecord>],
    sets: [usize; 3],
    field: RecordField,
) -> Result<Vec<SpeedBand>, ComparisonError> {
    let mut chosen: Vec<&Vec<RunRecord>> = Vec::with_capacity(3);
    for index in sets {
        let set = condition_sets
            .get(index)
            .ok_or(ComparisonError::MissingConditionSet {
                index,
                available: condition_sets.len(),
            })?;
        chosen.push(set);
    }
    let lengths = [chosen[0].len(), chosen[1].len(), chosen[2].len()];
    if lengths[0] != lengths[1] || lengths[1] != lengths[2] {
        return Err(ComparisonError::MismatchedRows { sets, lengths });
    }

    for row in 0..lengths[0] {
        let froude = [
            chosen[0][row].froude_number,
            chosen[1][row].froude_number,
            chosen[2][row].froude_number,
        ];
        let key = FroudeKey::from_froude(froude[0]);
        if froude[1..].iter().any(|&fr| FroudeKey::from_froude(fr) != key) {
            return Err(ComparisonError::MisalignedRow { row, froude });
        }
    }

    let bands = (0..lengths[0])
        .filter_map(|row| {
            let values: Vec<f64> = chosen.iter().map(|set| field.value(&set[row])).collect();
            let speeds: Vec<f64> = chosen
                .iter()
                .map(|set| set[row].full_scale_speed_knots)
                .collect();
            Some(SpeedBand {
                row,
                speed_knots: mean(&speeds)?,
                mean: mean(&values)?,
                std_dev: population_std_dev(&values)?,
            })
        })
        .collect();
    Ok(bands)
}

/// 해상 시운전 곡선을 회귀하고 조건 세트 묶음마다 통계 띠를 만든다.
pub fn compare(
    sea_trial_speeds_knots: &[f64],
    sea_trial_power_kw: &[f64],
    condition_sets: &[Vec<RunRecord>],
    triplets: &[[usize; 3]],
    field: RecordField,
) -> Result<ComparisonReport, ComparisonError> {
    let sea_trial = SeaTrialCurve::fit(sea_trial_speeds_knots, sea_trial_power_kw)?;
    let fitted_curve = sea_trial.sample_integer_knots();
    let triplets = triplets
        .iter()
        .map(|&sets| {
            Ok(TripletBands {
                sets,
                bands: band_statistics(condition_sets, sets, field)?,
            })
        })
        .collect::<Result<Vec<_>, ComparisonError>>()?;
    Ok(ComparisonReport {
        sea_trial,
        fitted_curve,
        field,
        triplets,
    })
}

/// 자항점에서 실선으로 확장한 유효동력 추정값.
#[derive(Debug, Clone, PartialEq)]
pub struct FullScalePrediction {
    pub froude_number: f64,
    pub definition: ThrustDefinition,
    pub ship_speed_mps: f64,
    pub ship_speed_knots: f64,
    /// 모형 전저항계수 C_TM
    pub resistance_coefficient_model: f64,
    /// 실선 전저항계수 C_TS
    pub resistance_coefficient_full: f64,
    /// 실선 전저항(kN)
    pub total_resistance_kn: f64,
    /// 유효동력(kW)
    pub effective_power_kw: f64,
    pub thrust_deduction: Option<f64>,
}

impl FullScalePrediction {
    /// 시운전 전달동력 대비 추진효율 η_D = P_E / P_D.
    pub fn propulsive_efficiency(&self, sea_trial: &SeaTrialCurve) -> Option<f64> {
        let delivered = sea_trial.power_at(self.ship_speed_knots);
        (delivered > 0.0).then(|| self.effective_power_kw / delivered)
    }

    /// 같은 실선 속도의 시운전 곡선 값과 나란히 놓는다.
    pub fn compare_with(&self, sea_trial: &SeaTrialCurve) -> EfficiencyComparison {
        EfficiencyComparison {
            froude_number: self.froude_number,
            definition: self.definition,
            ship_speed_knots: self.ship_speed_knots,
            effective_power_kw: self.effective_power_kw,
            delivered_power_kw: sea_trial.power_at(self.ship_speed_knots),
            propulsive_efficiency: self.propulsive_efficiency(sea_trial),
        }
    }
}

/// 모형 시험 유효동력과 시운전 전달동력 비교 한 줄.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EfficiencyComparison {
    pub froude_number: f64,
    pub definition: ThrustDefinition,
    pub ship_speed_knots: f64,
    pub effective_power_kw: f64,
    /// 시운전 곡선의 전달동력(kW)
    pub delivered_power_kw: f64,
    /// 전달동력이 양수가 아니면 `None`.
    pub propulsive_efficiency: Option<f64>,
}

/// ITTC-78 형상계수법으로 실선 유효동력을 추정한다.
///
/// 추력 0에서의 동력계 값을 모형 전저항 R_TM으로 본다.
/// C_TS = C_TM − (1+k)(C_FM − C_FS) + C_A, R_TS = ½ρ_S V_S² S_M λ² C_TS.
pub fn predict_effective_power(
    point: &SelfPropulsionPoint,
    group: &SpeedGroup,
    config: &AnalysisConfig,
) -> Option<FullScalePrediction> {
    let reference = group.records.first()?;
    let consts = &config.constants;
    let hull = &config.hull;

    let v_model = reference.nominal_model_speed_mps;
    let v_ship = reference.full_scale_speed_mps;
    let dynamic_model = 0.5 * consts.model_water_density * v_model.powi(2) * hull.wetted_area;
    if dynamic_model <= 0.0 {
        return None;
    }
    let ctm = point.towing_force_at_zero_thrust / dynamic_model;
    let cts = ctm - reference.form_factor * (reference.cf_model - reference.cf_full)
        + reference.correlation_allowance;
    let ship_area = hull.wetted_area * hull.scale_ratio.powi(2);
    let rts = 0.5 * consts.sea_water_density * v_ship.powi(2) * ship_area * cts;

    Some(FullScalePrediction {
        froude_number: point.froude_number,
        definition: point.definition,
        ship_speed_mps: v_ship,
        ship_speed_knots: mps_to_knots(v_ship),
        resistance_coefficient_model: ctm,
        resistance_coefficient_full: cts,
        total_resistance_kn: rts / 1000.0,
        effective_power_kw: rts * v_ship / 1000.0,
        thrust_deduction: point.thrust_deduction,
    })
}
