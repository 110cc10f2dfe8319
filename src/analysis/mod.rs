//! 속도 구간 분할, 자항점 회귀, 실선 확장 비교 모듈 모음.

pub mod full_scale;
pub mod self_propulsion;
pub mod speed_groups;

use thiserror::Error;

use crate::math::FitError;

pub use full_scale::{
    compare, predict_effective_power, ComparisonReport, EfficiencyComparison, FullScalePrediction,
    SeaTrialCurve, SpeedBand,
};
pub use self_propulsion::{solve, SelfPropulsionPoint};
pub use speed_groups::{ensure_complete, split, FroudeKey, SpeedGroup, SpeedGroups};

/// 회귀/집계에 쓸 데이터가 부족한 경우.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InsufficientDataError {
    #[error("Fr {froude:.2} 구간의 런이 {count}개뿐입니다 (최소 2개 필요)")]
    TooFewRuns { froude: f64, count: usize },
    #[error("Fr {froude:.2} 구간 회귀 실패: {source}")]
    DegenerateFit {
        froude: f64,
        #[source]
        source: FitError,
    },
    #[error("속도 구간이 {found}/{expected}개뿐이라 전체 집계를 건너뜁니다 (누락: {missing:?})")]
    IncompleteSpeedGroups {
        found: usize,
        expected: usize,
        missing: Vec<f64>,
    },
}
