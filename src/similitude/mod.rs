//! 모형-실선 상사 계산 모듈 모음.
//! 무차원수(프루드/레이놀즈), Grigson 마찰저항계수, 예인력(skin friction correction) 계산으로 구성한다.

pub mod friction;
pub mod nondimensional;
pub mod towing_force;

use thiserror::Error;

pub use friction::friction_coefficient;
pub use nondimensional::{froude, grouping_froude, reynolds, round2};
pub use towing_force::{towing_force, TowingForce, TowingForceInput};

/// 상관식/무차원수의 정의역을 벗어난 입력.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("{quantity}은(는) 0보다 커야 합니다 (입력값 {value})")]
    NonPositive { quantity: &'static str, value: f64 },
    #[error("레이놀즈수 {0}는 1보다 커야 합니다 (log-log 상관식 정의역)")]
    ReynoldsTooSmall(f64),
}
