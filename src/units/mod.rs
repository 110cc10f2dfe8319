//! 단위 정의 및 변환 모듈 모음.

pub mod force;
pub mod velocity;

pub use force::{convert_force, ForceUnit};
pub use velocity::{convert_velocity, knots_to_mps, mps_to_knots, VelocityUnit};
