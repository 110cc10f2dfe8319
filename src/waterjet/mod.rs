//! 워터젯 추진 관련 계산 모듈 모음.
//! Kiel 프로브 유량 교정, 반류계수 조회, 운동량 기반 총추력 계산으로 구성한다.

pub mod gross_thrust;
pub mod mass_flow;
pub mod wake_fraction;

pub use gross_thrust::{gross_thrust, GrossThrust};
pub use mass_flow::{jet_flow, mass_flow_rate, JetFlow};
pub use wake_fraction::{
    inlet_velocity, wake_fraction, WakeFractionPair, WakeFractionTable, WakeTableError,
};
