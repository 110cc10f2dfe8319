use serde::{Deserialize, Serialize};

/// 1 knot = 1852 m / 3600 s
pub const METER_PER_SECOND_PER_KNOT: f64 = 1852.0 / 3600.0;

/// 속도 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityUnit {
    MeterPerSecond,
    Knot,
    FootPerSecond,
    KilometerPerHour,
}

impl VelocityUnit {
    /// 이 단위 1이 몇 m/s인지.
    pub const fn in_meters_per_second(self) -> f64 {
        match self {
            VelocityUnit::MeterPerSecond => 1.0,
            VelocityUnit::Knot => METER_PER_SECOND_PER_KNOT,
            VelocityUnit::FootPerSecond => 0.3048,
            VelocityUnit::KilometerPerHour => 1.0 / 3.6,
        }
    }
}

pub fn convert_velocity(value: f64, from: VelocityUnit, to: VelocityUnit) -> f64 {
    if from == to {
        return value;
    }
    value * from.in_meters_per_second() / to.in_meters_per_second()
}

/// 실선 속도 보고용.
pub fn mps_to_knots(speed_mps: f64) -> f64 {
    speed_mps / METER_PER_SECOND_PER_KNOT
}

pub fn knots_to_mps(speed_knots: f64) -> f64 {
    speed_knots * METER_PER_SECOND_PER_KNOT
}
