use serde::{Deserialize, Serialize};

/// 힘 단위. 내부 기준은 N이다.
///
/// 저항 동력계는 질량(g)으로 교정되므로 중력가속도를 곱해 N으로 환산한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceUnit {
    Newton,
    GramForce,
    KilogramForce,
}

fn to_newton(value: f64, unit: ForceUnit, gravity: f64) -> f64 {
    match unit {
        ForceUnit::Newton => value,
        ForceUnit::GramForce => value / 1000.0 * gravity,
        ForceUnit::KilogramForce => value * gravity,
    }
}

fn from_newton(value: f64, unit: ForceUnit, gravity: f64) -> f64 {
    match unit {
        ForceUnit::Newton => value,
        ForceUnit::GramForce => value / gravity * 1000.0,
        ForceUnit::KilogramForce => value / gravity,
    }
}

/// 힘을 변환한다. `gravity`는 시험 수조의 중력가속도(m/s²)이다.
pub fn convert_force(value: f64, from: ForceUnit, to: ForceUnit, gravity: f64) -> f64 {
    let base = to_newton(value, from, gravity);
    from_newton(base, to, gravity)
}
