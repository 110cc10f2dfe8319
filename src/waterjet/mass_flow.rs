use crate::math::horner;

/// 두 교정 곡선을 나누는 Kiel 프로브 전압(V).
pub const KIEL_BRANCH_VOLTAGE: f64 = 1.86;

// 계수는 차수가 낮은 항부터.
const HIGH_VOLTAGE: [f64; 4] = [-2.6737, 4.3652, -1.0326, 0.1133];
const LOW_VOLTAGE: [f64; 6] = [-19.488, 45.647, -41.064, 19.255, -4.5094, 0.4186];

/// Kiel 프로브 전압으로부터 워터젯 질량유량(kg/s)을 추정한다.
///
/// 1.86 V 초과는 3차, 이하는 5차 펌프 교정 곡선을 쓴다.
pub fn mass_flow_rate(kiel_probe_voltage: f64) -> f64 {
    if kiel_probe_voltage > KIEL_BRANCH_VOLTAGE {
        horner(&HIGH_VOLTAGE, kiel_probe_voltage)
    } else {
        horner(&LOW_VOLTAGE, kiel_probe_voltage)
    }
}

/// 한 현(좌/우)의 제트 유량 상태.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JetFlow {
    /// 질량유량(kg/s)
    pub mass_flow: f64,
    /// 체적유량(m³/s)
    pub volume_flow: f64,
    /// 노즐 분사 속도(m/s)
    pub jet_velocity: f64,
}

/// 질량유량에서 체적유량과 분사 속도를 구한다.
pub fn jet_flow(mass_flow: f64, density: f64, nozzle_area: f64) -> JetFlow {
    let volume_flow = mass_flow / density;
    JetFlow {
        mass_flow,
        volume_flow,
        jet_velocity: volume_flow / nozzle_area,
    }
}
