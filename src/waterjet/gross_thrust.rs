use super::mass_flow::JetFlow;

/// 두 운동량 정의에 따른 총추력(N).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GrossThrust {
    /// 정의 A: ṁ·vj (펌프 측 운동량 유속만)
    pub def_a: f64,
    /// 정의 B: ṁ·(vj − vi) (흡입구 유입 운동량을 뺀 순 유속)
    pub def_b: f64,
}

impl std::ops::Add for GrossThrust {
    type Output = GrossThrust;

    fn add(self, rhs: Self) -> Self::Output {
        GrossThrust {
            def_a: self.def_a + rhs.def_a,
            def_b: self.def_b + rhs.def_b,
        }
    }
}

/// 한 현의 총추력을 계산한다. 좌우 합은 `+`로 구한다.
pub fn gross_thrust(mass_flow: f64, jet_velocity: f64, inlet_velocity: f64) -> GrossThrust {
    GrossThrust {
        def_a: mass_flow * jet_velocity,
        def_b: mass_flow * (jet_velocity - inlet_velocity),
    }
}

impl JetFlow {
    /// 이 제트의 총추력.
    pub fn gross_thrust(&self, inlet_velocity: f64) -> GrossThrust {
        gross_thrust(self.mass_flow, self.jet_velocity, inlet_velocity)
    }
}
