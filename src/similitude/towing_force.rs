/// 예인력 계산 입력.
#[derive(Debug, Clone)]
pub struct TowingForceInput {
    /// 수조 물 밀도(kg/m³)
    pub density: f64,
    /// 모형 속도(m/s)
    pub speed: f64,
    /// 침수 표면적(m²)
    pub wetted_area: f64,
    /// 형상계수 (1+k)
    pub form_factor: f64,
    /// 모형 마찰저항계수
    pub cf_model: f64,
    /// 실선 마찰저항계수
    pub cf_full: f64,
    /// 상관 수정계수 Ca
    pub correlation_allowance: f64,
}

/// 예인력 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowingForce {
    /// 예인력 계수 k·(CfM − CfS) − Ca
    pub coefficient: f64,
    /// 예인력(N)
    pub force: f64,
}

/// 모형-실선 마찰저항 차이를 보정하는 예인력(F_D)을 계산한다.
pub fn towing_force(input: &TowingForceInput) -> TowingForce {
    let coefficient =
        input.form_factor * (input.cf_model - input.cf_full) - input.correlation_allowance;
    let force = 0.5 * input.density * input.speed.powi(2) * input.wetted_area * coefficient;
    TowingForce { coefficient, force }
}
