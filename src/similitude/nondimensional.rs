use super::DomainError;

fn ensure_positive(quantity: &'static str, value: f64) -> Result<(), DomainError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::NonPositive { quantity, value })
    }
}

/// 소수 둘째 자리 반올림. 0.5는 0에서 먼 쪽으로 올린다.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 프루드 길이수 Fr = V / sqrt(g·L).
pub fn froude(speed: f64, reference_length: f64, gravity: f64) -> Result<f64, DomainError> {
    ensure_positive("속도", speed)?;
    ensure_positive("기준 길이", reference_length)?;
    Ok(speed / (gravity * reference_length).sqrt())
}

/// 레이놀즈수 Re = V·L / ν.
pub fn reynolds(
    speed: f64,
    reference_length: f64,
    kinematic_viscosity: f64,
) -> Result<f64, DomainError> {
    ensure_positive("속도", speed)?;
    ensure_positive("기준 길이", reference_length)?;
    Ok(speed * reference_length / kinematic_viscosity)
}

/// 속도 구간 분류에 쓰는 프루드수.
///
/// 평균 속도를 먼저 소수 둘째 자리로 반올림하고, 그 속도로 구한 프루드수를 다시 반올림한다.
/// 구간 경계에서 어느 구간에 들어갈지가 이 이중 반올림에 좌우된다.
pub fn grouping_froude(
    mean_speed: f64,
    reference_length: f64,
    gravity: f64,
) -> Result<f64, DomainError> {
    let rounded_speed = round2(mean_speed);
    let fr = froude(rounded_speed, reference_length, gravity)?;
    Ok(round2(fr))
}
