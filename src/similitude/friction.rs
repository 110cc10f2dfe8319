//! Grigson 마찰저항계수 상관식.
//! Re < 1e7과 그 이상에서 서로 다른 log-log 다항식을 쓴다.

use super::DomainError;
use crate::math::horner;

/// 두 분기를 나누는 레이놀즈수.
pub const GRIGSON_BRANCH_REYNOLDS: f64 = 1.0e7;

const LOW_RE: [f64; 3] = [2.98651, -10.8843, 5.15283];
const HIGH_RE: [f64; 4] = [-9.57459, 26.6084, -30.8285, 10.8914];

/// 레이놀즈수로부터 마찰저항계수 Cf를 구한다. 모형/실선 모두 같은 식을 쓴다.
pub fn friction_coefficient(reynolds: f64) -> Result<f64, DomainError> {
    if reynolds.is_nan() || reynolds <= 1.0 {
        return Err(DomainError::ReynoldsTooSmall(reynolds));
    }
    let l = reynolds.log10().log10();
    let exponent = if reynolds < GRIGSON_BRANCH_REYNOLDS {
        horner(&LOW_RE, l)
    } else {
        horner(&HIGH_RE, l)
    };
    Ok(10f64.powf(exponent))
}
