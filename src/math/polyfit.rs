use thiserror::Error;

/// 다항식 회귀 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("x와 y의 길이가 다릅니다 ({x} != {y})")]
    LengthMismatch { x: usize, y: usize },
    #[error("{degree}차 회귀에는 최소 {required}개의 점이 필요합니다 (현재 {available}개)")]
    Underdetermined {
        degree: usize,
        required: usize,
        available: usize,
    },
    #[error("회귀 행렬이 특이합니다 (서로 다른 x 값이 부족함)")]
    Singular,
}

/// 오름차순 계수 다항식 c0 + c1·x + c2·x² + ...
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    pub coeffs: Vec<f64>,
}

impl Polynomial {
    pub fn new(coeffs: Vec<f64>) -> Self {
        Self { coeffs }
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn eval(&self, x: f64) -> f64 {
        horner(&self.coeffs, x)
    }
}

/// 오름차순 계수 다항식을 Horner 법으로 평가한다.
pub fn horner(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// 최소제곱 다항식 회귀. Vandermonde 행렬에 Householder QR을 적용한다.
///
/// 서로 다른 x 값이 `degree + 1`개 미만이면 `FitError::Singular`.
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> Result<Polynomial, FitError> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    let m = x.len();
    let n = degree + 1;
    if m < n {
        return Err(FitError::Underdetermined {
            degree,
            required: n,
            available: m,
        });
    }

    // 열 우선(column-major) Vandermonde 행렬
    let mut a: Vec<Vec<f64>> = (0..n)
        .map(|j| x.iter().map(|&xi| xi.powi(j as i32)).collect())
        .collect();
    let mut b = y.to_vec();

    let scale = a
        .iter()
        .flat_map(|col| col.iter())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()))
        .max(1.0);

    for k in 0..n {
        let norm = a[k][k..].iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm <= 1e-12 * scale {
            return Err(FitError::Singular);
        }
        let alpha = if a[k][k] > 0.0 { -norm } else { norm };
        let mut v: Vec<f64> = a[k][k..].to_vec();
        v[0] -= alpha;
        let v_norm_sq: f64 = v.iter().map(|e| e * e).sum();
        if v_norm_sq == 0.0 {
            continue;
        }
        for col in a.iter_mut().skip(k) {
            let dot: f64 = v.iter().zip(&col[k..]).map(|(vi, ci)| vi * ci).sum();
            let f = 2.0 * dot / v_norm_sq;
            for (ci, vi) in col[k..].iter_mut().zip(&v) {
                *ci -= f * vi;
            }
        }
        let dot: f64 = v.iter().zip(&b[k..]).map(|(vi, bi)| vi * bi).sum();
        let f = 2.0 * dot / v_norm_sq;
        for (bi, vi) in b[k..].iter_mut().zip(&v) {
            *bi -= f * vi;
        }
    }

    // R·c = Qᵀb 후진대입
    let mut coeffs = vec![0.0; n];
    for i in (0..n).rev() {
        let diag = a[i][i];
        if diag.abs() <= 1e-12 * scale {
            return Err(FitError::Singular);
        }
        let s: f64 = ((i + 1)..n).map(|j| a[j][i] * coeffs[j]).sum();
        coeffs[i] = (b[i] - s) / diag;
    }
    Ok(Polynomial::new(coeffs))
}
