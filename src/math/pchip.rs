//! 단조 구간별 3차 Hermite 보간(PCHIP, Fritsch-Carlson 기울기).
//! 범위 밖은 양 끝 구간의 3차식을 그대로 연장한다.

use super::polyfit::FitError;

#[derive(Debug, Clone, PartialEq)]
pub struct Pchip {
    x: Vec<f64>,
    y: Vec<f64>,
    slopes: Vec<f64>,
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn end_slope(h0: f64, h1: f64, del0: f64, del1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * del0 - h0 * del1) / (h0 + h1);
    if sign(d) != sign(del0) {
        0.0
    } else if sign(del0) != sign(del1) && d.abs() > (3.0 * del0).abs() {
        3.0 * del0
    } else {
        d
    }
}

impl Pchip {
    /// 보간기를 만든다. 점은 x 기준으로 정렬하고, 같은 x는 첫 점만 남긴다.
    ///
    /// 서로 다른 x가 2개 미만이면 `FitError::Singular`.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, FitError> {
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        let mut points: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points.dedup_by(|next, prev| next.0 == prev.0);
        if points.len() < 2 {
            return Err(FitError::Singular);
        }
        let (x, y): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();

        let n = x.len();
        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let del: Vec<f64> = y
            .windows(2)
            .zip(&h)
            .map(|(w, hk)| (w[1] - w[0]) / hk)
            .collect();

        let mut slopes = vec![0.0; n];
        if n == 2 {
            slopes[0] = del[0];
            slopes[1] = del[0];
        } else {
            for k in 1..n - 1 {
                if sign(del[k - 1]) * sign(del[k]) > 0.0 {
                    let w1 = 2.0 * h[k] + h[k - 1];
                    let w2 = h[k] + 2.0 * h[k - 1];
                    slopes[k] = (w1 + w2) / (w1 / del[k - 1] + w2 / del[k]);
                }
            }
            slopes[0] = end_slope(h[0], h[1], del[0], del[1]);
            slopes[n - 1] = end_slope(h[n - 2], h[n - 3], del[n - 2], del[n - 3]);
        }

        Ok(Self { x, y, slopes })
    }

    /// `xq`에서의 값.
    pub fn eval(&self, xq: f64) -> f64 {
        let n = self.x.len();
        // 범위 밖이면 끝 구간을 연장
        let k = match self.x.partition_point(|&xi| xi <= xq) {
            0 => 0,
            i if i >= n => n - 2,
            i => i - 1,
        };
        let h = self.x[k + 1] - self.x[k];
        let t = xq - self.x[k];
        let del = (self.y[k + 1] - self.y[k]) / h;
        let d0 = self.slopes[k];
        let d1 = self.slopes[k + 1];
        let c = (3.0 * del - 2.0 * d0 - d1) / h;
        let b = (d0 - 2.0 * del + d1) / (h * h);
        self.y[k] + t * (d0 + t * (c + t * b))
    }
}
