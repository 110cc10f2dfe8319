use std::collections::HashMap;

use thiserror::Error;

use crate::config::WakeFractionBucket;

/// 좌/우현 반류계수 (1-w).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WakeFractionPair {
    pub port: f64,
    pub stbd: f64,
}

impl WakeFractionPair {
    /// 어떤 런 집합에도 속하지 않을 때 쓰는 값(보정 없음).
    pub const FALLBACK: WakeFractionPair = WakeFractionPair {
        port: 1.0,
        stbd: 1.0,
    };

    pub const fn new(port: f64, stbd: f64) -> Self {
        Self { port, stbd }
    }
}

/// 반류계수 테이블 구성 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WakeTableError {
    #[error("런 {run}이(가) Fr {first} 구간과 Fr {second} 구간에 중복 등록되어 있습니다")]
    OverlappingRun { run: u32, first: f64, second: f64 },
}

#[derive(Debug, Clone, PartialEq)]
struct Bucket {
    froude: f64,
    pair: WakeFractionPair,
}

/// 속도 구간별 반류계수와 런 번호 → 구간 매핑.
///
/// 구성 시 런 번호 집합이 서로소인지 검사한다.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WakeFractionTable {
    buckets: Vec<Bucket>,
    membership: HashMap<u32, usize>,
}

impl WakeFractionTable {
    pub fn from_buckets(buckets: &[WakeFractionBucket]) -> Result<Self, WakeTableError> {
        let mut membership = HashMap::new();
        for (idx, bucket) in buckets.iter().enumerate() {
            for &run in &bucket.runs {
                if let Some(prev) = membership.insert(run, idx) {
                    if prev != idx {
                        return Err(WakeTableError::OverlappingRun {
                            run,
                            first: buckets[prev].froude,
                            second: bucket.froude,
                        });
                    }
                }
            }
        }
        Ok(Self {
            buckets: buckets
                .iter()
                .map(|b| Bucket {
                    froude: b.froude,
                    pair: WakeFractionPair::new(b.port, b.stbd),
                })
                .collect(),
            membership,
        })
    }

    /// 구간 수.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// 구간에 등록된 런 번호 수.
    pub fn run_count(&self) -> usize {
        self.membership.len()
    }

    /// 런이 속한 구간의 (프루드수, 반류계수)를 돌려준다.
    pub fn lookup(&self, run_number: u32) -> Option<(f64, WakeFractionPair)> {
        let idx = *self.membership.get(&run_number)?;
        let bucket = self.buckets.get(idx)?;
        Some((bucket.froude, bucket.pair))
    }
}

/// 런 번호로 반류계수를 조회한다. 매칭되는 구간이 없으면 (1.0, 1.0)을 돌려준다.
pub fn wake_fraction(run_number: u32, table: &WakeFractionTable) -> WakeFractionPair {
    match table.lookup(run_number) {
        Some((_, pair)) => pair,
        None => {
            tracing::warn!(run = run_number, "반류계수 구간 없음, (1.0, 1.0) 사용");
            WakeFractionPair::FALLBACK
        }
    }
}

/// 흡입구 유입 속도 vi = V·(1-w).
pub fn inlet_velocity(model_speed: f64, wake_fraction: f64) -> f64 {
    model_speed * wake_fraction
}
