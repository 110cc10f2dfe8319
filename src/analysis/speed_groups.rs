use std::collections::BTreeMap;

use super::InsufficientDataError;
use crate::run_record::RunRecord;

/// 반올림된 프루드수를 정수(1/100 단위)로 보관하는 키.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FroudeKey(i64);

impl FroudeKey {
    pub fn from_froude(froude: f64) -> Self {
        FroudeKey((froude * 100.0).round() as i64)
    }

    pub fn froude(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// 같은 프루드수를 공유하는 런 결과 행 묶음.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedGroup {
    pub froude_number: f64,
    /// 입력 순서를 유지한다.
    pub records: Vec<RunRecord>,
}

impl SpeedGroup {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub type SpeedGroups = BTreeMap<FroudeKey, SpeedGroup>;

/// 결과 행을 반올림된 프루드수별로 나눈다. 중복 제거는 하지 않는다.
pub fn split<'a, I>(records: I) -> SpeedGroups
where
    I: IntoIterator<Item = &'a RunRecord>,
{
    let mut groups = SpeedGroups::new();
    for record in records {
        let key = FroudeKey::from_froude(record.froude_number);
        groups
            .entry(key)
            .or_insert_with(|| SpeedGroup {
                froude_number: key.froude(),
                records: Vec::new(),
            })
            .records
            .push(record.clone());
    }
    groups
}

/// 전체 데이터셋 집계 전 모든 예상 속도 구간이 있는지 확인한다.
pub fn ensure_complete(
    groups: &SpeedGroups,
    expected_froude_numbers: &[f64],
) -> Result<(), InsufficientDataError> {
    let missing: Vec<f64> = expected_froude_numbers
        .iter()
        .copied()
        .filter(|&fr| !groups.contains_key(&FroudeKey::from_froude(fr)))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(InsufficientDataError::IncompleteSpeedGroups {
            found: expected_froude_numbers.len() - missing.len(),
            expected: expected_froude_numbers.len(),
            missing,
        })
    }
}
