use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::analysis::full_scale::ComparisonError;
use crate::analysis::{
    self, ensure_complete, predict_effective_power, EfficiencyComparison, FullScalePrediction,
    InsufficientDataError, SeaTrialCurve, SelfPropulsionPoint,
};
use crate::config::{AnalysisConfig, ConfigError};
use crate::datafile::{self, DataFileError};
use crate::run_record::{build_run_record, RunBuildError, RunInput, RunRecord, ThrustDefinition};
use crate::waterjet::{WakeFractionTable, WakeTableError};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("반류계수 테이블 오류: {0}")]
    WakeTable(#[from] WakeTableError),
    #[error("데이터 파일 오류: {0}")]
    DataFile(#[from] DataFileError),
    #[error("런 계산 오류: {0}")]
    RunBuild(#[from] RunBuildError),
    #[error("데이터 부족: {0}")]
    InsufficientData(#[from] InsufficientDataError),
    #[error("실선 비교 오류: {0}")]
    Comparison(#[from] ComparisonError),
}

/// 결과 행을 만들지 못한 런.
#[derive(Debug)]
pub struct RunFailure {
    pub run_number: Option<u32>,
    pub error: AppError,
}

/// 런 일괄 처리 결과. 결과 행은 런 번호로 보관하고 실패는 따로 모은다.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub records: BTreeMap<u32, RunRecord>,
    pub failures: Vec<RunFailure>,
}

/// 런 입력들을 결과 행으로 만든다. 한 런의 실패는 다른 런에 영향을 주지 않는다.
///
/// 반류계수 테이블이 잘못되면 모든 런에 영향을 주므로 전체를 중단한다.
pub fn reduce<I>(inputs: I, config: &AnalysisConfig) -> Result<BatchReport, AppError>
where
    I: IntoIterator<Item = RunInput>,
{
    let wake_table = WakeFractionTable::from_buckets(&config.wake_buckets)?;
    if wake_table.run_count() == 0 {
        tracing::warn!("반류계수 구간에 런 번호가 하나도 없어 모든 런이 (1.0, 1.0)을 씁니다");
    }
    let mut report = BatchReport::default();
    for input in inputs {
        let run = input.run_number;
        match build_run_record(&input, config, &wake_table) {
            Ok(record) => {
                if report.records.insert(run, record).is_some() {
                    tracing::warn!(run, "같은 런 번호가 다시 처리되어 이전 결과를 덮어씁니다");
                }
            }
            Err(err) => {
                tracing::warn!(run, error = %err, "런 처리 실패");
                report.failures.push(RunFailure {
                    run_number: Some(run),
                    error: err.into(),
                });
            }
        }
    }
    tracing::info!(
        built = report.records.len(),
        failed = report.failures.len(),
        "런 일괄 처리 완료"
    );
    Ok(report)
}

/// 샘플 디렉터리의 `*.csv` 파일과 교정 파일로 일괄 처리한다.
///
/// 파일을 읽지 못한 런도 실패 목록에 넣고 나머지를 계속 처리한다.
pub fn reduce_directory(
    samples_dir: &Path,
    calibration_path: &Path,
    config: &AnalysisConfig,
) -> Result<BatchReport, AppError> {
    let mut calibrations = datafile::read_calibrations(calibration_path)?;
    let mut paths: Vec<PathBuf> = fs::read_dir(samples_dir)
        .map_err(|source| DataFileError::Io {
            path: samples_dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| match entry {
            Ok(e) => Some(e.path()),
            Err(err) => {
                tracing::warn!(dir = %samples_dir.display(), error = %err, "디렉터리 항목 읽기 실패");
                None
            }
        })
        .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv")))
        .collect();
    paths.sort();

    let mut inputs = Vec::new();
    let mut failures = Vec::new();
    for path in paths {
        let Some(run) = datafile::run_number_from_path(&path) else {
            tracing::debug!(path = %path.display(), "런 번호가 없는 파일 무시");
            continue;
        };
        let cal = calibrations.remove(&run).unwrap_or_default();
        let loaded = fs::File::open(&path)
            .map_err(|source| DataFileError::Io {
                path: path.clone(),
                source,
            })
            .and_then(|file| datafile::read_run_samples(file, &path, run, cal));
        match loaded {
            Ok(input) => inputs.push(input),
            Err(err) => {
                tracing::warn!(run, error = %err, "런 파일 읽기 실패");
                failures.push(RunFailure {
                    run_number: Some(run),
                    error: err.into(),
                });
            }
        }
    }

    let mut report = reduce(inputs, config)?;
    failures.append(&mut report.failures);
    report.failures = failures;
    Ok(report)
}

/// 구간 하나의 자항점 계산 실패.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFailure {
    pub froude_number: f64,
    pub definition: ThrustDefinition,
    pub error: InsufficientDataError,
}

/// 자항점 계산 결과.
#[derive(Debug)]
pub struct SolveReport {
    pub points: Vec<SelfPropulsionPoint>,
    pub failures: Vec<GroupFailure>,
    /// 전체 데이터셋 집계 조건. `Err`이면 `predictions`는 비어 있다.
    pub completeness: Result<(), InsufficientDataError>,
    pub predictions: Vec<FullScalePrediction>,
    /// 시운전 곡선이 주어졌을 때 예측값마다 η_D 비교. 없으면 비어 있다.
    pub efficiencies: Vec<EfficiencyComparison>,
}

/// 결과 행을 속도 구간으로 나눠 정의 A/B 자항점을 구하고, 모든 구간이 있으면 실선 유효동력을 추정한다.
///
/// 시운전 곡선을 주면 각 추정값의 추진효율 η_D도 계산한다.
pub fn solve_all<'a, I>(
    records: I,
    config: &AnalysisConfig,
    sea_trial: Option<&SeaTrialCurve>,
) -> SolveReport
where
    I: IntoIterator<Item = &'a RunRecord>,
{
    let groups = analysis::split(records);
    let mut points = Vec::new();
    let mut failures = Vec::new();
    for group in groups.values() {
        for definition in ThrustDefinition::ALL {
            match analysis::solve(group, definition) {
                Ok(point) => points.push(point),
                Err(error) => {
                    tracing::warn!(froude = group.froude_number, ?definition, %error, "자항점 계산 실패");
                    failures.push(GroupFailure {
                        froude_number: group.froude_number,
                        definition,
                        error,
                    });
                }
            }
        }
    }

    let completeness = ensure_complete(&groups, &config.expected_froude_numbers);
    let predictions = match &completeness {
        Ok(()) => {
            tracing::info!(groups = groups.len(), "모든 속도 구간 확인, 실선 확장 진행");
            points
                .iter()
                .filter_map(|point| {
                    let key = analysis::FroudeKey::from_froude(point.froude_number);
                    predict_effective_power(point, groups.get(&key)?, config)
                })
                .collect()
        }
        Err(err) => {
            tracing::warn!(%err, "전체 데이터셋 집계를 건너뜁니다");
            Vec::new()
        }
    };

    let efficiencies = match sea_trial {
        Some(curve) => predictions.iter().map(|p| p.compare_with(curve)).collect(),
        None => Vec::new(),
    };

    SolveReport {
        points,
        failures,
        completeness,
        predictions,
        efficiencies,
    }
}
