//! 런 샘플/교정값/결과 행/시운전 곡선 CSV 입출력.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::calibration::{CalibrationSet, Channel, ChannelCalibration, RawChannelSeries};
use crate::run_record::{RunInput, RunRecord};

#[derive(Debug, Error)]
pub enum DataFileError {
    #[error("{path}: 파일 입출력 오류: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: CSV 오류: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path}: {line}행 {column} 열 값 '{value}'을(를) 숫자로 읽을 수 없습니다")]
    InvalidValue {
        path: PathBuf,
        line: usize,
        column: String,
        value: String,
    },
    #[error("{path}: {line}행 알 수 없는 채널 '{name}'")]
    UnknownChannel {
        path: PathBuf,
        line: usize,
        name: String,
    },
    #[error("{path}: '{column}' 열이 없습니다")]
    MissingColumn { path: PathBuf, column: String },
    #[error("{path}: 데이터 행이 없습니다")]
    EmptyData { path: PathBuf },
}

fn open(path: &Path) -> Result<File, DataFileError> {
    File::open(path).map_err(|source| DataFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_err(path: &Path) -> impl Fn(csv::Error) -> DataFileError + '_ {
    move |source| DataFileError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

#[derive(Debug, Deserialize)]
struct CalibrationRow {
    run: u32,
    channel: String,
    zero: f64,
    factor: f64,
}

/// `run,channel,zero,factor` 형식의 교정 파일을 런별로 묶어 읽는다.
pub fn read_calibrations(path: &Path) -> Result<BTreeMap<u32, CalibrationSet>, DataFileError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(open(path)?);
    let mut out: BTreeMap<u32, CalibrationSet> = BTreeMap::new();
    for (idx, row) in reader.deserialize::<CalibrationRow>().enumerate() {
        let row = row.map_err(csv_err(path))?;
        let channel: Channel =
            row.channel
                .parse()
                .map_err(|_| DataFileError::UnknownChannel {
                    path: path.to_path_buf(),
                    line: idx + 2,
                    name: row.channel.clone(),
                })?;
        out.entry(row.run)
            .or_default()
            .insert(channel, ChannelCalibration::new(row.zero, row.factor));
    }
    Ok(out)
}

/// 런 샘플 파일을 읽는다. 헤더는 `time`과 채널 이름이며, 모르는 열은 건너뛴다.
///
/// 샘플 수는 행 수, 기록 시간은 마지막 `time` 값이다.
pub fn read_run_samples<R: Read>(
    reader: R,
    path: &Path,
    run_number: u32,
    calibrations: CalibrationSet,
) -> Result<RunInput, DataFileError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers().map_err(csv_err(path))?.clone();

    let time_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("time"))
        .ok_or_else(|| DataFileError::MissingColumn {
            path: path.to_path_buf(),
            column: "time".into(),
        })?;
    let mut columns: Vec<(usize, Channel)> = Vec::new();
    for (idx, name) in headers.iter().enumerate() {
        if idx == time_idx {
            continue;
        }
        match name.parse::<Channel>() {
            Ok(channel) => columns.push((idx, channel)),
            Err(_) => tracing::debug!(run = run_number, column = name, "알 수 없는 열 무시"),
        }
    }

    let mut last_time = None;
    let mut sample_count = 0usize;
    let mut series: BTreeMap<Channel, Vec<f64>> = BTreeMap::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err(path))?;
        let line = row_idx + 2;
        let parse = |idx: usize| -> Result<f64, DataFileError> {
            let raw = record.get(idx).unwrap_or_default();
            raw.parse::<f64>().map_err(|_| DataFileError::InvalidValue {
                path: path.to_path_buf(),
                line,
                column: headers.get(idx).unwrap_or_default().to_string(),
                value: raw.to_string(),
            })
        };
        last_time = Some(parse(time_idx)?);
        for &(idx, channel) in &columns {
            series.entry(channel).or_default().push(parse(idx)?);
        }
        sample_count += 1;
    }

    let record_time = last_time.ok_or_else(|| DataFileError::EmptyData {
        path: path.to_path_buf(),
    })?;
    Ok(RunInput {
        run_number,
        sample_count,
        record_time,
        channels: series
            .into_iter()
            .map(|(ch, samples)| (ch, RawChannelSeries::new(samples)))
            .collect(),
        calibrations,
    })
}

/// 파일 이름 끝의 숫자를 런 번호로 본다 (`run_101.csv` → 101).
pub fn run_number_from_path(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    let digits: String = stem
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}

/// 결과 행을 CSV로 쓴다. 열 순서는 `RunRecord` 필드 순서를 따른다.
pub fn write_records<'a, W, I>(writer: W, records: I) -> Result<(), csv::Error>
where
    W: Write,
    I: IntoIterator<Item = &'a RunRecord>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_records_file<'a, I>(path: &Path, records: I) -> Result<(), DataFileError>
where
    I: IntoIterator<Item = &'a RunRecord>,
{
    let file = File::create(path).map_err(|source| DataFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_records(file, records).map_err(csv_err(path))
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<RunRecord>, csv::Error> {
    csv::Reader::from_reader(reader).deserialize().collect()
}

pub fn read_records_file(path: &Path) -> Result<Vec<RunRecord>, DataFileError> {
    read_records(open(path)?).map_err(csv_err(path))
}

#[derive(Debug, Deserialize)]
struct SeaTrialRow {
    speed_knots: f64,
    power_kw: f64,
}

/// `speed_knots,power_kw` 형식의 해상 시운전 보정 동력을 읽는다.
pub fn read_sea_trial(path: &Path) -> Result<(Vec<f64>, Vec<f64>), DataFileError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(open(path)?);
    let mut speeds = Vec::new();
    let mut power = Vec::new();
    for row in reader.deserialize::<SeaTrialRow>() {
        let row = row.map_err(csv_err(path))?;
        speeds.push(row.speed_knots);
        power.push(row.power_kw);
    }
    if speeds.is_empty() {
        return Err(DataFileError::EmptyData {
            path: path.to_path_buf(),
        });
    }
    Ok((speeds, power))
}
