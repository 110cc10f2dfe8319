//! CSV 입출력과 설정 파일 테스트.
mod common;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use common::{assert_close, base_record, identity_calibrations};
use towing_tank_toolbox::app;
use towing_tank_toolbox::calibration::Channel;
use towing_tank_toolbox::config::{self, AnalysisConfig};
use towing_tank_toolbox::datafile::{
    read_calibrations, read_records, read_records_file, read_run_samples, read_sea_trial,
    run_number_from_path, write_records, write_records_file, DataFileError,
};
use towing_tank_toolbox::run_record::{RunRecord, RUN_RECORD_COLUMNS};

const CHANNEL_HEADER: &str = "time,speed,lvdt_fwd,lvdt_aft,drag,rpm_port,rpm_stbd,thrust_port,thrust_stbd,torque_port,torque_stbd,kiel_port,kiel_stbd";

fn sample_csv(speed: f64) -> String {
    let mut out = format!("{CHANNEL_HEADER}\n");
    for i in 1..=4 {
        let t = i as f64 * 0.005;
        out.push_str(&format!(
            "{t},{speed},1.0,-1.0,1500,1850,1845,6.0,6.1,0.12,0.11,2.0,2.0\n"
        ));
    }
    out
}

#[test]
fn run_samples_are_read_by_channel_name() {
    let csv = "time, speed, drag, wave_probe\n0.005,1.50,1000,9\n0.010,1.60,1100,9\n";
    let input = read_run_samples(csv.as_bytes(), Path::new("run_7.csv"), 7, identity_calibrations())
        .expect("samples");
    assert_eq!(input.run_number, 7);
    assert_eq!(input.sample_count, 2);
    assert_close("record time", input.record_time, 0.010, 1e-12);
    assert_eq!(input.channels[&Channel::Speed].samples, vec![1.50, 1.60]);
    assert_close("drag mean", input.channel_mean(Channel::Drag).expect("drag"), 1050.0, 1e-12);
    assert_eq!(input.channels.len(), 2);
}

#[test]
fn malformed_samples_are_reported() {
    let bad = "time,speed\n0.005,abc\n";
    match read_run_samples(bad.as_bytes(), Path::new("run_1.csv"), 1, BTreeMap::new()) {
        Err(DataFileError::InvalidValue { line, column, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(column, "speed");
        }
        other => panic!("expected invalid value, got {other:?}"),
    }
    assert!(matches!(
        read_run_samples("speed\n1.0\n".as_bytes(), Path::new("x.csv"), 1, BTreeMap::new()),
        Err(DataFileError::MissingColumn { .. })
    ));
    assert!(matches!(
        read_run_samples("time,speed\n".as_bytes(), Path::new("x.csv"), 1, BTreeMap::new()),
        Err(DataFileError::EmptyData { .. })
    ));
}

#[test]
fn run_number_comes_from_trailing_digits() {
    assert_eq!(run_number_from_path(Path::new("data/run_101.csv")), Some(101));
    assert_eq!(run_number_from_path(Path::new("R0042.csv")), Some(42));
    assert_eq!(run_number_from_path(Path::new("calibration.csv")), None);
}

#[test]
fn record_csv_has_all_columns_in_order() {
    let records = vec![base_record()];
    let mut buf = Vec::new();
    write_records(&mut buf, &records).expect("write");
    let text = String::from_utf8(buf).expect("utf8");
    let header = text.lines().next().expect("header");
    let columns: Vec<&str> = header.split(',').collect();
    assert_eq!(columns.len(), RUN_RECORD_COLUMNS);
    assert_eq!(columns[0], "Run No.");
    assert_eq!(columns[4], "Froude length number (-)");
    assert_eq!(columns[27], "Towing force (N)");
    assert_eq!(columns[44], "TOTAL: Gross thrust (TG = p Q (vj - vi)) (N)");

    let back = read_records(text.as_bytes()).expect("read");
    assert_eq!(back.len(), 1);
    assert_eq!(back[0].run_number, records[0].run_number);
    assert_close("F_D", back[0].towing_force_n, records[0].towing_force_n, 1e-12);
}

#[test]
fn record_files_round_trip_through_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("records.csv");
    let records: Vec<RunRecord> = (1..=3)
        .map(|run| RunRecord {
            run_number: run,
            ..base_record()
        })
        .collect();
    write_records_file(&path, &records).expect("write");
    let back = read_records_file(&path).expect("read");
    assert_eq!(back.len(), 3);
    assert_eq!(back[2].run_number, 3);
    assert_close("TG A", back[1].gross_thrust_a_total_n, records[1].gross_thrust_a_total_n, 1e-12);
}

#[test]
fn calibration_and_sea_trial_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cal = dir.path().join("cal.csv");
    fs::write(&cal, "run,channel,zero,factor\n5,speed,0.01,2.0\n5,drag,0.0,100\n6,speed,0,1\n")
        .expect("write cal");
    let sets = read_calibrations(&cal).expect("cal");
    assert_eq!(sets.len(), 2);
    assert_close("factor", sets[&5][&Channel::Speed].factor, 2.0, 0.0);
    assert_close("zero", sets[&5][&Channel::Speed].zero, 0.01, 0.0);

    fs::write(&cal, "run,channel,zero,factor\n5,wave,0,1\n").expect("write cal");
    assert!(matches!(
        read_calibrations(&cal),
        Err(DataFileError::UnknownChannel { line: 2, .. })
    ));

    let trial = dir.path().join("trial.csv");
    fs::write(&trial, "speed_knots,power_kw\n12,800\n14,1250\n").expect("write trial");
    let (speeds, power) = read_sea_trial(&trial).expect("trial");
    assert_eq!(speeds, vec![12.0, 14.0]);
    assert_eq!(power, vec![800.0, 1250.0]);
}

#[test]
fn reduce_directory_reads_samples_and_calibrations() {
    let dir = tempfile::tempdir().expect("tempdir");
    let samples = dir.path().join("samples");
    fs::create_dir(&samples).expect("mkdir");
    fs::write(samples.join("run_1.csv"), sample_csv(1.55)).expect("run 1");
    fs::write(samples.join("run_2.csv"), sample_csv(1.70)).expect("run 2");
    fs::write(samples.join("notes.txt"), "ignored").expect("notes");

    let mut cal = String::from("run,channel,zero,factor\n");
    for run in [1, 2] {
        for ch in Channel::ALL {
            cal.push_str(&format!("{run},{},0,1\n", ch.name()));
        }
    }
    // 런 2는 우현 Kiel 교정값이 없다.
    let cal = cal.replace("2,kiel_stbd,0,1\n", "");
    let cal_path = dir.path().join("cal.csv");
    fs::write(&cal_path, cal).expect("cal");

    let report = app::reduce_directory(&samples, &cal_path, &AnalysisConfig::default())
        .expect("reduce");
    assert_eq!(report.records.len(), 1);
    let rec = &report.records[&1];
    assert_close("FS", rec.sampling_frequency_hz, 200.0, 1e-12);
    assert_close("Fr", rec.froude_number, 0.24, 1e-12);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].run_number, Some(2));
}

#[test]
fn config_is_created_then_reloaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let created = config::load_or_default(&path).expect("create");
    assert!(path.exists());
    let saved = fs::read_to_string(&path).expect("saved");
    assert!(saved.contains("draft = 0.136"));
    assert_eq!(created, AnalysisConfig::default());

    let mut edited = created.with_correlation_allowance(0.00035);
    edited.wake_buckets[0].runs = vec![101, 102, 103];
    edited.save(&path).expect("save");
    let loaded = config::load_or_default(&path).expect("reload");
    assert_eq!(loaded, edited);
    assert_close("Ca", loaded.hull.correlation_allowance, 0.00035, 0.0);
}

#[test]
fn partial_config_uses_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let defaults = AnalysisConfig::default();
    let mut text = String::from("[constants]\n");
    text.push_str(&toml::to_string(&defaults.constants).expect("constants"));
    text.push_str("\n[hull]\n");
    text.push_str(&toml::to_string(&defaults.hull).expect("hull"));
    fs::write(&path, text).expect("write");

    let loaded = config::load_or_default(&path).expect("load");
    assert_eq!(loaded.expected_froude_numbers.len(), 9);
    assert_eq!(loaded.wake_buckets, defaults.wake_buckets);
}

#[test]
fn hull_summary_reports_draft_and_correlation_allowance() {
    let cfg = AnalysisConfig::default().with_correlation_allowance(0.00059);
    let line = cfg.hull.summary();
    assert!(line.starts_with("deep transom"));
    assert!(line.contains("T 0.136 m"), "{line}");
    assert!(line.contains("Ca 0.00059"), "{line}");
}

#[test]
fn reduce_directory_skips_files_without_run_number() {
    let dir = tempfile::tempdir().expect("tempdir");
    let samples = dir.path().join("samples");
    fs::create_dir(&samples).expect("mkdir");
    fs::write(samples.join("run_3.csv"), sample_csv(1.55)).expect("run 3");
    fs::write(samples.join("summary.csv"), "time,speed\n").expect("summary");
    let mut cal = String::from("run,channel,zero,factor\n");
    for ch in Channel::ALL {
        cal.push_str(&format!("3,{},0,1\n", ch.name()));
    }
    let cal_path = dir.path().join("cal.csv");
    fs::write(&cal_path, cal).expect("cal");

    let report = app::reduce_directory(&samples, &cal_path, &AnalysisConfig::default())
        .expect("reduce");
    assert_eq!(report.records.keys().copied().collect::<Vec<_>>(), vec![3]);
    assert!(report.failures.is_empty());
}
