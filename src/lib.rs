//! 워터젯 자항 시험 데이터 처리 라이브러리.
//! 센서 교정 → 무차원수/마찰저항 → 예인력 → 워터젯 유량·총추력 → 속도 구간별 자항점 → 실선 확장 순으로 계산한다.

pub mod analysis;
pub mod app;
pub mod calibration;
pub mod config;
pub mod datafile;
pub mod math;
pub mod report;
pub mod run_record;
pub mod similitude;
pub mod units;
pub mod waterjet;
