use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// 시험 수조와 실선 해역의 물리 상수.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// 중력가속도(m/s²)
    pub gravity: f64,
    /// 수조 청수 밀도(kg/m³)
    pub model_water_density: f64,
    /// 수조 청수 동점성계수(m²/s)
    pub model_kinematic_viscosity: f64,
    /// 해수 밀도(kg/m³)
    pub sea_water_density: f64,
    /// 해수 동점성계수(m²/s)
    pub sea_kinematic_viscosity: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            gravity: 9.806,
            model_water_density: 1000.0,
            model_kinematic_viscosity: 1.0411e-6,
            sea_water_density: 1025.0,
            sea_kinematic_viscosity: 1.1892e-6,
        }
    }
}

/// 모형선 선형 조건(흘수/트림 상태)별 치수와 저항 보정값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullCondition {
    /// 조건 이름(보고용)
    pub name: String,
    /// 수선 길이(m)
    pub waterline_length: f64,
    /// 침수 표면적(m²)
    pub wetted_area: f64,
    /// 흘수(m)
    pub draft: f64,
    /// 실선/모형 축척비
    pub scale_ratio: f64,
    /// 워터젯 노즐 단면적(m²)
    pub nozzle_area: f64,
    /// 형상계수 (1+k)
    pub form_factor: f64,
    /// 상관 수정계수 Ca
    pub correlation_allowance: f64,
}

impl Default for HullCondition {
    fn default() -> Self {
        Self {
            name: "deep transom".into(),
            waterline_length: 4.30,
            wetted_area: 1.501,
            draft: 0.136,
            scale_ratio: 21.6,
            nozzle_area: 0.00087,
            form_factor: 1.18,
            correlation_allowance: 0.0,
        }
    }
}

impl HullCondition {
    /// 보고서 머리에 붙이는 선형 조건 한 줄 요약.
    pub fn summary(&self) -> String {
        format!(
            "{}  L_wl {:.3} m  S {:.3} m²  T {:.3} m  λ {:.1}  1+k {:.3}  Ca {:.5}",
            self.name,
            self.waterline_length,
            self.wetted_area,
            self.draft,
            self.scale_ratio,
            self.form_factor,
            self.correlation_allowance,
        )
    }
}

/// 속도 구간 하나의 반류계수 정의. `runs`에 속한 런에만 적용된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WakeFractionBucket {
    /// 구간 대표 프루드수
    pub froude: f64,
    /// 좌현 (1-w)
    pub port: f64,
    /// 우현 (1-w)
    pub stbd: f64,
    /// 이 구간에 속하는 런 번호. 기본값은 비어 있으므로 시험 캠페인의 런 번호를 설정 파일에 채워야 한다.
    /// 어느 구간에도 없는 런은 반류계수 (1.0, 1.0)으로 처리된다.
    #[serde(default)]
    pub runs: Vec<u32>,
}

fn default_wake_buckets() -> Vec<WakeFractionBucket> {
    // 런 번호 집합은 시험 캠페인마다 설정 파일로 채운다.
    [
        (0.24, 0.781, 0.784),
        (0.26, 0.788, 0.792),
        (0.28, 0.794, 0.797),
        (0.30, 0.801, 0.803),
        (0.32, 0.806, 0.809),
        (0.34, 0.812, 0.814),
        (0.36, 0.817, 0.820),
        (0.38, 0.823, 0.825),
        (0.40, 0.828, 0.830),
    ]
    .into_iter()
    .map(|(froude, port, stbd)| WakeFractionBucket {
        froude,
        port,
        stbd,
        runs: Vec::new(),
    })
    .collect()
}

fn default_expected_froude() -> Vec<f64> {
    (0..9).map(|i| 0.24 + 0.02 * i as f64).collect()
}

/// 한 번의 해석 패스에 쓰는 불변 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// 전체 데이터셋 집계 전에 모두 존재해야 하는 속도 구간(프루드수)
    #[serde(default = "default_expected_froude")]
    pub expected_froude_numbers: Vec<f64>,
    pub constants: PhysicalConstants,
    pub hull: HullCondition,
    #[serde(default = "default_wake_buckets")]
    pub wake_buckets: Vec<WakeFractionBucket>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            expected_froude_numbers: default_expected_froude(),
            constants: PhysicalConstants::default(),
            hull: HullCondition::default(),
            wake_buckets: default_wake_buckets(),
        }
    }
}

impl AnalysisConfig {
    /// 상관 수정계수만 바꾼 사본을 만든다. 패스마다 Ca를 다르게 쓸 때 사용한다.
    pub fn with_correlation_allowance(&self, correlation_allowance: f64) -> Self {
        let mut cfg = self.clone();
        cfg.hull.correlation_allowance = correlation_allowance;
        cfg
    }

    /// 설정을 TOML로 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: AnalysisConfig = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = AnalysisConfig::default();
        save_config(&cfg, path)?;
        tracing::info!(path = %path.display(), "기본 설정 파일을 생성했습니다");
        Ok(cfg)
    }
}

fn save_config(cfg: &AnalysisConfig, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}
