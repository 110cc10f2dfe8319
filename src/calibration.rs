//! 원시 센서 전압을 영점/교정계수 쌍으로 물리 단위로 환산한다.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 자항 시험에서 기록하는 물리 채널.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// 예인전차 속도(m/s)
    Speed,
    /// 선수 LVDT(mm)
    LvdtFwd,
    /// 선미 LVDT(mm)
    LvdtAft,
    /// 저항 동력계(g)
    Drag,
    RpmPort,
    RpmStbd,
    ThrustPort,
    ThrustStbd,
    TorquePort,
    TorqueStbd,
    /// 좌현 Kiel 프로브 전압(V)
    KielPort,
    /// 우현 Kiel 프로브 전압(V)
    KielStbd,
}

impl Channel {
    pub const ALL: [Channel; 12] = [
        Channel::Speed,
        Channel::LvdtFwd,
        Channel::LvdtAft,
        Channel::Drag,
        Channel::RpmPort,
        Channel::RpmStbd,
        Channel::ThrustPort,
        Channel::ThrustStbd,
        Channel::TorquePort,
        Channel::TorqueStbd,
        Channel::KielPort,
        Channel::KielStbd,
    ];

    /// CSV 헤더 등에 쓰는 이름.
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Speed => "speed",
            Channel::LvdtFwd => "lvdt_fwd",
            Channel::LvdtAft => "lvdt_aft",
            Channel::Drag => "drag",
            Channel::RpmPort => "rpm_port",
            Channel::RpmStbd => "rpm_stbd",
            Channel::ThrustPort => "thrust_port",
            Channel::ThrustStbd => "thrust_stbd",
            Channel::TorquePort => "torque_port",
            Channel::TorqueStbd => "torque_stbd",
            Channel::KielPort => "kiel_port",
            Channel::KielStbd => "kiel_stbd",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Channel::ALL
            .iter()
            .copied()
            .find(|c| c.name() == key)
            .ok_or_else(|| format!("알 수 없는 채널: {s}"))
    }
}

/// 채널 하나의 영점과 교정계수. 런마다 한 번 읽고 바꾸지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelCalibration {
    pub zero: f64,
    pub factor: f64,
}

impl ChannelCalibration {
    pub const fn new(zero: f64, factor: f64) -> Self {
        Self { zero, factor }
    }

    /// 샘플 하나를 실단위로 환산한다.
    pub fn apply(&self, raw: f64) -> f64 {
        (raw - self.zero) * self.factor
    }
}

/// 한 런 동안 기록된 한 채널의 원시 샘플열.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawChannelSeries {
    pub samples: Vec<f64>,
}

impl RawChannelSeries {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl From<Vec<f64>> for RawChannelSeries {
    fn from(samples: Vec<f64>) -> Self {
        Self::new(samples)
    }
}

/// 교정 결과: 샘플별 실단위 값과 평균.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedSeries {
    pub real: Vec<f64>,
    pub mean: f64,
}

/// 원시 샘플열에 영점/교정계수를 적용한다.
///
/// `real[i] = (raw[i] - zero) * factor`, `mean`은 `real`의 산술평균이다.
/// 빈 입력은 상위 단계(런 입력 구성)에서 걸러진다고 가정한다.
pub fn convert(raw: &[f64], zero: f64, factor: f64) -> ConvertedSeries {
    let cal = ChannelCalibration::new(zero, factor);
    let real: Vec<f64> = raw.iter().map(|&v| cal.apply(v)).collect();
    let mean = real.iter().sum::<f64>() / real.len() as f64;
    ConvertedSeries { real, mean }
}

/// 런 하나의 채널별 교정값 모음.
pub type CalibrationSet = BTreeMap<Channel, ChannelCalibration>;
