//! 런 하나의 채널 평균값으로부터 45개 파생 항목을 가진 결과 행을 만든다.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calibration::{convert, CalibrationSet, Channel, RawChannelSeries};
use crate::config::AnalysisConfig;
use crate::similitude::{self, DomainError, TowingForceInput};
use crate::units::{convert_force, mps_to_knots, ForceUnit};
use crate::waterjet::{self, WakeFractionTable};

/// 런 입력 중 빠진 항목.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissingInputError {
    #[error("런 {run}: 채널 {channel} 데이터가 없습니다")]
    Channel { run: u32, channel: Channel },
    #[error("런 {run}: 채널 {channel} 교정값(영점/계수)이 없습니다")]
    Calibration { run: u32, channel: Channel },
}

/// 런 결과 행 구성 실패.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunBuildError {
    #[error(transparent)]
    Missing(#[from] MissingInputError),
    #[error("런 {run}: {source}")]
    Domain {
        run: u32,
        #[source]
        source: DomainError,
    },
}

/// 런 하나의 원시 입력. 런 처리 중에만 소유하고 결과 행을 만든 뒤 버린다.
#[derive(Debug, Clone, PartialEq)]
pub struct RunInput {
    pub run_number: u32,
    /// 샘플 수
    pub sample_count: usize,
    /// 마지막 타임스탬프(s)
    pub record_time: f64,
    pub channels: BTreeMap<Channel, RawChannelSeries>,
    pub calibrations: CalibrationSet,
}

impl RunInput {
    /// 채널별 원시 평균값만 있을 때 입력을 만든다.
    ///
    /// 교정이 선형이므로 평균 한 점을 환산한 값은 샘플 전체를 환산해 평균한 값과 같다.
    pub fn from_raw_means(
        run_number: u32,
        sample_count: usize,
        record_time: f64,
        raw_means: &BTreeMap<Channel, f64>,
        calibrations: CalibrationSet,
    ) -> Self {
        let channels = raw_means
            .iter()
            .map(|(&ch, &mean)| (ch, RawChannelSeries::new(vec![mean])))
            .collect();
        Self {
            run_number,
            sample_count,
            record_time,
            channels,
            calibrations,
        }
    }

    /// 채널 하나를 교정해 실단위 평균을 구한다.
    pub fn channel_mean(&self, channel: Channel) -> Result<f64, MissingInputError> {
        let run = self.run_number;
        let series = self
            .channels
            .get(&channel)
            .filter(|s| !s.is_empty())
            .ok_or(MissingInputError::Channel { run, channel })?;
        let cal = self
            .calibrations
            .get(&channel)
            .ok_or(MissingInputError::Calibration { run, channel })?;
        Ok(convert(&series.samples, cal.zero, cal.factor).mean)
    }
}

/// 런 하나의 결과 행. 필드 순서가 곧 CSV 열 순서이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    #[serde(rename = "Run No.")]
    pub run_number: u32,
    #[serde(rename = "FS (Hz)")]
    pub sampling_frequency_hz: f64,
    #[serde(rename = "No. of samples")]
    pub sample_count: usize,
    #[serde(rename = "Record time (s)")]
    pub record_time_s: f64,

    #[serde(rename = "Froude length number (-)")]
    pub froude_number: f64,
    #[serde(rename = "Speed (m/s)")]
    pub model_speed_mps: f64,
    #[serde(rename = "Nominal speed (m/s)")]
    pub nominal_model_speed_mps: f64,
    #[serde(rename = "Full scale speed (m/s)")]
    pub full_scale_speed_mps: f64,
    #[serde(rename = "Full scale speed (knots)")]
    pub full_scale_speed_knots: f64,

    #[serde(rename = "Forward LVDT (mm)")]
    pub lvdt_fwd_mm: f64,
    #[serde(rename = "Aft LVDT (mm)")]
    pub lvdt_aft_mm: f64,
    #[serde(rename = "Drag (g)")]
    pub drag_g: f64,
    #[serde(rename = "Drag (N)")]
    pub drag_n: f64,

    #[serde(rename = "PORT: Shaft speed (RPM)")]
    pub rpm_port: f64,
    #[serde(rename = "STBD: Shaft speed (RPM)")]
    pub rpm_stbd: f64,
    #[serde(rename = "PORT: Thrust (N)")]
    pub thrust_port_n: f64,
    #[serde(rename = "STBD: Thrust (N)")]
    pub thrust_stbd_n: f64,
    #[serde(rename = "PORT: Torque (Nm)")]
    pub torque_port_nm: f64,
    #[serde(rename = "STBD: Torque (Nm)")]
    pub torque_stbd_nm: f64,
    #[serde(rename = "PORT: Kiel probe (V)")]
    pub kiel_port_v: f64,
    #[serde(rename = "STBD: Kiel probe (V)")]
    pub kiel_stbd_v: f64,

    #[serde(rename = "Model scale Reynolds number (-)")]
    pub reynolds_model: f64,
    #[serde(rename = "Full scale Reynolds number (-)")]
    pub reynolds_full: f64,
    #[serde(rename = "Model scale frictional resistance coefficient (Grigson) (-)")]
    pub cf_model: f64,
    #[serde(rename = "Full scale frictional resistance coefficient (Grigson) (-)")]
    pub cf_full: f64,
    #[serde(rename = "Correlation coefficient (-)")]
    pub correlation_allowance: f64,
    #[serde(rename = "Form factor (-)")]
    pub form_factor: f64,
    #[serde(rename = "Towing force (N)")]
    pub towing_force_n: f64,
    #[serde(rename = "Towing force coefficient (-)")]
    pub towing_force_coefficient: f64,

    #[serde(rename = "PORT: Mass flow rate (kg/s)")]
    pub mass_flow_port_kgs: f64,
    #[serde(rename = "STBD: Mass flow rate (kg/s)")]
    pub mass_flow_stbd_kgs: f64,
    #[serde(rename = "PORT: Volume flow rate (m^3/s)")]
    pub volume_flow_port_m3s: f64,
    #[serde(rename = "STBD: Volume flow rate (m^3/s)")]
    pub volume_flow_stbd_m3s: f64,
    #[serde(rename = "PORT: Jet velocity (m/s)")]
    pub jet_velocity_port_mps: f64,
    #[serde(rename = "STBD: Jet velocity (m/s)")]
    pub jet_velocity_stbd_mps: f64,

    #[serde(rename = "PORT: Wake fraction (1-w) (-)")]
    pub wake_fraction_port: f64,
    #[serde(rename = "STBD: Wake fraction (1-w) (-)")]
    pub wake_fraction_stbd: f64,
    #[serde(rename = "PORT: Inlet velocity (m/s)")]
    pub inlet_velocity_port_mps: f64,
    #[serde(rename = "STBD: Inlet velocity (m/s)")]
    pub inlet_velocity_stbd_mps: f64,

    #[serde(rename = "PORT: Gross thrust (TG = p Q vj) (N)")]
    pub gross_thrust_a_port_n: f64,
    #[serde(rename = "STBD: Gross thrust (TG = p Q vj) (N)")]
    pub gross_thrust_a_stbd_n: f64,
    #[serde(rename = "TOTAL: Gross thrust (TG = p Q vj) (N)")]
    pub gross_thrust_a_total_n: f64,
    #[serde(rename = "PORT: Gross thrust (TG = p Q (vj - vi)) (N)")]
    pub gross_thrust_b_port_n: f64,
    #[serde(rename = "STBD: Gross thrust (TG = p Q (vj - vi)) (N)")]
    pub gross_thrust_b_stbd_n: f64,
    #[serde(rename = "TOTAL: Gross thrust (TG = p Q (vj - vi)) (N)")]
    pub gross_thrust_b_total_n: f64,
}

/// 결과 행의 열 수.
pub const RUN_RECORD_COLUMNS: usize = 45;

/// 총추력 운동량 정의.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThrustDefinition {
    /// ρQ·vj
    A,
    /// ρQ·(vj − vi)
    B,
}

impl ThrustDefinition {
    pub const ALL: [ThrustDefinition; 2] = [ThrustDefinition::A, ThrustDefinition::B];

    pub fn label(&self) -> &'static str {
        match self {
            ThrustDefinition::A => "TG = p Q vj",
            ThrustDefinition::B => "TG = p Q (vj - vi)",
        }
    }
}

impl RunRecord {
    /// 좌우 합 총추력(N).
    pub fn total_gross_thrust(&self, definition: ThrustDefinition) -> f64 {
        match definition {
            ThrustDefinition::A => self.gross_thrust_a_total_n,
            ThrustDefinition::B => self.gross_thrust_b_total_n,
        }
    }
}

/// 통계/비교에 쓰는 결과 행 항목 이름.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    FroudeNumber,
    ModelSpeed,
    FullScaleSpeedKnots,
    DragN,
    ShaftSpeedPort,
    ShaftSpeedStbd,
    TowingForce,
    MassFlowPort,
    MassFlowStbd,
    JetVelocityPort,
    JetVelocityStbd,
    GrossThrustTotalA,
    GrossThrustTotalB,
}

impl RecordField {
    pub const ALL: [RecordField; 13] = [
        RecordField::FroudeNumber,
        RecordField::ModelSpeed,
        RecordField::FullScaleSpeedKnots,
        RecordField::DragN,
        RecordField::ShaftSpeedPort,
        RecordField::ShaftSpeedStbd,
        RecordField::TowingForce,
        RecordField::MassFlowPort,
        RecordField::MassFlowStbd,
        RecordField::JetVelocityPort,
        RecordField::JetVelocityStbd,
        RecordField::GrossThrustTotalA,
        RecordField::GrossThrustTotalB,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RecordField::FroudeNumber => "froude_number",
            RecordField::ModelSpeed => "model_speed",
            RecordField::FullScaleSpeedKnots => "full_scale_speed_knots",
            RecordField::DragN => "drag_n",
            RecordField::ShaftSpeedPort => "shaft_speed_port",
            RecordField::ShaftSpeedStbd => "shaft_speed_stbd",
            RecordField::TowingForce => "towing_force",
            RecordField::MassFlowPort => "mass_flow_port",
            RecordField::MassFlowStbd => "mass_flow_stbd",
            RecordField::JetVelocityPort => "jet_velocity_port",
            RecordField::JetVelocityStbd => "jet_velocity_stbd",
            RecordField::GrossThrustTotalA => "gross_thrust_total_a",
            RecordField::GrossThrustTotalB => "gross_thrust_total_b",
        }
    }

    pub fn value(&self, record: &RunRecord) -> f64 {
        match self {
            RecordField::FroudeNumber => record.froude_number,
            RecordField::ModelSpeed => record.model_speed_mps,
            RecordField::FullScaleSpeedKnots => record.full_scale_speed_knots,
            RecordField::DragN => record.drag_n,
            RecordField::ShaftSpeedPort => record.rpm_port,
            RecordField::ShaftSpeedStbd => record.rpm_stbd,
            RecordField::TowingForce => record.towing_force_n,
            RecordField::MassFlowPort => record.mass_flow_port_kgs,
            RecordField::MassFlowStbd => record.mass_flow_stbd_kgs,
            RecordField::JetVelocityPort => record.jet_velocity_port_mps,
            RecordField::JetVelocityStbd => record.jet_velocity_stbd_mps,
            RecordField::GrossThrustTotalA => record.gross_thrust_a_total_n,
            RecordField::GrossThrustTotalB => record.gross_thrust_b_total_n,
        }
    }
}

/// 런 입력과 설정으로 결과 행을 만든다.
///
/// 교정 → 무차원수 → 마찰계수 → 예인력 → 유량 → 반류계수 → 총추력 순으로 계산한다.
/// 다른 런의 데이터에는 의존하지 않는다.
pub fn build_run_record(
    input: &RunInput,
    config: &AnalysisConfig,
    wake_table: &WakeFractionTable,
) -> Result<RunRecord, RunBuildError> {
    let run = input.run_number;
    let domain = |source: DomainError| RunBuildError::Domain { run, source };
    let consts = &config.constants;
    let hull = &config.hull;

    if input.record_time <= 0.0 || !input.record_time.is_finite() {
        return Err(domain(DomainError::NonPositive {
            quantity: "기록 시간",
            value: input.record_time,
        }));
    }
    let sampling_frequency_hz = (input.sample_count as f64 / input.record_time).round();

    let speed = input.channel_mean(Channel::Speed)?;
    let lvdt_fwd = input.channel_mean(Channel::LvdtFwd)?;
    let lvdt_aft = input.channel_mean(Channel::LvdtAft)?;
    let drag_g = input.channel_mean(Channel::Drag)?;
    let rpm_port = input.channel_mean(Channel::RpmPort)?;
    let rpm_stbd = input.channel_mean(Channel::RpmStbd)?;
    let thrust_port = input.channel_mean(Channel::ThrustPort)?;
    let thrust_stbd = input.channel_mean(Channel::ThrustStbd)?;
    let torque_port = input.channel_mean(Channel::TorquePort)?;
    let torque_stbd = input.channel_mean(Channel::TorqueStbd)?;
    let kiel_port = input.channel_mean(Channel::KielPort)?;
    let kiel_stbd = input.channel_mean(Channel::KielStbd)?;

    // 예인력은 구간(프루드수)에만 의존하도록 반올림된 Fr에서 되돌린 공칭 속도를 쓴다.
    let froude_number = similitude::grouping_froude(speed, hull.waterline_length, consts.gravity)
        .map_err(domain)?;
    let nominal_speed = froude_number * (consts.gravity * hull.waterline_length).sqrt();
    let full_scale_speed = nominal_speed * hull.scale_ratio.sqrt();

    let reynolds_model = similitude::reynolds(
        nominal_speed,
        hull.waterline_length,
        consts.model_kinematic_viscosity,
    )
    .map_err(domain)?;
    let reynolds_full = similitude::reynolds(
        full_scale_speed,
        hull.waterline_length * hull.scale_ratio,
        consts.sea_kinematic_viscosity,
    )
    .map_err(domain)?;
    let cf_model = similitude::friction_coefficient(reynolds_model).map_err(domain)?;
    let cf_full = similitude::friction_coefficient(reynolds_full).map_err(domain)?;

    let towing = similitude::towing_force(&TowingForceInput {
        density: consts.model_water_density,
        speed: nominal_speed,
        wetted_area: hull.wetted_area,
        form_factor: hull.form_factor,
        cf_model,
        cf_full,
        correlation_allowance: hull.correlation_allowance,
    });

    let jet_port = waterjet::jet_flow(
        waterjet::mass_flow_rate(kiel_port),
        consts.model_water_density,
        hull.nozzle_area,
    );
    let jet_stbd = waterjet::jet_flow(
        waterjet::mass_flow_rate(kiel_stbd),
        consts.model_water_density,
        hull.nozzle_area,
    );

    let wake = waterjet::wake_fraction(run, wake_table);
    let inlet_port = waterjet::inlet_velocity(speed, wake.port);
    let inlet_stbd = waterjet::inlet_velocity(speed, wake.stbd);

    let tg_port = jet_port.gross_thrust(inlet_port);
    let tg_stbd = jet_stbd.gross_thrust(inlet_stbd);
    let tg_total = tg_port + tg_stbd;

    tracing::debug!(run, froude_number, towing_force = towing.force, "런 결과 행 생성");

    Ok(RunRecord {
        run_number: run,
        sampling_frequency_hz,
        sample_count: input.sample_count,
        record_time_s: input.record_time,
        froude_number,
        model_speed_mps: speed,
        nominal_model_speed_mps: nominal_speed,
        full_scale_speed_mps: full_scale_speed,
        full_scale_speed_knots: mps_to_knots(full_scale_speed),
        lvdt_fwd_mm: lvdt_fwd,
        lvdt_aft_mm: lvdt_aft,
        drag_g,
        drag_n: convert_force(drag_g, ForceUnit::GramForce, ForceUnit::Newton, consts.gravity),
        rpm_port,
        rpm_stbd,
        thrust_port_n: thrust_port,
        thrust_stbd_n: thrust_stbd,
        torque_port_nm: torque_port,
        torque_stbd_nm: torque_stbd,
        kiel_port_v: kiel_port,
        kiel_stbd_v: kiel_stbd,
        reynolds_model,
        reynolds_full,
        cf_model,
        cf_full,
        correlation_allowance: hull.correlation_allowance,
        form_factor: hull.form_factor,
        towing_force_n: towing.force,
        towing_force_coefficient: towing.coefficient,
        mass_flow_port_kgs: jet_port.mass_flow,
        mass_flow_stbd_kgs: jet_stbd.mass_flow,
        volume_flow_port_m3s: jet_port.volume_flow,
        volume_flow_stbd_m3s: jet_stbd.volume_flow,
        jet_velocity_port_mps: jet_port.jet_velocity,
        jet_velocity_stbd_mps: jet_stbd.jet_velocity,
        wake_fraction_port: wake.port,
        wake_fraction_stbd: wake.stbd,
        inlet_velocity_port_mps: inlet_port,
        inlet_velocity_stbd_mps: inlet_stbd,
        gross_thrust_a_port_n: tg_port.def_a,
        gross_thrust_a_stbd_n: tg_stbd.def_a,
        gross_thrust_a_total_n: tg_total.def_a,
        gross_thrust_b_port_n: tg_port.def_b,
        gross_thrust_b_stbd_n: tg_stbd.def_b,
        gross_thrust_b_total_n: tg_total.def_b,
    })
}

impl std::str::FromStr for RecordField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordField::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s.trim())
            .ok_or_else(|| format!("알 수 없는 항목: {s}"))
    }
}
