use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use towing_tank_toolbox::analysis;
use towing_tank_toolbox::run_record::RecordField;
use towing_tank_toolbox::{app, config, datafile, report};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "워터젯 자항 시험 데이터 처리 도구", long_about = None)]
struct Cli {
    /// 해석 설정 파일(TOML). 없으면 기본값으로 생성한다.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,
    /// 상관 수정계수 Ca를 설정 파일 값 대신 사용
    #[arg(long, global = true)]
    correlation_allowance: Option<f64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 런 샘플 파일을 결과 행 CSV로 변환
    Reduce(ReduceArgs),
    /// 결과 행 CSV로 자항점과 실선 유효동력 계산
    Solve(SolveArgs),
    /// 해상 시운전 곡선과 반복 조건 세트 비교
    Compare(CompareArgs),
    /// 기본 설정 파일 생성
    InitConfig,
}

#[derive(Args, Debug)]
struct ReduceArgs {
    /// 런별 샘플 CSV가 있는 디렉터리 (파일 이름 끝 숫자가 런 번호)
    #[arg(long)]
    samples: PathBuf,
    /// run,channel,zero,factor 교정 CSV
    #[arg(long)]
    calibrations: PathBuf,
    /// 결과 행 CSV 출력 경로
    #[arg(long, default_value = "run_records.csv")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct SolveArgs {
    /// 결과 행 CSV
    #[arg(long)]
    records: PathBuf,
    /// speed_knots,power_kw 시운전 CSV. 주면 추진효율 η_D를 함께 출력
    #[arg(long)]
    sea_trial: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// speed_knots,power_kw 시운전 CSV
    #[arg(long)]
    sea_trial: PathBuf,
    /// 조건 세트별 결과 행 CSV (순서대로 0, 1, 2...)
    #[arg(long, num_args = 1.., required = true)]
    conditions: Vec<PathBuf>,
    /// 조건 세트 인덱스 3개 (예: 0,1,2). 여러 번 지정 가능
    #[arg(long, value_parser = parse_triplet, required = true)]
    triplet: Vec<[usize; 3]>,
    /// 통계를 낼 항목 이름
    #[arg(long, default_value = "gross_thrust_total_a")]
    field: RecordField,
}

fn parse_triplet(s: &str) -> Result<[usize; 3], String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<usize>().map_err(|e| format!("{p}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    <[usize; 3]>::try_from(parts).map_err(|v| format!("인덱스 3개가 필요합니다 (입력 {}개)", v.len()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Command::InitConfig = cli.command {
        config::AnalysisConfig::default()
            .save(&cli.config)
            .with_context(|| format!("{} 저장 실패", cli.config.display()))?;
        println!("기본 설정을 {}에 저장했습니다.", cli.config.display());
        return Ok(());
    }

    let mut cfg = config::load_or_default(&cli.config)
        .with_context(|| format!("{} 로드 실패", cli.config.display()))?;
    if let Some(ca) = cli.correlation_allowance {
        cfg = cfg.with_correlation_allowance(ca);
    }
    report::print_hull(&cfg.hull);

    match cli.command {
        Command::Reduce(args) => {
            let batch = app::reduce_directory(&args.samples, &args.calibrations, &cfg)?;
            datafile::write_records_file(&args.output, batch.records.values())?;
            report::print_batch(&batch);
            println!("\n결과 행을 {}에 저장했습니다.", args.output.display());
        }
        Command::Solve(args) => {
            let records = datafile::read_records_file(&args.records)?;
            if records.is_empty() {
                bail!("{}에 결과 행이 없습니다", args.records.display());
            }
            let sea_trial = match &args.sea_trial {
                Some(path) => {
                    let (speeds, power) = datafile::read_sea_trial(path)?;
                    Some(
                        analysis::SeaTrialCurve::fit(&speeds, &power)
                            .with_context(|| format!("{} 시운전 곡선 회귀 실패", path.display()))?,
                    )
                }
                None => None,
            };
            let solved = app::solve_all(&records, &cfg, sea_trial.as_ref());
            report::print_solve(&solved);
        }
        Command::Compare(args) => {
            let (speeds, power) = datafile::read_sea_trial(&args.sea_trial)?;
            let sets = args
                .conditions
                .iter()
                .map(|p| datafile::read_records_file(p))
                .collect::<Result<Vec<_>, _>>()?;
            let comparison =
                analysis::compare(&speeds, &power, &sets, &args.triplet, args.field)?;
            report::print_comparison(&comparison);
        }
        Command::InitConfig => {}
    }
    Ok(())
}
