//! 매매일지 분석 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 통계 요약
//! journal stats data/trades.csv
//! journal stats data/trades.json --json
//!
//! # 주별 자산 곡선 차트 데이터 (시작 잔고 10,000)
//! journal chart data/trades.csv --kind equity --timeframe weekly --initial-balance 10000
//!
//! # 두 기간 비교
//! journal compare data/2024-q1.csv data/2024-q2.csv
//!
//! # 거래 테이블, 검증
//! journal table data/trades.csv --format csv
//! journal validate data/trades.csv
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{error, info};

use journal_analytics::ChartKind;
use journal_cli::commands::{
    chart::{run_chart, ChartConfig},
    compare::run_compare,
    stats::run_stats,
    table::{run_table, OutputFormat},
    validate::run_validate,
    write_output,
};
use journal_cli::{load_trades, series_label};
use journal_core::{init_logging, AppConfig, LogConfig, Timeframe};

#[derive(Parser)]
#[command(name = "journal")]
#[command(about = "Trading journal CLI - 거래 기록 성과 분석", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 성과 통계 요약
    Stats {
        /// 거래 파일 (.json 또는 .csv)
        file: PathBuf,

        /// JSON으로 출력
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// 차트 데이터 (JSON)
    Chart {
        /// 거래 파일 (.json 또는 .csv)
        file: PathBuf,

        /// 차트 종류 (equity, pnl, monthly, volume, count, symbols, types, winloss, leverage, risk-reward)
        #[arg(short, long)]
        kind: ChartKind,

        /// 집계 주기 (daily, weekly, monthly)
        #[arg(short, long)]
        timeframe: Option<Timeframe>,

        /// 시작 잔고
        #[arg(long)]
        initial_balance: Option<Decimal>,

        /// 버킷 키를 그대로 레이블로 사용
        #[arg(long, default_value = "false")]
        raw_labels: bool,

        /// 출력 파일 경로 (지정하지 않으면 stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 여러 거래 파일의 자산 곡선 비교 (JSON)
    Compare {
        /// 거래 파일 목록 (시리즈 이름 = 파일 이름)
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// 집계 주기 (daily, weekly, monthly)
        #[arg(short, long)]
        timeframe: Option<Timeframe>,

        /// 시작 잔고 (기본: 설정의 comparison_initial_balance)
        #[arg(long)]
        initial_balance: Option<Decimal>,

        /// 출력 파일 경로 (지정하지 않으면 stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 거래 테이블
    Table {
        /// 거래 파일 (.json 또는 .csv)
        file: PathBuf,

        /// 출력 형식 (table, csv, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// 출력 파일 경로 (지정하지 않으면 stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 거래 레코드 검증
    Validate {
        /// 거래 파일 (.json 또는 .csv)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)?;
    init_logging(LogConfig::from(&config.logging)).map_err(|e| anyhow!("로깅 초기화 실패: {}", e))?;

    match cli.command {
        Commands::Stats { file, json } => {
            let trades = load_trades(&file)?;
            write_output(&run_stats(&trades, json)?, None)?;
        }

        Commands::Chart {
            file,
            kind,
            timeframe,
            initial_balance,
            raw_labels,
            output,
        } => {
            let trades = load_trades(&file)?;
            let chart_config = ChartConfig {
                kind,
                timeframe,
                initial_balance,
                raw_labels,
            };
            write_output(&run_chart(&trades, &chart_config, &config.analytics)?, output.as_deref())?;
        }

        Commands::Compare {
            files,
            timeframe,
            initial_balance,
            output,
        } => {
            let mut sets = Vec::with_capacity(files.len());
            for path in &files {
                sets.push((series_label(path), load_trades(path)?));
            }

            let json = run_compare(&sets, timeframe, initial_balance, &config.analytics)?;
            write_output(&json, output.as_deref())?;
        }

        Commands::Table { file, format, output } => {
            let format = OutputFormat::parse(&format)?;
            let trades = load_trades(&file)?;
            write_output(&run_table(&trades, format)?, output.as_deref())?;
        }

        Commands::Validate { file } => {
            let trades = load_trades(&file)?;
            let report = run_validate(&trades);
            println!("{}", report.render());

            if !report.is_valid() {
                error!(invalid = report.errors.len(), "검증 실패");
                return Err(anyhow!("잘못된 거래 {}건", report.errors.len()));
            }
            info!(checked = report.checked, "검증 통과");
        }
    }

    Ok(())
}
