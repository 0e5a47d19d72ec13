//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 우선순위: 기본값 → `config/default.toml` → `JOURNAL__` 접두사 환경 변수.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::Timeframe;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 분석 설정
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 분석 엔진 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalyticsConfig {
    /// 자산 곡선의 시작 잔고
    #[serde(default)]
    pub initial_balance: Decimal,
    /// 다중 시리즈 비교 시 시작 잔고
    #[serde(default = "default_comparison_balance")]
    pub comparison_initial_balance: Decimal,
    /// 심볼별 차트에 표시할 최대 심볼 수
    #[serde(default = "default_top_symbols")]
    pub top_symbols: usize,
    /// 심볼 분포에서 개별 표시할 최소 비중 (%)
    #[serde(default = "default_min_distribution_pct")]
    pub min_distribution_pct: Decimal,
    /// 기본 집계 주기
    #[serde(default)]
    pub default_timeframe: Timeframe,
}

fn default_comparison_balance() -> Decimal {
    Decimal::new(10_000, 0)
}

fn default_top_symbols() -> usize {
    10
}

fn default_min_distribution_pct() -> Decimal {
    Decimal::new(2, 0)
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            initial_balance: Decimal::ZERO,
            comparison_initial_balance: default_comparison_balance(),
            top_symbols: default_top_symbols(),
            min_distribution_pct: default_min_distribution_pct(),
            default_timeframe: Timeframe::Daily,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없어도 기본값과 환경 변수만으로 로드됩니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("analytics.initial_balance", "0")?
            .set_default("analytics.comparison_initial_balance", "10000")?
            .set_default("analytics.top_symbols", 10)?
            .set_default("analytics.min_distribution_pct", "2")?
            .set_default("analytics.default_timeframe", "daily")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("JOURNAL")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}
