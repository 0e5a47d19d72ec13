//! 차트 데이터 출력.

use anyhow::Result;
use journal_analytics::{ChartFactory, ChartKind, LabelFormat};
use journal_core::{AnalyticsConfig, Timeframe, Trade};
use rust_decimal::Decimal;
use tracing::info;

use super::to_json;

/// 차트 명령 설정.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// 차트 종류
    pub kind: ChartKind,
    /// 집계 주기 (없으면 설정 파일의 기본값)
    pub timeframe: Option<Timeframe>,
    /// 시작 잔고 (없으면 설정 파일의 값)
    pub initial_balance: Option<Decimal>,
    /// 버킷 키를 그대로 레이블로 사용
    pub raw_labels: bool,
}

/// 차트 데이터를 JSON으로 반환합니다.
pub fn run_chart(trades: &[Trade], config: &ChartConfig, analytics: &AnalyticsConfig) -> Result<String> {
    let mut analytics = analytics.clone();
    if let Some(balance) = config.initial_balance {
        analytics.initial_balance = balance;
    }
    let timeframe = config.timeframe.unwrap_or(analytics.default_timeframe);
    let label_format = if config.raw_labels { LabelFormat::Raw } else { LabelFormat::Short };

    let chart = ChartFactory::new(analytics)
        .with_label_format(label_format)
        .build(config.kind, trades, timeframe)?;

    info!(kind = %config.kind, %timeframe, points = chart.labels.len(), "차트 생성 완료");
    to_json(&chart)
}
