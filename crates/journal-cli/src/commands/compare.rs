//! 다중 자산 곡선 비교 출력.

use anyhow::{bail, Result};
use journal_analytics::{ChartFactory, LabelFormat};
use journal_core::{AnalyticsConfig, Timeframe, Trade};
use rust_decimal::Decimal;
use tracing::info;

use super::to_json;

/// 이름이 붙은 거래 묶음들의 자산 곡선을 공통 X축으로 비교한 JSON을 반환합니다.
///
/// 시작 잔고는 `initial_balance`가 없으면 `comparison_initial_balance` 설정을 사용합니다.
pub fn run_compare(
    sets: &[(String, Vec<Trade>)],
    timeframe: Option<Timeframe>,
    initial_balance: Option<Decimal>,
    analytics: &AnalyticsConfig,
) -> Result<String> {
    if sets.is_empty() {
        bail!("비교할 거래 파일이 없습니다");
    }

    let mut analytics = analytics.clone();
    if let Some(balance) = initial_balance {
        analytics.comparison_initial_balance = balance;
    }
    let timeframe = timeframe.unwrap_or(analytics.default_timeframe);

    let borrowed: Vec<(&str, &[Trade])> = sets
        .iter()
        .map(|(label, trades)| (label.as_str(), trades.as_slice()))
        .collect();

    let chart = ChartFactory::new(analytics)
        .with_label_format(LabelFormat::Raw)
        .comparison(&borrowed, timeframe)?;

    info!(series = chart.datasets.len(), buckets = chart.labels.len(), "자산 곡선 비교 완료");
    to_json(&chart)
}
