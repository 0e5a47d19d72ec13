//! 기간·심볼·범주별 집계.
//!
//! 차트 투영 계층이 소비하는 (레이블, 값) 시계열과 범주별 개수를 만듭니다.
//! 모든 결과는 결정적 순서를 가집니다: 기간 시리즈는 키 오름차순,
//! 심볼 시리즈는 값 내림차순(동률은 심볼 알파벳순), 분포는 고정된 범주 순서.

use std::collections::BTreeMap;

use journal_core::{Pnl, Timeframe, Trade, TradeType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::performance::risk_reward_ratio;
use crate::pipeline::closed_trades;

/// 분포 차트에서 작은 심볼을 묶는 범주 이름.
pub const OTHERS_LABEL: &str = "Others";

/// 레버리지 구간 레이블 (≤2, ≤5, ≤10, >10).
pub const LEVERAGE_BUCKETS: [&str; 4] = ["1x-2x", "3x-5x", "6x-10x", "10x+"];

/// 손익비 구간 레이블.
pub const RISK_REWARD_BUCKETS: [&str; 9] = [
    "< -4",
    "-4 to -2",
    "-2 to -1.2",
    "-1.2 to -0.8",
    "-0.8 to 0.8",
    "0.8 to 1.2",
    "1.2 to 2",
    "2 to 4",
    "> 4",
];

/// (레이블, 값) 시계열 포인트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// 레이블 (버킷 키 또는 심볼)
    pub label: String,
    /// 값
    pub value: Decimal,
}

impl SeriesPoint {
    /// 새 포인트를 생성합니다.
    pub fn new(label: impl Into<String>, value: Decimal) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// 범주별 개수.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// 범주 이름
    pub label: String,
    /// 개수
    pub count: usize,
}

impl CategoryCount {
    /// 새 범주 개수를 생성합니다.
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

// ==================== 기간별 ====================

/// 기간별 손익 합계 (누적 아님, 키 오름차순).
///
/// 청산 완료 거래만 사용합니다.
pub fn pnl_by_period(trades: &[Trade], timeframe: Timeframe) -> Vec<SeriesPoint> {
    let mut buckets: BTreeMap<String, Pnl> = BTreeMap::new();
    for ct in closed_trades(trades) {
        *buckets.entry(timeframe.bucket_key(ct.closed_at)).or_default() += ct.pnl;
    }

    trace!(%timeframe, buckets = buckets.len(), "기간별 손익 집계");
    buckets
        .into_iter()
        .map(|(label, value)| SeriesPoint { label, value })
        .collect()
}

/// 월별 손익 합계.
pub fn monthly_pnl(trades: &[Trade]) -> Vec<SeriesPoint> {
    pnl_by_period(trades, Timeframe::Monthly)
}

// ==================== 심볼별 ====================

/// 값 내림차순 정렬. 입력이 심볼 알파벳순이므로 안정 정렬로 동률 순서가 고정됩니다.
fn sort_descending<T, K: Ord>(entries: &mut [T], key: impl Fn(&T) -> K) {
    entries.sort_by(|a, b| key(b).cmp(&key(a)));
}

fn volume_per_symbol(trades: &[Trade]) -> Vec<SeriesPoint> {
    let mut volumes: BTreeMap<&str, Decimal> = BTreeMap::new();
    for trade in trades {
        *volumes.entry(trade.symbol.as_str()).or_default() += trade.invested_amount();
    }

    let mut entries: Vec<SeriesPoint> = volumes
        .into_iter()
        .map(|(symbol, value)| SeriesPoint::new(symbol, value))
        .collect();
    sort_descending(&mut entries, |p| p.value);
    entries
}

/// 심볼별 거래 대금 상위 `top_n`개.
///
/// 모든 거래(진행 중 포함)의 `진입가 × 수량`을 합산합니다.
pub fn volume_by_symbol(trades: &[Trade], top_n: usize) -> Vec<SeriesPoint> {
    let mut entries = volume_per_symbol(trades);
    entries.truncate(top_n);
    entries
}

/// 심볼별 거래 횟수 상위 `top_n`개.
pub fn trade_count_by_symbol(trades: &[Trade], top_n: usize) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for trade in trades {
        *counts.entry(trade.symbol.as_str()).or_default() += 1;
    }

    let mut entries: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(symbol, count)| CategoryCount::new(symbol, count))
        .collect();
    sort_descending(&mut entries, |c| c.count);
    entries.truncate(top_n);
    entries
}

/// 심볼별 거래 대금 분포.
///
/// 전체 대금 대비 비중이 `min_percentage`(%) 미만인 심볼은 [`OTHERS_LABEL`]로 묶습니다.
/// 묶인 대금이 0이면 "Others" 항목은 생략됩니다. 전체 대금이 0이면 빈 목록입니다.
pub fn symbol_distribution(trades: &[Trade], min_percentage: Decimal) -> Vec<SeriesPoint> {
    let entries = volume_per_symbol(trades);
    let total: Decimal = entries.iter().map(|p| p.value).sum();
    if total.is_zero() {
        return Vec::new();
    }

    let (mut significant, minor): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|p| p.value / total * dec!(100) >= min_percentage);

    let others: Decimal = minor.iter().map(|p| p.value).sum();
    if others > Decimal::ZERO {
        debug!(folded = minor.len(), "소규모 심볼을 Others로 묶음");
        significant.push(SeriesPoint::new(OTHERS_LABEL, others));
    }

    significant
}

// ==================== 범주 분포 ====================

/// 매수/매도 거래 수 (항상 `[Buy, Sell]` 순서).
pub fn trade_type_distribution(trades: &[Trade]) -> Vec<CategoryCount> {
    let buys = trades.iter().filter(|t| t.trade_type == TradeType::Buy).count();
    let sells = trades.len() - buys;

    vec![CategoryCount::new("Buy", buys), CategoryCount::new("Sell", sells)]
}

/// 청산 거래의 수익/손실 개수.
///
/// 손익 > 0 이면 수익, 그 외(0 포함)는 손실입니다.
pub fn win_loss_distribution(trades: &[Trade]) -> Vec<CategoryCount> {
    let (wins, losses) = closed_trades(trades).fold((0, 0), |(w, l), ct| {
        if ct.pnl > Decimal::ZERO {
            (w + 1, l)
        } else {
            (w, l + 1)
        }
    });

    vec![
        CategoryCount::new("Winning Trades", wins),
        CategoryCount::new("Losing Trades", losses),
    ]
}

/// 레버리지 값의 구간 인덱스.
pub fn leverage_bucket(leverage: Decimal) -> usize {
    if leverage <= dec!(2) {
        0
    } else if leverage <= dec!(5) {
        1
    } else if leverage <= dec!(10) {
        2
    } else {
        3
    }
}

/// 레버리지 구간별 거래 수.
///
/// 레버리지가 명시된 거래만 셉니다. 구간 순서대로 반환하며 빈 구간은 생략합니다.
pub fn leverage_distribution(trades: &[Trade]) -> Vec<CategoryCount> {
    let mut counts = [0usize; LEVERAGE_BUCKETS.len()];
    for leverage in trades.iter().filter_map(|t| t.leverage) {
        counts[leverage_bucket(leverage)] += 1;
    }

    LEVERAGE_BUCKETS
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| CategoryCount::new(*label, count))
        .collect()
}

/// 손익비 값의 구간 인덱스.
///
/// `<-4, [-4,-2), [-2,-1.2), [-1.2,-0.8), [-0.8,0.8), [0.8,1.2), [1.2,2), [2,4], >4`
pub fn risk_reward_bucket(ratio: Decimal) -> usize {
    if ratio < dec!(-4) {
        0
    } else if ratio < dec!(-2) {
        1
    } else if ratio < dec!(-1.2) {
        2
    } else if ratio < dec!(-0.8) {
        3
    } else if ratio < dec!(0.8) {
        4
    } else if ratio < dec!(1.2) {
        5
    } else if ratio < dec!(2) {
        6
    } else if ratio <= dec!(4) {
        7
    } else {
        8
    }
}

/// 손익비 구간별 거래 수 (9개 구간 모두 반환).
///
/// 손절가가 있고 실현 손익이 0이 아닌 청산 거래만 대상입니다.
pub fn risk_reward_distribution(trades: &[Trade]) -> Vec<CategoryCount> {
    let mut counts = [0usize; RISK_REWARD_BUCKETS.len()];
    for ct in closed_trades(trades).filter(|ct| !ct.pnl.is_zero()) {
        if let Some(ratio) = risk_reward_ratio(&ct) {
            counts[risk_reward_bucket(ratio)] += 1;
        }
    }

    RISK_REWARD_BUCKETS
        .iter()
        .zip(counts)
        .map(|(label, count)| CategoryCount::new(*label, count))
        .collect()
}
