//! 자산 곡선(Equity Curve) 데이터 모듈
//!
//! 청산된 거래의 실현 손익을 일/주/월 버킷으로 누적해 자산 곡선을 만듭니다.
//!
//! # 주요 기능
//!
//! - 버킷별 누적 자산 가치 (`초기 잔고 + 버킷까지의 누적 손익`)
//! - 고점 대비 Drawdown 시계열 (절대값, 0 이하)
//! - 여러 거래 묶음의 자산 곡선 비교 (공통 X축, 누락 버킷은 직전 값으로 채움)

use std::collections::{BTreeMap, BTreeSet};

use journal_core::{Pnl, Timeframe, Trade};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pipeline::closed_trades_chronological;

/// 단일 자산 곡선 데이터 포인트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// 버킷 키 (`YYYY-MM-DD` 또는 `YYYY-MM`)
    pub key: String,

    /// 버킷 종료 시점의 자산 가치
    pub equity: Decimal,

    /// 고점 대비 낙폭 (`자산 - 고점`, 0 이하)
    pub drawdown: Decimal,
}

/// 자산 곡선 데이터
///
/// 버킷 키 오름차순으로 정렬된 포인트 목록입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityCurve {
    /// 초기 잔고
    initial_balance: Decimal,

    /// 집계 단위
    timeframe: Timeframe,

    /// 시계열 데이터 포인트 (키 오름차순)
    points: Vec<EquityPoint>,
}

impl EquityCurve {
    /// 거래 목록에서 자산 곡선을 생성합니다.
    ///
    /// # 매개변수
    ///
    /// * `trades` - 거래 목록 (청산 완료 거래만 사용)
    /// * `timeframe` - 집계 단위
    /// * `initial_balance` - 초기 잔고
    pub fn from_trades(trades: &[Trade], timeframe: Timeframe, initial_balance: Decimal) -> Self {
        let buckets = cumulative_by_bucket(trades, timeframe);

        let mut points = Vec::with_capacity(buckets.len());
        let mut peak: Option<Decimal> = None;

        for (key, cumulative) in buckets {
            let equity = initial_balance + cumulative;
            let current_peak = match peak {
                Some(p) if p >= equity => p,
                _ => equity,
            };
            peak = Some(current_peak);

            points.push(EquityPoint {
                key,
                equity,
                drawdown: equity - current_peak,
            });
        }

        debug!(%timeframe, buckets = points.len(), "자산 곡선 생성");

        Self {
            initial_balance,
            timeframe,
            points,
        }
    }

    /// 초기 잔고를 반환합니다.
    pub fn initial_balance(&self) -> Decimal {
        self.initial_balance
    }

    /// 집계 단위를 반환합니다.
    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// 모든 데이터 포인트를 반환합니다.
    pub fn points(&self) -> &[EquityPoint] {
        &self.points
    }

    /// 데이터 포인트 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 데이터가 비어있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 마지막 자산 가치 (거래가 없으면 초기 잔고).
    pub fn final_equity(&self) -> Decimal {
        self.points
            .last()
            .map(|p| p.equity)
            .unwrap_or(self.initial_balance)
    }

    /// 가장 깊은 낙폭 (0 이하).
    pub fn deepest_drawdown(&self) -> Decimal {
        self.points
            .iter()
            .map(|p| p.drawdown)
            .min()
            .unwrap_or(Decimal::ZERO)
    }

    /// 버킷 키 목록.
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.key.clone()).collect()
    }

    /// 자산 가치 시계열.
    pub fn equity_values(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.equity).collect()
    }

    /// Drawdown 시계열.
    pub fn drawdown_values(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.drawdown).collect()
    }

    /// 특정 버킷의 자산 가치.
    pub fn equity_at(&self, key: &str) -> Option<Decimal> {
        self.points
            .binary_search_by(|p| p.key.as_str().cmp(key))
            .ok()
            .map(|idx| self.points[idx].equity)
    }
}

/// 버킷별 누적 손익 (키 오름차순).
///
/// 청산 시각 순으로 누적하므로 각 버킷의 값은 그 버킷까지의 누적 손익입니다.
fn cumulative_by_bucket(trades: &[Trade], timeframe: Timeframe) -> BTreeMap<String, Pnl> {
    let mut buckets = BTreeMap::new();
    let mut cumulative = Decimal::ZERO;

    for ct in closed_trades_chronological(trades) {
        cumulative += ct.pnl;
        buckets.insert(timeframe.bucket_key(ct.closed_at), cumulative);
    }

    buckets
}

/// 누적 손익 시계열 (초기 잔고 0인 자산 곡선).
pub fn cumulative_pnl(trades: &[Trade], timeframe: Timeframe) -> Vec<(String, Pnl)> {
    cumulative_by_bucket(trades, timeframe).into_iter().collect()
}

/// 비교 대상 시리즈 하나.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSeries {
    /// 시리즈 이름
    pub label: String,

    /// 공통 X축에 맞춘 자산 가치 (누락 버킷은 직전 값으로 채움)
    pub values: Vec<Decimal>,
}

/// 다중 자산 곡선 비교 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityComparison {
    /// 모든 시리즈 버킷 키의 합집합 (오름차순)
    pub labels: Vec<String>,

    /// 시리즈별 값 (`labels`와 같은 길이)
    pub series: Vec<ComparisonSeries>,
}

/// 여러 거래 묶음의 자산 곡선을 공통 X축으로 정렬합니다.
///
/// 각 묶음의 자산 곡선을 독립적으로 계산한 뒤 모든 버킷 키를 합쳐 정렬하고,
/// 시리즈에 해당 버킷이 없으면 직전 값(아직 없으면 초기 잔고)으로 채웁니다.
pub fn compare_equity_curves(
    sets: &[(&str, &[Trade])],
    timeframe: Timeframe,
    initial_balance: Decimal,
) -> EquityComparison {
    let curves: Vec<(&str, EquityCurve)> = sets
        .iter()
        .map(|(label, trades)| (*label, EquityCurve::from_trades(trades, timeframe, initial_balance)))
        .collect();

    let labels: Vec<String> = curves
        .iter()
        .flat_map(|(_, curve)| curve.points.iter().map(|p| p.key.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let series = curves
        .iter()
        .map(|(label, curve)| {
            let mut last = initial_balance;
            let values = labels
                .iter()
                .map(|key| {
                    if let Some(equity) = curve.equity_at(key) {
                        last = equity;
                    }
                    last
                })
                .collect();

            ComparisonSeries {
                label: (*label).to_string(),
                values,
            }
        })
        .collect();

    debug!(series = sets.len(), buckets = labels.len(), "자산 곡선 비교 생성");

    EquityComparison { labels, series }
}
