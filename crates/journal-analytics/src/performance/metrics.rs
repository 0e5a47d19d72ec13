//! 성과 지표 계산 모듈
//!
//! 매매일지 거래 목록에서 포트폴리오 수준의 성과 지표를 계산합니다:
//! - 승률 (Win Rate): 전체 거래 중 수익 거래 비율
//! - 평균 수익/손실, 총 수익/손실
//! - 프로핏 팩터 (Profit Factor): 총 수익 / 총 손실
//! - 기대값 (Expectancy): 청산 거래당 평균 손익
//! - 최대 연승/연패
//! - 최대 낙폭 (Maximum Drawdown)
//! - 평균 손익비 (Risk/Reward)
//!
//! 승률을 제외한 모든 지표는 청산 완료 거래(청산가와 청산 시각 모두 존재)만 사용합니다.
//! 빈 입력이나 0으로 나누는 경우는 에러 대신 정해진 기본값을 반환합니다.
//!
//! # 사용 예시
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use journal_analytics::performance::{profit_factor, win_rate, ProfitFactor};
//! use journal_core::{Trade, TradeType};
//! use rust_decimal_macros::dec;
//!
//! let now = Utc::now();
//! let trades = vec![
//!     Trade::new(1, "BTCUSDT", TradeType::Buy, dec!(100), dec!(1), now)
//!         .with_close(dec!(110), now + Duration::days(1)),
//!     Trade::new(2, "BTCUSDT", TradeType::Buy, dec!(100), dec!(1), now)
//!         .with_close(dec!(90), now + Duration::days(2)),
//! ];
//!
//! assert_eq!(win_rate(&trades), dec!(50));
//! assert_eq!(profit_factor(&trades), ProfitFactor::Finite(dec!(1)));
//! ```

use std::fmt;

use chrono::Duration;
use journal_core::{DecimalExt, Pnl, Ratio, Trade};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, trace};

use crate::pipeline::{closed_trades, closed_trades_chronological, with_realized_pnl, ClosedTrade};

const MILLIS_PER_MINUTE: i64 = 60 * 1000;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// 프로핏 팩터.
///
/// 손실이 전혀 없고 수익만 있으면 무한대입니다. Decimal은 무한대를 표현할 수 없으므로
/// 별도 변형으로 구분합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfitFactor {
    /// 유한한 값 (총 수익 / 총 손실, 또는 수익·손실이 모두 없을 때 0)
    Finite(Decimal),
    /// 손실 없이 수익만 있는 경우
    Infinite,
}

impl ProfitFactor {
    /// 차트/외부 출력용 f64 값 (`Infinite`는 `f64::INFINITY`).
    pub fn to_f64(&self) -> f64 {
        match self {
            ProfitFactor::Finite(v) => v.to_f64().unwrap_or(0.0),
            ProfitFactor::Infinite => f64::INFINITY,
        }
    }

    /// 무한대 여부.
    pub fn is_infinite(&self) -> bool {
        matches!(self, ProfitFactor::Infinite)
    }
}

impl Default for ProfitFactor {
    fn default() -> Self {
        ProfitFactor::Finite(Decimal::ZERO)
    }
}

impl fmt::Display for ProfitFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitFactor::Finite(v) => write!(f, "{:.2}", v.round_half_up(2)),
            ProfitFactor::Infinite => write!(f, "∞"),
        }
    }
}

impl Serialize for ProfitFactor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProfitFactor::Finite(v) => Serialize::serialize(v, serializer),
            ProfitFactor::Infinite => serializer.serialize_str("Infinity"),
        }
    }
}

/// 최대 낙폭.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawdown {
    /// 고점 대비 최대 하락 금액 (0 이상)
    pub absolute: Decimal,
    /// 최대 낙폭 시점의 고점 대비 하락률 (%, 고점이 0이면 0)
    pub percentage: Decimal,
}

// ==================== 승률 / 평균 ====================

/// 승률 (%).
///
/// 분모는 **전체** 거래 수입니다. 손익이 없는(청산가 없는) 거래는 승리로 세지 않지만
/// 분모에는 포함됩니다. 빈 목록은 0입니다.
pub fn win_rate(trades: &[Trade]) -> Decimal {
    if trades.is_empty() {
        return Decimal::ZERO;
    }

    let wins = with_realized_pnl(trades).filter(|rt| rt.is_win()).count();
    Decimal::from(wins) / Decimal::from(trades.len()) * dec!(100)
}

/// 청산 거래 중 수익 거래의 평균 손익 (없으면 0).
pub fn average_win(trades: &[Trade]) -> Pnl {
    let closed: Vec<_> = closed_trades(trades).collect();
    average_win_of(&closed)
}

/// 청산 거래 중 손실 거래의 평균 손익 (음수, 없으면 0).
pub fn average_loss(trades: &[Trade]) -> Pnl {
    let closed: Vec<_> = closed_trades(trades).collect();
    average_loss_of(&closed)
}

/// 청산 거래의 평균 손익 (없으면 0).
pub fn expectancy(trades: &[Trade]) -> Pnl {
    let closed: Vec<_> = closed_trades(trades).collect();
    expectancy_of(&closed)
}

pub(crate) fn average_win_of(closed: &[ClosedTrade<'_>]) -> Pnl {
    mean(closed.iter().map(|ct| ct.pnl).filter(|p| *p > Decimal::ZERO))
}

pub(crate) fn average_loss_of(closed: &[ClosedTrade<'_>]) -> Pnl {
    mean(closed.iter().map(|ct| ct.pnl).filter(|p| *p < Decimal::ZERO))
}

pub(crate) fn expectancy_of(closed: &[ClosedTrade<'_>]) -> Pnl {
    mean(closed.iter().map(|ct| ct.pnl))
}

fn mean(values: impl Iterator<Item = Decimal>) -> Decimal {
    let (sum, count) = values.fold((Decimal::ZERO, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        Decimal::ZERO
    } else {
        sum / Decimal::from(count)
    }
}

// ==================== 총 수익 / 총 손실 ====================

/// 청산 거래의 양수 손익 합계.
pub fn gross_profit(trades: &[Trade]) -> Pnl {
    let closed: Vec<_> = closed_trades(trades).collect();
    gross_profit_of(&closed)
}

/// 청산 거래의 음수 손익 합계의 절대값.
pub fn gross_loss(trades: &[Trade]) -> Pnl {
    let closed: Vec<_> = closed_trades(trades).collect();
    gross_loss_of(&closed)
}

/// 프로핏 팩터 (총 수익 / 총 손실).
///
/// 총 손실이 0이면 총 수익이 있을 때 [`ProfitFactor::Infinite`], 없을 때 0입니다.
pub fn profit_factor(trades: &[Trade]) -> ProfitFactor {
    let closed: Vec<_> = closed_trades(trades).collect();
    profit_factor_of(&closed)
}

pub(crate) fn gross_profit_of(closed: &[ClosedTrade<'_>]) -> Pnl {
    closed.iter().map(|ct| ct.pnl).filter(|p| *p > Decimal::ZERO).sum()
}

pub(crate) fn gross_loss_of(closed: &[ClosedTrade<'_>]) -> Pnl {
    closed
        .iter()
        .map(|ct| ct.pnl)
        .filter(|p| *p < Decimal::ZERO)
        .sum::<Decimal>()
        .abs()
}

pub(crate) fn profit_factor_of(closed: &[ClosedTrade<'_>]) -> ProfitFactor {
    let profit = gross_profit_of(closed);
    let loss = gross_loss_of(closed);

    if loss.is_zero() {
        if profit > Decimal::ZERO {
            ProfitFactor::Infinite
        } else {
            ProfitFactor::Finite(Decimal::ZERO)
        }
    } else {
        ProfitFactor::Finite(profit / loss)
    }
}

// ==================== 최고 / 최저 ====================

/// 청산 거래 중 최대 손익 (없으면 `None`).
pub fn best_trade(trades: &[Trade]) -> Option<Pnl> {
    closed_trades(trades).map(|ct| ct.pnl).max()
}

/// 청산 거래 중 최소 손익 (없으면 `None`).
pub fn worst_trade(trades: &[Trade]) -> Option<Pnl> {
    closed_trades(trades).map(|ct| ct.pnl).min()
}

// ==================== 연승 / 연패 ====================

/// 최대 연승 횟수.
///
/// 청산 시각 순으로 정렬한 청산 거래에서 손익 > 0 이 연속된 최장 길이입니다.
/// 손익이 정확히 0인 거래는 연승과 연패를 모두 끊습니다.
pub fn max_win_streak(trades: &[Trade]) -> usize {
    longest_run(&closed_trades_chronological(trades), |pnl| pnl > Decimal::ZERO)
}

/// 최대 연패 횟수 (손익 < 0 연속).
pub fn max_loss_streak(trades: &[Trade]) -> usize {
    longest_run(&closed_trades_chronological(trades), |pnl| pnl < Decimal::ZERO)
}

pub(crate) fn longest_run(sorted: &[ClosedTrade<'_>], matches: impl Fn(Pnl) -> bool) -> usize {
    let mut best = 0;
    let mut current = 0;

    for ct in sorted {
        if matches(ct.pnl) {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }

    best
}

// ==================== 보유 기간 ====================

/// 청산 거래의 평균 보유 기간 (없으면 `None`).
pub fn mean_trade_duration(trades: &[Trade]) -> Option<Duration> {
    let closed: Vec<_> = closed_trades(trades).collect();
    mean_duration_millis(&closed).and_then(|ms| ms.round_half_up(0).to_i64().map(Duration::milliseconds))
}

/// 청산 거래의 평균 보유 기간을 사람이 읽기 쉬운 문자열로 반환합니다.
///
/// - 1일 이상: `"2.5d"` (소수점 한 자리)
/// - 1시간 이상: `"3.2h"`
/// - 그 외: `"45m"` (분 단위 반올림)
///
/// 청산 거래가 없으면 `"0m"`입니다.
pub fn average_trade_duration(trades: &[Trade]) -> String {
    let closed: Vec<_> = closed_trades(trades).collect();
    average_trade_duration_of(&closed)
}

pub(crate) fn average_trade_duration_of(closed: &[ClosedTrade<'_>]) -> String {
    match mean_duration_millis(closed) {
        Some(ms) => format_duration_millis(ms),
        None => "0m".to_string(),
    }
}

fn mean_duration_millis(closed: &[ClosedTrade<'_>]) -> Option<Decimal> {
    if closed.is_empty() {
        return None;
    }

    let total: Decimal = closed
        .iter()
        .map(|ct| Decimal::from(ct.duration().num_milliseconds()))
        .sum();
    Some(total / Decimal::from(closed.len()))
}

/// 밀리초 단위 기간을 가장 적절한 단위로 포맷합니다.
pub fn format_duration_millis(ms: Decimal) -> String {
    let days = ms / Decimal::from(MILLIS_PER_DAY);
    if days >= Decimal::ONE {
        return format!("{:.1}d", days.round_half_up(1));
    }

    let hours = ms / Decimal::from(MILLIS_PER_HOUR);
    if hours >= Decimal::ONE {
        return format!("{:.1}h", hours.round_half_up(1));
    }

    let minutes = ms / Decimal::from(MILLIS_PER_MINUTE);
    format!("{}m", minutes.round_half_up(0).normalize())
}

// ==================== 최대 낙폭 ====================

/// 최대 낙폭.
///
/// 청산 시각 순으로 누적 손익(0에서 시작)과 지금까지의 고점을 추적하며,
/// `고점 - 누적 손익`의 최대값과 그 시점의 하락률 `낙폭 / |고점| × 100`을 반환합니다.
/// 청산 거래가 없으면 둘 다 0입니다.
pub fn max_drawdown(trades: &[Trade]) -> Drawdown {
    max_drawdown_of(&closed_trades_chronological(trades))
}

pub(crate) fn max_drawdown_of(sorted: &[ClosedTrade<'_>]) -> Drawdown {
    let mut equity = Decimal::ZERO;
    let mut peak = Decimal::ZERO;
    let mut result = Drawdown::default();

    for ct in sorted {
        equity += ct.pnl;
        if equity > peak {
            peak = equity;
        }

        let drawdown = peak - equity;
        if drawdown > result.absolute {
            result.absolute = drawdown;
            result.percentage = if peak.is_zero() {
                Decimal::ZERO
            } else {
                drawdown / peak.abs() * dec!(100)
            };
        }
    }

    trace!(absolute = %result.absolute, percentage = %result.percentage, "최대 낙폭 계산");
    result
}

// ==================== 손익비 ====================

/// 청산 거래 하나의 손익비 (실현 손익 / 계획 위험).
///
/// 계획 위험은 `|손절가 - 진입가| × 수량 × 레버리지`입니다.
/// 손절가가 없거나 계획 위험이 0이면 `None`입니다.
pub fn risk_reward_ratio(closed: &ClosedTrade<'_>) -> Option<Ratio> {
    let trade = closed.trade;
    let stop_loss = trade.stop_loss?;

    let planned_risk = (stop_loss - trade.open_price).abs() * trade.quantity * trade.effective_leverage();
    if planned_risk.is_zero() {
        trace!(trade_id = trade.id, "계획 위험이 0인 거래는 손익비 계산에서 제외");
        return None;
    }

    Some(closed.pnl / planned_risk)
}

/// 평균 손익비.
///
/// 손절가가 설정된 청산 거래만 대상이며, 계획 위험이 0인 거래는 제외합니다.
/// 대상 거래가 없으면 `None`입니다.
pub fn average_risk_reward(trades: &[Trade]) -> Option<Ratio> {
    let closed: Vec<_> = closed_trades(trades).collect();
    average_risk_reward_of(&closed)
}

pub(crate) fn average_risk_reward_of(closed: &[ClosedTrade<'_>]) -> Option<Ratio> {
    let ratios: Vec<Ratio> = closed.iter().filter_map(risk_reward_ratio).collect();
    debug!(eligible = ratios.len(), closed = closed.len(), "손익비 대상 거래");

    if ratios.is_empty() {
        return None;
    }
    Some(ratios.iter().copied().sum::<Decimal>() / Decimal::from(ratios.len()))
}
