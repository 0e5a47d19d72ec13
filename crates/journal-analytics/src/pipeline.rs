//! 실현 손익 파이프라인.
//!
//! 모든 집계 함수는 이 모듈의 [`with_realized_pnl`]과 [`closed_trades`]를 거쳐
//! 거래별 손익을 얻습니다. 강제 청산 규칙은 `journal_core::realized_pnl` 한 곳에서만
//! 적용되고, 집계 함수는 그 결과를 재계산하지 않습니다.

use chrono::{DateTime, Duration, Utc};
use journal_core::{realized_pnl, Pnl, Trade};
use rust_decimal::Decimal;

/// 실현 손익이 붙은 거래 (청산 여부와 무관).
#[derive(Debug, Clone, Copy)]
pub struct RealizedTrade<'a> {
    /// 원본 거래
    pub trade: &'a Trade,
    /// 실현 손익 (청산가가 없으면 `None`)
    pub pnl: Option<Pnl>,
}

impl RealizedTrade<'_> {
    /// 수익 거래 여부 (손익이 없으면 false).
    pub fn is_win(&self) -> bool {
        self.pnl.is_some_and(|p| p > Decimal::ZERO)
    }
}

impl<'a> RealizedTrade<'a> {
    /// 청산 완료 거래이면 [`ClosedTrade`]로 변환합니다.
    pub fn as_closed(&self) -> Option<ClosedTrade<'a>> {
        // is_closed()의 결합 조건: 청산가가 있어야 손익도 존재
        Some(ClosedTrade {
            trade: self.trade,
            pnl: self.pnl?,
            closed_at: self.trade.closed_at?,
        })
    }
}

/// 청산 완료된 거래와 그 손익.
///
/// `close_price`와 `closed_at`이 모두 있는 거래만 이 타입이 됩니다.
#[derive(Debug, Clone, Copy)]
pub struct ClosedTrade<'a> {
    /// 원본 거래
    pub trade: &'a Trade,
    /// 실현 손익
    pub pnl: Pnl,
    /// 청산 시각
    pub closed_at: DateTime<Utc>,
}

impl ClosedTrade<'_> {
    /// 보유 기간.
    pub fn duration(&self) -> Duration {
        self.closed_at - self.trade.opened_at
    }
}

/// 거래 목록에 실현 손익을 붙입니다.
///
/// 입력 순서를 유지하며 입력을 변경하지 않습니다.
pub fn with_realized_pnl(trades: &[Trade]) -> impl Iterator<Item = RealizedTrade<'_>> {
    trades.iter().map(|trade| RealizedTrade {
        trade,
        pnl: realized_pnl(trade),
    })
}

/// 청산 완료 거래를 입력 순서대로 반환합니다.
pub fn closed_trades(trades: &[Trade]) -> impl Iterator<Item = ClosedTrade<'_>> {
    with_realized_pnl(trades).filter_map(|rt| rt.as_closed())
}

/// 청산 완료 거래를 청산 시각 오름차순으로 정렬해 반환합니다.
///
/// 같은 시각의 거래는 입력 순서를 유지합니다 (안정 정렬).
pub fn closed_trades_chronological(trades: &[Trade]) -> Vec<ClosedTrade<'_>> {
    chronological(closed_trades(trades))
}

/// 청산 거래를 청산 시각 오름차순(안정 정렬)으로 모읍니다.
pub fn chronological<'a>(closed: impl Iterator<Item = ClosedTrade<'a>>) -> Vec<ClosedTrade<'a>> {
    let mut sorted: Vec<_> = closed.collect();
    sorted.sort_by_key(|ct| ct.closed_at);
    sorted
}
