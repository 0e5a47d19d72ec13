//! 매매 손익 계산 공통 로직.
//!
//! 모든 집계 통계와 시계열 집계는 이 모듈의 [`realized_pnl`]을 통해서만
//! 거래별 손익을 얻습니다. 청산(liquidation) 규칙이 한 곳에서만 적용됩니다.

use rust_decimal::Decimal;

use super::trade::{Trade, TradeType};
use crate::types::{Leverage, Pnl, Price, Ratio};

/// 레버리지 포지션의 강제 청산 가격.
///
/// 레버리지가 1배 이하이면 청산 개념이 없으므로 `None`을 반환합니다.
///
/// - 롱: `진입가 × (1 - 1/L)`
/// - 숏: `진입가 × (1 + 1/L)`
pub fn liquidation_price(open_price: Price, leverage: Leverage, trade_type: TradeType) -> Option<Price> {
    if leverage <= Decimal::ONE {
        return None;
    }

    let margin_ratio = Decimal::ONE / leverage;
    match trade_type {
        TradeType::Buy => Some(open_price * (Decimal::ONE - margin_ratio)),
        TradeType::Sell => Some(open_price * (Decimal::ONE + margin_ratio)),
    }
}

/// 거래의 실현 손익.
///
/// 청산가가 없으면 `None`을 반환합니다.
///
/// 레버리지 L > 1 이고 청산가가 강제 청산 가격을 넘어서면(롱은 이하, 숏은 이상)
/// 손실은 `-(진입가 × 수량)`으로 고정됩니다. 그 외에는
/// `(청산가 - 진입가) × 수량 × L × 방향`입니다.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use journal_core::{realized_pnl, Trade, TradeType};
/// use rust_decimal_macros::dec;
///
/// let trade = Trade::new(1, "BTCUSDT", TradeType::Buy, dec!(100), dec!(2), Utc::now())
///     .with_leverage(dec!(10))
///     .with_close(dec!(90), Utc::now());
///
/// // 청산 가격 90에 도달 → 투입 금액 전액 손실
/// assert_eq!(realized_pnl(&trade), Some(dec!(-200)));
/// ```
pub fn realized_pnl(trade: &Trade) -> Option<Pnl> {
    let close_price = trade.close_price?;
    let leverage = trade.effective_leverage();

    if let Some(liquidation) = liquidation_price(trade.open_price, leverage, trade.trade_type) {
        let liquidated = match trade.trade_type {
            TradeType::Buy => close_price <= liquidation,
            TradeType::Sell => close_price >= liquidation,
        };
        if liquidated {
            return Some(-trade.invested_amount());
        }
    }

    Some((close_price - trade.open_price) * trade.quantity * leverage * trade.trade_type.direction())
}

/// 실현 손익률 (비율, 0.1 = 10%).
///
/// 분모는 레버리지를 적용하지 않은 투입 금액(`진입가 × 수량`)입니다.
/// 표시용 백분율 변환은 호출자가 담당합니다.
pub fn pnl_percentage(trade: &Trade) -> Option<Ratio> {
    let pnl = realized_pnl(trade)?;
    let invested = trade.invested_amount();
    if invested.is_zero() {
        return Some(Decimal::ZERO);
    }
    Some(pnl / invested)
}

/// 기간 내 청산된 거래의 손익 합계.
pub fn pnl_for_period(trades: &[Trade]) -> Pnl {
    trades
        .iter()
        .filter(|t| t.is_closed())
        .filter_map(realized_pnl)
        .sum()
}

/// 총 거래 대금.
///
/// 거래별 `(진입가 + 청산가) × 수량 × 레버리지`의 합입니다.
/// 청산가가 없으면 0으로 간주합니다.
pub fn traded_volume(trades: &[Trade]) -> Decimal {
    trades
        .iter()
        .map(|t| {
            let close = t.close_price.unwrap_or(Decimal::ZERO);
            (t.open_price + close) * t.quantity * t.effective_leverage()
        })
        .sum()
}

/// 주어진 거래들에 투입된 금액 합계 (`진입가 × 수량`).
pub fn equity_in_open_trades(trades: &[Trade]) -> Decimal {
    trades.iter().map(Trade::invested_amount).sum()
}
