//! 거래 레코드 검증.
//!
//! 데이터 소스 경계에서 사용하는 검증 규칙입니다. 분석 엔진은 검증된 입력을
//! 가정하므로 이 모듈을 호출하지 않습니다.

use rust_decimal::Decimal;

use super::trade::{Trade, TradeType};
use crate::error::{JournalError, JournalResult};

/// 거래 레코드 하나를 검증합니다.
///
/// 첫 번째로 발견된 위반 사항을 `JournalError::InvalidInput`으로 반환합니다.
pub fn validate_trade(trade: &Trade) -> JournalResult<()> {
    if trade.symbol.trim().is_empty() {
        return Err(invalid(trade, "심볼이 비어 있습니다"));
    }

    ensure_positive(trade, "open_price", Some(trade.open_price))?;
    ensure_positive(trade, "quantity", Some(trade.quantity))?;
    ensure_positive(trade, "leverage", trade.leverage)?;
    ensure_positive(trade, "close_price", trade.close_price)?;
    ensure_positive(trade, "stop_loss", trade.stop_loss)?;
    ensure_positive(trade, "take_profit", trade.take_profit)?;

    validate_stop_loss(trade)?;
    validate_take_profit(trade)?;
    validate_close(trade)?;

    Ok(())
}

/// 여러 거래를 검증하고 위반 사항을 모두 모읍니다.
///
/// 반환값은 (거래 ID, 에러) 목록이며 비어 있으면 모두 통과입니다.
pub fn validate_trades(trades: &[Trade]) -> Vec<(i64, JournalError)> {
    trades
        .iter()
        .filter_map(|t| validate_trade(t).err().map(|e| (t.id, e)))
        .collect()
}

fn validate_stop_loss(trade: &Trade) -> JournalResult<()> {
    let Some(stop_loss) = trade.stop_loss else {
        return Ok(());
    };

    match trade.trade_type {
        TradeType::Buy if stop_loss >= trade.open_price => Err(invalid(
            trade,
            "매수 거래의 손절가는 진입가보다 낮아야 합니다",
        )),
        TradeType::Sell if stop_loss <= trade.open_price => Err(invalid(
            trade,
            "매도 거래의 손절가는 진입가보다 높아야 합니다",
        )),
        _ => Ok(()),
    }
}

fn validate_take_profit(trade: &Trade) -> JournalResult<()> {
    let Some(take_profit) = trade.take_profit else {
        return Ok(());
    };

    match trade.trade_type {
        TradeType::Buy if take_profit <= trade.open_price => Err(invalid(
            trade,
            "매수 거래의 익절가는 진입가보다 높아야 합니다",
        )),
        TradeType::Sell if take_profit >= trade.open_price => Err(invalid(
            trade,
            "매도 거래의 익절가는 진입가보다 낮아야 합니다",
        )),
        _ => Ok(()),
    }
}

fn validate_close(trade: &Trade) -> JournalResult<()> {
    match (trade.close_price, trade.closed_at) {
        (None, None) => Ok(()),
        (Some(_), Some(closed_at)) if closed_at <= trade.opened_at => Err(invalid(
            trade,
            "청산 시각은 진입 시각 이후여야 합니다",
        )),
        (Some(_), Some(_)) => Ok(()),
        _ => Err(invalid(
            trade,
            "청산가와 청산 시각은 함께 입력해야 합니다",
        )),
    }
}

fn ensure_positive(trade: &Trade, field: &str, value: Option<Decimal>) -> JournalResult<()> {
    match value {
        Some(v) if v <= Decimal::ZERO => Err(invalid(trade, &format!("{}는 양수여야 합니다", field))),
        _ => Ok(()),
    }
}

fn invalid(trade: &Trade, reason: &str) -> JournalError {
    JournalError::InvalidInput(format!("거래 #{} ({}): {}", trade.id, trade.symbol, reason))
}
