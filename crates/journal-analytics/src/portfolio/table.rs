//! 거래 테이블 투영.
//!
//! 거래 한 건을 표시용 문자열 셀로 변환합니다. 정렬을 위해 원본 손익 값도 함께 보존합니다.

use chrono::{DateTime, Utc};
use journal_core::{format_currency, pnl_percentage, realized_pnl, DecimalExt, Pnl, Trade, TradeStatus, TradeType};
use rust_decimal::Decimal;
use serde::Serialize;

/// 값이 없을 때 표시하는 문자열.
const EMPTY_CELL: &str = "-";

/// 거래 테이블의 한 행.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRow {
    pub id: i64,
    pub symbol: String,
    pub status: TradeStatus,
    pub trade_type: TradeType,
    /// 수량 (최대 소수점 6자리)
    pub quantity: String,
    pub open_price: String,
    /// `"10x"` 또는 `"-"`
    pub leverage: String,
    pub take_profit: String,
    pub stop_loss: String,
    pub close_price: String,
    pub opened_at: String,
    pub closed_at: String,
    /// 통화 형식 손익 (`"-"` = 진행 중)
    pub pnl: String,
    /// 손익률 (`"12.50%"`)
    pub pnl_percentage: String,
    /// 정렬용 원본 손익
    #[serde(skip)]
    pub pnl_value: Option<Pnl>,
}

impl TradeRow {
    /// 거래 하나를 테이블 행으로 변환합니다.
    pub fn from_trade(trade: &Trade) -> Self {
        let pnl = realized_pnl(trade);

        Self {
            id: trade.id,
            symbol: trade.symbol.clone(),
            status: trade.status(),
            trade_type: trade.trade_type,
            quantity: format_quantity(trade.quantity),
            open_price: format_currency(trade.open_price, 2),
            leverage: trade
                .leverage
                .map(|l| format!("{}x", l.normalize()))
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
            take_profit: price_cell(trade.take_profit),
            stop_loss: price_cell(trade.stop_loss),
            close_price: price_cell(trade.close_price),
            opened_at: format_timestamp(trade.opened_at),
            closed_at: trade
                .closed_at
                .map(format_timestamp)
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
            pnl: price_cell(pnl),
            pnl_percentage: pnl_percentage(trade)
                .map(|ratio| ratio.to_percentage_string())
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
            pnl_value: pnl,
        }
    }
}

/// 거래 목록을 테이블 행으로 변환합니다 (입력 순서 유지).
pub fn trade_rows(trades: &[Trade]) -> Vec<TradeRow> {
    trades.iter().map(TradeRow::from_trade).collect()
}

fn price_cell(value: Option<Decimal>) -> String {
    value
        .map(|v| format_currency(v, 2))
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

fn format_quantity(quantity: Decimal) -> String {
    quantity.round_half_up(6).normalize().to_string()
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y %H:%M").to_string()
}
