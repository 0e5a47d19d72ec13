//! 매매일지 거래 기록.
//!
//! 이 모듈은 분석 엔진이 소비하는 표준 거래 레코드를 정의합니다:
//! - `Trade` - 수동으로 기록한 단일 거래
//! - `TradeType` - 거래 방향 (매수 = 롱, 매도 = 숏)
//! - `TradeStatus` - 진행/청산 상태

use crate::types::{Leverage, Price, Quantity};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 거래 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    /// 매수 (롱 포지션)
    Buy,
    /// 매도 (숏 포지션)
    Sell,
}

impl TradeType {
    /// 손익 부호 계수를 반환합니다 (롱 = +1, 숏 = -1).
    pub fn direction(&self) -> Decimal {
        match self {
            TradeType::Buy => Decimal::ONE,
            TradeType::Sell => Decimal::NEGATIVE_ONE,
        }
    }

    /// 롱 포지션 여부.
    pub fn is_long(&self) -> bool {
        matches!(self, TradeType::Buy)
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::Buy => write!(f, "buy"),
            TradeType::Sell => write!(f, "sell"),
        }
    }
}

/// 거래 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    /// 진행 중 (청산가 또는 청산 시각 없음)
    Open,
    /// 청산 완료 (청산가와 청산 시각 모두 존재)
    Closed,
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Open => write!(f, "open"),
            TradeStatus::Closed => write!(f, "closed"),
        }
    }
}

/// 매매일지에 기록된 거래.
///
/// 청산 여부는 `close_price`와 `closed_at`이 **모두** 있을 때만 청산으로 봅니다.
/// 둘 중 하나만 있는 레코드는 진행 중 거래로 취급됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// 거래 ID
    pub id: i64,
    /// 종목 심볼 (예: "BTCUSDT", "AAPL")
    pub symbol: String,
    /// 거래 방향
    #[serde(alias = "type")]
    pub trade_type: TradeType,
    /// 진입 가격
    pub open_price: Price,
    /// 거래 수량
    pub quantity: Quantity,
    /// 레버리지 (없으면 1배)
    #[serde(default)]
    pub leverage: Option<Leverage>,
    /// 진입 시각
    #[serde(deserialize_with = "super::loader::flexible_timestamp::deserialize")]
    pub opened_at: DateTime<Utc>,
    /// 청산 가격
    #[serde(default)]
    pub close_price: Option<Price>,
    /// 청산 시각
    #[serde(default, deserialize_with = "super::loader::flexible_timestamp::deserialize_option")]
    pub closed_at: Option<DateTime<Utc>>,
    /// 손절가
    #[serde(default)]
    pub stop_loss: Option<Price>,
    /// 익절가
    #[serde(default)]
    pub take_profit: Option<Price>,
    /// 메모
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// 기록 생성 시각
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::loader::flexible_timestamp::deserialize_option"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Trade {
    /// 새 진행 중 거래를 생성합니다.
    pub fn new(
        id: i64,
        symbol: impl Into<String>,
        trade_type: TradeType,
        open_price: Price,
        quantity: Quantity,
        opened_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            trade_type,
            open_price,
            quantity,
            leverage: None,
            opened_at,
            close_price: None,
            closed_at: None,
            stop_loss: None,
            take_profit: None,
            comment: None,
            created_at: None,
        }
    }

    /// 청산 가격과 시각을 설정합니다.
    pub fn with_close(mut self, close_price: Price, closed_at: DateTime<Utc>) -> Self {
        self.close_price = Some(close_price);
        self.closed_at = Some(closed_at);
        self
    }

    /// 레버리지를 설정합니다.
    pub fn with_leverage(mut self, leverage: Leverage) -> Self {
        self.leverage = Some(leverage);
        self
    }

    /// 손절가를 설정합니다.
    pub fn with_stop_loss(mut self, stop_loss: Price) -> Self {
        self.stop_loss = Some(stop_loss);
        self
    }

    /// 익절가를 설정합니다.
    pub fn with_take_profit(mut self, take_profit: Price) -> Self {
        self.take_profit = Some(take_profit);
        self
    }

    /// 메모를 설정합니다.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// 실제 적용되는 레버리지.
    ///
    /// 미지정 시 1배이며, 1배 미만 값도 1배로 취급합니다.
    pub fn effective_leverage(&self) -> Leverage {
        self.leverage.unwrap_or(Decimal::ONE).max(Decimal::ONE)
    }

    /// 청산 완료 여부 (청산가와 청산 시각 모두 필요).
    pub fn is_closed(&self) -> bool {
        self.close_price.is_some() && self.closed_at.is_some()
    }

    /// 진행 중 여부.
    pub fn is_open(&self) -> bool {
        !self.is_closed()
    }

    /// 거래 상태를 반환합니다.
    pub fn status(&self) -> TradeStatus {
        if self.is_closed() {
            TradeStatus::Closed
        } else {
            TradeStatus::Open
        }
    }

    /// 진입 시점의 투입 금액 (레버리지 미적용).
    pub fn invested_amount(&self) -> Decimal {
        self.open_price * self.quantity
    }

    /// 보유 기간 (청산된 거래만).
    pub fn holding_duration(&self) -> Option<chrono::Duration> {
        match (self.close_price, self.closed_at) {
            (Some(_), Some(closed_at)) => Some(closed_at - self.opened_at),
            _ => None,
        }
    }
}
