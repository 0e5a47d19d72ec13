//! 거래 통계 요약.
//!
//! 대시보드 요약 카드에 표시하는 모든 지표를 한 번의 파이프라인 통과로 계산합니다.

use journal_core::{Pnl, Ratio, Trade};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

use super::metrics::{
    average_loss_of, average_risk_reward_of, average_trade_duration_of, average_win_of, expectancy_of,
    gross_loss_of, gross_profit_of, longest_run, max_drawdown_of, profit_factor_of, Drawdown, ProfitFactor,
};
use crate::pipeline::{chronological, with_realized_pnl};

/// 거래 통계 집계.
///
/// 승률, 프로핏 팩터, 평균 손익 등 매매일지 성과를 요약합니다.
/// 개별 함수([`super::metrics`])와 동일한 결과를 보장합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TradeStatistics {
    /// 전체 거래 수
    pub total_trades: usize,
    /// 청산 완료 거래 수
    pub closed_trades: usize,
    /// 진행 중 거래 수
    pub open_trades: usize,
    /// 수익 거래 수 (청산 완료, 손익 > 0)
    pub winning_trades: usize,
    /// 손실 거래 수 (청산 완료, 손익 < 0)
    pub losing_trades: usize,
    /// 승률 (%, 전체 거래 기준)
    pub win_rate: Decimal,
    /// 청산 거래 손익 합계
    pub total_pnl: Pnl,
    /// 평균 수익
    pub average_win: Pnl,
    /// 평균 손실 (음수)
    pub average_loss: Pnl,
    /// 프로핏 팩터
    pub profit_factor: ProfitFactor,
    /// 기대값 (청산 거래당 평균 손익)
    pub expectancy: Pnl,
    /// 최고 거래
    pub best_trade: Option<Pnl>,
    /// 최저 거래
    pub worst_trade: Option<Pnl>,
    /// 총 수익
    pub gross_profit: Pnl,
    /// 총 손실 (양수)
    pub gross_loss: Pnl,
    /// 최대 연승
    pub max_win_streak: usize,
    /// 최대 연패
    pub max_loss_streak: usize,
    /// 평균 보유 기간 (예: "2.5d")
    pub average_trade_duration: String,
    /// 최대 낙폭
    pub max_drawdown: Drawdown,
    /// 평균 손익비
    pub average_risk_reward: Option<Ratio>,
}

impl TradeStatistics {
    /// 거래 목록으로부터 통계 계산.
    pub fn from_trades(trades: &[Trade]) -> Self {
        let _span = journal_core::journal_span!("trade_statistics", trades.len()).entered();

        if trades.is_empty() {
            return Self {
                average_trade_duration: "0m".to_string(),
                ..Self::default()
            };
        }

        let realized: Vec<_> = with_realized_pnl(trades).collect();
        let wins = realized.iter().filter(|rt| rt.is_win()).count();

        let closed = chronological(realized.iter().filter_map(|rt| rt.as_closed()));

        let stats = Self {
            total_trades: trades.len(),
            closed_trades: closed.len(),
            open_trades: trades.len() - closed.len(),
            winning_trades: closed.iter().filter(|ct| ct.pnl > Decimal::ZERO).count(),
            losing_trades: closed.iter().filter(|ct| ct.pnl < Decimal::ZERO).count(),
            win_rate: Decimal::from(wins) / Decimal::from(trades.len()) * dec!(100),
            total_pnl: closed.iter().map(|ct| ct.pnl).sum(),
            average_win: average_win_of(&closed),
            average_loss: average_loss_of(&closed),
            profit_factor: profit_factor_of(&closed),
            expectancy: expectancy_of(&closed),
            best_trade: closed.iter().map(|ct| ct.pnl).max(),
            worst_trade: closed.iter().map(|ct| ct.pnl).min(),
            gross_profit: gross_profit_of(&closed),
            gross_loss: gross_loss_of(&closed),
            max_win_streak: longest_run(&closed, |pnl| pnl > Decimal::ZERO),
            max_loss_streak: longest_run(&closed, |pnl| pnl < Decimal::ZERO),
            average_trade_duration: average_trade_duration_of(&closed),
            max_drawdown: max_drawdown_of(&closed),
            average_risk_reward: average_risk_reward_of(&closed),
        };

        debug!(
            closed = stats.closed_trades,
            open = stats.open_trades,
            "거래 통계 계산 완료"
        );
        stats
    }

    /// 수익성 여부 (청산 손익 합계 > 0).
    pub fn is_profitable(&self) -> bool {
        self.total_pnl > Decimal::ZERO
    }

    /// 통계 요약 문자열.
    pub fn summary(&self) -> String {
        let ratio = self
            .average_risk_reward
            .map(|r| format!("{:.2}", r.round_dp(2)))
            .unwrap_or_else(|| "-".to_string());

        format!(
            "거래: {} (청산 {}, 진행 {}) | 승률: {:.1}% | 손익: {:.2} | PF: {} | 기대값: {:.2} | MDD: {:.2} ({:.1}%) | 연승/연패: {}/{} | 평균 보유: {} | 손익비: {}",
            self.total_trades,
            self.closed_trades,
            self.open_trades,
            self.win_rate.round_dp(1),
            self.total_pnl.round_dp(2),
            self.profit_factor,
            self.expectancy.round_dp(2),
            self.max_drawdown.absolute.round_dp(2),
            self.max_drawdown.percentage.round_dp(1),
            self.max_win_streak,
            self.max_loss_streak,
            self.average_trade_duration,
            ratio,
        )
    }
}
