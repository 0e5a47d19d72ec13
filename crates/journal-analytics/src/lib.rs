//! 매매일지 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 실현 손익 파이프라인 (강제 청산 규칙이 한 곳에서만 적용됨)
//! - 성과 지표 계산 (승률, 프로핏 팩터, 기대값, 최대낙폭, 연승/연패, 손익비)
//! - 시계열 집계 (자산 곡선, 기간별 손익, 심볼별/범주별 분포)
//! - 차트/테이블 투영
//!
//! 모든 함수는 거래 목록의 불변 스냅샷을 받아 새 결과를 반환하는 순수 함수입니다.
//!
//! # Re-exports
//!
//! - [`performance`]: 성과 지표 (`TradeStatistics`, `ProfitFactor`, `Drawdown` 등)
//! - [`portfolio`]: 집계 및 투영 (`EquityCurve`, `ChartFactory`, `TradeRow` 등)

pub mod performance;
pub mod pipeline;
pub mod portfolio;

// Performance 모듈 re-exports
pub use performance::metrics::{
    average_loss, average_risk_reward, average_trade_duration, average_win, best_trade,
    expectancy, gross_loss, gross_profit, max_drawdown, max_loss_streak, max_win_streak,
    profit_factor, risk_reward_ratio, win_rate, worst_trade, Drawdown, ProfitFactor,
};
pub use performance::statistics::TradeStatistics;

// Pipeline re-exports
pub use pipeline::{closed_trades, with_realized_pnl, ClosedTrade, RealizedTrade};

// Portfolio 모듈 re-exports
pub use portfolio::aggregate::{CategoryCount, SeriesPoint};
pub use portfolio::charts::{ChartData, ChartFactory, ChartKind, Dataset, LabelFormat};
pub use portfolio::equity_curve::{compare_equity_curves, EquityComparison, EquityCurve, EquityPoint};
pub use portfolio::table::{trade_rows, TradeRow};
