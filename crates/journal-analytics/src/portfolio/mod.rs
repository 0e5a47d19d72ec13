//! 시계열 집계 및 차트/테이블 투영 모듈
//!
//! 청산된 거래를 기간·심볼·범주별로 집계하고, 렌더링 계층이 소비할 시리즈 구조로 변환합니다.
//!
//! # 모듈 구성
//!
//! - [`equity_curve`]: 자산 곡선, 누적 손익, 다중 곡선 비교
//! - [`aggregate`]: 기간별 손익, 심볼별 대금/횟수, 범주 분포
//! - [`charts`]: 차트 데이터 구조와 색상 팔레트
//! - [`table`]: 거래 테이블 행
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use journal_analytics::portfolio::{ChartFactory, ChartKind, EquityCurve};
//! use journal_core::{AnalyticsConfig, Timeframe};
//!
//! let curve = EquityCurve::from_trades(&trades, Timeframe::Daily, dec!(10_000));
//! println!("최종 자산: {}", curve.final_equity());
//!
//! let factory = ChartFactory::new(AnalyticsConfig::default());
//! let chart = factory.build(ChartKind::Monthly, &trades, Timeframe::Monthly)?;
//! ```

pub mod aggregate;
pub mod charts;
pub mod equity_curve;
pub mod table;

pub use aggregate::*;
pub use charts::*;
pub use equity_curve::*;
pub use table::*;
