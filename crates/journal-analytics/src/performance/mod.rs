//! 성과 분석 모듈
//!
//! 매매일지 거래 목록의 성과를 측정하기 위한 도구를 제공합니다.
//!
//! # 모듈 구성
//!
//! - [`metrics`]: 개별 성과 지표 (승률, 프로핏 팩터, 최대낙폭, 연승/연패 등)
//! - [`statistics`]: 모든 지표를 한 번에 계산하는 요약 통계

pub mod metrics;
pub mod statistics;

pub use metrics::*;
pub use statistics::*;
