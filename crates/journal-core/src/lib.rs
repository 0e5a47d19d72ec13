//! # Journal Core
//!
//! 매매일지의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 분석 엔진과 CLI가 공유하는 기본 타입을 제공합니다:
//! - 거래 기록 (`Trade`, `TradeType`, `TradeStatus`)
//! - 거래별 실현 손익 계산 (강제 청산 규칙 포함)
//! - 레코드 검증 및 JSON/CSV 로딩
//! - 집계 타임프레임과 Decimal 유틸리티
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
