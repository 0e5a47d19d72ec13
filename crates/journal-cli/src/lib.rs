//! 매매일지 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - JSON/CSV 거래 스냅샷 로딩 (확장자로 형식 결정)
//! - 통계 요약, 차트 데이터, 자산 곡선 비교, 거래 테이블 출력
//! - 거래 레코드 검증

pub mod commands;
pub mod input;

pub use input::{load_trades, series_label, TradeFileFormat};
