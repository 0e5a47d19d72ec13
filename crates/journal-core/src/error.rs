//! 매매일지 시스템의 에러 타입.
//!
//! 분석 엔진은 순수 계산이므로 대부분의 함수는 에러를 반환하지 않습니다.
//! 에러는 주로 데이터 로딩(타임스탬프 파싱 실패 등)과 설정 단계에서 발생합니다.

use thiserror::Error;

/// 매매일지 핵심 에러.
#[derive(Debug, Error)]
pub enum JournalError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 에러 (잘못된 레코드, 파싱 불가 타임스탬프)
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 매매일지 작업을 위한 Result 타입.
pub type JournalResult<T> = Result<T, JournalError>;

impl JournalError {
    /// 데이터 종류의 에러인지 확인합니다.
    ///
    /// 데이터 소스가 넘겨준 레코드 자체가 잘못된 경우입니다.
    pub fn is_data_error(&self) -> bool {
        matches!(self, JournalError::Data(_) | JournalError::InvalidInput(_))
    }
}

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        JournalError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for JournalError {
    fn from(err: csv::Error) -> Self {
        JournalError::Data(err.to_string())
    }
}

impl From<std::io::Error> for JournalError {
    fn from(err: std::io::Error) -> Self {
        JournalError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for JournalError {
    fn from(err: config::ConfigError) -> Self {
        JournalError::Config(err.to_string())
    }
}
