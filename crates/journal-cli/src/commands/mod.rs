//! CLI 명령어 구현 모듈.
//!
//! 각 명령은 이미 로드된 거래 목록을 받아 출력할 문자열을 반환합니다.

pub mod chart;
pub mod compare;
pub mod stats;
pub mod table;
pub mod validate;

use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// 결과를 파일 또는 stdout에 출력합니다.
pub fn write_output(content: &str, output_path: Option<&str>) -> Result<()> {
    if let Some(path) = output_path {
        let mut file = File::create(path).with_context(|| format!("출력 파일을 만들 수 없습니다: {}", path))?;
        file.write_all(content.as_bytes())
            .context("출력 파일 쓰기 실패")?;
        info!("결과 저장: {}", path);
    } else {
        println!("{}", content);
    }

    Ok(())
}

/// JSON 문자열로 직렬화합니다 (들여쓰기 포함).
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("JSON 직렬화 실패")
}
