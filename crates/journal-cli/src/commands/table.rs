//! 거래 테이블 출력.

use anyhow::{Context, Result};
use journal_analytics::{trade_rows, TradeRow};
use journal_core::Trade;

use super::to_json;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("잘못된 출력 형식: {}. 사용 가능: table, csv, json", s)),
        }
    }
}

/// 거래 목록을 지정 형식의 테이블로 반환합니다.
pub fn run_table(trades: &[Trade], format: OutputFormat) -> Result<String> {
    let rows = trade_rows(trades);

    match format {
        OutputFormat::Table => Ok(format_table(&rows)),
        OutputFormat::Csv => format_csv(&rows),
        OutputFormat::Json => to_json(&rows),
    }
}

/// 테이블 형식 출력.
fn format_table(rows: &[TradeRow]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<5} {:<12} {:<7} {:<5} {:>12} {:>14} {:>5} {:>14} {:>14} {:>14} {:<20} {:<20} {:>14} {:>9}\n",
        "ID", "SYMBOL", "STATUS", "TYPE", "QUANTITY", "OPEN", "LEV", "TP", "SL", "CLOSE", "OPENED", "CLOSED", "PNL", "PNL %"
    ));
    output.push_str(&"-".repeat(175));
    output.push('\n');

    for row in rows {
        output.push_str(&format!(
            "{:<5} {:<12} {:<7} {:<5} {:>12} {:>14} {:>5} {:>14} {:>14} {:>14} {:<20} {:<20} {:>14} {:>9}\n",
            row.id,
            truncate(&row.symbol, 12),
            row.status.to_string(),
            row.trade_type.to_string(),
            row.quantity,
            row.open_price,
            row.leverage,
            row.take_profit,
            row.stop_loss,
            row.close_price,
            row.opened_at,
            row.closed_at,
            row.pnl,
            row.pnl_percentage,
        ));
    }

    output.push('\n');
    output.push_str(&format!("Total: {} trades", rows.len()));
    output
}

/// CSV 형식 출력.
fn format_csv(rows: &[TradeRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).context("CSV 직렬화 실패")?;
    }
    let bytes = writer.into_inner().context("CSV 버퍼 플러시 실패")?;
    String::from_utf8(bytes).context("CSV 출력이 UTF-8이 아닙니다")
}

/// 문자열 자르기 (UTF-8 안전).
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
