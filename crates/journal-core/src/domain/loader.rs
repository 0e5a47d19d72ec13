//! 거래 스냅샷 로딩.
//!
//! JSON 배열 또는 CSV 파일에서 [`Trade`] 목록을 읽어옵니다. 필드 이름은
//! snake_case 와이어 이름을 사용합니다 (`trade_type`은 `type`도 허용).
//!
//! 잘못된 레코드는 몇 번째 행인지 포함한 `JournalError::Data`로 즉시 실패합니다.

use std::io::Read;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use super::trade::{Trade, TradeType};
use crate::error::{JournalError, JournalResult};

/// JSON 배열에서 거래 목록을 읽습니다.
pub fn load_trades_json<R: Read>(reader: R) -> JournalResult<Vec<Trade>> {
    let values: Vec<serde_json::Value> = serde_json::from_reader(reader)?;

    let trades = values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            serde_json::from_value::<Trade>(value)
                .map_err(|e| JournalError::Data(format!("{}번째 레코드: {}", idx + 1, e)))
        })
        .collect::<JournalResult<Vec<_>>>()?;

    debug!(count = trades.len(), "JSON 거래 로드 완료");
    Ok(trades)
}

/// CSV에서 거래 목록을 읽습니다.
///
/// 첫 행은 헤더여야 합니다. 빈 셀은 값 없음으로 처리하며,
/// `id` 열이 없거나 비어 있으면 1부터 시작하는 행 번호를 ID로 사용합니다.
pub fn load_trades_csv<R: Read>(reader: R) -> JournalResult<Vec<Trade>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut trades = Vec::new();
    for (idx, result) in rdr.deserialize::<CsvTradeRecord>().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|e| JournalError::Data(format!("{}행: {}", row, e)))?;
        trades.push(record.into_trade(row)?);
    }

    debug!(count = trades.len(), "CSV 거래 로드 완료");
    Ok(trades)
}

/// CSV 한 행. 모든 셀을 문자열로 받은 뒤 직접 파싱합니다.
#[derive(Debug, Deserialize)]
struct CsvTradeRecord {
    #[serde(default)]
    id: Option<String>,
    symbol: String,
    #[serde(alias = "type")]
    trade_type: String,
    open_price: String,
    quantity: String,
    opened_at: String,
    #[serde(default)]
    take_profit: Option<String>,
    #[serde(default)]
    stop_loss: Option<String>,
    #[serde(default)]
    leverage: Option<String>,
    #[serde(default)]
    close_price: Option<String>,
    #[serde(default)]
    closed_at: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    comment: Option<String>,
}

impl CsvTradeRecord {
    fn into_trade(self, row: usize) -> JournalResult<Trade> {
        let id = match non_empty(self.id) {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| row_error(row, "id", &raw))?,
            None => row as i64,
        };

        let trade_type = parse_trade_type(&self.trade_type).ok_or_else(|| row_error(row, "trade_type", &self.trade_type))?;

        Ok(Trade {
            id,
            symbol: self.symbol,
            trade_type,
            open_price: parse_decimal(row, "open_price", &self.open_price)?,
            quantity: parse_decimal(row, "quantity", &self.quantity)?,
            leverage: parse_optional_decimal(row, "leverage", self.leverage)?,
            opened_at: parse_timestamp(row, "opened_at", &self.opened_at)?,
            close_price: parse_optional_decimal(row, "close_price", self.close_price)?,
            closed_at: parse_optional_timestamp(row, "closed_at", self.closed_at)?,
            stop_loss: parse_optional_decimal(row, "stop_loss", self.stop_loss)?,
            take_profit: parse_optional_decimal(row, "take_profit", self.take_profit)?,
            comment: non_empty(self.comment),
            created_at: parse_optional_timestamp(row, "created_at", self.created_at)?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn parse_trade_type(raw: &str) -> Option<TradeType> {
    match raw.to_lowercase().as_str() {
        "buy" | "long" => Some(TradeType::Buy),
        "sell" | "short" => Some(TradeType::Sell),
        _ => None,
    }
}

fn parse_decimal(row: usize, field: &str, raw: &str) -> JournalResult<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| row_error(row, field, raw))
}

fn parse_optional_decimal(row: usize, field: &str, raw: Option<String>) -> JournalResult<Option<Decimal>> {
    non_empty(raw).map(|r| parse_decimal(row, field, &r)).transpose()
}

/// 타임스탬프 파싱.
///
/// RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD`를 허용하며
/// 시간대가 없으면 UTC로 간주합니다.
pub fn parse_timestamp_utc(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// JSON 필드용 타임스탬프 역직렬화. [`parse_timestamp_utc`] 규칙을 따릅니다.
pub(crate) mod flexible_timestamp {
    use chrono::{DateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    use super::parse_timestamp_utc;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    /// `null`과 빈 문자열은 값 없음으로 처리합니다.
    pub fn deserialize_option<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => parse(&raw).map(Some).map_err(D::Error::custom),
            _ => Ok(None),
        }
    }

    fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        parse_timestamp_utc(raw.trim()).ok_or_else(|| format!("시각을 해석할 수 없습니다: '{}'", raw))
    }
}

fn parse_timestamp(row: usize, field: &str, raw: &str) -> JournalResult<DateTime<Utc>> {
    parse_timestamp_utc(raw).ok_or_else(|| row_error(row, field, raw))
}

fn parse_optional_timestamp(row: usize, field: &str, raw: Option<String>) -> JournalResult<Option<DateTime<Utc>>> {
    non_empty(raw).map(|r| parse_timestamp(row, field, &r)).transpose()
}

fn row_error(row: usize, field: &str, raw: &str) -> JournalError {
    JournalError::Data(format!("{}행 {} 값을 해석할 수 없습니다: '{}'", row, field, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    const CSV: &str = "\
id,symbol,trade_type,open_price,quantity,opened_at,take_profit,stop_loss,leverage,close_price,closed_at,created_at,comment
1,BTCUSDT,buy,42000.5,0.5,2024-01-05T10:00:00Z,45000,40000,10,43000,2024-01-06T10:00:00Z,,breakout
2,AAPL,sell,150,10,2024-01-07 09:30:00,,,,,,,
";

    #[test]
    fn test_load_csv() {
        let trades = load_trades_csv(CSV.as_bytes()).unwrap();
        assert_eq!(trades.len(), 2);

        let btc = &trades[0];
        assert_eq!(btc.trade_type, TradeType::Buy);
        assert_eq!(btc.open_price, dec!(42000.5));
        assert_eq!(btc.leverage, Some(dec!(10)));
        assert_eq!(btc.comment.as_deref(), Some("breakout"));
        assert!(btc.is_closed());

        let aapl = &trades[1];
        assert_eq!(aapl.trade_type, TradeType::Sell);
        assert_eq!(aapl.opened_at, Utc.with_ymd_and_hms(2024, 1, 7, 9, 30, 0).unwrap());
        assert!(aapl.leverage.is_none());
        assert!(aapl.close_price.is_none());
        assert!(aapl.comment.is_none());
        assert!(aapl.is_open());
    }

    #[test]
    fn test_csv_without_id_column_uses_row_number() {
        let csv = "symbol,type,open_price,quantity,opened_at\nETHUSDT,buy,3000,1,2024-02-01\nETHUSDT,sell,3100,1,2024-02-02\n";
        let trades = load_trades_csv(csv.as_bytes()).unwrap();
        assert_eq!(trades[0].id, 1);
        assert_eq!(trades[1].id, 2);
        assert_eq!(trades[1].trade_type, TradeType::Sell);
    }

    #[test]
    fn test_bad_timestamp_names_row() {
        let csv = "symbol,trade_type,open_price,quantity,opened_at\nBTCUSDT,buy,1,1,2024-01-01\nBTCUSDT,buy,1,1,yesterday\n";
        let err = load_trades_csv(csv.as_bytes()).unwrap_err();
        assert!(err.is_data_error());
        let msg = err.to_string();
        assert!(msg.contains("2행"));
        assert!(msg.contains("opened_at"));
    }

    #[test]
    fn test_load_json() {
        let json = r#"[
            {"id": 1, "symbol": "BTCUSDT", "trade_type": "buy", "open_price": "100",
             "quantity": "1", "opened_at": "2024-01-01T00:00:00Z",
             "close_price": "110", "closed_at": "2024-01-02T00:00:00Z"},
            {"id": 2, "symbol": "ETHUSDT", "type": "sell", "open_price": 2000,
             "quantity": 2, "opened_at": "2024-01-03T00:00:00Z", "leverage": 5}
        ]"#;

        let trades = load_trades_json(json.as_bytes()).unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].close_price, Some(dec!(110)));
        assert_eq!(trades[1].leverage, Some(dec!(5)));
    }

    #[test]
    fn test_json_bad_record_is_data_error() {
        let json = r#"[{"id": 1, "symbol": "X", "trade_type": "buy", "open_price": 1,
                        "quantity": 1, "opened_at": "not a date"}]"#;
        let err = load_trades_json(json.as_bytes()).unwrap_err();
        assert!(matches!(err, JournalError::Data(_)));
        assert!(err.to_string().contains("1번째"));
    }

    #[test]
    fn test_json_accepts_offsetless_timestamps() {
        let json = r#"[{"id": 1, "symbol": "BTCUSDT", "trade_type": "buy", "open_price": "100",
                        "quantity": "1", "opened_at": "2024-01-01T12:00:00",
                        "close_price": "110", "closed_at": "2024-01-02 08:30:00", "created_at": ""}]"#;
        let trades = load_trades_json(json.as_bytes()).unwrap();
        assert_eq!(trades[0].opened_at, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        assert_eq!(trades[0].closed_at, Some(Utc.with_ymd_and_hms(2024, 1, 2, 8, 30, 0).unwrap()));
        assert!(trades[0].created_at.is_none());
        assert!(trades[0].is_closed());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(parse_timestamp_utc("2024-03-01T12:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp_utc("2024-03-01T21:00:00+09:00"), Some(expected));
        assert_eq!(parse_timestamp_utc("2024-03-01 12:00:00"), Some(expected));
        assert!(parse_timestamp_utc("03/01/2024").is_none());
    }
}
