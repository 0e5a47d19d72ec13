//! 거래 스냅샷 파일 로딩.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use journal_core::{load_trades_csv, load_trades_json, validate_trades, Trade};
use tracing::{info, warn};

/// 거래 파일 형식 (확장자로 결정).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeFileFormat {
    Json,
    Csv,
}

impl TradeFileFormat {
    /// 파일 확장자로 형식을 결정합니다.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => bail!(
                "지원하지 않는 파일 형식입니다: {} (.json 또는 .csv)",
                path.display()
            ),
        }
    }
}

/// 파일에서 거래 목록을 읽습니다.
///
/// 검증에 실패한 레코드는 경고로 기록하고 그대로 포함합니다.
/// 거부는 `validate` 명령이 담당합니다.
pub fn load_trades(path: &Path) -> Result<Vec<Trade>> {
    let format = TradeFileFormat::from_path(path)?;
    let file = File::open(path).with_context(|| format!("파일을 열 수 없습니다: {}", path.display()))?;
    let reader = BufReader::new(file);

    let trades = match format {
        TradeFileFormat::Json => load_trades_json(reader),
        TradeFileFormat::Csv => load_trades_csv(reader),
    }
    .with_context(|| format!("거래 파일을 해석할 수 없습니다: {}", path.display()))?;

    for (id, err) in validate_trades(&trades) {
        warn!(trade_id = id, "{}", err);
    }

    info!(path = %path.display(), count = trades.len(), "거래 로드 완료");
    Ok(trades)
}

/// 비교 시리즈 이름 (파일 이름에서 확장자를 뺀 부분).
pub fn series_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("journal-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(TradeFileFormat::from_path(Path::new("a/trades.json")).unwrap(), TradeFileFormat::Json);
        assert_eq!(TradeFileFormat::from_path(Path::new("trades.CSV")).unwrap(), TradeFileFormat::Csv);
        assert!(TradeFileFormat::from_path(Path::new("trades.xlsx")).is_err());
        assert!(TradeFileFormat::from_path(Path::new("trades")).is_err());
    }

    #[test]
    fn test_load_csv_and_json_files() {
        let csv = temp_file(
            "load.csv",
            "symbol,trade_type,open_price,quantity,opened_at,close_price,closed_at\nBTCUSDT,buy,100,1,2024-01-01,110,2024-01-02\n",
        );
        let trades = load_trades(&csv).unwrap();
        assert_eq!(trades.len(), 1);
        assert!(trades[0].is_closed());

        let json = temp_file(
            "load.json",
            r#"[{"id": 9, "symbol": "ETHUSDT", "trade_type": "sell", "open_price": 10, "quantity": 2, "opened_at": "2024-01-01T00:00:00Z"}]"#,
        );
        let trades = load_trades(&json).unwrap();
        assert_eq!(trades[0].id, 9);
    }

    #[test]
    fn test_load_reports_path_on_bad_data() {
        let path = temp_file("bad.csv", "symbol,trade_type,open_price,quantity,opened_at\nX,buy,abc,1,2024-01-01\n");
        let err = load_trades(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("bad.csv"));
    }

    #[test]
    fn test_series_label_uses_file_stem() {
        assert_eq!(series_label(Path::new("data/2024-q1.json")), "2024-q1");
    }
}
