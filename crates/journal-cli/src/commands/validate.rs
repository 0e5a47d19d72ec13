//! 거래 레코드 검증.

use journal_core::{validate_trades, Trade};
use serde::Serialize;

/// 검증 결과.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// 검사한 거래 수
    pub checked: usize,
    /// (거래 ID, 사유)
    pub errors: Vec<(i64, String)>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// 사람이 읽는 보고서.
    pub fn render(&self) -> String {
        let mut output = format!("검사한 거래: {}\n", self.checked);
        if self.is_valid() {
            output.push_str("모든 거래가 유효합니다");
            return output;
        }

        output.push_str(&format!("잘못된 거래: {}\n", self.errors.len()));
        for (id, reason) in &self.errors {
            output.push_str(&format!("  #{:<6} {}\n", id, reason));
        }
        output
    }
}

/// 모든 거래를 검증합니다.
pub fn run_validate(trades: &[Trade]) -> ValidationReport {
    let errors = validate_trades(trades)
        .into_iter()
        .map(|(id, err)| (id, err.to_string()))
        .collect();

    ValidationReport {
        checked: trades.len(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use journal_core::TradeType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reports_offending_trades() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let trades = vec![
            Trade::new(1, "BTCUSDT", TradeType::Buy, dec!(100), dec!(1), t0),
            Trade::new(2, "BTCUSDT", TradeType::Buy, dec!(100), dec!(1), t0).with_stop_loss(dec!(120)),
            Trade::new(3, "", TradeType::Sell, dec!(100), dec!(1), t0),
        ];

        let report = run_validate(&trades);
        assert_eq!(report.checked, 3);
        assert!(!report.is_valid());
        let ids: Vec<i64> = report.errors.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert!(report.render().contains("잘못된 거래: 2"));
    }

    #[test]
    fn test_clean_journal() {
        let report = run_validate(&[]);
        assert!(report.is_valid());
        assert!(report.render().ends_with("모든 거래가 유효합니다"));
    }
}
