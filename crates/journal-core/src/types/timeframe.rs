//! 시계열 집계 단위 정의.
//!
//! 청산된 거래를 일/주/월 단위 버킷으로 묶을 때 사용하는 타임프레임입니다.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 집계 타임프레임.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// 일별 집계 (UTC 날짜)
    #[default]
    Daily,
    /// 주별 집계 (일요일 시작)
    Weekly,
    /// 월별 집계
    Monthly,
}

impl Timeframe {
    /// 타임스탬프를 버킷 키로 변환합니다.
    ///
    /// - `Daily`: `YYYY-MM-DD`
    /// - `Weekly`: 해당 시각 이전(당일 포함)의 일요일 `YYYY-MM-DD`
    /// - `Monthly`: `YYYY-MM`
    ///
    /// 키는 사전순 정렬이 곧 시간순 정렬이 되도록 0으로 채워집니다.
    pub fn bucket_key(&self, timestamp: DateTime<Utc>) -> String {
        let date = timestamp.date_naive();

        match self {
            Timeframe::Daily => date.format("%Y-%m-%d").to_string(),
            Timeframe::Weekly => Self::week_start(date).format("%Y-%m-%d").to_string(),
            Timeframe::Monthly => date.format("%Y-%m").to_string(),
        }
    }

    /// 주 시작일(일요일)을 반환합니다.
    fn week_start(date: NaiveDate) -> NaiveDate {
        let offset = date.weekday().num_days_from_sunday();
        date - Duration::days(i64::from(offset))
    }

    /// 버킷 키를 다시 날짜로 해석합니다 (축 레이블 포맷용).
    ///
    /// 월별 키는 해당 월 1일로 해석합니다.
    pub fn parse_bucket_key(&self, key: &str) -> Option<NaiveDate> {
        match self {
            Timeframe::Daily | Timeframe::Weekly => NaiveDate::parse_from_str(key, "%Y-%m-%d").ok(),
            Timeframe::Monthly => NaiveDate::parse_from_str(&format!("{}-01", key), "%Y-%m-%d").ok(),
        }
    }

    /// 모든 타임프레임을 반환합니다.
    pub fn all() -> &'static [Timeframe] {
        &[Timeframe::Daily, Timeframe::Weekly, Timeframe::Monthly]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "1d" | "d" => Ok(Timeframe::Daily),
            "weekly" | "1w" | "w" => Ok(Timeframe::Weekly),
            "monthly" | "1m" | "m" => Ok(Timeframe::Monthly),
            _ => Err(format!("알 수 없는 타임프레임: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_daily_key_uses_utc_date() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 0).unwrap();
        assert_eq!(Timeframe::Daily.bucket_key(ts), "2024-03-09");
    }

    #[test]
    fn test_weekly_key_is_previous_sunday() {
        // 2024-03-13 = 수요일 → 2024-03-10 (일요일)
        let wed = Utc.with_ymd_and_hms(2024, 3, 13, 12, 0, 0).unwrap();
        assert_eq!(Timeframe::Weekly.bucket_key(wed), "2024-03-10");

        // 일요일은 자기 자신
        let sun = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        assert_eq!(Timeframe::Weekly.bucket_key(sun), "2024-03-10");

        // 토요일 → 같은 주의 일요일
        let sat = Utc.with_ymd_and_hms(2024, 3, 16, 8, 0, 0).unwrap();
        assert_eq!(Timeframe::Weekly.bucket_key(sat), "2024-03-10");
    }

    #[test]
    fn test_weekly_key_crosses_month_boundary() {
        // 2024-03-02 = 토요일 → 2024-02-25
        let ts = Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap();
        assert_eq!(Timeframe::Weekly.bucket_key(ts), "2024-02-25");
    }

    #[test]
    fn test_monthly_key() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 31, 10, 0, 0).unwrap();
        assert_eq!(Timeframe::Monthly.bucket_key(ts), "2024-01");
    }

    #[test]
    fn test_parse_bucket_key() {
        assert_eq!(
            Timeframe::Monthly.parse_bucket_key("2024-02"),
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
        assert_eq!(
            Timeframe::Daily.parse_bucket_key("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert!(Timeframe::Daily.parse_bucket_key("garbage").is_none());
    }

    #[test]
    fn test_timeframe_from_str() {
        assert_eq!("daily".parse::<Timeframe>().unwrap(), Timeframe::Daily);
        assert_eq!("WEEKLY".parse::<Timeframe>().unwrap(), Timeframe::Weekly);
        assert_eq!("1m".parse::<Timeframe>().unwrap(), Timeframe::Monthly);
        assert!("hourly".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_timeframe_display_roundtrip() {
        for tf in Timeframe::all() {
            assert_eq!(tf.to_string().parse::<Timeframe>().unwrap(), *tf);
        }
    }
}
