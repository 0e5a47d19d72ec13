//! 차트 데이터 구조
//!
//! 집계 결과를 렌더링 계층이 그대로 소비할 수 있는 시리즈 구조로 변환합니다.
//! 이 계층은 추가 수치 계산을 하지 않고 색상 선택과 레이블 포맷만 담당합니다.
//!
//! # 제공 차트
//!
//! - 자산 곡선 (+ Drawdown)
//! - 누적 손익 / 월별 손익
//! - 심볼별 거래 대금 / 거래 횟수 / 분포
//! - 매수·매도, 수익·손실, 레버리지 분포
//! - 손익비 분포
//! - 다중 자산 곡선 비교

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;

use journal_core::{AnalyticsConfig, DecimalExt, JournalError, JournalResult, Timeframe, Trade};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregate::{
    leverage_distribution, monthly_pnl, risk_reward_distribution, symbol_distribution,
    trade_count_by_symbol, trade_type_distribution, volume_by_symbol, win_loss_distribution,
    CategoryCount, SeriesPoint,
};
use super::equity_curve::{compare_equity_curves, cumulative_pnl, EquityCurve};

/// 재무 차트 색상.
pub mod palette {
    pub const PROFIT: &str = "#10b981";
    pub const LOSS: &str = "#ef4444";
    pub const NEUTRAL: &str = "#6b7280";
    pub const PRIMARY: &str = "#3b82f6";
    pub const SECONDARY: &str = "#8b5cf6";
    pub const SUCCESS: &str = "#22c55e";
    pub const WARNING: &str = "#f59e0b";
    pub const INFO: &str = "#06b6d4";
    pub const INDIGO: &str = "#6366f1";
    pub const PINK: &str = "#ec4899";
    pub const TEAL: &str = "#14b8a6";

    /// 파이 차트 조각 테두리
    pub const BORDER: &str = "#374151";

    /// 다중 시리즈용 순환 색상
    pub const SERIES: [&str; 9] = [PRIMARY, SECONDARY, SUCCESS, WARNING, INFO, INDIGO, PINK, TEAL, NEUTRAL];

    /// 거래 대금 막대 색상
    pub const VOLUME: [&str; 5] = [PRIMARY, SECONDARY, SUCCESS, WARNING, NEUTRAL];
}

/// 시리즈 팔레트를 순환하며 `count`개의 색상을 반환합니다.
pub fn color_palette(count: usize) -> Vec<String> {
    cycle(&palette::SERIES, count)
}

fn cycle(colors: &[&str], count: usize) -> Vec<String> {
    colors.iter().cycle().take(count).map(|c| (*c).to_string()).collect()
}

/// 16진수 색상에 알파 값을 붙입니다 (`#3b82f6` + `20` → `#3b82f620`).
pub fn with_alpha(color: &str, alpha: &str) -> String {
    format!("{}{}", color, alpha)
}

/// 단일 색상 또는 포인트별 색상.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    PerPoint(Vec<String>),
}

impl From<&str> for ColorSpec {
    fn from(color: &str) -> Self {
        ColorSpec::Single(color.to_string())
    }
}

impl From<Vec<String>> for ColorSpec {
    fn from(colors: Vec<String>) -> Self {
        ColorSpec::PerPoint(colors)
    }
}

/// 데이터셋 스타일 메타데이터.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(default)]
    pub fill: bool,
}

/// 레이블과 평행한 값 배열 하나.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// 데이터셋 이름
    pub label: String,

    /// 값 (`ChartData::labels`와 같은 길이, 같은 순서)
    pub data: Vec<f64>,

    /// 스타일
    #[serde(flatten)]
    pub style: DatasetStyle,
}

impl Dataset {
    /// 스타일 없는 데이터셋을 생성합니다.
    pub fn new(label: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            data,
            style: DatasetStyle::default(),
        }
    }

    /// Decimal 값에서 데이터셋을 생성합니다.
    pub fn from_decimals<'a>(label: impl Into<String>, values: impl IntoIterator<Item = &'a Decimal>) -> Self {
        Self::new(label, values.into_iter().map(|v| v.to_chart_value()).collect())
    }

    /// 개수 값에서 데이터셋을 생성합니다.
    pub fn from_counts(label: impl Into<String>, counts: &[CategoryCount]) -> Self {
        Self::new(label, counts.iter().map(|c| c.count as f64).collect())
    }

    pub fn border(mut self, color: impl Into<ColorSpec>) -> Self {
        self.style.border_color = Some(color.into());
        self
    }

    pub fn background(mut self, color: impl Into<ColorSpec>) -> Self {
        self.style.background_color = Some(color.into());
        self
    }

    pub fn border_width(mut self, width: u32) -> Self {
        self.style.border_width = Some(width);
        self
    }

    pub fn filled(mut self) -> Self {
        self.style.fill = true;
        self
    }
}

/// 렌더링용 차트 데이터.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// X축(또는 범주) 레이블
    pub labels: Vec<String>,

    /// 데이터셋 목록
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// 데이터셋 없이 레이블만으로 생성합니다.
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            datasets: Vec::new(),
        }
    }

    /// 데이터셋을 추가합니다.
    ///
    /// # Errors
    ///
    /// 데이터 길이가 레이블 수와 다르면 `JournalError::InvalidInput`을 반환합니다.
    pub fn add_dataset(&mut self, dataset: Dataset) -> JournalResult<()> {
        if dataset.data.len() != self.labels.len() {
            return Err(JournalError::InvalidInput(format!(
                "데이터셋 '{}'의 길이({})가 레이블 수({})와 다릅니다",
                dataset.label,
                dataset.data.len(),
                self.labels.len()
            )));
        }
        self.datasets.push(dataset);
        Ok(())
    }

    /// 데이터셋을 추가한 자신을 반환합니다.
    pub fn with_dataset(mut self, dataset: Dataset) -> JournalResult<Self> {
        self.add_dataset(dataset)?;
        Ok(self)
    }

    /// 모든 데이터셋 길이가 레이블 수와 같은지 확인합니다.
    pub fn is_consistent(&self) -> bool {
        self.datasets.iter().all(|d| d.data.len() == self.labels.len())
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// 축 레이블 포맷.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelFormat {
    /// 버킷 키 그대로 (`2024-01-05`, `2024-01`)
    Raw,
    /// 짧은 축 레이블 (`Jan 05`, `Wk Jan 05`, `Jan 2024`)
    #[default]
    Short,
}

/// 버킷 키를 축 레이블로 변환합니다.
///
/// 키를 해석할 수 없으면 원래 키를 그대로 반환합니다.
pub fn format_bucket_label(key: &str, timeframe: Timeframe, format: LabelFormat) -> String {
    short_label(key, timeframe, format, false)
}

/// 버킷 키 목록을 축 레이블로 변환합니다.
///
/// 키가 두 해 이상에 걸치면 일간/주간 레이블에도 연도를 붙입니다 (`Jan 05 2024`).
pub fn format_bucket_labels<S: AsRef<str>>(keys: &[S], timeframe: Timeframe, format: LabelFormat) -> Vec<String> {
    let mut years = keys
        .iter()
        .filter_map(|key| timeframe.parse_bucket_key(key.as_ref()))
        .map(|date| date.year());
    let with_year = match years.next() {
        Some(first) => years.any(|year| year != first),
        None => false,
    };

    keys.iter()
        .map(|key| short_label(key.as_ref(), timeframe, format, with_year))
        .collect()
}

fn short_label(key: &str, timeframe: Timeframe, format: LabelFormat, with_year: bool) -> String {
    if format == LabelFormat::Raw {
        return key.to_string();
    }

    match timeframe.parse_bucket_key(key) {
        Some(date) => match (timeframe, with_year) {
            (Timeframe::Daily, false) => date.format("%b %d").to_string(),
            (Timeframe::Daily, true) => date.format("%b %d %Y").to_string(),
            (Timeframe::Weekly, false) => date.format("Wk %b %d").to_string(),
            (Timeframe::Weekly, true) => date.format("Wk %b %d %Y").to_string(),
            (Timeframe::Monthly, _) => date.format("%b %Y").to_string(),
        },
        None => key.to_string(),
    }
}

/// 차트 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Equity,
    Pnl,
    Monthly,
    Volume,
    Count,
    Symbols,
    Types,
    WinLoss,
    Leverage,
    RiskReward,
}

impl ChartKind {
    /// 모든 차트 종류.
    pub fn all() -> &'static [ChartKind] {
        &[
            ChartKind::Equity,
            ChartKind::Pnl,
            ChartKind::Monthly,
            ChartKind::Volume,
            ChartKind::Count,
            ChartKind::Symbols,
            ChartKind::Types,
            ChartKind::WinLoss,
            ChartKind::Leverage,
            ChartKind::RiskReward,
        ]
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChartKind::Equity => "equity",
            ChartKind::Pnl => "pnl",
            ChartKind::Monthly => "monthly",
            ChartKind::Volume => "volume",
            ChartKind::Count => "count",
            ChartKind::Symbols => "symbols",
            ChartKind::Types => "types",
            ChartKind::WinLoss => "winloss",
            ChartKind::Leverage => "leverage",
            ChartKind::RiskReward => "risk-reward",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equity" => Ok(ChartKind::Equity),
            "pnl" | "cumulative" => Ok(ChartKind::Pnl),
            "monthly" => Ok(ChartKind::Monthly),
            "volume" => Ok(ChartKind::Volume),
            "count" => Ok(ChartKind::Count),
            "symbols" => Ok(ChartKind::Symbols),
            "types" => Ok(ChartKind::Types),
            "winloss" | "win-loss" => Ok(ChartKind::WinLoss),
            "leverage" => Ok(ChartKind::Leverage),
            "risk-reward" | "riskreward" | "rr" => Ok(ChartKind::RiskReward),
            _ => Err(format!("알 수 없는 차트 종류: {}", s)),
        }
    }
}

/// 거래 목록에서 차트 데이터를 만드는 팩토리.
///
/// 시작 잔고, 상위 심볼 수, 분포 임계값은 [`AnalyticsConfig`]에서 가져옵니다.
#[derive(Debug, Clone, Default)]
pub struct ChartFactory {
    config: AnalyticsConfig,
    label_format: LabelFormat,
}

impl ChartFactory {
    /// 설정으로 팩토리를 생성합니다.
    pub fn new(config: AnalyticsConfig) -> Self {
        Self {
            config,
            label_format: LabelFormat::default(),
        }
    }

    /// 축 레이블 포맷을 지정합니다.
    pub fn with_label_format(mut self, format: LabelFormat) -> Self {
        self.label_format = format;
        self
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// 종류별 차트를 생성합니다.
    ///
    /// `timeframe`은 시계열 차트(자산 곡선, 누적 손익)에만 적용됩니다.
    pub fn build(&self, kind: ChartKind, trades: &[Trade], timeframe: Timeframe) -> JournalResult<ChartData> {
        debug!(%kind, %timeframe, trades = trades.len(), "차트 생성");

        match kind {
            ChartKind::Equity => self.equity_curve(trades, timeframe),
            ChartKind::Pnl => self.cumulative_pnl(trades, timeframe),
            ChartKind::Monthly => self.monthly_pnl(trades),
            ChartKind::Volume => self.volume_by_symbol(trades),
            ChartKind::Count => self.trade_count(trades),
            ChartKind::Symbols => self.symbol_distribution(trades),
            ChartKind::Types => self.trade_types(trades),
            ChartKind::WinLoss => self.win_loss(trades),
            ChartKind::Leverage => self.leverage(trades),
            ChartKind::RiskReward => self.risk_reward(trades),
        }
    }

    fn bucket_labels<'a>(&self, keys: impl IntoIterator<Item = &'a String>, timeframe: Timeframe) -> Vec<String> {
        let keys: Vec<&String> = keys.into_iter().collect();
        format_bucket_labels(&keys, timeframe, self.label_format)
    }

    /// 자산 곡선 차트 (자산 가치 + Drawdown).
    pub fn equity_curve(&self, trades: &[Trade], timeframe: Timeframe) -> JournalResult<ChartData> {
        let curve = EquityCurve::from_trades(trades, timeframe, self.config.initial_balance);
        let points = curve.points();

        ChartData::new(self.bucket_labels(points.iter().map(|p| &p.key), timeframe))
            .with_dataset(
                Dataset::from_decimals("Portfolio Value", points.iter().map(|p| &p.equity))
                    .border(palette::PRIMARY)
                    .background(with_alpha(palette::PRIMARY, "20").as_str())
                    .border_width(2)
                    .filled(),
            )?
            .with_dataset(
                Dataset::from_decimals("Drawdown", points.iter().map(|p| &p.drawdown))
                    .border(palette::LOSS)
                    .background(with_alpha(palette::LOSS, "20").as_str())
                    .border_width(1)
                    .filled(),
            )
    }

    /// 누적 손익 선 차트.
    ///
    /// 최종 누적 손익이 0 이상이면 수익 색상, 음수면 손실 색상을 사용합니다.
    pub fn cumulative_pnl(&self, trades: &[Trade], timeframe: Timeframe) -> JournalResult<ChartData> {
        let series = cumulative_pnl(trades, timeframe);
        let color = match series.last() {
            Some((_, total)) if total.is_sign_negative() && !total.is_zero() => palette::LOSS,
            _ => palette::PROFIT,
        };

        ChartData::new(self.bucket_labels(series.iter().map(|(k, _)| k), timeframe)).with_dataset(
            Dataset::from_decimals("Cumulative P&L", series.iter().map(|(_, v)| v))
                .border(color)
                .background(with_alpha(color, "20").as_str())
                .border_width(2)
                .filled(),
        )
    }

    /// 월별 손익 막대 차트 (막대별 부호 색상).
    pub fn monthly_pnl(&self, trades: &[Trade]) -> JournalResult<ChartData> {
        let series = monthly_pnl(trades);
        let colors: Vec<String> = series.iter().map(|p| sign_color(p.value).to_string()).collect();

        ChartData::new(self.bucket_labels(series.iter().map(|p| &p.label), Timeframe::Monthly)).with_dataset(
            Dataset::from_decimals("Monthly P&L", series.iter().map(|p| &p.value))
                .border(colors.clone())
                .background(colors)
                .border_width(1),
        )
    }

    /// 심볼별 거래 대금 막대 차트 (상위 `top_symbols`개).
    pub fn volume_by_symbol(&self, trades: &[Trade]) -> JournalResult<ChartData> {
        let series = volume_by_symbol(trades, self.config.top_symbols);
        let colors = cycle(&palette::VOLUME, series.len());

        series_chart(&series).with_dataset(
            Dataset::from_decimals("Trading Volume ($)", series.iter().map(|p| &p.value))
                .border(colors.clone())
                .background(colors)
                .border_width(1),
        )
    }

    /// 심볼별 거래 횟수 막대 차트 (상위 `top_symbols`개).
    pub fn trade_count(&self, trades: &[Trade]) -> JournalResult<ChartData> {
        let counts = trade_count_by_symbol(trades, self.config.top_symbols);

        count_chart(&counts).with_dataset(
            Dataset::from_counts("Number of Trades", &counts)
                .border(palette::PRIMARY)
                .background(with_alpha(palette::PRIMARY, "30").as_str())
                .border_width(1),
        )
    }

    /// 심볼별 거래 대금 분포 파이 차트.
    pub fn symbol_distribution(&self, trades: &[Trade]) -> JournalResult<ChartData> {
        let series = symbol_distribution(trades, self.config.min_distribution_pct);

        series_chart(&series).with_dataset(
            Dataset::from_decimals("Trading Volume by Symbol", series.iter().map(|p| &p.value))
                .background(color_palette(series.len()))
                .border(palette::BORDER)
                .border_width(2),
        )
    }

    /// 매수/매도 파이 차트.
    pub fn trade_types(&self, trades: &[Trade]) -> JournalResult<ChartData> {
        let counts = trade_type_distribution(trades);
        pie_chart("Trade Types", &counts, vec![palette::SUCCESS.to_string(), palette::LOSS.to_string()])
    }

    /// 수익/손실 파이 차트.
    pub fn win_loss(&self, trades: &[Trade]) -> JournalResult<ChartData> {
        let counts = win_loss_distribution(trades);
        pie_chart("Trade Outcomes", &counts, vec![palette::PROFIT.to_string(), palette::LOSS.to_string()])
    }

    /// 레버리지 구간 파이 차트.
    pub fn leverage(&self, trades: &[Trade]) -> JournalResult<ChartData> {
        let counts = leverage_distribution(trades);
        let colors = color_palette(counts.len());
        pie_chart("Leverage Distribution", &counts, colors)
    }

    /// 손익비 구간 막대 차트.
    ///
    /// 음수 구간은 손실, `-0.8 to 0.8`은 중립, 양수 구간은 수익 색상입니다.
    pub fn risk_reward(&self, trades: &[Trade]) -> JournalResult<ChartData> {
        let counts = risk_reward_distribution(trades);
        let colors: Vec<String> = (0..counts.len())
            .map(|idx| match idx {
                0..=3 => palette::LOSS,
                4 => palette::NEUTRAL,
                _ => palette::PROFIT,
            })
            .map(str::to_string)
            .collect();

        count_chart(&counts).with_dataset(
            Dataset::from_counts("Risk/Reward Ratio", &counts)
                .border(colors.clone())
                .background(colors)
                .border_width(1),
        )
    }

    /// 여러 거래 묶음의 자산 곡선 비교 차트.
    ///
    /// 시작 잔고는 `comparison_initial_balance`를 사용합니다.
    pub fn comparison(&self, sets: &[(&str, &[Trade])], timeframe: Timeframe) -> JournalResult<ChartData> {
        let comparison = compare_equity_curves(sets, timeframe, self.config.comparison_initial_balance);
        let colors = color_palette(comparison.series.len());

        let mut chart = ChartData::new(self.bucket_labels(&comparison.labels, timeframe));
        for (series, color) in comparison.series.iter().zip(colors) {
            chart.add_dataset(
                Dataset::from_decimals(series.label.clone(), &series.values)
                    .border(color.as_str())
                    .background(with_alpha(&color, "20").as_str())
                    .border_width(2),
            )?;
        }
        Ok(chart)
    }
}

fn sign_color(value: Decimal) -> &'static str {
    if value >= Decimal::ZERO {
        palette::PROFIT
    } else {
        palette::LOSS
    }
}

fn series_chart(series: &[SeriesPoint]) -> ChartData {
    ChartData::new(series.iter().map(|p| p.label.clone()).collect())
}

fn count_chart(counts: &[CategoryCount]) -> ChartData {
    ChartData::new(counts.iter().map(|c| c.label.clone()).collect())
}

fn pie_chart(label: &str, counts: &[CategoryCount], colors: Vec<String>) -> JournalResult<ChartData> {
    count_chart(counts).with_dataset(
        Dataset::from_counts(label, counts)
            .background(colors)
            .border(palette::BORDER)
            .border_width(2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use journal_core::TradeType;
    use rust_decimal_macros::dec;

    fn at(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0).unwrap()
    }

    fn closed(id: i64, symbol: &str, pnl: Decimal, closed_at: DateTime<Utc>) -> Trade {
        Trade::new(id, symbol, TradeType::Buy, dec!(100), dec!(1), closed_at - Duration::hours(3))
            .with_close(dec!(100) + pnl, closed_at)
    }

    fn create_test_trades() -> Vec<Trade> {
        vec![
            closed(1, "BTCUSDT", dec!(10), at(1, 5)),
            closed(2, "ETHUSDT", dec!(-5), at(1, 20)),
            closed(3, "BTCUSDT", dec!(-8), at(2, 3)),
            closed(4, "AAPL", dec!(4), at(3, 1)).with_leverage(dec!(3)),
            Trade::new(5, "BTCUSDT", TradeType::Sell, dec!(100), dec!(2), at(3, 2)),
        ]
    }

    #[test]
    fn test_color_palette_cycles() {
        let colors = color_palette(11);
        assert_eq!(colors.len(), 11);
        assert_eq!(colors[0], palette::PRIMARY);
        assert_eq!(colors[8], palette::NEUTRAL);
        assert_eq!(colors[9], palette::PRIMARY);
        assert!(color_palette(0).is_empty());
        assert_eq!(with_alpha(palette::PRIMARY, "20"), "#3b82f620");
    }

    #[test]
    fn test_add_dataset_rejects_length_mismatch() {
        let mut chart = ChartData::new(vec!["a".into(), "b".into()]);
        assert!(chart.add_dataset(Dataset::new("ok", vec![1.0, 2.0])).is_ok());

        let err = chart.add_dataset(Dataset::new("bad", vec![1.0])).unwrap_err();
        assert!(matches!(err, JournalError::InvalidInput(_)));
        assert_eq!(chart.datasets.len(), 1);
        assert!(chart.is_consistent());
    }

    #[test]
    fn test_format_bucket_label() {
        assert_eq!(format_bucket_label("2024-01-05", Timeframe::Daily, LabelFormat::Short), "Jan 05");
        assert_eq!(format_bucket_label("2024-01-07", Timeframe::Weekly, LabelFormat::Short), "Wk Jan 07");
        assert_eq!(format_bucket_label("2024-03", Timeframe::Monthly, LabelFormat::Short), "Mar 2024");
        assert_eq!(format_bucket_label("2024-03", Timeframe::Monthly, LabelFormat::Raw), "2024-03");
        assert_eq!(format_bucket_label("garbage", Timeframe::Daily, LabelFormat::Short), "garbage");
    }

    #[test]
    fn test_bucket_labels_add_year_across_years() {
        let keys = ["2024-01-05", "2025-01-05"];
        assert_eq!(
            format_bucket_labels(&keys, Timeframe::Daily, LabelFormat::Short),
            vec!["Jan 05 2024", "Jan 05 2025"]
        );

        let weeks = ["2023-12-31", "2024-01-07"];
        assert_eq!(
            format_bucket_labels(&weeks, Timeframe::Weekly, LabelFormat::Short),
            vec!["Wk Dec 31 2023", "Wk Jan 07 2024"]
        );

        let same_year = ["2024-01-05", "2024-02-05"];
        assert_eq!(
            format_bucket_labels(&same_year, Timeframe::Daily, LabelFormat::Short),
            vec!["Jan 05", "Feb 05"]
        );
        assert_eq!(format_bucket_labels(&keys, Timeframe::Daily, LabelFormat::Raw), vec!["2024-01-05", "2025-01-05"]);
    }

    #[test]
    fn test_multi_year_chart_labels_are_unique() {
        let trades = vec![
            closed(1, "X", dec!(5), at(1, 5)),
            closed(2, "X", dec!(5), Utc.with_ymd_and_hms(2025, 1, 5, 12, 0, 0).unwrap()),
        ];
        let chart = ChartFactory::default().cumulative_pnl(&trades, Timeframe::Daily).unwrap();
        assert_eq!(chart.labels, vec!["Jan 05 2024", "Jan 05 2025"]);
    }

    #[test]
    fn test_chart_kind_parse_and_display() {
        for kind in ChartKind::all() {
            assert_eq!(kind.to_string().parse::<ChartKind>().unwrap(), *kind);
        }
        assert_eq!("RR".parse::<ChartKind>().unwrap(), ChartKind::RiskReward);
        assert!("heatmap".parse::<ChartKind>().is_err());
    }

    #[test]
    fn test_equity_curve_chart() {
        let factory = ChartFactory::new(AnalyticsConfig {
            initial_balance: dec!(1000),
            ..AnalyticsConfig::default()
        })
        .with_label_format(LabelFormat::Raw);

        let chart = factory.equity_curve(&create_test_trades(), Timeframe::Monthly).unwrap();
        assert_eq!(chart.labels, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(chart.datasets.len(), 2);
        assert_eq!(chart.datasets[0].label, "Portfolio Value");
        // AAPL 거래는 3배 레버리지 → +12
        assert_eq!(chart.datasets[0].data, vec![1005.0, 997.0, 1009.0]);
        assert_eq!(chart.datasets[1].label, "Drawdown");
        assert_eq!(chart.datasets[1].data, vec![0.0, -8.0, 0.0]);
        assert!(chart.datasets[0].style.fill);
    }

    #[test]
    fn test_monthly_pnl_colors_by_sign() {
        let chart = ChartFactory::default().monthly_pnl(&create_test_trades()).unwrap();
        assert_eq!(chart.labels, vec!["Jan 2024", "Feb 2024", "Mar 2024"]);
        assert_eq!(chart.datasets[0].data, vec![5.0, -8.0, 12.0]);
        assert_eq!(
            chart.datasets[0].style.background_color,
            Some(ColorSpec::PerPoint(vec![
                palette::PROFIT.to_string(),
                palette::LOSS.to_string(),
                palette::PROFIT.to_string(),
            ]))
        );
    }

    #[test]
    fn test_cumulative_pnl_color_follows_final_value() {
        let trades = vec![closed(1, "X", dec!(5), at(1, 1)), closed(2, "X", dec!(-9), at(1, 2))];
        let chart = ChartFactory::default().cumulative_pnl(&trades, Timeframe::Daily).unwrap();
        assert_eq!(chart.datasets[0].data, vec![5.0, -4.0]);
        assert_eq!(chart.datasets[0].style.border_color, Some(ColorSpec::from(palette::LOSS)));
    }

    #[test]
    fn test_category_charts() {
        let trades = create_test_trades();
        let factory = ChartFactory::default();

        let types = factory.trade_types(&trades).unwrap();
        assert_eq!(types.labels, vec!["Buy", "Sell"]);
        assert_eq!(types.datasets[0].data, vec![4.0, 1.0]);
        assert_eq!(
            types.datasets[0].style.background_color,
            Some(ColorSpec::PerPoint(vec![palette::SUCCESS.to_string(), palette::LOSS.to_string()]))
        );

        let outcomes = factory.win_loss(&trades).unwrap();
        assert_eq!(outcomes.labels, vec!["Winning Trades", "Losing Trades"]);
        assert_eq!(outcomes.datasets[0].data, vec![2.0, 2.0]);

        let leverage = factory.leverage(&trades).unwrap();
        assert_eq!(leverage.labels, vec!["3x-5x"]);

        let rr = factory.risk_reward(&trades).unwrap();
        assert_eq!(rr.labels.len(), 9);
        assert!(rr.datasets[0].data.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_symbol_charts() {
        let trades = create_test_trades();
        let factory = ChartFactory::default();

        // 대금: BTCUSDT 100+100+200=400, ETHUSDT 100, AAPL 100
        let volume = factory.volume_by_symbol(&trades).unwrap();
        assert_eq!(volume.labels, vec!["BTCUSDT", "AAPL", "ETHUSDT"]);
        assert_eq!(volume.datasets[0].data, vec![400.0, 100.0, 100.0]);

        let count = factory.trade_count(&trades).unwrap();
        assert_eq!(count.labels[0], "BTCUSDT");
        assert_eq!(count.datasets[0].data[0], 3.0);

        let dist = factory.symbol_distribution(&trades).unwrap();
        assert_eq!(dist.labels.len(), 3);
        assert_eq!(dist.datasets[0].style.border_color, Some(ColorSpec::from(palette::BORDER)));
    }

    #[test]
    fn test_comparison_chart() {
        let a = vec![closed(1, "X", dec!(10), at(1, 1)), closed(2, "X", dec!(10), at(1, 3))];
        let b = vec![closed(3, "Y", dec!(-5), at(1, 2))];

        let chart = ChartFactory::default()
            .with_label_format(LabelFormat::Raw)
            .comparison(&[("A", a.as_slice()), ("B", b.as_slice())], Timeframe::Daily)
            .unwrap();

        assert_eq!(chart.labels, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(chart.datasets[0].data, vec![10010.0, 10010.0, 10020.0]);
        assert_eq!(chart.datasets[1].data, vec![10000.0, 9995.0, 9995.0]);
        assert_eq!(chart.datasets[1].style.border_color, Some(ColorSpec::from(palette::SECONDARY)));
    }

    #[test]
    fn test_every_kind_is_consistent_on_empty_input() {
        let factory = ChartFactory::default();
        for kind in ChartKind::all() {
            let chart = factory.build(*kind, &[], Timeframe::Weekly).unwrap();
            assert!(chart.is_consistent(), "{kind}");
        }
    }

    #[test]
    fn test_dataset_serializes_camel_case_style() {
        let ds = Dataset::new("x", vec![1.0]).border(palette::PRIMARY);
        let json = serde_json::to_value(&ds).unwrap();
        assert_eq!(json["borderColor"], "#3b82f6");
        assert!(json.get("backgroundColor").is_none());
        assert_eq!(json["fill"], false);
    }
}
