//! 통계 → 집계 → 차트 투영 통합 테스트

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use journal_analytics::portfolio::{leverage_distribution, monthly_pnl, volume_by_symbol};
use journal_analytics::{
    compare_equity_curves, expectancy, gross_loss, gross_profit, max_drawdown, max_loss_streak,
    max_win_streak, profit_factor, trade_rows, win_rate, ChartFactory, ChartKind, Drawdown,
    EquityCurve, ProfitFactor, TradeStatistics,
};
use journal_core::{AnalyticsConfig, Timeframe, Trade, TradeType};

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
}

fn closed(id: i64, open: Decimal, close: Decimal, closed_day: i64) -> Trade {
    Trade::new(id, "BTCUSDT", TradeType::Buy, open, dec!(1), day(closed_day) - Duration::hours(6))
        .with_leverage(dec!(1))
        .with_close(close, day(closed_day))
}

#[test]
fn test_two_trade_scenario() {
    let trades = vec![closed(1, dec!(100), dec!(110), 1), closed(2, dec!(100), dec!(90), 2)];

    assert_eq!(win_rate(&trades), dec!(50));
    assert_eq!(gross_profit(&trades), dec!(10));
    assert_eq!(gross_loss(&trades), dec!(10));
    assert_eq!(profit_factor(&trades), ProfitFactor::Finite(dec!(1)));
    assert_eq!(expectancy(&trades), dec!(0));

    let stats = TradeStatistics::from_trades(&trades);
    assert_eq!(stats.win_rate, dec!(50));
    assert_eq!(stats.total_pnl, dec!(0));
    assert_eq!(stats.max_drawdown, max_drawdown(&trades));
}

#[test]
fn test_streaks_follow_close_order_not_input_order() {
    // 부호 순서 [+,+,-,+,+,+,-] (청산 시각 기준), 입력은 역순
    let signs = [1, 1, -1, 1, 1, 1, -1];
    let mut trades: Vec<Trade> = signs
        .iter()
        .enumerate()
        .map(|(i, sign)| {
            let close = dec!(100) + Decimal::from(*sign) * dec!(5);
            closed(i as i64 + 1, dec!(100), close, i as i64)
        })
        .collect();
    trades.reverse();

    assert_eq!(max_win_streak(&trades), 3);
    assert_eq!(max_loss_streak(&trades), 1);
}

#[test]
fn test_monotonic_equity_has_no_drawdown() {
    let trades: Vec<Trade> = (0..5).map(|i| closed(i + 1, dec!(100), dec!(101), i)).collect();
    assert_eq!(max_drawdown(&trades), Drawdown::default());

    let curve = EquityCurve::from_trades(&trades, Timeframe::Daily, dec!(1000));
    assert_eq!(curve.final_equity(), dec!(1005));
    assert!(curve.drawdown_values().iter().all(|d| d.is_zero()));
}

#[test]
fn test_comparison_forward_fills_missing_bucket() {
    let a = vec![closed(1, dec!(100), dec!(120), 0), closed(2, dec!(100), dec!(110), 2)];
    let b = vec![closed(3, dec!(100), dec!(95), 1)];

    let comparison = compare_equity_curves(&[("a", a.as_slice()), ("b", b.as_slice())], Timeframe::Daily, dec!(500));
    assert_eq!(comparison.labels.len(), 3);
    // 둘째 날 a는 거래가 없음 → 첫째 날 값 유지
    assert_eq!(comparison.series[0].values, vec![dec!(520), dec!(520), dec!(530)]);
    // 첫째 날 b는 아직 거래 없음 → 시작 잔고
    assert_eq!(comparison.series[1].values, vec![dec!(500), dec!(495), dec!(495)]);
}

#[test]
fn test_mixed_journal_projection() {
    let trades = vec![
        Trade::new(1, "BTCUSDT", TradeType::Buy, dec!(100), dec!(2), day(0))
            .with_leverage(dec!(10))
            .with_close(dec!(90), day(3)),
        Trade::new(2, "ETHUSDT", TradeType::Sell, dec!(50), dec!(4), day(10))
            .with_stop_loss(dec!(55))
            .with_close(dec!(40), day(40)),
        Trade::new(3, "SOLUSDT", TradeType::Buy, dec!(20), dec!(5), day(45)),
    ];

    let stats = TradeStatistics::from_trades(&trades);
    assert_eq!(stats.total_trades, 3);
    assert_eq!(stats.closed_trades, 2);
    assert_eq!(stats.open_trades, 1);
    // 강제 청산 -200, 숏 +40
    assert_eq!(stats.total_pnl, dec!(-160));
    assert_eq!(stats.average_risk_reward, Some(dec!(2)));

    let monthly = monthly_pnl(&trades);
    assert_eq!(monthly.len(), 2);
    assert_eq!(monthly[0].value, dec!(-200));
    assert_eq!(monthly[1].value, dec!(40));

    // BTCUSDT, ETHUSDT 모두 200 → 알파벳순
    let volume = volume_by_symbol(&trades, 10);
    assert_eq!(volume[0].label, "BTCUSDT");
    assert_eq!(volume[1].label, "ETHUSDT");
    assert_eq!(volume[2].value, dec!(100));

    let leverage = leverage_distribution(&trades);
    assert_eq!(leverage.len(), 1);
    assert_eq!(leverage[0].label, "6x-10x");

    let rows = trade_rows(&trades);
    assert_eq!(rows[0].pnl, "-$200.00");
    assert_eq!(rows[2].pnl, "-");

    let chart = ChartFactory::new(AnalyticsConfig::default())
        .build(ChartKind::Monthly, &trades, Timeframe::Daily)
        .unwrap();
    assert_eq!(chart.labels, vec!["Jan 2024", "Feb 2024"]);
    assert_eq!(chart.datasets[0].data, vec![-200.0, 40.0]);
}

fn arb_trade() -> impl Strategy<Value = Trade> {
    (
        1i64..1000,
        1i64..1000,
        1i64..20,
        prop::option::of(1i64..30),
        0i64..90,
        any::<bool>(),
        any::<bool>(),
        prop::option::of(1i64..1000),
        prop::sample::select(vec!["BTCUSDT", "ETHUSDT", "AAPL", "TSLA"]),
    )
        .prop_map(|(open, close, qty, lev, offset, is_buy, is_closed, sl, symbol)| {
            let side = if is_buy { TradeType::Buy } else { TradeType::Sell };
            let mut trade = Trade::new(0, symbol, side, Decimal::from(open), Decimal::from(qty), day(offset));
            if let Some(l) = lev {
                trade = trade.with_leverage(Decimal::from(l));
            }
            if let Some(sl) = sl {
                trade = trade.with_stop_loss(Decimal::from(sl));
            }
            if is_closed {
                trade = trade.with_close(Decimal::from(close), day(offset) + Duration::hours(offset + 1));
            }
            trade
        })
}

proptest! {
    #[test]
    fn prop_aggregates_are_deterministic(trades in prop::collection::vec(arb_trade(), 0..40)) {
        let first = TradeStatistics::from_trades(&trades);
        let second = TradeStatistics::from_trades(&trades);
        prop_assert_eq!(first, second);

        let factory = ChartFactory::default();
        for kind in ChartKind::all() {
            let a = factory.build(*kind, &trades, Timeframe::Weekly).unwrap();
            let b = factory.build(*kind, &trades, Timeframe::Weekly).unwrap();
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn prop_chart_labels_match_dataset_lengths(
        trades in prop::collection::vec(arb_trade(), 0..40),
        tf in prop::sample::select(vec![Timeframe::Daily, Timeframe::Weekly, Timeframe::Monthly]),
    ) {
        let factory = ChartFactory::default();
        for kind in ChartKind::all() {
            let chart = factory.build(*kind, &trades, tf).unwrap();
            for dataset in &chart.datasets {
                prop_assert_eq!(dataset.data.len(), chart.labels.len());
            }
        }

        let half = trades.len() / 2;
        let chart = factory
            .comparison(&[("a", &trades[..half]), ("b", &trades[half..])], tf)
            .unwrap();
        prop_assert!(chart.is_consistent());
    }

    #[test]
    fn prop_win_rate_is_a_percentage(trades in prop::collection::vec(arb_trade(), 0..40)) {
        let rate = win_rate(&trades);
        prop_assert!(rate >= Decimal::ZERO && rate <= dec!(100));
    }
}
