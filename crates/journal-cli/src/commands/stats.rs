//! 거래 통계 출력.

use anyhow::Result;
use journal_analytics::TradeStatistics;
use journal_core::{format_currency, Pnl, Trade};

use super::to_json;

/// 통계를 계산해 텍스트 표 또는 JSON으로 반환합니다.
pub fn run_stats(trades: &[Trade], json: bool) -> Result<String> {
    let stats = TradeStatistics::from_trades(trades);

    if json {
        return to_json(&stats);
    }
    Ok(format_stats(&stats))
}

fn money(value: Option<Pnl>) -> String {
    value
        .map(|v| format_currency(v, 2))
        .unwrap_or_else(|| "-".to_string())
}

/// 통계 표 형식 출력.
fn format_stats(stats: &TradeStatistics) -> String {
    let rows: Vec<(&str, String)> = vec![
        ("Total Trades", stats.total_trades.to_string()),
        ("Closed / Open", format!("{} / {}", stats.closed_trades, stats.open_trades)),
        ("Winning / Losing", format!("{} / {}", stats.winning_trades, stats.losing_trades)),
        ("Win Rate", format!("{:.2}%", stats.win_rate.round_dp(2))),
        ("Total P&L", format_currency(stats.total_pnl, 2)),
        ("Gross Profit", format_currency(stats.gross_profit, 2)),
        ("Gross Loss", format_currency(stats.gross_loss, 2)),
        ("Profit Factor", stats.profit_factor.to_string()),
        ("Expectancy", format_currency(stats.expectancy, 2)),
        ("Average Win", format_currency(stats.average_win, 2)),
        ("Average Loss", format_currency(stats.average_loss, 2)),
        ("Best Trade", money(stats.best_trade)),
        ("Worst Trade", money(stats.worst_trade)),
        ("Max Win Streak", stats.max_win_streak.to_string()),
        ("Max Loss Streak", stats.max_loss_streak.to_string()),
        (
            "Max Drawdown",
            format!(
                "{} ({:.2}%)",
                format_currency(stats.max_drawdown.absolute, 2),
                stats.max_drawdown.percentage.round_dp(2)
            ),
        ),
        ("Avg Trade Duration", stats.average_trade_duration.clone()),
        (
            "Avg Risk/Reward",
            stats
                .average_risk_reward
                .map(|r| format!("{:.2}", r.round_dp(2)))
                .unwrap_or_else(|| "-".to_string()),
        ),
    ];

    let mut output = String::new();
    output.push_str(&format!("{:<22} {}\n", "METRIC", "VALUE"));
    output.push_str(&"-".repeat(40));
    output.push('\n');
    for (name, value) in rows {
        output.push_str(&format!("{:<22} {}\n", name, value));
    }
    output
}
