use cse_rs::{
    announcements::{self, Kind},
    market::{self, Endpoint, IndexSnapshot, Mover},
};
use tracing::warn;

use crate::{Ctx, prompt};

pub(crate) async fn run(ctx: &Ctx) -> anyhow::Result<()> {
    println!();
    println!("CSE MARKET DASHBOARD");
    println!("====================");

    // each panel is optional; one failing endpoint should not hide the rest
    match market::status(&ctx.client).await {
        Ok(s) => println!("Market status: {}", s.status.as_deref().unwrap_or("n/a")),
        Err(e) => warn!(error = %e, "market status unavailable"),
    }
    match market::summary(&ctx.client).await {
        Ok(s) => {
            println!("Trade volume: {:.0}", s.trade_volume.unwrap_or_default());
            println!("Share volume: {:.0}", s.share_volume.unwrap_or_default());
        }
        Err(e) => warn!(error = %e, "market summary unavailable"),
    }
    index_line("ASPI", market::aspi(&ctx.client).await);
    index_line("S&P SL20", market::snp_sl20(&ctx.client).await);

    movers("Top gainers", market::top_gainers(&ctx.client).await);
    movers("Top losers", market::top_losers(&ctx.client).await);

    println!();
    match prompt::choose(
        "More",
        &[
            "Show raw market endpoint",
            "Show an announcement list",
            "Back",
        ],
    )? {
        0 => raw_endpoint(ctx).await,
        1 => announcement_list(ctx).await,
        _ => Ok(()),
    }
}

async fn raw_endpoint(ctx: &Ctx) -> anyhow::Result<()> {
    let names = [
        "tradeSummary",
        "todaySharePrice",
        "mostActiveTrades",
        "detailedTrades",
        "dailyMarketSummery",
        "chartData",
        "allSectors",
    ];
    let endpoint = match prompt::choose("Endpoint", &names)? {
        0 => Endpoint::TradeSummary,
        1 => Endpoint::TodaySharePrice,
        2 => Endpoint::MostActiveTrades,
        3 => {
            let symbol = prompt::text("Symbol (empty for every trade)")?;
            Endpoint::DetailedTrades((!symbol.is_empty()).then_some(symbol))
        }
        4 => Endpoint::DailyMarketSummary,
        5 => Endpoint::ChartData(prompt::text("Symbol")?),
        _ => Endpoint::AllSectors,
    };
    let value = market::fetch(&ctx.client, &endpoint).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

async fn announcement_list(ctx: &Ctx) -> anyhow::Result<()> {
    let names = Kind::ALL.map(Kind::endpoint);
    let kind = Kind::ALL[prompt::choose("Announcements", &names)?];
    let value = announcements::list(&ctx.client, kind).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn index_line(name: &str, snapshot: Result<IndexSnapshot, cse_rs::CseError>) {
    match snapshot {
        Ok(i) => println!(
            "{name}: {} ({})",
            i.value.map_or_else(|| "n/a".into(), |v| format!("{v:.2}")),
            i.change.map_or_else(|| "n/a".into(), |c| format!("{c:+.2}"))
        ),
        Err(e) => warn!(index = name, error = %e, "index unavailable"),
    }
}

fn movers(title: &str, rows: Result<Vec<Mover>, cse_rs::CseError>) {
    println!();
    println!("{title}:");
    match rows {
        Ok(rows) => {
            for (i, m) in rows.iter().take(3).enumerate() {
                println!(
                    "  {}. {}: {}%",
                    i + 1,
                    m.symbol.as_deref().unwrap_or("n/a"),
                    m.change_percentage
                        .map_or_else(|| "n/a".into(), |c| format!("{c:+.2}"))
                );
            }
        }
        Err(e) => warn!(list = title, error = %e, "movers unavailable"),
    }
}
