use chrono::{Days, Local};
use cse_rs::{
    Universe, UniverseStatus, analysis,
    announcements::ApprovedAnnouncement,
    dividends::{self, CalendarEvent, CategoryCache, DividendLine, DividendProfile, DividendTrends},
    export::{self, DividendScreen, DividendTracking},
    info,
};
use tracing::warn;

use crate::{Ctx, progress::Bar, prompt, roster::print_outcome};

const DEFAULT_WINDOW_DAYS: u64 = 120;
const DEFAULT_DETAILS: usize = 15;

pub(crate) async fn run(ctx: &Ctx) -> anyhow::Result<()> {
    match prompt::choose(
        "Dividends",
        &[
            "Track dividend announcements",
            "Screen companies for dividends",
            "Refresh announcement categories",
            "Back",
        ],
    )? {
        0 => track(ctx).await,
        1 => screen(ctx).await,
        2 => refresh(ctx).await,
        _ => Ok(()),
    }
}

/// The cached categories, fetched and saved first when the cache is unusable.
async fn categories(ctx: &Ctx) -> anyhow::Result<CategoryCache> {
    let path = &ctx.settings.categories_file;
    match CategoryCache::load(path) {
        Ok(cache) if !cache.categories.is_empty() => Ok(cache),
        Ok(_) => {
            println!("The category cache is empty, fetching categories.");
            Ok(dividends::refresh_categories(&ctx.client, path).await?)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "category cache unavailable");
            println!("No usable category cache, fetching categories.");
            Ok(dividends::refresh_categories(&ctx.client, path).await?)
        }
    }
}

async fn refresh(ctx: &Ctx) -> anyhow::Result<()> {
    let cache = dividends::refresh_categories(&ctx.client, &ctx.settings.categories_file).await?;
    let s = cache.summary();
    println!(
        "{} categories saved to {}.",
        s.total,
        ctx.settings.categories_file.display()
    );
    println!("  dividend:    {}", s.dividend);
    println!("  meeting:     {}", s.meeting);
    println!("  financial:   {}", s.financial);
    println!("  appointment: {}", s.appointment);
    for c in cache.dividend_categories() {
        println!("    - {}", c.category_name);
    }
    Ok(())
}

/// Dividend announcements from the last `days` days, or `None` when nothing was found.
async fn announcements(
    ctx: &Ctx,
    days: u64,
) -> anyhow::Result<Option<Vec<ApprovedAnnouncement>>> {
    let cache = categories(ctx).await?;
    let wanted = cache.dividend_categories();
    if wanted.is_empty() {
        println!("No dividend categories are published.");
        return Ok(None);
    }

    let to = Local::now().date_naive();
    let from = to - Days::new(days);
    let mut bar = Bar::new("categories");
    let found =
        dividends::collect_observed(&ctx.client, wanted, from, to, ctx.settings.delay, &mut bar)
            .await?;
    println!(
        "{} dividend announcements between {from} and {to}.",
        found.records.len()
    );
    Ok(Some(found.records))
}

async fn track(ctx: &Ctx) -> anyhow::Result<()> {
    let days = prompt::count(&format!("Days to look back (empty for {DEFAULT_WINDOW_DAYS})"))?
        .map_or(DEFAULT_WINDOW_DAYS, |d| d as u64);
    let Some(found) = announcements(ctx, days).await? else {
        return Ok(());
    };
    if found.is_empty() {
        return Ok(());
    }

    let max = prompt::count(&format!("Announcements to detail (empty for {DEFAULT_DETAILS})"))?
        .unwrap_or(DEFAULT_DETAILS);
    let mut bar = Bar::new("details");
    let details =
        dividends::fetch_details_observed(&ctx.client, &found, max, ctx.settings.delay, &mut bar)
            .await;
    if details.records.is_empty() {
        println!("No announcement details could be fetched.");
        return Ok(());
    }

    let calendar = dividends::calendar(&details.records);
    let trends = dividends::trends(&details.records, Local::now().date_naive());
    print_trends(&trends);
    print_calendar(&calendar);

    if prompt::confirm("Save the dividend report?", true)? {
        let prefix = export::timestamped_prefix("dividend_tracking_report");
        let run = DividendTracking {
            details: &details.records,
            calendar: &calendar,
            trends: &trends,
            period_days: u32::try_from(days).unwrap_or(u32::MAX),
        };
        for artifact in export::write_dividend_tracking(&ctx.settings.reports_dir, &prefix, run) {
            print_outcome(&artifact);
        }
    }
    Ok(())
}

async fn screen(ctx: &Ctx) -> anyhow::Result<()> {
    let universe = Universe::load(&ctx.settings.data_file);
    if universe.status() != &UniverseStatus::Loaded || universe.is_empty() {
        println!(
            "No usable company roster at {}. Refresh the roster first.",
            ctx.settings.data_file.display()
        );
        return Ok(());
    }

    let Some(found) = announcements(ctx, 90).await? else {
        return Ok(());
    };

    let limit = prompt::count("How many companies? (number, or empty for all)")?;
    let mut companies = universe.into_records();
    if let Some(n) = limit {
        companies.truncate(n);
    }

    let mut bar = Bar::new("companies");
    let outcome =
        info::fetch_snapshots_observed(&ctx.client, companies, ctx.settings.delay, &mut bar).await;
    if outcome.records.is_empty() {
        println!("No company could be fetched.");
        return Ok(());
    }

    let records = analysis::derive_all(&outcome.records);
    let profiles = dividends::profile(&records, &found);
    let report = dividends::report(&profiles);

    let s = report.summary;
    println!();
    println!("DIVIDEND SCREEN");
    println!("===============");
    println!(
        "{} companies, {} with recent dividends ({:.1}%)",
        s.total_companies, s.companies_with_dividends, s.dividend_percentage
    );
    let picks = &report.investment_recommendations;
    print_profiles("Dividend aristocrats", &picks.dividend_aristocrats);
    print_profiles("Value dividend plays", &picks.value_dividend_plays);
    print_profiles("Growth with dividends", &picks.growth_with_dividends);

    if prompt::confirm("Save the dividend screen?", true)? {
        let prefix = export::timestamped_prefix("enhanced_investment_analysis");
        let screen = DividendScreen {
            profiles: &profiles,
            report: &report,
            announcements_analyzed: found.len(),
        };
        for artifact in export::write_dividend_screen(&ctx.settings.output_dir, &prefix, screen) {
            print_outcome(&artifact);
        }
    }
    Ok(())
}

fn amount(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

fn print_trends(trends: &DividendTrends) {
    let st = &trends.dividend_statistics;
    println!();
    println!("DIVIDEND TRENDS");
    println!("===============");
    println!(
        "{} announcements detailed, {} with a positive amount",
        st.total_dividends_analyzed, st.paying
    );
    if let Some(d) = st.amounts {
        println!(
            "Per share: mean LKR {:.2}, median LKR {:.2}, range LKR {:.2} - {:.2}",
            d.mean, d.median, d.min, d.max
        );
    }
    print_lines("Top dividend payers", &trends.top_dividend_payers);
    print_lines("Upcoming payments", &trends.upcoming_payments);
}

fn print_lines(title: &str, rows: &[DividendLine]) {
    if rows.is_empty() {
        return;
    }
    println!("{title}:");
    for (i, l) in rows.iter().enumerate().take(5) {
        println!(
            "  {}. {} ({}) LKR {} | XD {} | payment {}",
            i + 1,
            l.company_name.as_deref().unwrap_or("-"),
            l.symbol.as_deref().unwrap_or("-"),
            amount(l.dividend_per_share),
            l.ex_dividend_date.as_deref().unwrap_or("-"),
            l.payment_date.as_deref().unwrap_or("-")
        );
    }
}

fn print_calendar(events: &[CalendarEvent]) {
    if events.is_empty() {
        return;
    }
    println!("Calendar:");
    for e in events.iter().take(10) {
        println!(
            "  {} | {} | {} | {}",
            e.date,
            e.event_type,
            e.symbol.as_deref().unwrap_or("-"),
            e.details
        );
    }
}

fn print_profiles(title: &str, rows: &[DividendProfile]) {
    if rows.is_empty() {
        return;
    }
    println!("{title}:");
    for (i, p) in rows.iter().enumerate().take(3) {
        println!(
            "  {}. {} {} | LKR {} | {} | {} recent dividends",
            i + 1,
            p.company.symbol,
            p.company.name.as_deref().unwrap_or(""),
            amount(p.company.last_price),
            p.company.risk_category.map_or("no beta", |c| c.label()),
            p.recent_dividends
        );
    }
}
