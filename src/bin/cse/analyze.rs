use cse_rs::{
    AnalysisReport, DerivedMetricRecord, InvestmentStyle, Universe, UniverseStatus, analysis,
    export::{self, AnalysisRun},
    info,
};

use crate::{Ctx, progress::Bar, prompt, roster::print_outcome};

pub(crate) async fn run(ctx: &Ctx) -> anyhow::Result<()> {
    let universe = Universe::load(&ctx.settings.data_file);
    match universe.status() {
        UniverseStatus::Loaded if !universe.is_empty() => {}
        UniverseStatus::Missing => {
            println!(
                "No company roster at {}. Refresh the roster first.",
                ctx.settings.data_file.display()
            );
            return Ok(());
        }
        UniverseStatus::Malformed(why) => {
            println!("The company roster could not be read: {why}");
            return Ok(());
        }
        UniverseStatus::Loaded => {
            println!("The company roster is empty.");
            return Ok(());
        }
    }
    println!("{} companies in the roster.", universe.len());

    let choice = prompt::choose(
        "Analysis",
        &[
            "Quick: first 20 companies",
            "Sample: first 100 companies",
            "Full: every company (slow)",
            "Custom count and delay",
            "Recommendations for one investment style",
            "Back",
        ],
    )?;

    let delay = ctx.settings.delay;
    let (limit, delay, style) = match choice {
        0 => (Some(20), delay, None),
        1 => (Some(100), delay, None),
        2 => {
            println!("This fetches every company in the roster and can take over an hour.");
            if !prompt::confirm("Continue?", false)? {
                return Ok(());
            }
            (None, delay, None)
        }
        3 => {
            let limit = prompt::count("How many companies? (number or `all`)")?;
            let delay = prompt::millis("Delay between requests in ms", delay)?;
            (limit, delay, None)
        }
        4 => {
            let styles = InvestmentStyle::ALL.map(InvestmentStyle::as_str);
            let idx = prompt::choose("Investment style", &styles)?;
            (Some(100), delay, Some(InvestmentStyle::ALL[idx]))
        }
        _ => return Ok(()),
    };

    let mut companies = universe.into_records();
    if let Some(n) = limit {
        companies.truncate(n);
    }

    let mut bar = Bar::new("companies");
    let outcome = info::fetch_snapshots_observed(&ctx.client, companies, delay, &mut bar).await;
    println!(
        "Fetched {} companies, {} failed.",
        outcome.records.len(),
        outcome.failures.len()
    );
    if outcome.records.is_empty() {
        if !outcome.failures.is_empty()
            && prompt::confirm("No company could be fetched. Save the failed requests?", true)?
        {
            let prefix = export::timestamped_prefix("investment_analysis");
            print_outcome(&export::write_failures(
                &ctx.settings.output_dir,
                &prefix,
                &outcome.failures,
            ));
        }
        return Ok(());
    }

    let records = analysis::derive_all(&outcome.records);
    let report = analysis::aggregate(&records);

    if let Some(style) = style {
        print_recommendations(style, &analysis::recommend(&records, style));
    }
    print_summary(&report);

    if prompt::confirm("Save the analysis to files?", true)? {
        let prefix = export::timestamped_prefix("investment_analysis");
        let run = AnalysisRun {
            snapshots: &outcome.records,
            records: &records,
            report: &report,
            failures: &outcome.failures,
        };
        for artifact in export::write_analysis(&ctx.settings.output_dir, &prefix, run) {
            print_outcome(&artifact);
        }
    }
    Ok(())
}

fn opt(v: Option<f64>, decimals: usize) -> String {
    v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.decimals$}"))
}

fn print_summary(report: &AnalysisReport) {
    let s = &report.summary;
    println!();
    println!("INVESTMENT ANALYSIS SUMMARY");
    println!("===========================");
    println!(
        "Companies analysed: {} ({} active, {} inactive)",
        s.total_companies, s.active_companies, s.inactive_companies
    );
    if s.active_companies == 0 {
        println!("No active companies, nothing else to report.");
        return;
    }

    if let Some(m) = &report.market_overview {
        println!("Total market cap: LKR {:.0}", m.total_market_cap);
        println!("Average price: LKR {}", opt(m.prices.map(|p| p.mean), 2));
        let d = m.cap_distribution;
        println!(
            "Cap buckets: {} large, {} mid, {} small",
            d.large_cap, d.mid_cap, d.small_cap
        );
    }

    if let Some(r) = &report.risk {
        let d = r.distribution;
        println!("Risk distribution:");
        println!("  High Risk (beta > 1.5):            {}", d.high_risk);
        println!("  Medium Risk (1.0 < beta <= 1.5):   {}", d.medium_risk);
        println!("  Low Risk (0.5 < beta <= 1.0):      {}", d.low_risk);
        println!("  Very Low Risk (beta <= 0.5):       {}", d.very_low_risk);
    }

    if let Some(p) = &report.performance {
        println!(
            "Today: {} gainers, {} losers, {} unchanged, average change {}%",
            p.gainers,
            p.losers,
            p.unchanged,
            opt(p.average_change, 2)
        );
    }

    if let Some(l) = &report.liquidity {
        println!(
            "Volume: {:.0} shares traded, turnover LKR {:.0}",
            l.total_volume, l.total_turnover
        );
    }

    let o = &report.opportunities;
    print_list("Value opportunities (near YTD low)", &o.value, |r| {
        format!("YTD position {}%", opt(r.position_in_ytd_range_pct, 1))
    });
    print_list("Growth opportunities", &o.growth, |r| {
        format!("change {}%", opt(r.change_pct, 2))
    });
    print_list("Stable opportunities", &o.stable, |r| {
        format!("beta {}", opt(r.beta, 3))
    });
}

fn print_list(
    title: &str,
    rows: &[DerivedMetricRecord],
    detail: impl Fn(&DerivedMetricRecord) -> String,
) {
    if rows.is_empty() {
        return;
    }
    println!("{title}:");
    for (i, r) in rows.iter().enumerate().take(5) {
        println!(
            "  {}. {} {} (LKR {}, {})",
            i + 1,
            r.symbol,
            r.name.as_deref().unwrap_or(""),
            opt(r.last_price, 2),
            detail(r)
        );
    }
}

fn print_recommendations(style: InvestmentStyle, picks: &[DerivedMetricRecord]) {
    println!();
    println!("{style} recommendations:");
    if picks.is_empty() {
        println!("  none in this sample");
    }
    for (i, r) in picks.iter().enumerate() {
        println!(
            "  {}. {} - {} | LKR {} | beta {} | {}",
            i + 1,
            r.symbol,
            r.name.as_deref().unwrap_or(""),
            opt(r.last_price, 2),
            opt(r.beta, 3),
            r.risk_category.map_or("no beta", |c| c.label())
        );
    }
}
