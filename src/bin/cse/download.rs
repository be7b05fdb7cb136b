use cse_rs::{
    Universe,
    announcements::{self, FinancialAnnouncement, FinancialQuery},
    reports::{self, ReportDownloader},
};

use crate::{Ctx, progress::Bar, prompt};

pub(crate) async fn run(ctx: &Ctx) -> anyhow::Result<()> {
    let choice = prompt::choose(
        "Financial reports",
        &[
            "Download ALL financial reports",
            "Download the first 10 reports (test)",
            "Download reports for specific symbols",
            "Download reports whose company name contains a keyword",
            "Download reports by date range (all companies)",
            "Download reports by date range and security id",
            "Download reports by company name/symbol and date range",
            "List available reports (no download)",
            "Back",
        ],
    )?;

    let (folder, selected) = match choice {
        0 => {
            println!("This downloads every listed report and may take a while.");
            if !prompt::confirm("Continue?", false)? {
                return Ok(());
            }
            ("all_reports".to_string(), recent(ctx).await?)
        }
        1 => ("all_reports".to_string(), reports::first(recent(ctx).await?, 10)),
        2 => {
            let symbols = prompt::list("Symbols, comma separated (e.g. LOLC,CSLK,TAP)")?;
            if symbols.is_empty() {
                println!("No symbols given.");
                return Ok(());
            }
            let folder = format!("specific_companies_{}", symbols.join("_"));
            (folder, reports::for_symbols(recent(ctx).await?, &symbols))
        }
        3 => {
            let keyword = prompt::text("Keyword in the company name")?;
            if keyword.is_empty() {
                println!("No keyword given.");
                return Ok(());
            }
            let limit = prompt::count("Maximum number of downloads (empty for no limit)")?;
            let mut picked = reports::with_company_keyword(recent(ctx).await?, &keyword);
            if let Some(n) = limit {
                picked.truncate(n);
            }
            (format!("all_reports_filtered_{keyword}"), picked)
        }
        4 => {
            let (from, to) = (prompt::date("From")?, prompt::date("To")?);
            let query = FinancialQuery::new().between(from, to);
            (
                format!("all_companies_{from}_to_{to}"),
                announcements::financial(&ctx.client, &query).await?,
            )
        }
        5 => {
            let (from, to) = (prompt::date("From")?, prompt::date("To")?);
            let id: i64 = prompt::text("Security id (e.g. 642)")?.parse()?;
            let query = FinancialQuery::new().between(from, to).company(id);
            (
                format!("secID_{id}_{from}_to_{to}"),
                announcements::financial(&ctx.client, &query).await?,
            )
        }
        6 => {
            let universe = Universe::load(&ctx.settings.data_file);
            let term = prompt::text("Company name or symbol")?;
            let Some(company) = universe.search(&term).next().cloned() else {
                println!("No company in the roster matches `{term}`.");
                return Ok(());
            };
            println!(
                "Using {} ({}), security id {}",
                company.name, company.symbol, company.security_id
            );
            let (from, to) = (prompt::date("From")?, prompt::date("To")?);
            let query = FinancialQuery::new()
                .between(from, to)
                .company(company.security_id);
            let short = company.symbol.split('.').next().unwrap_or(&company.symbol);
            (
                format!("{short}_{from}_to_{to}"),
                announcements::financial(&ctx.client, &query).await?,
            )
        }
        7 => {
            list(&recent(ctx).await?);
            return Ok(());
        }
        _ => return Ok(()),
    };

    println!("{} reports selected.", selected.len());
    if selected.is_empty() {
        return Ok(());
    }

    let downloader = ReportDownloader::new(&ctx.client, &ctx.settings.reports_dir);
    let mut bar = Bar::new("reports");
    let log = downloader
        .download_all_observed(&folder, &selected, &mut bar)
        .await;

    println!(
        "{} downloaded, {} failed. Files in {}",
        log.succeeded(),
        log.failed(),
        log.folder.display()
    );
    let log_path = downloader.log_path(&folder);
    log.save(&log_path)?;
    println!("Download log: {}", log_path.display());
    Ok(())
}

async fn recent(ctx: &Ctx) -> anyhow::Result<Vec<FinancialAnnouncement>> {
    let all = announcements::financial(&ctx.client, &FinancialQuery::new()).await?;
    println!("{} financial announcements available.", all.len());
    Ok(all)
}

fn list(all: &[FinancialAnnouncement]) {
    for (i, a) in all.iter().enumerate().take(20) {
        println!(
            "  {:>2}. {} ({}) - {} [{}]",
            i + 1,
            a.name,
            a.symbol,
            a.file_text.as_deref().unwrap_or("-"),
            a.uploaded_date.as_deref().unwrap_or("-")
        );
    }
    if all.len() > 20 {
        println!("  ... and {} more", all.len() - 20);
    }
}
