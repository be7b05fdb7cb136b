//! Writing results to disk: JSON documents, CSV tables and the XLSX workbooks.
//!
//! Every artifact of a run is written independently. A failure is recorded in that
//! artifact's [`ArtifactOutcome`] and the remaining artifacts are still attempted; a
//! failed write may leave a partial file behind.

mod sheet;
mod table;

pub use table::{write_csv, write_table};

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    analysis::{self, AnalysisReport, DerivedMetricRecord, InvestmentStyle},
    companies::ListedCompany,
    core::CseError,
    dividends::{CalendarEvent, DividendDetail, DividendProfile, DividendReport, DividendTrends},
    fetch::FailureRecord,
    info::RawEntitySnapshot,
};

/// Result of writing one file.
#[derive(Debug)]
pub struct ArtifactOutcome {
    pub path: PathBuf,
    pub result: Result<(), CseError>,
}

impl ArtifactOutcome {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Writes `value` as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns `CseError::Io` or `CseError::Json` if the file cannot be written.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CseError> {
    ensure_parent(path)?;
    let body = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, body)?;
    Ok(())
}

/// `{base}_{YYYYMMDD_HHMMSS}` in local time, used to name one run's artifacts.
#[must_use]
pub fn timestamped_prefix(base: &str) -> String {
    format!("{base}_{}", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Everything one investment analysis run produced.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRun<'a> {
    pub snapshots: &'a [RawEntitySnapshot],
    pub records: &'a [DerivedMetricRecord],
    pub report: &'a AnalysisReport,
    pub failures: &'a [FailureRecord],
}

#[derive(Serialize)]
struct StampedReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a AnalysisReport,
}

/// Writes every artifact of an analysis run under `dir`, each named `{prefix}_...`.
///
/// Artifacts, in order: `_raw_data.json`, `_investment_analysis.json`, `_metrics.csv`,
/// `_opportunities.xlsx`, one `_{style}_recommendations.json` per investment style, and
/// `_failed_requests.json` when there were failures.
pub fn write_analysis(dir: &Path, prefix: &str, run: AnalysisRun<'_>) -> Vec<ArtifactOutcome> {
    let path = |suffix: &str| dir.join(format!("{prefix}_{suffix}"));
    let mut outcomes = Vec::new();

    if let Err(e) = std::fs::create_dir_all(dir) {
        warn!(dir = %dir.display(), error = %e, "cannot create output directory");
    }

    outcomes.push(attempt(path("raw_data.json"), |p| {
        write_json(p, run.snapshots)
    }));
    outcomes.push(attempt(path("investment_analysis.json"), |p| {
        write_json(
            p,
            &StampedReport {
                generated_at: Utc::now(),
                report: run.report,
            },
        )
    }));
    outcomes.push(attempt(path("metrics.csv"), |p| write_csv(p, run.records)));
    outcomes.push(attempt(path("opportunities.xlsx"), |p| {
        sheet::write_workbook(p, &run.report.opportunities, run.records)
    }));

    for style in InvestmentStyle::ALL {
        let picks = analysis::recommend(run.records, style);
        outcomes.push(attempt(path(&format!("{style}_recommendations.json")), |p| {
            let mut doc = serde_json::Map::new();
            doc.insert(style.as_str().to_string(), serde_json::to_value(&picks)?);
            write_json(p, &Value::Object(doc))
        }));
    }

    if !run.failures.is_empty() {
        outcomes.push(write_failures(dir, prefix, run.failures));
    }

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    info!(
        dir = %dir.display(),
        written = outcomes.len() - failed,
        failed,
        "analysis artifacts written"
    );
    outcomes
}

/// Writes `failures` as `{prefix}_failed_requests.json` under `dir`.
/// Needs no records, so it also covers a run where every fetch failed.
pub fn write_failures(dir: &Path, prefix: &str, failures: &[FailureRecord]) -> ArtifactOutcome {
    attempt(dir.join(format!("{prefix}_failed_requests.json")), |p| {
        write_json(p, failures)
    })
}

/// Writes the alphabetical listing as `{prefix}.json` and `{prefix}.csv` under `dir`.
///
/// The CSV header is the union of all listing columns.
pub fn write_roster(dir: &Path, prefix: &str, companies: &[ListedCompany]) -> Vec<ArtifactOutcome> {
    let json = attempt(dir.join(format!("{prefix}.json")), |p| write_json(p, companies));
    let csv = attempt(dir.join(format!("{prefix}.csv")), |p| {
        let rows = to_rows(companies)?;
        ensure_parent(p)?;
        write_table(p, &rows)
    });
    vec![json, csv]
}

/* ---------------- Dividends ---------------- */

/// Everything one dividend tracking run produced.
#[derive(Debug, Clone, Copy)]
pub struct DividendTracking<'a> {
    pub details: &'a [DividendDetail],
    pub calendar: &'a [CalendarEvent],
    pub trends: &'a DividendTrends,
    /// Length of the announcement window, in days.
    pub period_days: u32,
}

#[derive(Serialize)]
struct TrackingMetadata {
    generated_at: DateTime<Utc>,
    total_dividends: usize,
    analysis_period_days: u32,
}

#[derive(Serialize)]
struct TrackingDocument<'a> {
    report_metadata: TrackingMetadata,
    dividend_trends: &'a DividendTrends,
    detailed_dividends: &'a [DividendDetail],
    calendar_events: &'a [CalendarEvent],
}

/// Writes a dividend tracking run as `{prefix}.json` and `{prefix}.xlsx` under `dir`.
///
/// The workbook always has an "All Dividends" sheet; the calendar, top payer and
/// upcoming payment sheets are added when they have rows.
pub fn write_dividend_tracking(
    dir: &Path,
    prefix: &str,
    run: DividendTracking<'_>,
) -> Vec<ArtifactOutcome> {
    let json = attempt(dir.join(format!("{prefix}.json")), |p| {
        write_json(
            p,
            &TrackingDocument {
                report_metadata: TrackingMetadata {
                    generated_at: Utc::now(),
                    total_dividends: run.details.len(),
                    analysis_period_days: run.period_days,
                },
                dividend_trends: run.trends,
                detailed_dividends: run.details,
                calendar_events: run.calendar,
            },
        )
    });
    let xlsx = attempt(dir.join(format!("{prefix}.xlsx")), |p| {
        let all = to_rows(run.details)?;
        let calendar = to_rows(run.calendar)?;
        let top = to_rows(&run.trends.top_dividend_payers)?;
        let upcoming = to_rows(&run.trends.upcoming_payments)?;
        ensure_parent(p)?;
        sheet::write_tables(
            p,
            &non_empty(&[
                ("All Dividends", all.as_slice()),
                ("Dividend Calendar", calendar.as_slice()),
                ("Top Dividend Payers", top.as_slice()),
                ("Upcoming Payments", upcoming.as_slice()),
            ]),
        )
    });
    vec![json, xlsx]
}

/// Everything one dividend screen produced.
#[derive(Debug, Clone, Copy)]
pub struct DividendScreen<'a> {
    pub profiles: &'a [DividendProfile],
    pub report: &'a DividendReport,
    /// Number of dividend announcements the profiles were matched against.
    pub announcements_analyzed: usize,
}

#[derive(Serialize)]
struct ScreenMetadata {
    total_companies_analyzed: usize,
    companies_with_dividends: usize,
    dividend_announcements_analyzed: usize,
}

#[derive(Serialize)]
struct ScreenDocument<'a> {
    generated_at: DateTime<Utc>,
    analysis_metadata: ScreenMetadata,
    companies: &'a [DividendProfile],
    dividend_report: &'a DividendReport,
}

/// Writes a dividend screen as `{prefix}.json` and `{prefix}.xlsx` under `dir`.
///
/// The workbook always has a "Company Analysis" sheet; the dividend company and pick
/// sheets are added when they have rows.
pub fn write_dividend_screen(
    dir: &Path,
    prefix: &str,
    screen: DividendScreen<'_>,
) -> Vec<ArtifactOutcome> {
    let json = attempt(dir.join(format!("{prefix}.json")), |p| {
        write_json(
            p,
            &ScreenDocument {
                generated_at: Utc::now(),
                analysis_metadata: ScreenMetadata {
                    total_companies_analyzed: screen.profiles.len(),
                    companies_with_dividends: screen.report.summary.companies_with_dividends,
                    dividend_announcements_analyzed: screen.announcements_analyzed,
                },
                companies: screen.profiles,
                dividend_report: screen.report,
            },
        )
    });
    let xlsx = attempt(dir.join(format!("{prefix}.xlsx")), |p| {
        let picks = &screen.report.investment_recommendations;
        let paying: Vec<&DividendProfile> =
            screen.profiles.iter().filter(|d| d.pays_dividends()).collect();
        let all = to_rows(screen.profiles)?;
        let paying = to_rows(&paying)?;
        let aristocrats = to_rows(&picks.dividend_aristocrats)?;
        let value = to_rows(&picks.value_dividend_plays)?;
        let growth = to_rows(&picks.growth_with_dividends)?;
        ensure_parent(p)?;
        sheet::write_tables(
            p,
            &non_empty(&[
                ("Company Analysis", all.as_slice()),
                ("Dividend Companies", paying.as_slice()),
                ("Dividend Aristocrats", aristocrats.as_slice()),
                ("Value Dividend Plays", value.as_slice()),
                ("Growth With Dividends", growth.as_slice()),
            ]),
        )
    });
    vec![json, xlsx]
}

/// Keeps the first table, then only the ones with rows.
fn non_empty<'a>(tables: &[(&'a str, &'a [Value])]) -> Vec<(&'a str, &'a [Value])> {
    tables
        .iter()
        .enumerate()
        .filter(|(i, (_, rows))| *i == 0 || !rows.is_empty())
        .map(|(_, t)| *t)
        .collect()
}

fn to_rows<T: Serialize>(items: &[T]) -> Result<Vec<Value>, CseError> {
    Ok(items
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?)
}

fn attempt(path: PathBuf, write: impl FnOnce(&Path) -> Result<(), CseError>) -> ArtifactOutcome {
    let result = write(&path);
    match &result {
        Ok(()) => info!(path = %path.display(), "written"),
        Err(e) => warn!(path = %path.display(), error = %e, "write failed"),
    }
    ArtifactOutcome { path, result }
}

fn ensure_parent(path: &Path) -> Result<(), CseError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
