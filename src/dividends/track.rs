use std::cmp::Ordering;
use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use tracing::info;

use crate::{
    analysis::{Distribution, stats},
    announcements::{self, AnnouncementCategory, ApprovedAnnouncement, ApprovedQuery},
    core::{CseClient, CseError},
    dividends::model::{
        CalendarEvent, DividendDetail, DividendLine, DividendStatistics, DividendTrends, EventKind,
    },
    fetch::{self, Entity, FetchObserver, FetchOutcome},
};

/// Length of the trend lists.
pub const TREND_LEN: usize = 10;

impl Entity for AnnouncementCategory {
    fn id(&self) -> String {
        self.category_name.clone()
    }
}

impl Entity for ApprovedAnnouncement {
    fn id(&self) -> String {
        self.announcement_id
            .map_or_else(|| self.company.clone().unwrap_or_default(), |id| id.to_string())
    }
}

pub(super) async fn collect<O: FetchObserver + ?Sized>(
    client: &CseClient,
    categories: Vec<AnnouncementCategory>,
    from: NaiveDate,
    to: NaiveDate,
    delay: Duration,
    observer: &mut O,
) -> Result<FetchOutcome<ApprovedAnnouncement>, CseError> {
    if from > to {
        return Err(CseError::InvalidDates);
    }
    let per_category = fetch::fetch_all_observed(categories, delay, observer, |category| async move {
        let query = ApprovedQuery::new()
            .category(category.category_name)
            .between(from, to);
        announcements::approved(client, &query).await
    })
    .await;

    let outcome = FetchOutcome {
        records: per_category.records.into_iter().flatten().collect(),
        failures: per_category.failures,
    };
    info!(
        announcements = outcome.records.len(),
        failed_categories = outcome.failures.len(),
        "dividend announcements collected"
    );
    Ok(outcome)
}

/// Newest first by creation stamp; announcements without an id are dropped.
pub(super) fn newest(found: &[ApprovedAnnouncement], max: usize) -> Vec<ApprovedAnnouncement> {
    let mut with_id: Vec<&ApprovedAnnouncement> = found
        .iter()
        .filter(|a| a.announcement_id.is_some())
        .collect();
    with_id.sort_by_key(|a| std::cmp::Reverse(created_stamp(a)));
    with_id.into_iter().take(max).cloned().collect()
}

#[allow(clippy::cast_possible_truncation)]
fn created_stamp(a: &ApprovedAnnouncement) -> i64 {
    a.created_date
        .as_deref()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .map_or(0, |v| v as i64)
}

pub(super) async fn fetch_details<O: FetchObserver + ?Sized>(
    client: &CseClient,
    found: &[ApprovedAnnouncement],
    max: usize,
    delay: Duration,
    observer: &mut O,
) -> FetchOutcome<DividendDetail> {
    let picked = newest(found, max);
    fetch::fetch_all_observed(picked, delay, observer, |ann| async move {
        let id = ann.announcement_id.unwrap_or_default();
        announcements::details(client, id).await.map(DividendDetail::from)
    })
    .await
}

/// Parses the date styles the exchange uses in announcement headers.
///
/// Accepts ISO dates (optionally with a time), `10 Sep 2025`, `10-Sep-2025`,
/// `10.09.2025`, `10/09/2025` and epoch milliseconds.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("N/A") {
        return None;
    }
    if s.len() >= 12 && s.bytes().all(|b| b.is_ascii_digit()) {
        let ms = s.parse::<i64>().ok()?;
        return DateTime::from_timestamp_millis(ms).map(|t| t.date_naive());
    }
    let day = s.get(..10).filter(|_| s.len() > 10 && s.as_bytes()[4] == b'-');
    let s = day.unwrap_or(s);
    ["%Y-%m-%d", "%d %b %Y", "%d %B %Y", "%d-%b-%Y", "%d.%m.%Y", "%d/%m/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn present(date: Option<&String>) -> Option<&String> {
    date.filter(|d| {
        let t = d.trim();
        !t.is_empty() && !t.eq_ignore_ascii_case("N/A")
    })
}

fn amount_text(amount: Option<f64>) -> String {
    amount.map_or_else(|| "-".to_string(), |a| a.to_string())
}

/// Ex-dividend, payment and AGM events of every announcement, earliest first.
///
/// Events whose date cannot be parsed go last, in announcement order.
#[must_use]
pub fn calendar(details: &[DividendDetail]) -> Vec<CalendarEvent> {
    let mut events = Vec::new();
    for d in details {
        let event = |date: &String, kind: EventKind, amount: Option<f64>, text: String| CalendarEvent {
            date: date.clone(),
            event_type: kind,
            company: d.company_name.clone(),
            symbol: d.symbol.clone(),
            amount,
            details: text,
        };
        let dps = amount_text(d.dividend_per_share);
        if let Some(date) = present(d.ex_dividend_date.as_ref()) {
            events.push(event(
                date,
                EventKind::ExDividend,
                d.dividend_per_share,
                format!("LKR {dps}/share"),
            ));
        }
        if let Some(date) = present(d.payment_date.as_ref()) {
            events.push(event(
                date,
                EventKind::Payment,
                d.dividend_per_share,
                format!("LKR {dps}/share payment"),
            ));
        }
        if let Some(date) = present(d.agm_date.as_ref()) {
            events.push(event(
                date,
                EventKind::Agm,
                Some(0.0),
                "Annual General Meeting".to_string(),
            ));
        }
    }
    events.sort_by(|a, b| by_date(parse_date(&a.date), parse_date(&b.date)));
    events
}

fn by_date(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Amount statistics and the payer, payment and recency lists.
///
/// Upcoming payments are those dated on or after `today`, soonest first.
#[must_use]
pub fn trends(details: &[DividendDetail], today: NaiveDate) -> DividendTrends {
    let amounts: Vec<f64> = details
        .iter()
        .filter_map(|d| d.dividend_per_share)
        .filter(|a| *a > 0.0)
        .collect();

    let mut payers: Vec<(f64, &DividendDetail)> = details
        .iter()
        .filter_map(|d| d.dividend_per_share.map(|a| (a, d)))
        .collect();
    payers.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut upcoming: Vec<(NaiveDate, &DividendDetail)> = details
        .iter()
        .filter_map(|d| {
            d.payment_date
                .as_deref()
                .and_then(parse_date)
                .filter(|date| *date >= today)
                .map(|date| (date, d))
        })
        .collect();
    upcoming.sort_by_key(|(date, _)| *date);

    let mut recent: Vec<&DividendDetail> = details.iter().collect();
    recent.sort_by_key(|d| std::cmp::Reverse(d.announcement_id));

    DividendTrends {
        dividend_statistics: DividendStatistics {
            total_dividends_analyzed: details.len(),
            paying: amounts.len(),
            amounts: Distribution::of(&amounts),
            std_deviation: sample_std(&amounts),
        },
        top_dividend_payers: lines(payers.into_iter().map(|(_, d)| d)),
        upcoming_payments: lines(upcoming.into_iter().map(|(_, d)| d)),
        recent_announcements: lines(recent.into_iter()),
    }
}

fn lines<'a>(rows: impl Iterator<Item = &'a DividendDetail>) -> Vec<DividendLine> {
    rows.take(TREND_LEN).map(DividendLine::from).collect()
}

#[allow(clippy::cast_precision_loss)]
fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = stats::mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}
