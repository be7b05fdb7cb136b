//! Dividend tracking: the cached category list, collection of dividend announcements,
//! their details, a calendar and trends, and a dividend screen over analysed companies.
//!
//! ```no_run
//! # async fn run() -> Result<(), cse_rs::CseError> {
//! use std::time::Duration;
//! use chrono::{Days, Local};
//! use cse_rs::{CseClient, dividends};
//!
//! let client = CseClient::default();
//! let cache = dividends::refresh_categories(&client, dividends::DEFAULT_CATEGORIES_FILE).await?;
//!
//! let to = Local::now().date_naive();
//! let from = to - Days::new(120);
//! let delay = Duration::from_millis(500);
//! let found = dividends::collect(&client, cache.dividend_categories(), from, to, delay).await?;
//! let details = dividends::fetch_details(&client, &found.records, 15, delay).await;
//!
//! for event in dividends::calendar(&details.records) {
//!     println!("{} {} {}", event.date, event.event_type, event.details);
//! }
//! # Ok(()) }
//! ```

mod categories;
mod model;
mod screen;
mod track;

pub use categories::{
    CacheMetadata, CategoryCache, CategorySummary, DEFAULT_CATEGORIES_FILE, is_dividend,
};
pub use model::{
    CalendarEvent, DividendDetail, DividendLine, DividendPicks, DividendProfile, DividendReport,
    DividendStatistics, DividendSummary, DividendTrends, EventKind, RiskDividends,
};
pub use screen::{PICKS, TOP_PAYERS, picks, profile, report};
pub use track::{TREND_LEN, calendar, parse_date, trends};

use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::info;

use crate::{
    announcements::{self, AnnouncementCategory, ApprovedAnnouncement},
    core::{CseClient, CseError},
    fetch::{FetchObserver, FetchOutcome, Silent},
};

/// Fetches the category list and saves it to `path`.
///
/// # Errors
///
/// Returns any error from the request, or from writing the cache file.
#[tracing::instrument(skip(client, path), err)]
pub async fn refresh_categories(
    client: &CseClient,
    path: impl AsRef<Path>,
) -> Result<CategoryCache, CseError> {
    let cache = CategoryCache::new(announcements::categories(client).await?);
    cache.save(path.as_ref())?;
    info!(
        path = %path.as_ref().display(),
        total = cache.categories.len(),
        dividend = cache.dividend_categories().len(),
        "announcement categories saved"
    );
    Ok(cache)
}

/// Approved announcements of every category in `categories` between `from` and `to`,
/// one request per category with `delay` between them.
///
/// A failed category is recorded under its name and the rest are still fetched.
///
/// # Errors
///
/// Returns `CseError::InvalidDates` when `from` is after `to`.
pub async fn collect(
    client: &CseClient,
    categories: Vec<AnnouncementCategory>,
    from: NaiveDate,
    to: NaiveDate,
    delay: Duration,
) -> Result<FetchOutcome<ApprovedAnnouncement>, CseError> {
    track::collect(client, categories, from, to, delay, &mut Silent).await
}

/// [`collect`] with progress reporting, one step per category.
///
/// # Errors
///
/// Returns `CseError::InvalidDates` when `from` is after `to`.
pub async fn collect_observed<O: FetchObserver + ?Sized>(
    client: &CseClient,
    categories: Vec<AnnouncementCategory>,
    from: NaiveDate,
    to: NaiveDate,
    delay: Duration,
    observer: &mut O,
) -> Result<FetchOutcome<ApprovedAnnouncement>, CseError> {
    track::collect(client, categories, from, to, delay, observer).await
}

/// Details of the `max` most recently created announcements in `found`.
pub async fn fetch_details(
    client: &CseClient,
    found: &[ApprovedAnnouncement],
    max: usize,
    delay: Duration,
) -> FetchOutcome<DividendDetail> {
    track::fetch_details(client, found, max, delay, &mut Silent).await
}

/// [`fetch_details`] with progress reporting.
pub async fn fetch_details_observed<O: FetchObserver + ?Sized>(
    client: &CseClient,
    found: &[ApprovedAnnouncement],
    max: usize,
    delay: Duration,
    observer: &mut O,
) -> FetchOutcome<DividendDetail> {
    track::fetch_details(client, found, max, delay, observer).await
}
