//! Company info summary: price, range, volume, capitalization and beta for one security.

mod api;
mod model;
mod wire;

pub use model::RawEntitySnapshot;

use std::time::Duration;

use crate::{
    companies::CompanyRecord,
    core::{CseClient, CseError},
    fetch::{FetchObserver, FetchOutcome, Silent},
};

/// Fetches the company info summary for `symbol`.
///
/// The symbol record is read from `reqSymbolInfo` when present, otherwise the body itself is
/// taken as the record. Beta (`reqSymbolBetaInfo`) and logo (`reqLogo`) are optional.
///
/// # Errors
///
/// Returns any error from the request, `CseError::Decode` if a section has an unexpected
/// shape, or `CseError::MissingData` if the body is not an object.
#[tracing::instrument(skip(client), err)]
pub async fn fetch_snapshot(client: &CseClient, symbol: &str) -> Result<RawEntitySnapshot, CseError> {
    api::fetch_snapshot(client, symbol).await
}

/// Fetches one snapshot per company, in roster order, pausing `delay` between requests.
///
/// Later companies repeating an earlier symbol are skipped with a warning.
pub async fn fetch_snapshots(
    client: &CseClient,
    companies: Vec<CompanyRecord>,
    delay: Duration,
) -> FetchOutcome<RawEntitySnapshot> {
    api::fetch_snapshots(client, companies, delay, &mut Silent).await
}

/// [`fetch_snapshots`] with progress reporting.
pub async fn fetch_snapshots_observed<O: FetchObserver + ?Sized>(
    client: &CseClient,
    companies: Vec<CompanyRecord>,
    delay: Duration,
    observer: &mut O,
) -> FetchOutcome<RawEntitySnapshot> {
    api::fetch_snapshots(client, companies, delay, observer).await
}
