//! The company roster: alphabetical discovery against the API and the offline cache file.

mod api;
mod model;
pub mod universe;

pub use model::{CompanyRecord, ListedCompany, Roster};
pub use universe::{Universe, UniverseStatus};

use std::time::Duration;

use crate::{
    core::{CseClient, CseError},
    fetch::{FetchObserver, Silent},
};

/// Fetches the listing page for companies whose name starts with `letter`.
///
/// The exchange wraps the list under `reqAlphabetical`; a bare list is accepted too.
///
/// # Errors
///
/// Returns `CseError::InvalidParams` for a non-letter, a transport/status/decode error
/// from the request, or `CseError::MissingData` when the body holds no list.
#[tracing::instrument(skip(client), err)]
pub async fn by_letter(client: &CseClient, letter: char) -> Result<Vec<ListedCompany>, CseError> {
    api::by_letter(client, letter).await
}

/// Walks the alphabet A–Z, one page per letter, pausing `delay` between requests.
///
/// Failed letters are recorded in [`Roster::failures`] and do not stop the walk.
pub async fn discover_all(client: &CseClient, delay: Duration) -> Roster {
    api::discover_all(client, delay, &mut Silent).await
}

/// [`discover_all`] with progress reporting.
pub async fn discover_all_observed<O: FetchObserver + ?Sized>(
    client: &CseClient,
    delay: Duration,
    observer: &mut O,
) -> Roster {
    api::discover_all(client, delay, observer).await
}
