//! The per-entity fetch loop shared by roster discovery and company detail collection.
//!
//! One request is in flight at a time and a fixed pause separates consecutive calls,
//! whatever their outcome. A failed entity is recorded and skipped; it never aborts the loop.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::CseError;

/// Something the loop can iterate over and name in a failure record.
pub trait Entity {
    /// Identifier used in logs and failure records (a symbol, a letter, ...).
    fn id(&self) -> String;
}

impl Entity for char {
    fn id(&self) -> String {
        self.to_string()
    }
}

impl Entity for String {
    fn id(&self) -> String {
        self.clone()
    }
}

impl Entity for &str {
    fn id(&self) -> String {
        (*self).to_string()
    }
}

/// One failed fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// The symbol or letter that failed.
    pub id: String,
    /// Human readable error.
    pub error: String,
}

/// Accumulated result of a loop: successes in fetch order, plus failures.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome<T> {
    pub records: Vec<T>,
    pub failures: Vec<FailureRecord>,
}

impl<T> Default for FetchOutcome<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> FetchOutcome<T> {
    /// Total number of entities attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// Progress hooks; the CLI uses them to drive a progress bar.
pub trait FetchObserver {
    fn on_start(&mut self, _total: usize) {}
    fn on_success(&mut self, _id: &str) {}
    fn on_failure(&mut self, _id: &str, _error: &CseError) {}
    fn on_finish(&mut self) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl FetchObserver for Silent {}

/// Fetches every entity in order, pausing `delay` between consecutive calls.
///
/// An empty entity list returns an empty outcome immediately.
pub async fn fetch_all<E, T, F, Fut>(entities: Vec<E>, delay: Duration, fetch_one: F) -> FetchOutcome<T>
where
    E: Entity,
    F: FnMut(E) -> Fut,
    Fut: Future<Output = Result<T, CseError>>,
{
    fetch_all_observed(entities, delay, &mut Silent, fetch_one).await
}

/// [`fetch_all`] with progress reporting.
pub async fn fetch_all_observed<E, T, F, Fut, O>(
    entities: Vec<E>,
    delay: Duration,
    observer: &mut O,
    mut fetch_one: F,
) -> FetchOutcome<T>
where
    E: Entity,
    F: FnMut(E) -> Fut,
    Fut: Future<Output = Result<T, CseError>>,
    O: FetchObserver + ?Sized,
{
    let total = entities.len();
    let mut outcome = FetchOutcome::default();
    observer.on_start(total);

    for (i, entity) in entities.into_iter().enumerate() {
        let id = entity.id();
        match fetch_one(entity).await {
            Ok(record) => {
                debug!(%id, index = i + 1, total, "fetched");
                observer.on_success(&id);
                outcome.records.push(record);
            }
            Err(err) => {
                warn!(%id, index = i + 1, total, error = %err, "fetch failed");
                observer.on_failure(&id, &err);
                outcome.failures.push(FailureRecord {
                    id,
                    error: err.to_string(),
                });
            }
        }

        if i + 1 < total && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    observer.on_finish();
    outcome
}
