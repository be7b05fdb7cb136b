//! Corporate announcements: financial filings, approved announcements and their details.

mod api;
mod model;

pub use api::{ApprovedQuery, FinancialQuery};
pub use model::{
    AnnouncementCategory, AnnouncementDetails, AnnouncementHeader, ApprovedAnnouncement,
    FinancialAnnouncement,
};

use serde_json::Value;

use crate::core::{CseClient, CseError};

/// The announcement lists that take no parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    NewListings,
    BuyInBoard,
    Approved,
    Covid,
    Financial,
    Circular,
    Directive,
    NonCompliance,
}

impl Kind {
    pub const ALL: [Kind; 8] = [
        Kind::NewListings,
        Kind::BuyInBoard,
        Kind::Approved,
        Kind::Covid,
        Kind::Financial,
        Kind::Circular,
        Kind::Directive,
        Kind::NonCompliance,
    ];

    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            Kind::NewListings => "getNewListingsRelatedNoticesAnnouncements",
            Kind::BuyInBoard => "getBuyInBoardAnnouncements",
            Kind::Approved => "approvedAnnouncement",
            Kind::Covid => "getCOVIDAnnouncements",
            Kind::Financial => "getFinancialAnnouncement",
            Kind::Circular => "circularAnnouncement",
            Kind::Directive => "directiveAnnouncement",
            Kind::NonCompliance => "getNonComplianceAnnouncements",
        }
    }
}

/// Fetches one of the parameterless announcement lists as raw JSON.
///
/// # Errors
///
/// Returns any error from the request.
#[tracing::instrument(skip(client), err)]
pub async fn list(client: &CseClient, kind: Kind) -> Result<Value, CseError> {
    api::list(client, kind.endpoint()).await
}

/// Financial statement filings matching `query`.
///
/// # Errors
///
/// Returns `CseError::InvalidDates` for a reversed date range, any error from the request,
/// or `CseError::MissingData` when `reqFinancialAnnouncemnets` is absent.
#[tracing::instrument(skip(client), err)]
pub async fn financial(
    client: &CseClient,
    query: &FinancialQuery,
) -> Result<Vec<FinancialAnnouncement>, CseError> {
    api::financial(client, query).await
}

/// All corporate announcement categories.
///
/// # Errors
///
/// Returns any error from the request, or `CseError::MissingData` if no list comes back.
#[tracing::instrument(skip(client), err)]
pub async fn categories(client: &CseClient) -> Result<Vec<AnnouncementCategory>, CseError> {
    api::categories(client).await
}

/// Approved announcements, optionally narrowed to one category and a date range.
///
/// # Errors
///
/// Returns `CseError::InvalidDates` for a reversed date range, any error from the request,
/// or `CseError::MissingData` when `approvedAnnouncements` is absent.
#[tracing::instrument(skip(client), err)]
pub async fn approved(
    client: &CseClient,
    query: &ApprovedQuery,
) -> Result<Vec<ApprovedAnnouncement>, CseError> {
    api::approved(client, query).await
}

/// Header and documents of announcement `id`.
///
/// # Errors
///
/// Returns any error from the request, or `CseError::MissingData` when the response has
/// no `reqBaseAnnouncement`.
#[tracing::instrument(skip(client), err)]
pub async fn details(client: &CseClient, id: i64) -> Result<AnnouncementDetails, CseError> {
    api::details(client, id).await
}
