use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    analysis::{DerivedMetricRecord, Distribution, RiskCategory},
    announcements::{AnnouncementDetails, ApprovedAnnouncement},
};

/// A dividend announcement with its header flattened into named dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DividendDetail {
    pub announcement_id: i64,
    pub company_name: Option<String>,
    pub symbol: Option<String>,
    /// Declared dividend per share, LKR.
    pub dividend_per_share: Option<f64>,
    pub financial_year: Option<String>,
    pub announcement_date: Option<String>,
    pub ex_dividend_date: Option<String>,
    pub payment_date: Option<String>,
    pub agm_date: Option<String>,
    pub record_date: Option<String>,
    pub remarks: Option<String>,
    pub documents_count: usize,
    pub documents: Vec<Value>,
}

impl From<AnnouncementDetails> for DividendDetail {
    fn from(d: AnnouncementDetails) -> Self {
        let h = d.header;
        Self {
            announcement_id: d.id,
            company_name: h.company_name,
            symbol: h.symbol,
            dividend_per_share: h.voting_div_per_share,
            financial_year: h.financial_year,
            announcement_date: h.date_of_announcement,
            ex_dividend_date: h.xd,
            payment_date: h.payment,
            agm_date: h.agm,
            record_date: h.record_date,
            remarks: h.remarks,
            documents_count: d.documents.len(),
            documents: d.documents,
        }
    }
}

/// The columns of a [`DividendDetail`] that summary lists show.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DividendLine {
    pub announcement_id: i64,
    pub company_name: Option<String>,
    pub symbol: Option<String>,
    pub dividend_per_share: Option<f64>,
    pub announcement_date: Option<String>,
    pub ex_dividend_date: Option<String>,
    pub payment_date: Option<String>,
}

impl From<&DividendDetail> for DividendLine {
    fn from(d: &DividendDetail) -> Self {
        Self {
            announcement_id: d.announcement_id,
            company_name: d.company_name.clone(),
            symbol: d.symbol.clone(),
            dividend_per_share: d.dividend_per_share,
            announcement_date: d.announcement_date.clone(),
            ex_dividend_date: d.ex_dividend_date.clone(),
            payment_date: d.payment_date.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "Ex-Dividend")]
    ExDividend,
    #[serde(rename = "Dividend Payment")]
    Payment,
    #[serde(rename = "AGM")]
    Agm,
}

impl EventKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EventKind::ExDividend => "Ex-Dividend",
            EventKind::Payment => "Dividend Payment",
            EventKind::Agm => "AGM",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One dated entry of the dividend calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// The date exactly as the exchange published it.
    pub date: String,
    pub event_type: EventKind,
    pub company: Option<String>,
    pub symbol: Option<String>,
    /// Per-share amount; zero for meetings.
    pub amount: Option<f64>,
    pub details: String,
}

/// Amount statistics over the announcements that declare a positive dividend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DividendStatistics {
    /// Every detailed announcement, paying or not.
    pub total_dividends_analyzed: usize,
    /// Announcements with a positive per-share amount.
    pub paying: usize,
    pub amounts: Option<Distribution>,
    /// Sample standard deviation; needs two paying announcements.
    pub std_deviation: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DividendTrends {
    pub dividend_statistics: DividendStatistics,
    pub top_dividend_payers: Vec<DividendLine>,
    pub upcoming_payments: Vec<DividendLine>,
    pub recent_announcements: Vec<DividendLine>,
}

/// A company's metrics joined with the dividend announcements that name it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DividendProfile {
    #[serde(flatten)]
    pub company: DerivedMetricRecord,
    pub recent_dividends: usize,
    /// Up to three matching announcements, in collection order.
    pub dividend_announcements: Vec<ApprovedAnnouncement>,
    pub last_dividend_date: Option<String>,
}

impl DividendProfile {
    #[must_use]
    pub fn pays_dividends(&self) -> bool {
        self.recent_dividends > 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DividendSummary {
    pub total_companies: usize,
    pub companies_with_dividends: usize,
    pub companies_without_dividends: usize,
    pub dividend_percentage: f64,
}

/// Dividend counts of the paying companies in one risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskDividends {
    /// `None` collects companies without a beta.
    pub risk_category: Option<RiskCategory>,
    pub companies: usize,
    pub mean: f64,
    pub sum: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DividendPicks {
    pub dividend_aristocrats: Vec<DividendProfile>,
    pub value_dividend_plays: Vec<DividendProfile>,
    pub growth_with_dividends: Vec<DividendProfile>,
}

impl DividendPicks {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dividend_aristocrats.is_empty()
            && self.value_dividend_plays.is_empty()
            && self.growth_with_dividends.is_empty()
    }
}

/// Dividend view over a set of profiled companies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DividendReport {
    pub summary: DividendSummary,
    pub top_dividend_payers: Vec<DividendProfile>,
    pub dividend_by_risk: Vec<RiskDividends>,
    pub high_value_dividend_stocks: Vec<DividendProfile>,
    pub investment_recommendations: DividendPicks,
}
