use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::de::{de_opt_f64, de_opt_i64, de_opt_string};

/// A financial statement filing with a downloadable attachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAnnouncement {
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub id: Option<i64>,
    /// Company name.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    /// Title of the attachment, e.g. "Interim Financial Statements Q1".
    #[serde(default, deserialize_with = "de_opt_string")]
    pub file_text: Option<String>,
    /// Attachment path relative to the CDN base.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub uploaded_date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub manual_date: Option<String>,
}

/// A corporate announcement category, used to filter approved announcements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementCategory {
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub id: Option<i64>,
    #[serde(default)]
    pub category_name: String,
}

impl AnnouncementCategory {
    /// Case-insensitive keyword match on the category name.
    #[must_use]
    pub fn mentions(&self, keyword: &str) -> bool {
        self.category_name
            .to_uppercase()
            .contains(&keyword.trim().to_uppercase())
    }
}

/// One row of the approved announcements list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedAnnouncement {
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub announcement_id: Option<i64>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub date_of_announcement: Option<String>,
    /// Creation timestamp, usually epoch milliseconds.
    #[serde(default, deserialize_with = "de_opt_string")]
    pub created_date: Option<String>,
}

/// Header of a single announcement (dividends, AGMs and the like).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementHeader {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub voting_div_per_share: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub financial_year: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub date_of_announcement: Option<String>,
    /// Ex-dividend date.
    #[serde(default, deserialize_with = "de_opt_string")]
    pub xd: Option<String>,
    /// Payment date.
    #[serde(default, deserialize_with = "de_opt_string")]
    pub payment: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub agm: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub record_date: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// An announcement together with its attached documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementDetails {
    pub id: i64,
    pub header: AnnouncementHeader,
    /// Attached documents as sent by the exchange.
    pub documents: Vec<Value>,
}
