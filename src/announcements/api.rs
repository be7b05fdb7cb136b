use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    announcements::model::{
        AnnouncementCategory, AnnouncementDetails, AnnouncementHeader, ApprovedAnnouncement,
        FinancialAnnouncement,
    },
    core::{ApiResponse, CseClient, CseError, Payload, net},
};

const EP_FINANCIAL: &str = "getFinancialAnnouncement";
const KEY_FINANCIAL: &str = "reqFinancialAnnouncemnets";
const EP_CATEGORIES: &str = "corporateAnnouncementCategory";
const EP_APPROVED: &str = "approvedAnnouncement";
const KEY_APPROVED: &str = "approvedAnnouncements";
const EP_DETAILS: &str = "getAnnouncementById";
const KEY_HEADER: &str = "reqBaseAnnouncement";
const KEY_DOCS: &str = "reqAnnouncementDocs";

const DATE_FMT: &str = "%Y-%m-%d";

/// Filter for [`super::financial`]. Empty means every recent filing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinancialQuery {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    company_ids: Vec<i64>,
}

impl FinancialQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to filings between `from` and `to`, inclusive.
    #[must_use]
    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Restrict to one company by its security id. May be called repeatedly.
    #[must_use]
    pub fn company(mut self, security_id: i64) -> Self {
        self.company_ids.push(security_id);
        self
    }

    fn form(&self) -> Result<Vec<(&'static str, String)>, CseError> {
        let mut form = Vec::new();
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => return Err(CseError::InvalidDates),
            (Some(from), Some(to)) => {
                form.push(("fromDate", from.format(DATE_FMT).to_string()));
                form.push(("toDate", to.format(DATE_FMT).to_string()));
            }
            _ => {}
        }
        if !self.company_ids.is_empty() {
            let ids: Vec<String> = self.company_ids.iter().map(ToString::to_string).collect();
            form.push(("companyIds", ids.join(",")));
        }
        Ok(form)
    }
}

/// Filter for [`super::approved`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovedQuery {
    category: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl ApprovedQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only announcements in the category named `name` (see [`super::categories`]).
    #[must_use]
    pub fn category(mut self, name: impl Into<String>) -> Self {
        self.category = Some(name.into());
        self
    }

    #[must_use]
    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    fn form(&self) -> Result<Vec<(&'static str, String)>, CseError> {
        let mut form = Vec::new();
        if let Some(name) = &self.category {
            form.push(("announcementType", name.clone()));
            form.push(("announcementCategories", name.clone()));
        }
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => return Err(CseError::InvalidDates),
            (Some(from), Some(to)) => {
                form.push(("fromDate", from.format(DATE_FMT).to_string()));
                form.push(("toDate", to.format(DATE_FMT).to_string()));
            }
            _ => {}
        }
        Ok(form)
    }
}

async fn post(
    client: &CseClient,
    endpoint: &str,
    form: &[(&'static str, String)],
) -> Result<ApiResponse, CseError> {
    let params: Vec<(&str, &str)> = form.iter().map(|(k, v)| (*k, v.as_str())).collect();
    net::call(client, endpoint, &params).await
}

fn list_under<T: DeserializeOwned>(resp: ApiResponse, key: &str) -> Result<Vec<T>, CseError> {
    let endpoint = resp.endpoint.clone();
    resp.into_payload(key)
        .into_list()
        .ok_or(CseError::MissingData {
            endpoint,
            key: key.to_string(),
        })
}

pub(super) async fn list(client: &CseClient, endpoint: &str) -> Result<Value, CseError> {
    Ok(net::call(client, endpoint, &[]).await?.body)
}

pub(super) async fn financial(
    client: &CseClient,
    query: &FinancialQuery,
) -> Result<Vec<FinancialAnnouncement>, CseError> {
    let form = query.form()?;
    let resp = post(client, EP_FINANCIAL, &form).await?;
    list_under(resp, KEY_FINANCIAL)
}

pub(super) async fn categories(client: &CseClient) -> Result<Vec<AnnouncementCategory>, CseError> {
    let resp = net::call(client, EP_CATEGORIES, &[]).await?;
    // bare list in practice; accept the `categories` wrapper the local cache file uses
    list_under(resp, "categories")
}

pub(super) async fn approved(
    client: &CseClient,
    query: &ApprovedQuery,
) -> Result<Vec<ApprovedAnnouncement>, CseError> {
    let form = query.form()?;
    let resp = post(client, EP_APPROVED, &form).await?;
    list_under(resp, KEY_APPROVED)
}

pub(super) async fn details(client: &CseClient, id: i64) -> Result<AnnouncementDetails, CseError> {
    let id_text = id.to_string();
    let resp = net::call(client, EP_DETAILS, &[("announcementId", id_text.as_str())]).await?;
    let status = resp.status;

    let documents = match resp.body.get(KEY_DOCS) {
        Some(Value::Array(docs)) => docs.clone(),
        _ => Vec::new(),
    };
    let header = match resp.into_payload(KEY_HEADER) {
        Payload::Nested { value, .. } if !value.is_null() => {
            serde_json::from_value::<AnnouncementHeader>(value).map_err(|e| CseError::Decode {
                status,
                message: e.to_string(),
            })?
        }
        _ => {
            return Err(CseError::MissingData {
                endpoint: EP_DETAILS.to_string(),
                key: KEY_HEADER.to_string(),
            });
        }
    };

    Ok(AnnouncementDetails {
        id,
        header,
        documents,
    })
}
