use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::de::{de_opt_f64, de_opt_i64};
use crate::fetch::Entity;

/// A company in the locally cached roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Exchange ticker, e.g. `LOLC.N0000`.
    pub symbol: String,
    /// Registered company name.
    pub name: String,
    /// Security id used by the announcement endpoints.
    #[serde(rename = "securityId")]
    pub security_id: i64,
    /// Sector name, when the roster carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
}

impl Entity for CompanyRecord {
    fn id(&self) -> String {
        self.symbol.clone()
    }
}

/// One row of an alphabetical listing page.
///
/// The listing carries more columns than are modelled here; they are kept in `extra`
/// so roster exports lose nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedCompany {
    #[serde(default, alias = "securityId", deserialize_with = "de_opt_i64")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub price: Option<f64>,
    #[serde(
        default,
        rename = "percentageChange",
        deserialize_with = "de_opt_f64"
    )]
    pub percentage_change: Option<f64>,
    #[serde(default, rename = "lastTradedTime")]
    pub last_traded_time: Option<Value>,
    #[serde(default, alias = "sectorName")]
    pub sector: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ListedCompany {
    /// A company counts as active once it has a last traded time.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.last_traded_time.as_ref().is_some_and(|v| !v.is_null())
    }

    /// Converts the listing row into a roster record when symbol, name and id are present.
    #[must_use]
    pub fn to_record(&self) -> Option<CompanyRecord> {
        Some(CompanyRecord {
            symbol: self.symbol.clone()?,
            name: self.name.clone()?,
            security_id: self.id?,
            sector: self.sector.clone(),
        })
    }
}

/// Result of walking the alphabet.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    /// Every company found, in letter order.
    pub companies: Vec<ListedCompany>,
    /// Letters whose page failed.
    pub failures: Vec<crate::fetch::FailureRecord>,
}

impl Roster {
    /// Companies that have traded at least once.
    pub fn active(&self) -> impl Iterator<Item = &ListedCompany> {
        self.companies.iter().filter(|c| c.is_active())
    }

    /// Roster records for every listing row with a symbol, name and id.
    #[must_use]
    pub fn records(&self) -> Vec<CompanyRecord> {
        self.companies.iter().filter_map(ListedCompany::to_record).collect()
    }
}
