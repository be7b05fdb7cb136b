use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{announcements::AnnouncementCategory, core::CseError, export};

/// Default location of the cached category list.
pub const DEFAULT_CATEGORIES_FILE: &str = "company_data/announcement_categories.json";

const SOURCE: &str = "CSE API - corporateAnnouncementCategory";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheMetadata {
    /// Local time of the fetch, ISO 8601.
    #[serde(default)]
    pub fetch_date: String,
    #[serde(default)]
    pub total_categories: usize,
    #[serde(default)]
    pub source: String,
}

/// The announcement category list as saved on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryCache {
    #[serde(default)]
    pub metadata: CacheMetadata,
    #[serde(default)]
    pub categories: Vec<AnnouncementCategory>,
}

/// Category counts by keyword group. A category can fall in several groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub total: usize,
    pub dividend: usize,
    pub meeting: usize,
    pub financial: usize,
    pub appointment: usize,
}

impl CategoryCache {
    /// Wraps a freshly fetched list, stamped with the current time.
    #[must_use]
    pub fn new(categories: Vec<AnnouncementCategory>) -> Self {
        Self {
            metadata: CacheMetadata {
                fetch_date: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
                total_categories: categories.len(),
                source: SOURCE.to_string(),
            },
            categories,
        }
    }

    /// Reads a cache written by [`CategoryCache::save`].
    ///
    /// # Errors
    ///
    /// Returns `CseError::Io` if the file cannot be read (including when it does not
    /// exist) and `CseError::Json` if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CseError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let cache: Self = serde_json::from_slice(&bytes)?;
        debug!(path = %path.display(), count = cache.categories.len(), "category cache loaded");
        Ok(cache)
    }

    /// Writes the cache as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `CseError::Io` or `CseError::Json` if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CseError> {
        export::write_json(path.as_ref(), self)
    }

    /// Categories whose name mentions "dividend", in cache order.
    #[must_use]
    pub fn dividend_categories(&self) -> Vec<AnnouncementCategory> {
        self.categories
            .iter()
            .filter(|c| is_dividend(c))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn summary(&self) -> CategorySummary {
        let count = |words: &[&str]| {
            self.categories
                .iter()
                .filter(|c| words.iter().any(|w| c.mentions(w)))
                .count()
        };
        CategorySummary {
            total: self.categories.len(),
            dividend: count(&["DIVIDEND"]),
            meeting: count(&["MEETING"]),
            financial: count(&["FINANCIAL", "INTERIM", "ANNUAL"]),
            appointment: count(&["APPOINTMENT"]),
        }
    }
}

#[must_use]
pub fn is_dividend(category: &AnnouncementCategory) -> bool {
    category.mentions("DIVIDEND")
}
