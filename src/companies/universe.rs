use std::path::Path;

use tracing::{debug, warn};

use crate::companies::model::CompanyRecord;
use crate::core::CseError;

/// How the roster file was found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniverseStatus {
    /// The file was read and parsed.
    Loaded,
    /// No file at the configured path.
    Missing,
    /// The file exists but could not be read or parsed.
    Malformed(String),
}

/// The locally cached company roster, used to resolve symbols and security ids offline.
#[derive(Debug, Clone)]
pub struct Universe {
    records: Vec<CompanyRecord>,
    status: UniverseStatus,
}

impl Universe {
    /// Reads the roster at `path`.
    ///
    /// A missing or malformed file yields an empty universe; check [`Universe::status`]
    /// to tell the user why there is nothing to process.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "company roster not found");
                return Self::empty(UniverseStatus::Missing);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "company roster unreadable");
                return Self::empty(UniverseStatus::Malformed(e.to_string()));
            }
        };

        match serde_json::from_slice::<Vec<CompanyRecord>>(&bytes) {
            Ok(records) => {
                debug!(path = %path.display(), count = records.len(), "company roster loaded");
                Self::from_records(records)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "company roster malformed");
                Self::empty(UniverseStatus::Malformed(e.to_string()))
            }
        }
    }

    /// Wraps an in-memory roster.
    #[must_use]
    pub fn from_records(records: Vec<CompanyRecord>) -> Self {
        Self {
            records,
            status: UniverseStatus::Loaded,
        }
    }

    fn empty(status: UniverseStatus) -> Self {
        Self {
            records: Vec::new(),
            status,
        }
    }

    #[must_use]
    pub fn status(&self) -> &UniverseStatus {
        &self.status
    }

    #[must_use]
    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<CompanyRecord> {
        self.records
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Companies whose symbol or name contains `term`, case-insensitively, in roster order.
    pub fn search<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a CompanyRecord> + 'a {
        let needle = term.trim().to_uppercase();
        self.records.iter().filter(move |c| {
            !needle.is_empty()
                && (c.symbol.to_uppercase().contains(&needle)
                    || c.name.to_uppercase().contains(&needle))
        })
    }

    /// Security id of the first company matching `term` by symbol or name.
    #[must_use]
    pub fn find_security_id(&self, term: &str) -> Option<i64> {
        self.search(term).next().map(|c| c.security_id)
    }

    #[must_use]
    pub fn by_security_id(&self, id: i64) -> Option<&CompanyRecord> {
        self.records.iter().find(|c| c.security_id == id)
    }

    #[must_use]
    pub fn by_symbol(&self, symbol: &str) -> Option<&CompanyRecord> {
        self.records
            .iter()
            .find(|c| c.symbol.eq_ignore_ascii_case(symbol.trim()))
    }
}

/// Writes `records` as the roster file, creating parent directories as needed.
///
/// # Errors
///
/// Returns `CseError::Io` or `CseError::Json` if the file cannot be written.
pub fn save(path: impl AsRef<Path>, records: &[CompanyRecord]) -> Result<(), CseError> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let body = serde_json::to_vec_pretty(records)?;
    std::fs::write(path, body)?;
    debug!(path = %path.display(), count = records.len(), "company roster saved");
    Ok(())
}
