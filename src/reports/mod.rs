//! Downloading the attachments of financial announcements.
//!
//! Each attachment is fetched from the CDN and saved as
//! `{name}_{symbol}_{file text}_{YYYYMMDD_HHMMSS}{ext}` inside a per-batch folder.
//! Downloads run one at a time with a fixed pause; a failed download is logged and the
//! batch moves on.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    announcements::FinancialAnnouncement,
    core::{CseClient, CseError},
    export,
    fetch::{FetchObserver, Silent},
};

/// Pause between downloads unless overridden.
pub const DEFAULT_DOWNLOAD_DELAY: Duration = Duration::from_secs(1);

const DEFAULT_EXTENSION: &str = ".pdf";

/// Replaces characters that are invalid in file names (`< > : " / \ | ? *`) with `_`.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            other => other,
        })
        .collect()
}

/// Result of downloading one attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadOutcome {
    pub announcement_id: Option<i64>,
    pub company_name: String,
    pub symbol: String,
    pub file_text: Option<String>,
    pub uploaded_date: Option<String>,
    pub url: Option<String>,
    pub success: bool,
    pub filename: Option<String>,
    pub local_path: Option<PathBuf>,
    pub file_size: Option<u64>,
    pub error: Option<String>,
}

impl DownloadOutcome {
    fn pending(ann: &FinancialAnnouncement) -> Self {
        Self {
            announcement_id: ann.id,
            company_name: ann.name.clone(),
            symbol: ann.symbol.clone(),
            file_text: ann.file_text.clone(),
            uploaded_date: ann.uploaded_date.clone(),
            url: None,
            success: false,
            filename: None,
            local_path: None,
            file_size: None,
            error: None,
        }
    }
}

/// Every outcome of one batch, in announcement order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadLog {
    pub folder: PathBuf,
    pub outcomes: Vec<DownloadOutcome>,
}

impl DownloadLog {
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Saves the outcomes as a JSON array at `path`.
    ///
    /// # Errors
    ///
    /// Returns `CseError::Io` or `CseError::Json` if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), CseError> {
        export::write_json(path, &self.outcomes)
    }
}

/// Downloads financial report attachments into a reports directory.
#[derive(Debug, Clone)]
pub struct ReportDownloader {
    client: CseClient,
    reports_dir: PathBuf,
    delay: Duration,
}

impl ReportDownloader {
    /// A downloader saving under `reports_dir`, attachments resolved against the client's CDN base.
    pub fn new(client: &CseClient, reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: client.clone(),
            reports_dir: reports_dir.into(),
            delay: DEFAULT_DOWNLOAD_DELAY,
        }
    }

    /// Pause between consecutive downloads. Default: one second.
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    /// Full URL of an attachment path.
    ///
    /// # Errors
    ///
    /// Returns `CseError::Url` if `path` does not form a valid URL.
    pub fn url_for(&self, path: &str) -> Result<Url, CseError> {
        Ok(self.client.base_cdn().join(path.trim_start_matches('/'))?)
    }

    /// Downloads every attachment into `{reports_dir}/{folder_name}`.
    pub async fn download_all(&self, folder_name: &str, announcements: &[FinancialAnnouncement]) -> DownloadLog {
        self.download_all_observed(folder_name, announcements, &mut Silent)
            .await
    }

    /// [`ReportDownloader::download_all`] with progress reporting.
    #[tracing::instrument(skip(self, announcements, observer), fields(count = announcements.len()))]
    pub async fn download_all_observed<O: FetchObserver + ?Sized>(
        &self,
        folder_name: &str,
        announcements: &[FinancialAnnouncement],
        observer: &mut O,
    ) -> DownloadLog {
        let folder = self.reports_dir.join(sanitize_filename(folder_name));
        let mut log = DownloadLog {
            folder: folder.clone(),
            outcomes: Vec::with_capacity(announcements.len()),
        };
        let total = announcements.len();
        observer.on_start(total);

        if let Err(e) = tokio::fs::create_dir_all(&folder).await {
            warn!(folder = %folder.display(), error = %e, "cannot create download folder");
        }

        for (i, ann) in announcements.iter().enumerate() {
            let mut outcome = DownloadOutcome::pending(ann);
            match self.download_one(ann, &folder, &mut outcome).await {
                Ok(()) => observer.on_success(&ann.symbol),
                Err(e) => {
                    warn!(symbol = %ann.symbol, error = %e, "download failed");
                    observer.on_failure(&ann.symbol, &e);
                    outcome.error = Some(e.to_string());
                }
            }
            log.outcomes.push(outcome);

            if i + 1 < total && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        observer.on_finish();
        info!(
            folder = %folder.display(),
            succeeded = log.succeeded(),
            failed = log.failed(),
            "downloads finished"
        );
        log
    }

    /// Where the log of a batch named `folder_name` goes: next to the batch folder.
    #[must_use]
    pub fn log_path(&self, folder_name: &str) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        self.reports_dir.join(format!(
            "download_log_{}_{stamp}.json",
            sanitize_filename(folder_name)
        ))
    }

    async fn download_one(
        &self,
        ann: &FinancialAnnouncement,
        folder: &Path,
        outcome: &mut DownloadOutcome,
    ) -> Result<(), CseError> {
        let path = ann
            .path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| CseError::InvalidParams("announcement has no attachment path".into()))?;
        let url = self.url_for(path)?;
        outcome.url = Some(url.to_string());

        let resp = self.client.http().get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CseError::from_status(status.as_u16(), url.as_str()));
        }
        let bytes = resp.bytes().await?;

        let filename = attachment_filename(ann, path);
        let local = folder.join(&filename);
        tokio::fs::write(&local, &bytes).await?;
        debug!(file = %local.display(), bytes = bytes.len(), "saved attachment");

        outcome.success = true;
        outcome.file_size = Some(bytes.len() as u64);
        outcome.filename = Some(filename);
        outcome.local_path = Some(local);
        Ok(())
    }
}

fn attachment_filename(ann: &FinancialAnnouncement, path: &str) -> String {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map_or_else(|| DEFAULT_EXTENSION.to_string(), |e| format!(".{e}"));
    format!(
        "{}_{}_{}_{}{}",
        sanitize_filename(&ann.name),
        ann.symbol,
        sanitize_filename(ann.file_text.as_deref().unwrap_or("report")),
        Local::now().format("%Y%m%d_%H%M%S"),
        ext
    )
}

/* ---------------- Selection ---------------- */

/// The first `n` announcements.
#[must_use]
pub fn first(announcements: Vec<FinancialAnnouncement>, n: usize) -> Vec<FinancialAnnouncement> {
    announcements.into_iter().take(n).collect()
}

/// Announcements whose company name contains `keyword`, case-insensitively.
#[must_use]
pub fn with_company_keyword(
    announcements: Vec<FinancialAnnouncement>,
    keyword: &str,
) -> Vec<FinancialAnnouncement> {
    let needle = keyword.trim().to_lowercase();
    announcements
        .into_iter()
        .filter(|a| a.name.to_lowercase().contains(&needle))
        .collect()
}

/// Announcements whose symbol contains any of `symbols` (e.g. `LOLC` matches `LOLC.N0000`).
#[must_use]
pub fn for_symbols<S: AsRef<str>>(
    announcements: Vec<FinancialAnnouncement>,
    symbols: &[S],
) -> Vec<FinancialAnnouncement> {
    let wanted: Vec<String> = symbols
        .iter()
        .map(|s| s.as_ref().trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    announcements
        .into_iter()
        .filter(|a| {
            let sym = a.symbol.to_uppercase();
            wanted.iter().any(|w| sym.contains(w.as_str()))
        })
        .collect()
}
