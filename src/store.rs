// SPDX-License-Identifier: PMPL-1.0-or-later
//! Persistence collaborator for finished scans.
//!
//! The scanner itself never retains state across scans; a completed
//! [`ScanResult`] is handed off wholesale to a [`ScanStore`]. The store
//! assigns ids to the scan and to each issue, and tracks the issue
//! lifecycle: every issue starts `open` and may move to `fixed` or
//! `ignored` exactly once.

use crate::result::ScanResult;
use crate::{Result, ScanError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Issue lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Open,
    Fixed,
    Ignored,
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueStatus::Open => write!(f, "open"),
            IssueStatus::Fixed => write!(f, "fixed"),
            IssueStatus::Ignored => write!(f, "ignored"),
        }
    }
}

/// An issue as persisted: the in-memory record plus store-assigned identity
/// and status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredIssue {
    pub id: Uuid,
    pub status: IssueStatus,
    #[serde(flatten)]
    pub issue: crate::issue::Issue,
}

/// A scan as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredScan {
    pub id: Uuid,
    pub url: String,
    pub score: u8,
    pub critical_count: usize,
    pub serious_count: usize,
    pub moderate_count: usize,
    pub minor_count: usize,
    pub total_issues: usize,
    pub duration_seconds: f64,
    pub completed_at: DateTime<Utc>,
    pub issues: Vec<StoredIssue>,
}

/// Persistence interface handed a completed scan.
pub trait ScanStore {
    /// Persist a scan result, returning its assigned id.
    fn save_scan(&mut self, result: &ScanResult) -> Result<Uuid>;

    /// Load a previously saved scan.
    fn load_scan(&self, scan_id: Uuid) -> Result<StoredScan>;

    /// Transition an issue from `open` to `fixed` or `ignored`. Any other
    /// transition is rejected.
    fn set_issue_status(&mut self, scan_id: Uuid, issue_id: Uuid, status: IssueStatus)
        -> Result<()>;
}

/// File-backed store: one JSON document per scan under a base directory.
pub struct JsonStore {
    base_path: PathBuf,
}

impl JsonStore {
    /// A store rooted at the given directory (created on first save).
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        JsonStore {
            base_path: base_path.into(),
        }
    }

    fn scan_path(&self, scan_id: Uuid) -> PathBuf {
        self.base_path.join(format!("{scan_id}.json"))
    }

    fn write_scan(&self, scan: &StoredScan) -> Result<()> {
        std::fs::create_dir_all(&self.base_path)?;
        let json = serde_json::to_string_pretty(scan)?;
        std::fs::write(self.scan_path(scan.id), json)?;
        Ok(())
    }

    fn read_scan(&self, path: &Path, scan_id: Uuid) -> Result<StoredScan> {
        let raw = std::fs::read_to_string(path)
            .map_err(|_| ScanError::ScanNotFound(scan_id))?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl ScanStore for JsonStore {
    fn save_scan(&mut self, result: &ScanResult) -> Result<Uuid> {
        let scan_id = Uuid::new_v4();
        let scan = StoredScan {
            id: scan_id,
            url: result.url.clone(),
            score: result.score,
            critical_count: result.critical_count,
            serious_count: result.serious_count,
            moderate_count: result.moderate_count,
            minor_count: result.minor_count,
            total_issues: result.total_issues(),
            duration_seconds: result.duration_seconds,
            completed_at: result.completed_at,
            issues: result
                .issues
                .iter()
                .map(|issue| StoredIssue {
                    id: Uuid::new_v4(),
                    status: IssueStatus::Open,
                    issue: issue.clone(),
                })
                .collect(),
        };

        self.write_scan(&scan)?;
        debug!(scan_id = %scan_id, url = %scan.url, "saved scan");
        Ok(scan_id)
    }

    fn load_scan(&self, scan_id: Uuid) -> Result<StoredScan> {
        self.read_scan(&self.scan_path(scan_id), scan_id)
    }

    fn set_issue_status(
        &mut self,
        scan_id: Uuid,
        issue_id: Uuid,
        status: IssueStatus,
    ) -> Result<()> {
        let mut scan = self.load_scan(scan_id)?;

        let issue = scan
            .issues
            .iter_mut()
            .find(|i| i.id == issue_id)
            .ok_or(ScanError::IssueNotFound(issue_id))?;

        if issue.status != IssueStatus::Open || status == IssueStatus::Open {
            return Err(ScanError::InvalidTransition {
                from: issue.status,
                to: status,
            });
        }

        issue.status = status;
        self.write_scan(&scan)?;
        debug!(scan_id = %scan_id, issue_id = %issue_id, status = %status, "issue status updated");
        Ok(())
    }
}
