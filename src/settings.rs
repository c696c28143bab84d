// SPDX-License-Identifier: PMPL-1.0-or-later
//! Scanner settings.
//!
//! Supplied by the host: which checks to skip and how long the fetcher may
//! wait. The scanner treats these as opaque input; unknown check ids in the
//! ignored set are tolerated.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Check ids excluded from scans.
    pub ignored_checks: BTreeSet<String>,
    /// Fetch timeout in seconds.
    pub scan_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            ignored_checks: BTreeSet::new(),
            scan_timeout_secs: crate::fetch::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Fetch timeout as a duration.
    pub fn scan_timeout(&self) -> Duration {
        Duration::from_secs(self.scan_timeout_secs)
    }
}
