// SPDX-License-Identifier: PMPL-1.0-or-later
//! HTTP fetch collaborator.
//!
//! Retrieves the raw HTML for a scan. Failures here are fatal for the scan
//! attempt: transport errors and HTTP statuses >= 400 surface as
//! [`ScanError`](crate::ScanError) and no issue list is produced. Retry
//! policy, if any, belongs to the caller.

use crate::{Result, ScanError};
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("a11y-scanner/", env!("CARGO_PKG_VERSION"));

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Blocking page fetcher with a fixed timeout.
pub struct PageFetcher {
    client: reqwest::blocking::Client,
}

impl PageFetcher {
    /// A fetcher with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(PageFetcher { client })
    }

    /// A fetcher with the default 30 second timeout.
    pub fn with_default_timeout() -> Result<Self> {
        PageFetcher::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Fetch a URL and return the response body as text.
    pub fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "fetching page");
        let response = self.client.get(url).send()?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(ScanError::HttpStatus(status.as_u16()));
        }

        Ok(response.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_builds() {
        assert!(PageFetcher::with_default_timeout().is_ok());
        assert!(PageFetcher::new(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_invalid_url_is_an_error() {
        let fetcher = PageFetcher::with_default_timeout().unwrap();
        assert!(fetcher.fetch("not a url").is_err());
    }
}
