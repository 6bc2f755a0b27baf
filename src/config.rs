// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search widget configuration.
//!
//! Every field has a default that matches the markup the blog theme ships, so
//! an empty object (`{}`) is a valid configuration. The same struct is read
//! from a JS options object in the browser and from a JSON file by the CLI.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Results shown per page.
pub const DEFAULT_RESULTS_PER_PAGE: usize = 5;

/// Delay before the loading hint appears. Shorter loads never flash it.
pub const DEFAULT_LOADING_DELAY_MS: u64 = 100;

/// Placeholder shown while the index is loading.
pub const DEFAULT_LOADING_PLACEHOLDER: &str = "Loading...";

/// Pagination and loader settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Results per page (must be non-zero)
    pub results_per_page: usize,
    /// Milliseconds to wait before showing the loading hint
    pub loading_delay_ms: u64,
    /// Placeholder text while the index loads
    pub loading_placeholder: String,
    /// Prefix passed to the backend's warm-up `preload()` call
    pub preload_prefix: String,
    /// DOM element identifiers
    pub elements: ElementIds,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            loading_delay_ms: DEFAULT_LOADING_DELAY_MS,
            loading_placeholder: DEFAULT_LOADING_PLACEHOLDER.to_string(),
            preload_prefix: String::new(),
            elements: ElementIds::default(),
        }
    }
}

impl SearchConfig {
    /// Parse a JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SearchConfig =
            serde_json::from_str(json).map_err(|e| SearchError::Config(e.to_string()))?;
        config.validate()
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(self) -> Result<Self> {
        if self.results_per_page == 0 {
            return Err(SearchError::Config(
                "resultsPerPage must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }

    /// Loading hint delay as a `Duration`.
    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }
}

/// Identifiers of the elements the widget binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub input: String,
    pub results_container: String,
    pub navigation_bar: String,
    pub open_button: String,
    pub search_area: String,
    pub clear_button: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            input: "search-input".to_string(),
            results_container: "search-results-container".to_string(),
            navigation_bar: "navigation-bar".to_string(),
            open_button: "search-open".to_string(),
            search_area: "search-area".to_string(),
            clear_button: "search-clear".to_string(),
        }
    }
}
