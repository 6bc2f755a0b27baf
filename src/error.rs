// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for the search pipeline.
//!
//! Every variant carries a rendered message rather than a source error. The
//! loader memoizes its outcome and hands the same `Result` to every caller, so
//! errors have to be `Clone`, and JS errors don't implement `std::error::Error`
//! anyway.
//!
//! Stale results are not errors. A superseded query comes back as `None` and a
//! superseded render pass is dropped silently.

use thiserror::Error;

/// Errors surfaced by the loader, the backend, and configuration parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The backend module could not be fetched or evaluated.
    #[error("failed to load search index: {0}")]
    Load(String),

    /// The backend loaded but `init()` rejected.
    #[error("search index failed to initialize: {0}")]
    Init(String),

    /// The warm-up `preload()` call rejected.
    #[error("search index preload failed: {0}")]
    Preload(String),

    /// `debounced_search()` rejected.
    #[error("search query failed: {0}")]
    Query(String),

    /// A result's `data()` fetch rejected or returned something unreadable.
    #[error("failed to fetch result detail: {0}")]
    Detail(String),

    /// Configuration was malformed or out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An in-memory corpus could not be read or parsed.
    #[error("malformed corpus: {0}")]
    Corpus(String),
}

/// Result type for search pipeline operations.
pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// True for failures that happen before the backend is usable.
    ///
    /// These leave the loader permanently failed for the page's lifetime.
    pub fn is_initialization(&self) -> bool {
        matches!(self, SearchError::Load(_) | SearchError::Init(_))
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Corpus(err.to_string())
    }
}
