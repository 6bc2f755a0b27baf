// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The data that flows from the index to the page.
//!
//! A query produces a [`ResultSet`] of lightweight hit references. Only the hits
//! on the visible page are resolved into [`ResultDetail`]s, because fetching a
//! detail means downloading a fragment.
//!
//! # Invariants
//!
//! - **ResultSet**: immutable once built. A new query supersedes it wholesale,
//!   and its [`Generation`] identifies it without comparing contents.
//! - **ResultDetail**: `canonical_url()` is `meta.url` when present, else `url`.
//!   The sub-result de-duplication heuristic compares against it.

use serde::{Deserialize, Serialize};

/// Fallback title for pages without a `title` meta field.
pub const UNTITLED: &str = "No Title";

// =============================================================================
// IDENTITY
// =============================================================================

/// Identity tag of a result-store write.
///
/// Every write to the store (a new result set or a clear) gets a fresh
/// generation. Render passes remember the generation they started from and
/// compare at completion, so a slow fetch can never paint a superseded set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation before any write.
    pub const INITIAL: Generation = Generation(0);

    /// The generation after this one.
    #[inline]
    pub fn next(self) -> Generation {
        Generation(self.0 + 1)
    }

    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

// =============================================================================
// RESULT SETS
// =============================================================================

/// An ordered set of hit references produced by one query.
#[derive(Debug)]
pub struct ResultSet<H> {
    generation: Generation,
    hits: Vec<H>,
}

impl<H> ResultSet<H> {
    /// Wrap hits under the given generation.
    pub fn new(generation: Generation, hits: Vec<H>) -> Self {
        Self { generation, hits }
    }

    /// Identity of this set.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// All hits, in ranked order.
    pub fn hits(&self) -> &[H] {
        &self.hits
    }

    /// Number of hits across all pages.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

// =============================================================================
// RESOLVED DETAILS
// =============================================================================

/// A section of a matched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubResult {
    pub title: String,
    pub url: String,
    /// Trusted HTML (highlight markup from the index)
    pub excerpt: String,
}

/// The display payload of a hit.
///
/// Deserializes from the fragment shape Pagefind emits:
///
/// ```json
/// {"url": "/posts/a/", "excerpt": "...", "meta": {"title": "A"},
///  "sub_results": [{"title": "A", "url": "/posts/a/", "excerpt": "..."}]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDetail", into = "RawDetail")]
pub struct ResultDetail {
    /// Page title, if the page declared one
    pub title: Option<String>,
    /// Link target for the result
    pub url: String,
    /// Canonical URL override (`meta.url`)
    pub canonical: Option<String>,
    /// Trusted HTML (highlight markup from the index)
    pub excerpt: String,
    pub sub_results: Vec<SubResult>,
}

impl ResultDetail {
    /// URL the root document is known by.
    pub fn canonical_url(&self) -> &str {
        self.canonical
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(&self.url)
    }

    /// Title to display, falling back to [`UNTITLED`].
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawDetail {
    url: String,
    #[serde(default)]
    excerpt: String,
    #[serde(default)]
    meta: RawMeta,
    #[serde(default)]
    sub_results: Vec<SubResult>,
}

impl From<RawDetail> for ResultDetail {
    fn from(raw: RawDetail) -> Self {
        ResultDetail {
            title: raw.meta.title,
            url: raw.url,
            canonical: raw.meta.url,
            excerpt: raw.excerpt,
            sub_results: raw.sub_results,
        }
    }
}

impl From<ResultDetail> for RawDetail {
    fn from(detail: ResultDetail) -> Self {
        RawDetail {
            url: detail.url,
            excerpt: detail.excerpt,
            meta: RawMeta {
                title: detail.title,
                url: detail.canonical,
            },
            sub_results: detail.sub_results,
        }
    }
}
