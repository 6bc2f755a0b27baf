// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-process search backend over a JSON corpus.
//!
//! Used by the CLI, the benchmarks, and anywhere a real index is wanted
//! without a browser. The corpus is a JSON array of pages:
//!
//! ```json
//! [{"url": "/posts/rust/", "title": "Rust", "content": "...",
//!   "sections": [{"title": "Ownership", "anchor": "ownership", "text": "..."}]}]
//! ```
//!
//! Matching is deliberately simple: a page matches when every query term
//! occurs somewhere in it, after folding case and stripping diacritics, so
//! "cafe" finds "Café". Pages whose title contains more of the terms rank
//! first; ties keep corpus order.
//!
//! The debounce mirrors what browser indexes do: every call bumps a counter,
//! sleeps for the window, and only returns data if no newer call arrived.

use crate::backend::{BackendSource, ResultRef, SearchBackend};
use crate::error::{Result, SearchError};
use crate::markup::escape;
use crate::platform::Platform;
use crate::types::{ResultDetail, SubResult, UNTITLED};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, OnceCell};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;
use unicode_normalization::UnicodeNormalization;

/// Default debounce window.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Words in an excerpt.
const EXCERPT_WORDS: usize = 24;
/// Words of context kept before the first match.
const EXCERPT_LEAD: usize = 6;

// =============================================================================
// CORPUS
// =============================================================================

/// A heading-delimited section of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    /// Fragment id, without the `#`
    pub anchor: String,
    #[serde(default)]
    pub text: String,
}

/// One page of the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Counts reported by `searchlight check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusStats {
    pub pages: usize,
    pub sections: usize,
    pub untitled: usize,
}

impl CorpusStats {
    pub fn of(pages: &[Page]) -> Self {
        Self {
            pages: pages.len(),
            sections: pages.iter().map(|p| p.sections.len()).sum(),
            untitled: pages.iter().filter(|p| p.title.is_none()).count(),
        }
    }
}

/// Parse and validate a corpus.
pub fn parse_corpus(json: &str) -> Result<Vec<Page>> {
    let pages: Vec<Page> = serde_json::from_str(json)?;
    // URLs double as result ids
    let mut seen = HashSet::with_capacity(pages.len());
    for (i, page) in pages.iter().enumerate() {
        if page.url.is_empty() {
            return Err(SearchError::Corpus(format!("page {i} has an empty url")));
        }
        if !seen.insert(page.url.as_str()) {
            return Err(SearchError::Corpus(format!("duplicate url {}", page.url)));
        }
        if let Some(section) = page.sections.iter().find(|s| s.anchor.is_empty()) {
            return Err(SearchError::Corpus(format!(
                "section {:?} of {} has an empty anchor",
                section.title, page.url
            )));
        }
    }
    Ok(pages)
}

/// Read and validate a corpus file.
pub fn load_corpus(path: &Path) -> Result<Vec<Page>> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| SearchError::Load(format!("{}: {}", path.display(), e)))?;
    parse_corpus(&json)
}

/// Case- and diacritic-insensitive form of `text`.
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Supplement
        '\u{20D0}'..='\u{20FF}' |  // For Symbols
        '\u{FE20}'..='\u{FE2F}'    // Half Marks
    )
}

// =============================================================================
// SOURCE
// =============================================================================

enum Corpus {
    File(PathBuf),
    Pages(Rc<[Page]>),
}

/// Loads a [`MemoryIndex`] from a file or from pages already in memory.
pub struct MemorySource<P> {
    corpus: Corpus,
    platform: P,
    debounce: Duration,
}

impl<P: Platform> MemorySource<P> {
    /// Read the corpus from `path` when the index is loaded.
    pub fn from_path(path: impl Into<PathBuf>, platform: P) -> Self {
        Self {
            corpus: Corpus::File(path.into()),
            platform,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }

    pub fn from_pages(pages: Vec<Page>, platform: P) -> Self {
        Self {
            corpus: Corpus::Pages(pages.into()),
            platform,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }

    pub fn from_json(json: &str, platform: P) -> Result<Self> {
        Ok(Self::from_pages(parse_corpus(json)?, platform))
    }

    /// Override the debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

impl<P: Platform> BackendSource for MemorySource<P> {
    type Backend = MemoryIndex<P>;

    async fn load(&self) -> Result<MemoryIndex<P>> {
        let pages = match &self.corpus {
            Corpus::File(path) => load_corpus(path)?.into(),
            Corpus::Pages(pages) => Rc::clone(pages),
        };
        tracing::debug!(pages = pages.len(), "corpus loaded");
        Ok(MemoryIndex {
            pages,
            platform: self.platform.clone(),
            debounce: self.debounce,
            folded: OnceCell::new(),
            latest: Cell::new(0),
            executed: Cell::new(0),
        })
    }
}

// =============================================================================
// INDEX
// =============================================================================

struct FoldedPage {
    title: String,
    /// Content and every section, folded
    body: String,
}

/// A matched page. Its detail is built at search time.
#[derive(Debug, Clone)]
pub struct MemoryHit {
    id: String,
    detail: Rc<ResultDetail>,
}

impl ResultRef for MemoryHit {
    fn id(&self) -> &str {
        &self.id
    }

    async fn data(&self) -> Result<ResultDetail> {
        Ok(ResultDetail::clone(&self.detail))
    }
}

/// The in-memory index.
pub struct MemoryIndex<P> {
    pages: Rc<[Page]>,
    platform: P,
    debounce: Duration,
    folded: OnceCell<Vec<FoldedPage>>,
    latest: Cell<u64>,
    executed: Cell<usize>,
}

impl<P: Platform> MemoryIndex<P> {
    /// Number of searches that ran, i.e. survived the debounce.
    pub fn executed_searches(&self) -> usize {
        self.executed.get()
    }

    /// Search immediately, skipping the debounce.
    pub fn search(&self, query: &str) -> Result<Vec<MemoryHit>> {
        let folded = self
            .folded
            .get()
            .ok_or_else(|| SearchError::Query("index used before init".to_string()))?;
        self.executed.set(self.executed.get() + 1);

        let mut terms: Vec<String> = fold(query).split_whitespace().map(str::to_string).collect();
        terms.sort();
        terms.dedup();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut matches: Vec<(usize, usize)> = folded
            .iter()
            .enumerate()
            .filter(|(_, page)| {
                terms
                    .iter()
                    .all(|t| page.title.contains(t.as_str()) || page.body.contains(t.as_str()))
            })
            .map(|(i, page)| {
                let in_title = terms.iter().filter(|t| page.title.contains(t.as_str())).count();
                (i, in_title)
            })
            .collect();
        matches.sort_by_key(|&(i, in_title)| (Reverse(in_title), i));

        tracing::trace!(query, hits = matches.len(), "memory search");
        Ok(matches
            .into_iter()
            .map(|(i, _)| {
                let page = &self.pages[i];
                MemoryHit {
                    id: page.url.clone(),
                    detail: Rc::new(build_detail(page, &terms)),
                }
            })
            .collect())
    }
}

impl<P: Platform> SearchBackend for MemoryIndex<P> {
    type Hit = MemoryHit;

    async fn init(&self) -> Result<()> {
        self.folded.get_or_init(|| {
            self.pages
                .iter()
                .map(|page| {
                    let mut body = fold(&page.content);
                    for section in &page.sections {
                        body.push(' ');
                        body.push_str(&fold(&section.title));
                        body.push(' ');
                        body.push_str(&fold(&section.text));
                    }
                    FoldedPage {
                        title: page.title.as_deref().map(fold).unwrap_or_default(),
                        body,
                    }
                })
                .collect()
        });
        Ok(())
    }

    async fn preload(&self, _prefix: &str) -> Result<()> {
        Ok(())
    }

    fn debounced_search(&self, query: &str) -> impl Future<Output = Result<Option<Vec<MemoryHit>>>> {
        // Claimed at call time, not at first poll
        let call = self.latest.get() + 1;
        self.latest.set(call);
        let window = self.platform.sleep(self.debounce);
        let query = query.to_string();
        async move {
            window.await;
            if self.latest.get() != call {
                return Ok(None);
            }
            self.search(&query).map(Some)
        }
    }
}

fn build_detail(page: &Page, terms: &[String]) -> ResultDetail {
    let excerpt = excerpt(&page.content, terms);
    let mut sub_results = vec![SubResult {
        title: page.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
        url: page.url.clone(),
        excerpt: excerpt.clone(),
    }];
    for section in &page.sections {
        let haystack = fold(&format!("{} {}", section.title, section.text));
        if terms.iter().any(|t| haystack.contains(t.as_str())) {
            sub_results.push(SubResult {
                title: section.title.clone(),
                url: format!("{}#{}", page.url, section.anchor),
                excerpt: excerpt_or_title(&section.text, &section.title, terms),
            });
        }
    }
    ResultDetail {
        title: page.title.clone(),
        url: page.url.clone(),
        canonical: None,
        excerpt,
        sub_results,
    }
}

fn excerpt_or_title(text: &str, title: &str, terms: &[String]) -> String {
    if text.trim().is_empty() {
        excerpt(title, terms)
    } else {
        excerpt(text, terms)
    }
}

/// A window of `text` around its first match, matched words in `<mark>`.
pub fn excerpt(text: &str, terms: &[String]) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let marked: Vec<bool> = words
        .iter()
        .map(|word| {
            let folded = fold(word);
            terms.iter().any(|t| folded.contains(t.as_str()))
        })
        .collect();
    let first = marked.iter().position(|&m| m).unwrap_or(0);
    let start = first.saturating_sub(EXCERPT_LEAD);
    let end = (start + EXCERPT_WORDS).min(words.len());

    words[start..end]
        .iter()
        .zip(&marked[start..end])
        .map(|(word, &hit)| {
            if hit {
                format!("<mark>{}</mark>", escape(word))
            } else {
                escape(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
