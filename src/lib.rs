// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lazy, debounced, paginated search results for static sites.
//!
//! The site ships a prebuilt index (Pagefind or compatible). This crate is the
//! part that runs on the page: it loads the index on first interaction, feeds
//! it keystrokes, and paints one page of resolved results at a time without
//! ever showing results for a query the reader has already moved past.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  dispatch    │──▶│   loader     │──▶│   backend    │──▶│    store     │
//! │ (input text) │   │ (once, hint) │   │ (debounced)  │   │ (generation) │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────┬───────┘
//!                                                                 │ notify
//! ┌──────────────┐                      ┌──────────────┐          ▼
//! │    chrome    │                      │    panel     │◀──┌──────────────┐
//! │ (open/clear) │                      │  (view.rs)   │   │    render    │
//! └──────────────┘                      └──────────────┘   │ (page, data) │
//!                                                          └──────────────┘
//! ```
//!
//! Everything is single-threaded and callback-driven. The backend, the DOM and
//! the executor sit behind traits ([`SearchBackend`], [`view`], [`Platform`]),
//! so the whole pipeline runs natively under Tokio in tests and the CLI, and
//! in the browser through `runtime::wasm`.
//!
//! # Usage
//!
//! ```ignore
//! use searchlight::{MemorySource, SearchConfig, SearchController, TokioPlatform};
//!
//! let source = MemorySource::from_path("corpus.json", TokioPlatform);
//! let widget = SearchController::mount(source, TokioPlatform, elements, &SearchConfig::default());
//! widget.on_input();
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod markup;
pub mod memory;
pub mod platform;
pub mod runtime;
pub mod search;
pub mod testing;
pub mod types;
pub mod view;

// Re-exports for public API
pub use backend::{BackendSource, ResultRef, SearchBackend};
pub use config::{ElementIds, SearchConfig};
pub use error::{Result, SearchError};
pub use markup::render_html;
pub use memory::{MemoryHit, MemoryIndex, MemorySource, Page, Section};
#[cfg(feature = "native")]
pub use platform::TokioPlatform;
pub use platform::Platform;
pub use search::controller::SearchController;
pub use search::loader::{LazyIndexLoader, LoadState};
pub use search::pagination::PageState;
pub use search::render::{Pagination, RenderedHit, ResultsBody, ResultsView};
pub use types::{Generation, ResultDetail, ResultSet, SubResult};
pub use view::{ClassSwitch, Elements, InputElement, ResultsPanel};
