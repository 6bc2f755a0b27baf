// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search index as seen from the widget: a black box with four calls.
//!
//! ```text
//! BackendSource::load()            dynamic import of the index module
//!   └─▶ SearchBackend::init()      one-time setup
//!        ├─▶ preload(prefix)       warm-up, gates the loading hint
//!        └─▶ debounced_search(q)   Some(hits) | None (superseded)
//!                 └─▶ ResultRef::data()   per-hit fragment fetch
//! ```
//!
//! Everything is single-threaded, so futures are not `Send` and handles are
//! shared through `Rc`. Implementations live in [`crate::memory`] (native,
//! in-process) and `runtime::wasm` (Pagefind over JS interop).

use crate::error::Result;
use crate::types::ResultDetail;
use std::future::Future;

/// A lightweight reference to one search hit.
pub trait ResultRef: 'static {
    /// Stable identifier, used as the render key.
    fn id(&self) -> &str;

    /// Fetch the display payload for this hit.
    fn data(&self) -> impl Future<Output = Result<ResultDetail>>;
}

/// An initialized search index.
pub trait SearchBackend: 'static {
    type Hit: ResultRef;

    /// One-time initialization. Called exactly once per page.
    fn init(&self) -> impl Future<Output = Result<()>>;

    /// Warm caches for queries starting with `prefix`.
    ///
    /// The loading hint stays up until this resolves, because `init()` alone
    /// may return before the index is actually usable.
    fn preload(&self, prefix: &str) -> impl Future<Output = Result<()>>;

    /// Run `query` after the backend's debounce window.
    ///
    /// Returns `Ok(None)` when a newer call arrived before this one ran. Only
    /// the latest call in a burst resolves with data.
    fn debounced_search(&self, query: &str) -> impl Future<Output = Result<Option<Vec<Self::Hit>>>>;
}

/// Loads the backend module. Called at most once.
pub trait BackendSource: 'static {
    type Backend: SearchBackend;

    fn load(&self) -> impl Future<Output = Result<Self::Backend>>;
}
