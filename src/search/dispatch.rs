// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query dispatch: input text in, result-store writes out.
//!
//! Debouncing belongs to the backend. Its `debounced_search` resolves with
//! `None` for every call that a newer call superseded, and the dispatcher just
//! ignores those. The one case the backend cannot see is the input being
//! cleared, because a clear never reaches the backend. So each dispatch takes
//! a sequence number, and a completion only writes the store if no dispatch
//! (query or clear) has happened since.

use crate::backend::{BackendSource, SearchBackend};
use crate::error::Result;
use crate::platform::Platform;
use crate::search::loader::LazyIndexLoader;
use crate::search::store::ResultStore;
use std::cell::Cell;
use std::rc::Rc;

/// Hit type produced by a source's backend.
pub type HitOf<S> = <<S as BackendSource>::Backend as SearchBackend>::Hit;

/// What became of one dispatched query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// Hits were written to the store
    Stored,
    /// The backend reported the call as superseded
    Superseded,
    /// A newer dispatch happened while this one was in flight
    Stale,
}

/// Forwards input text to the backend.
pub struct QueryDispatcher<S: BackendSource, P> {
    loader: Rc<LazyIndexLoader<S, P>>,
    store: Rc<ResultStore<HitOf<S>>>,
    platform: P,
    sequence: Rc<Cell<u64>>,
}

impl<S: BackendSource, P: Platform> QueryDispatcher<S, P> {
    pub fn new(
        loader: Rc<LazyIndexLoader<S, P>>,
        store: Rc<ResultStore<HitOf<S>>>,
        platform: P,
    ) -> Self {
        Self {
            loader,
            store,
            platform,
            sequence: Rc::new(Cell::new(0)),
        }
    }

    /// Handle new input text. Fire-and-forget.
    ///
    /// Empty text clears the store synchronously without touching the backend.
    pub fn dispatch(&self, text: &str) {
        let sequence = self.advance();
        if text.is_empty() {
            self.store.clear();
            return;
        }

        let loader = Rc::clone(&self.loader);
        let store = Rc::clone(&self.store);
        let latest = Rc::clone(&self.sequence);
        let query = text.to_string();
        self.platform.spawn_local(async move {
            match run_query(&loader, &store, &latest, sequence, &query).await {
                Ok(outcome) => tracing::trace!(?outcome, %query, "query settled"),
                Err(err) => tracing::warn!(%err, %query, "search failed"),
            }
        });
    }

    /// Clear the store, invalidating any query still in flight.
    pub fn clear(&self) {
        self.advance();
        self.store.clear();
    }

    fn advance(&self) -> u64 {
        let next = self.sequence.get() + 1;
        self.sequence.set(next);
        next
    }
}

async fn run_query<S: BackendSource, P: Platform>(
    loader: &LazyIndexLoader<S, P>,
    store: &ResultStore<HitOf<S>>,
    latest: &Cell<u64>,
    sequence: u64,
    query: &str,
) -> Result<Dispatched> {
    let backend = loader.ensure_loaded().await?;
    let Some(hits) = backend.debounced_search(query).await? else {
        return Ok(Dispatched::Superseded);
    };
    if latest.get() != sequence {
        return Ok(Dispatched::Stale);
    }
    store.set(hits);
    Ok(Dispatched::Stored)
}
