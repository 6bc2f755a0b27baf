// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lazy index loading.
//!
//! The index is big enough that we don't want to fetch it for readers who
//! never search, so nothing happens until the first focus or keystroke. Then:
//!
//! 1. `load()` + `init()` run once. Every concurrent `ensure_loaded()` call
//!    awaits the same initialization through a `OnceCell`.
//! 2. A loading hint (placeholder text plus a loading style) is scheduled
//!    `loading_delay` out. If initialization settles first the hint never
//!    appears, so fast connections don't get a distracting flicker.
//! 3. After `init()`, a background `preload()` warms the index. `init()` can
//!    return before the index is actually usable, so the hint is only taken
//!    down once the preload settles.
//!
//! A failed initialization is memoized like a successful one: every caller
//! gets the same error and nothing is retried. The hint is reverted right
//! away, so the input never says "Loading..." forever.

use crate::backend::{BackendSource, SearchBackend};
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::platform::Platform;
use crate::view::InputElement;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Where the loader is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nobody has asked for the index yet
    Idle,
    /// `load()`/`init()` in flight
    Initializing,
    /// Backend usable (preload may still be running)
    Ready,
    /// Initialization failed; permanent for this page
    Failed(SearchError),
}

/// Memoizing loader for the search backend.
pub struct LazyIndexLoader<S: BackendSource, P> {
    source: Rc<S>,
    platform: P,
    input: Rc<dyn InputElement>,
    loading_delay: Duration,
    loading_placeholder: String,
    preload_prefix: String,
    backend: OnceCell<Result<Rc<S::Backend>>>,
    started: Cell<bool>,
    /// Set once `load()`/`init()` settle; cancels the pending hint
    settled: Rc<Cell<bool>>,
    preloaded: Rc<Cell<bool>>,
}

impl<S: BackendSource, P: Platform> LazyIndexLoader<S, P> {
    pub fn new(source: S, platform: P, input: Rc<dyn InputElement>, config: &SearchConfig) -> Self {
        Self {
            source: Rc::new(source),
            platform,
            input,
            loading_delay: config.loading_delay(),
            loading_placeholder: config.loading_placeholder.clone(),
            preload_prefix: config.preload_prefix.clone(),
            backend: OnceCell::new(),
            started: Cell::new(false),
            settled: Rc::new(Cell::new(false)),
            preloaded: Rc::new(Cell::new(false)),
        }
    }

    /// Get the backend, initializing it on first use.
    pub async fn ensure_loaded(&self) -> Result<Rc<S::Backend>> {
        self.backend
            .get_or_init(|| self.initialize())
            .await
            .clone()
    }

    /// Start loading in the background, e.g. when the input gains focus.
    pub fn prewarm(self: &Rc<Self>) {
        let loader = Rc::clone(self);
        self.platform.spawn_local(async move {
            if let Err(err) = loader.ensure_loaded().await {
                tracing::trace!(%err, "prewarm found search index unavailable");
            }
        });
    }

    pub fn state(&self) -> LoadState {
        if !self.started.get() {
            return LoadState::Idle;
        }
        match self.backend.get() {
            None => LoadState::Initializing,
            Some(Ok(_)) => LoadState::Ready,
            Some(Err(err)) => LoadState::Failed(err.clone()),
        }
    }

    /// Whether the warm-up preload has settled.
    pub fn is_preloaded(&self) -> bool {
        self.preloaded.get()
    }

    async fn initialize(&self) -> Result<Rc<S::Backend>> {
        self.started.set(true);
        let original = self.input.placeholder();
        self.schedule_loading_hint();

        tracing::debug!("loading search index");
        let outcome = self.load_and_init().await;
        self.settled.set(true);

        match &outcome {
            Ok(backend) => {
                tracing::debug!("search index initialized");
                self.spawn_preload(Rc::clone(backend), original);
            }
            Err(err) => {
                tracing::warn!(%err, "search index unavailable");
                restore_placeholder(self.input.as_ref(), original.as_deref());
            }
        }
        outcome
    }

    async fn load_and_init(&self) -> Result<Rc<S::Backend>> {
        let backend = self.source.load().await?;
        backend.init().await?;
        Ok(Rc::new(backend))
    }

    fn schedule_loading_hint(&self) {
        let delay = self.platform.sleep(self.loading_delay);
        let settled = Rc::clone(&self.settled);
        let input = Rc::clone(&self.input);
        let text = self.loading_placeholder.clone();
        self.platform.spawn_local(async move {
            delay.await;
            if settled.get() {
                return;
            }
            input.set_placeholder(Some(&text));
            input.set_loading(true);
        });
    }

    fn spawn_preload(&self, backend: Rc<S::Backend>, original: Option<String>) {
        let input = Rc::clone(&self.input);
        let prefix = self.preload_prefix.clone();
        let preloaded = Rc::clone(&self.preloaded);
        self.platform.spawn_local(async move {
            if let Err(err) = backend.preload(&prefix).await {
                tracing::warn!(%err, "search index preload failed");
            }
            preloaded.set(true);
            restore_placeholder(input.as_ref(), original.as_deref());
            tracing::debug!("search index ready");
        });
    }
}

fn restore_placeholder(input: &dyn InputElement, original: Option<&str>) {
    input.set_placeholder(original);
    input.set_loading(false);
}
