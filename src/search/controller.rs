// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One search widget, wired up.
//!
//! The controller owns the loader, store, dispatcher, renderer, and chrome for
//! a page and exposes one method per DOM event. The browser runtime turns
//! events into these calls; tests call them directly.

use crate::backend::BackendSource;
use crate::config::SearchConfig;
use crate::error::Result;
use crate::platform::Platform;
use crate::search::chrome::ChromeController;
use crate::search::dispatch::{HitOf, QueryDispatcher};
use crate::search::loader::{LazyIndexLoader, LoadState};
use crate::search::pagination::PageState;
use crate::search::render::{PaginatedRenderer, ResultsView};
use crate::search::store::ResultStore;
use crate::view::{Elements, InputElement};
use std::cell::Cell;
use std::rc::Rc;

/// The search widget for one page.
pub struct SearchController<S: BackendSource, P> {
    input: Rc<dyn InputElement>,
    loader: Rc<LazyIndexLoader<S, P>>,
    store: Rc<ResultStore<HitOf<S>>>,
    dispatcher: QueryDispatcher<S, P>,
    renderer: Rc<PaginatedRenderer<HitOf<S>, P>>,
    chrome: ChromeController,
    focused_once: Cell<bool>,
}

impl<S: BackendSource, P: Platform> SearchController<S, P> {
    /// Build the widget and prepare the page.
    ///
    /// The input ships disabled until the widget runs, and browsers restore
    /// form values across reloads, so it is enabled and emptied here.
    pub fn mount(source: S, platform: P, elements: Elements, config: &SearchConfig) -> Rc<Self> {
        let input = Rc::clone(&elements.input);
        let loader = Rc::new(LazyIndexLoader::new(
            source,
            platform.clone(),
            Rc::clone(&input),
            config,
        ));
        let store = Rc::new(ResultStore::new());
        let dispatcher = QueryDispatcher::new(Rc::clone(&loader), Rc::clone(&store), platform.clone());
        let renderer = PaginatedRenderer::new(
            Rc::clone(&store),
            elements.results.clone(),
            platform,
            config.results_per_page,
        );
        let chrome = ChromeController::new(&elements);

        input.set_enabled(true);
        input.set_value("");
        chrome.update_clear_visibility();
        tracing::debug!(per_page = config.results_per_page, "search widget mounted");

        Rc::new(Self {
            input,
            loader,
            store,
            dispatcher,
            renderer,
            chrome,
            focused_once: Cell::new(false),
        })
    }

    /// The input's text changed.
    pub fn on_input(&self) {
        self.chrome.update_clear_visibility();
        self.dispatcher.dispatch(&self.input.value());
    }

    /// The input gained focus. Only the first focus pre-warms the index.
    pub fn on_focus(&self) {
        if self.focused_once.replace(true) {
            return;
        }
        self.loader.prewarm();
    }

    /// The mobile open button was clicked.
    pub fn on_open_toggle(&self) {
        if self.chrome.toggle_open() {
            self.loader.prewarm();
        }
    }

    /// The clear button was clicked.
    pub fn on_clear(&self) {
        self.chrome.reset();
        self.dispatcher.clear();
    }

    /// Returns whether a different page was requested.
    pub fn on_previous_page(&self) -> bool {
        self.renderer.previous_page()
    }

    /// Returns whether a different page was requested.
    pub fn on_next_page(&self) -> bool {
        self.renderer.next_page()
    }

    /// The page-number input changed to `raw`. Returns whether a different
    /// page was requested.
    pub fn on_page_input(&self, raw: &str) -> bool {
        self.renderer.jump_to_page(raw)
    }

    /// The navigation bar's border-box block size changed.
    pub fn on_navigation_resize(&self, block_size: f64) {
        self.chrome.sync_results_offset(block_size);
    }

    /// Load the index now and wait for it, for headless callers.
    pub async fn ready(&self) -> Result<()> {
        self.loader.ensure_loaded().await.map(drop)
    }

    pub fn load_state(&self) -> LoadState {
        self.loader.state()
    }

    pub fn page_state(&self) -> PageState {
        self.renderer.page_state()
    }

    /// Last painted results, `None` when nothing is shown.
    pub fn current_view(&self) -> Option<ResultsView> {
        self.renderer.current_view()
    }

    /// Number of hits in the current result set.
    pub fn result_count(&self) -> Option<usize> {
        self.store.current().map(|set| set.len())
    }
}
