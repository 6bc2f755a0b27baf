// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The paginated renderer: store contents in, one page of resolved results out.
//!
//! Every store write and every page change starts a *render pass*:
//!
//! ```text
//! store.current() ──▶ reset? (generation changed) ──▶ page = 1 or current page
//!        │
//!        ▼
//! slice [(page-1)*n, page*n) ──▶ data() for each hit, concurrently, all-or-nothing
//!        │
//!        ▼
//! newest ticket ∧ generation still current? ──▶ commit page, paint
//!                          └── otherwise ──▶ drop silently
//! ```
//!
//! Navigation only moves the *requested* page. The page on screen changes when
//! a pass paints, so a failed fetch leaves both the output and the page number
//! where they were. If the failed pass was the first for a new result set, the
//! panel is emptied instead of leaving the superseded set up.
//!
//! Nothing in flight is cancelled. A pass that loses the race just finds out at
//! completion that it is no longer the newest ticket, or that the store has
//! moved on to another generation, and throws its output away. The reset page
//! is committed together with the painted output, so the pagination never
//! shows the old page number next to new results.

use crate::backend::ResultRef;
use crate::error::{Result, SearchError};
use crate::platform::Platform;
use crate::search::pagination::{page_count, page_range, PageState, NO_PAGE};
use crate::search::store::ResultStore;
use crate::types::{Generation, ResultDetail, ResultSet, SubResult};
use crate::view::ResultsPanel;
use futures::future::try_join_all;
use std::cell::RefCell;
use std::rc::Rc;

/// Sub-results shown under each hit.
pub const MAX_SUB_RESULTS: usize = 3;

// =============================================================================
// VIEW MODEL
// =============================================================================

/// Pagination controls as they should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub num_pages: usize,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub input_enabled: bool,
}

impl From<PageState> for Pagination {
    fn from(state: PageState) -> Self {
        Self {
            page: state.page(),
            num_pages: state.num_pages(),
            previous_enabled: state.can_go_previous(),
            next_enabled: state.can_go_next(),
            input_enabled: state.input_enabled(),
        }
    }
}

/// One resolved hit, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHit {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Trusted HTML
    pub excerpt: String,
    pub sub_results: Vec<SubResult>,
}

impl RenderedHit {
    pub fn new(id: &str, detail: &ResultDetail) -> Self {
        Self {
            id: id.to_string(),
            title: detail.display_title().to_string(),
            url: detail.url.clone(),
            excerpt: detail.excerpt.clone(),
            sub_results: visible_sub_results(detail).to_vec(),
        }
    }
}

/// Contents of the results list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsBody {
    /// The query matched nothing
    NoResults,
    Hits(Vec<RenderedHit>),
}

/// Everything the results panel draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub pagination: Pagination,
    pub body: ResultsBody,
}

impl ResultsView {
    /// Hits on this page (empty for "No results").
    pub fn hits(&self) -> &[RenderedHit] {
        match &self.body {
            ResultsBody::NoResults => &[],
            ResultsBody::Hits(hits) => hits,
        }
    }
}

/// Sub-results to display for `detail`.
///
/// Indexes usually report the page itself as its first sub-result. Showing it
/// again under the page title is noise, so when the first sub-result points at
/// the canonical URL it is skipped and the next three are shown instead.
pub fn visible_sub_results(detail: &ResultDetail) -> &[SubResult] {
    let subs = detail.sub_results.as_slice();
    let skip = usize::from(
        subs.first()
            .is_some_and(|first| first.url == detail.canonical_url()),
    );
    let rest = &subs[skip..];
    &rest[..rest.len().min(MAX_SUB_RESULTS)]
}

/// Fetch details for `hits` concurrently. Fails if any fetch fails.
pub async fn resolve_page<H: ResultRef>(hits: &[H]) -> Result<Vec<RenderedHit>> {
    try_join_all(hits.iter().map(|hit| async move {
        let detail = hit.data().await?;
        Ok::<_, SearchError>(RenderedHit::new(hit.id(), &detail))
    }))
    .await
}

// =============================================================================
// RENDERER
// =============================================================================

#[derive(Debug, Default)]
struct RenderState {
    /// Page on screen
    pages: PageState,
    /// Page the newest pass is fetching; falls back to `pages` on failure
    requested: PageState,
    /// Generation `requested` belongs to
    requested_for: Option<Generation>,
    /// Generation of the last painted result set
    observed: Option<Generation>,
    /// Incremented per pass; only the newest pass may paint
    ticket: u64,
    view: Option<ResultsView>,
}

impl RenderState {
    /// Forget the painted set; nothing is on screen afterwards.
    fn blank(&mut self) {
        self.pages = PageState::default();
        self.requested = self.pages;
        self.requested_for = None;
        self.observed = None;
        self.view = None;
    }
}

/// One render pass, as started by `refresh`.
#[derive(Debug, Clone, Copy)]
struct Pass {
    ticket: u64,
    page: usize,
    num_pages: usize,
}

/// Derives the visible page from the result store.
pub struct PaginatedRenderer<H, P> {
    store: Rc<ResultStore<H>>,
    panel: Option<Rc<dyn ResultsPanel>>,
    platform: P,
    per_page: usize,
    state: RefCell<RenderState>,
}

impl<H: ResultRef, P: Platform> PaginatedRenderer<H, P> {
    /// Create a renderer and subscribe it to `store`.
    ///
    /// The subscription holds a weak handle, so dropping the renderer
    /// unsubscribes it in effect.
    pub fn new(
        store: Rc<ResultStore<H>>,
        panel: Option<Rc<dyn ResultsPanel>>,
        platform: P,
        per_page: usize,
    ) -> Rc<Self> {
        let renderer = Rc::new(Self {
            store: store.clone(),
            panel,
            platform,
            per_page: per_page.max(1),
            state: RefCell::new(RenderState::default()),
        });
        let weak = Rc::downgrade(&renderer);
        store.subscribe(move || {
            if let Some(renderer) = weak.upgrade() {
                renderer.refresh();
            }
        });
        renderer
    }

    /// Page state of what is on screen.
    pub fn page_state(&self) -> PageState {
        self.state.borrow().pages
    }

    /// Last painted view, `None` once the store is cleared.
    pub fn current_view(&self) -> Option<ResultsView> {
        self.state.borrow().view.clone()
    }

    /// Start a render pass for the current store contents and requested page.
    pub fn refresh(self: &Rc<Self>) {
        let Some(set) = self.store.current() else {
            {
                let mut state = self.state.borrow_mut();
                state.ticket += 1;
                state.blank();
            }
            self.paint(None);
            return;
        };

        let pass = {
            let mut state = self.state.borrow_mut();
            let num_pages = page_count(set.len(), self.per_page);
            let reset = state.requested_for != Some(set.generation());
            if reset {
                state.requested = PageState::new(1, num_pages);
                state.requested_for = Some(set.generation());
            }
            state.ticket += 1;
            Pass {
                ticket: state.ticket,
                page: state.requested.page(),
                num_pages,
            }
        };
        tracing::trace!(
            ticket = pass.ticket,
            page = pass.page,
            generation = set.generation().get(),
            "render pass"
        );

        let renderer = Rc::clone(self);
        self.platform.spawn_local(async move {
            let range = page_range(pass.page, renderer.per_page, set.len());
            let outcome = resolve_page(&set.hits()[range]).await;
            renderer.finish_pass(pass, &set, outcome);
        });
    }

    /// Go to the previous page, if there is one. Returns whether a pass started.
    pub fn previous_page(self: &Rc<Self>) -> bool {
        self.navigate(PageState::previous)
    }

    /// Go to the next page, if there is one. Returns whether a pass started.
    pub fn next_page(self: &Rc<Self>) -> bool {
        self.navigate(PageState::next)
    }

    /// Jump to the page typed into the page-number input. Returns whether a
    /// pass started.
    pub fn jump_to_page(self: &Rc<Self>, raw: &str) -> bool {
        self.navigate(|pages| pages.jump_to(raw))
    }

    /// Move the requested page; the screen follows once the pass succeeds.
    fn navigate(self: &Rc<Self>, step: impl FnOnce(&mut PageState) -> bool) -> bool {
        let changed = step(&mut self.state.borrow_mut().requested);
        if changed {
            self.refresh();
        }
        changed
    }

    fn finish_pass(&self, pass: Pass, set: &ResultSet<H>, outcome: Result<Vec<RenderedHit>>) {
        let view = {
            let mut state = self.state.borrow_mut();
            if state.ticket != pass.ticket || !self.store.is_current(set.generation()) {
                tracing::trace!(ticket = pass.ticket, "dropping stale render pass");
                return;
            }
            let first_paint = state.observed != Some(set.generation());
            let hits = match outcome {
                Ok(hits) => hits,
                Err(err) if first_paint => {
                    // The screen still shows a superseded set
                    tracing::warn!(%err, "could not render search results");
                    state.blank();
                    drop(state);
                    self.paint(None);
                    return;
                }
                Err(err) => {
                    tracing::warn!(%err, "could not render search results page");
                    state.requested = state.pages;
                    return;
                }
            };

            state.observed = Some(set.generation());
            let body = if hits.is_empty() {
                state.pages = PageState::new(NO_PAGE, pass.num_pages);
                ResultsBody::NoResults
            } else {
                state.pages = PageState::new(pass.page, pass.num_pages);
                ResultsBody::Hits(hits)
            };
            state.requested = state.pages;
            let view = ResultsView {
                pagination: Pagination::from(state.pages),
                body,
            };
            state.view = Some(view.clone());
            view
        };

        self.paint(Some(&view));
    }

    fn paint(&self, view: Option<&ResultsView>) {
        if let Some(panel) = &self.panel {
            panel.show(view);
        }
    }
}
