// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides a scripted backend whose timing and failures are controlled
//! by the test, and recording doubles for every page element.

#![doc(hidden)]

use crate::backend::{BackendSource, ResultRef, SearchBackend};
use crate::error::{Result, SearchError};
use crate::platform::Platform;
use crate::search::render::ResultsView;
use crate::types::{ResultDetail, SubResult};
use crate::view::{ClassSwitch, Elements, InputElement, ResultsPanel};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

// ============================================================================
// FIXTURES
// ============================================================================

/// A detail for hit `id`: root sub-result first, then two sections.
pub fn make_detail(id: &str) -> ResultDetail {
    let url = format!("/r/{}/", id);
    ResultDetail {
        title: Some(format!("Result {}", id)),
        url: url.clone(),
        canonical: None,
        excerpt: format!("excerpt {}", id),
        sub_results: vec![
            SubResult {
                title: format!("Result {}", id),
                url: url.clone(),
                excerpt: format!("excerpt {}", id),
            },
            SubResult {
                title: "First".to_string(),
                url: format!("{}#first", url),
                excerpt: String::new(),
            },
            SubResult {
                title: "Second".to_string(),
                url: format!("{}#second", url),
                excerpt: String::new(),
            },
        ],
    }
}

/// `count` hits with ids `"1"..="count"`.
pub fn make_hits(count: usize) -> Vec<HitSpec> {
    (1..=count).map(|i| HitSpec::new(&i.to_string())).collect()
}

/// How one scripted hit behaves when its detail is fetched.
#[derive(Debug, Clone)]
pub struct HitSpec {
    pub id: String,
    pub detail: ResultDetail,
    pub delay: Duration,
    pub fail: bool,
}

impl HitSpec {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            detail: make_detail(id),
            delay: Duration::ZERO,
            fail: false,
        }
    }

    pub fn with_detail(mut self, detail: ResultDetail) -> Self {
        self.detail = detail;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

// ============================================================================
// SCRIPTED BACKEND
// ============================================================================

#[derive(Debug, Clone, Default)]
struct Response {
    hits: Vec<HitSpec>,
    delay: Duration,
    superseded: bool,
}

/// Shared control panel for a scripted backend.
///
/// Tests keep an `Rc<Script>` to configure responses up front and to count
/// calls afterwards.
#[derive(Debug, Default)]
pub struct Script {
    loads: Cell<usize>,
    inits: Cell<usize>,
    preloads: Cell<usize>,
    fetches: Cell<usize>,
    init_delay: Cell<Duration>,
    preload_delay: Cell<Duration>,
    fail_init: RefCell<Option<SearchError>>,
    fail_preload: RefCell<Option<SearchError>>,
    responses: RefCell<HashMap<String, Response>>,
    queries: RefCell<Vec<String>>,
    preload_prefixes: RefCell<HashSet<String>>,
}

impl Script {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// `query` resolves with `hits`.
    pub fn respond(&self, query: &str, hits: Vec<HitSpec>) {
        self.respond_after(query, Duration::ZERO, hits);
    }

    /// `query` resolves with `hits` after `delay`.
    pub fn respond_after(&self, query: &str, delay: Duration, hits: Vec<HitSpec>) {
        self.responses.borrow_mut().insert(
            query.to_string(),
            Response {
                hits,
                delay,
                superseded: false,
            },
        );
    }

    /// `query` resolves with `None`, as if a newer call superseded it.
    pub fn supersede(&self, query: &str) {
        self.responses.borrow_mut().insert(
            query.to_string(),
            Response {
                superseded: true,
                ..Response::default()
            },
        );
    }

    pub fn set_init_delay(&self, delay: Duration) {
        self.init_delay.set(delay);
    }

    pub fn set_preload_delay(&self, delay: Duration) {
        self.preload_delay.set(delay);
    }

    pub fn fail_init(&self, err: SearchError) {
        *self.fail_init.borrow_mut() = Some(err);
    }

    pub fn fail_preload(&self, err: SearchError) {
        *self.fail_preload.borrow_mut() = Some(err);
    }

    pub fn loads(&self) -> usize {
        self.loads.get()
    }

    pub fn inits(&self) -> usize {
        self.inits.get()
    }

    pub fn preloads(&self) -> usize {
        self.preloads.get()
    }

    /// Detail fetches started so far.
    pub fn fetches(&self) -> usize {
        self.fetches.get()
    }

    /// Queries the backend received, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }

    pub fn preloaded_with(&self, prefix: &str) -> bool {
        self.preload_prefixes.borrow().contains(prefix)
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

/// Source that produces a [`ScriptedBackend`].
pub struct ScriptedSource<P> {
    script: Rc<Script>,
    platform: P,
}

impl<P: Platform> ScriptedSource<P> {
    pub fn new(script: &Rc<Script>, platform: P) -> Self {
        Self {
            script: Rc::clone(script),
            platform,
        }
    }
}

impl<P: Platform> BackendSource for ScriptedSource<P> {
    type Backend = ScriptedBackend<P>;

    async fn load(&self) -> Result<ScriptedBackend<P>> {
        bump(&self.script.loads);
        Ok(ScriptedBackend {
            script: Rc::clone(&self.script),
            platform: self.platform.clone(),
        })
    }
}

pub struct ScriptedBackend<P> {
    script: Rc<Script>,
    platform: P,
}

impl<P: Platform> SearchBackend for ScriptedBackend<P> {
    type Hit = ScriptedHit<P>;

    async fn init(&self) -> Result<()> {
        bump(&self.script.inits);
        self.platform.sleep(self.script.init_delay.get()).await;
        match self.script.fail_init.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn preload(&self, prefix: &str) -> Result<()> {
        self.platform.sleep(self.script.preload_delay.get()).await;
        bump(&self.script.preloads);
        self.script
            .preload_prefixes
            .borrow_mut()
            .insert(prefix.to_string());
        match self.script.fail_preload.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn debounced_search(&self, query: &str) -> Result<Option<Vec<ScriptedHit<P>>>> {
        self.script.queries.borrow_mut().push(query.to_string());
        let response = self
            .script
            .responses
            .borrow()
            .get(query)
            .cloned()
            .unwrap_or_default();
        self.platform.sleep(response.delay).await;
        if response.superseded {
            return Ok(None);
        }
        Ok(Some(
            response
                .hits
                .into_iter()
                .map(|spec| ScriptedHit {
                    spec,
                    script: Rc::clone(&self.script),
                    platform: self.platform.clone(),
                })
                .collect(),
        ))
    }
}

pub struct ScriptedHit<P> {
    spec: HitSpec,
    script: Rc<Script>,
    platform: P,
}

impl<P: Platform> ResultRef for ScriptedHit<P> {
    fn id(&self) -> &str {
        &self.spec.id
    }

    async fn data(&self) -> Result<ResultDetail> {
        bump(&self.script.fetches);
        self.platform.sleep(self.spec.delay).await;
        if self.spec.fail {
            return Err(SearchError::Detail(format!("fragment {} unavailable", self.spec.id)));
        }
        Ok(self.spec.detail.clone())
    }
}

// ============================================================================
// RECORDING ELEMENTS
// ============================================================================

/// Input double that remembers every placeholder it was given.
#[derive(Debug)]
pub struct RecordingInput {
    value: RefCell<String>,
    placeholder: RefCell<Option<String>>,
    placeholders: RefCell<Vec<Option<String>>>,
    loading: Cell<bool>,
    enabled: Cell<bool>,
    focus_count: Cell<usize>,
}

impl RecordingInput {
    /// A disabled input with the given placeholder, as shipped in the markup.
    pub fn new(placeholder: Option<&str>) -> Rc<Self> {
        Rc::new(Self {
            value: RefCell::new(String::new()),
            placeholder: RefCell::new(placeholder.map(str::to_string)),
            placeholders: RefCell::new(Vec::new()),
            loading: Cell::new(false),
            enabled: Cell::new(false),
            focus_count: Cell::new(0),
        })
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn focus_count(&self) -> usize {
        self.focus_count.get()
    }

    /// Every `set_placeholder` call, in order.
    pub fn placeholder_history(&self) -> Vec<Option<String>> {
        self.placeholders.borrow().clone()
    }
}

impl InputElement for RecordingInput {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }

    fn placeholder(&self) -> Option<String> {
        self.placeholder.borrow().clone()
    }

    fn set_placeholder(&self, placeholder: Option<&str>) {
        let placeholder = placeholder.map(str::to_string);
        self.placeholders.borrow_mut().push(placeholder.clone());
        *self.placeholder.borrow_mut() = placeholder;
    }

    fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    fn focus(&self) {
        bump(&self.focus_count);
    }
}

#[derive(Debug, Default)]
pub struct RecordingSwitch {
    on: Cell<bool>,
}

impl RecordingSwitch {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl ClassSwitch for RecordingSwitch {
    fn is_on(&self) -> bool {
        self.on.get()
    }

    fn set_on(&self, on: bool) {
        self.on.set(on);
    }
}

/// Panel double that keeps every paint.
#[derive(Debug, Default)]
pub struct RecordingPanel {
    shows: RefCell<Vec<Option<ResultsView>>>,
    top: Cell<Option<f64>>,
}

impl RecordingPanel {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Every `show` call, in order.
    pub fn history(&self) -> Vec<Option<ResultsView>> {
        self.shows.borrow().clone()
    }

    pub fn show_count(&self) -> usize {
        self.shows.borrow().len()
    }

    /// What is on screen now.
    pub fn showing(&self) -> Option<ResultsView> {
        self.shows.borrow().last().cloned().flatten()
    }

    pub fn top_offset(&self) -> Option<f64> {
        self.top.get()
    }
}

impl ResultsPanel for RecordingPanel {
    fn set_top_offset(&self, px: f64) {
        self.top.set(Some(px));
    }

    fn show(&self, view: Option<&ResultsView>) {
        self.shows.borrow_mut().push(view.cloned());
    }
}

/// A full set of recording elements.
pub struct RecordingPage {
    pub input: Rc<RecordingInput>,
    pub search_area: Rc<RecordingSwitch>,
    pub clear_button: Rc<RecordingSwitch>,
    pub panel: Rc<RecordingPanel>,
}

impl RecordingPage {
    pub fn new() -> Self {
        Self {
            input: RecordingInput::new(Some("Search")),
            search_area: RecordingSwitch::new(),
            clear_button: RecordingSwitch::new(),
            panel: RecordingPanel::new(),
        }
    }

    pub fn elements(&self) -> Elements {
        Elements {
            input: self.input.clone(),
            search_area: Some(self.search_area.clone()),
            clear_button: Some(self.clear_button.clone()),
            results: Some(self.panel.clone()),
        }
    }
}

impl Default for RecordingPage {
    fn default() -> Self {
        Self::new()
    }
}
