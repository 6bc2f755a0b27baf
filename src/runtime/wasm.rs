// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly bindings for the search widget.
//!
//! The page calls one function with a thunk that imports the index module:
//!
//! ```js
//! import init, { mountSearch } from './searchlight.js';
//! await init();
//! mountSearch(() => import('/pagefind/pagefind.js'), { resultsPerPage: 5 });
//! ```
//!
//! Nothing is fetched until the reader focuses the search box or types. The
//! index module only needs the Pagefind surface: `init()`, `preload(prefix)`,
//! `debouncedSearch(query)` resolving to `{results: [{id, data()}]}` or `null`.

use crate::backend::{BackendSource, ResultRef, SearchBackend};
use crate::config::{ElementIds, SearchConfig};
use crate::error::{Result, SearchError};
use crate::platform::Platform;
use crate::search::controller::SearchController;
use crate::search::render::{RenderedHit, ResultsBody, ResultsView};
use crate::types::ResultDetail;
use crate::view::{ClassSwitch, Elements, InputElement, ResultsPanel};
use js_sys::{Array, Function, Promise, Reflect};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlInputElement, ResizeObserver, ResizeObserverEntry,
    ResizeObserverSize,
};

const LOADING_CLASS: &str = "loading";
const OPEN_CLASS: &str = "open";
const ACTIVE_CLASS: &str = "active";

// ============================================================================
// PLATFORM
// ============================================================================

/// Microtask spawning and `setTimeout` sleeps.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPlatform;

impl Platform for BrowserPlatform {
    fn spawn_local<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static,
    {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + 'static {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let promise = Promise::new(&mut |resolve, _reject| {
            let scheduled = web_sys::window().and_then(|window| {
                window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                    .ok()
            });
            if scheduled.is_none() {
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        async move {
            let _ = JsFuture::from(promise).await;
        }
    }
}

// ============================================================================
// JS INTEROP
// ============================================================================

/// Best-effort message from a thrown JS value.
fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", err))
}

/// Call `target[name](...args)` and await the result if it is a promise.
async fn call_method(
    target: &JsValue,
    name: &str,
    args: &[JsValue],
) -> std::result::Result<JsValue, JsValue> {
    let method: Function = Reflect::get(target, &JsValue::from_str(name))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("{} is not a function", name)))?;
    let returned = method.apply(target, &args.iter().collect::<Array>())?;
    JsFuture::from(Promise::resolve(&returned)).await
}

/// Imports the index module through a JS thunk.
pub struct PagefindSource {
    import: Function,
}

impl PagefindSource {
    pub fn new(import: Function) -> Self {
        Self { import }
    }
}

impl BackendSource for PagefindSource {
    type Backend = PagefindBackend;

    async fn load(&self) -> Result<PagefindBackend> {
        let returned = self
            .import
            .call0(&JsValue::NULL)
            .map_err(|e| SearchError::Load(describe(&e)))?;
        let module = JsFuture::from(Promise::resolve(&returned))
            .await
            .map_err(|e| SearchError::Load(describe(&e)))?;
        Ok(PagefindBackend { module })
    }
}

/// The imported index module.
pub struct PagefindBackend {
    module: JsValue,
}

impl SearchBackend for PagefindBackend {
    type Hit = PagefindHit;

    async fn init(&self) -> Result<()> {
        call_method(&self.module, "init", &[])
            .await
            .map(drop)
            .map_err(|e| SearchError::Init(describe(&e)))
    }

    async fn preload(&self, prefix: &str) -> Result<()> {
        call_method(&self.module, "preload", &[JsValue::from_str(prefix)])
            .await
            .map(drop)
            .map_err(|e| SearchError::Preload(describe(&e)))
    }

    async fn debounced_search(&self, query: &str) -> Result<Option<Vec<PagefindHit>>> {
        let response = call_method(&self.module, "debouncedSearch", &[JsValue::from_str(query)])
            .await
            .map_err(|e| SearchError::Query(describe(&e)))?;
        if response.is_null() || response.is_undefined() {
            return Ok(None);
        }
        let results: Array = Reflect::get(&response, &JsValue::from_str("results"))
            .map_err(|e| SearchError::Query(describe(&e)))?
            .dyn_into()
            .map_err(|_| SearchError::Query("results is not an array".to_string()))?;
        Ok(Some(results.iter().map(PagefindHit::new).collect()))
    }
}

/// One entry of `results`: an id plus a lazy `data()` fetch.
pub struct PagefindHit {
    id: String,
    handle: JsValue,
}

impl PagefindHit {
    fn new(handle: JsValue) -> Self {
        let id = Reflect::get(&handle, &JsValue::from_str("id"))
            .ok()
            .and_then(|id| id.as_string())
            .unwrap_or_default();
        Self { id, handle }
    }
}

impl ResultRef for PagefindHit {
    fn id(&self) -> &str {
        &self.id
    }

    async fn data(&self) -> Result<ResultDetail> {
        let data = call_method(&self.handle, "data", &[])
            .await
            .map_err(|e| SearchError::Detail(describe(&e)))?;
        serde_wasm_bindgen::from_value(data).map_err(|e| SearchError::Detail(e.to_string()))
    }
}

// ============================================================================
// DOM ADAPTERS
// ============================================================================

struct DomInput(HtmlInputElement);

impl InputElement for DomInput {
    fn value(&self) -> String {
        self.0.value()
    }

    fn set_value(&self, value: &str) {
        self.0.set_value(value);
    }

    fn placeholder(&self) -> Option<String> {
        self.0.get_attribute("placeholder")
    }

    fn set_placeholder(&self, placeholder: Option<&str>) {
        let _ = match placeholder {
            Some(text) => self.0.set_attribute("placeholder", text),
            None => self.0.remove_attribute("placeholder"),
        };
    }

    fn set_loading(&self, loading: bool) {
        let _ = self.0.class_list().toggle_with_force(LOADING_CLASS, loading);
    }

    fn set_enabled(&self, enabled: bool) {
        self.0.set_disabled(!enabled);
    }

    fn focus(&self) {
        let _ = self.0.focus();
    }
}

struct DomClass {
    element: Element,
    class: &'static str,
}

impl ClassSwitch for DomClass {
    fn is_on(&self) -> bool {
        self.element.class_list().contains(self.class)
    }

    fn set_on(&self, on: bool) {
        let _ = self.element.class_list().toggle_with_force(self.class, on);
    }
}

struct DomResultsPanel {
    document: Document,
    container: HtmlElement,
}

impl ResultsPanel for DomResultsPanel {
    fn set_top_offset(&self, px: f64) {
        let _ = self.container.style().set_property("top", &format!("{}px", px));
    }

    fn show(&self, view: Option<&ResultsView>) {
        self.container.set_inner_html("");
        let Some(view) = view else { return };
        let painted = build_view(&self.document, view)
            .and_then(|node| self.container.append_child(&node));
        if let Err(err) = painted {
            tracing::warn!(err = %describe(&err), "could not paint search results");
        }
    }
}

fn element(document: &Document, tag: &str, class: &str) -> std::result::Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    Ok(element)
}

fn text_element(
    document: &Document,
    tag: &str,
    class: &str,
    text: &str,
) -> std::result::Result<Element, JsValue> {
    let element = element(document, tag, class)?;
    element.set_text_content(Some(text));
    Ok(element)
}

fn build_view(document: &Document, view: &ResultsView) -> std::result::Result<Element, JsValue> {
    let pagination = &view.pagination;
    let root = element(document, "div", "search-results")?;

    let controls = element(document, "div", "pagination")?;
    let previous = element(document, "button", "icon-button arrow-left")?;
    previous.set_attribute("title", "Previous page")?;
    previous.toggle_attribute_with_force("disabled", !pagination.previous_enabled)?;

    let page_input: HtmlInputElement = element(document, "input", "search-results-page-input")?
        .dyn_into()
        .map_err(JsValue::from)?;
    page_input.set_type("number");
    page_input.set_value(&pagination.page.to_string());
    page_input.set_disabled(!pagination.input_enabled);

    let label = document.create_element("span")?;
    label.set_text_content(Some(&format!(" of {}", pagination.num_pages)));

    let next = element(document, "button", "icon-button arrow-right")?;
    next.set_attribute("title", "Next page")?;
    next.toggle_attribute_with_force("disabled", !pagination.next_enabled)?;

    controls.append_child(&previous)?;
    controls.append_child(&page_input)?;
    controls.append_child(&label)?;
    controls.append_child(&next)?;
    root.append_child(&controls)?;

    let list = element(document, "div", "search-results-list")?;
    match &view.body {
        ResultsBody::NoResults => {
            list.append_child(&text_element(document, "div", "search-no-results", "No results")?)?;
        }
        ResultsBody::Hits(hits) => {
            for hit in hits {
                list.append_child(&build_hit(document, hit)?)?;
            }
        }
    }
    root.append_child(&list)?;
    Ok(root)
}

fn build_hit(document: &Document, hit: &RenderedHit) -> std::result::Result<Element, JsValue> {
    let link = element(document, "a", "search-result")?;
    link.set_attribute("href", &hit.url)?;
    link.set_attribute("data-id", &hit.id)?;
    link.append_child(&text_element(document, "header", "result-title", &hit.title)?)?;
    let excerpt = element(document, "div", "result-excerpt")?;
    excerpt.set_inner_html(&hit.excerpt);
    link.append_child(&excerpt)?;

    // Nested anchors are fine when built through the DOM
    for sub in &hit.sub_results {
        let sub_link = element(document, "a", "search-sub-result")?;
        sub_link.set_attribute("href", &sub.url)?;
        sub_link.append_child(&text_element(document, "header", "sub-result-title", &sub.title)?)?;
        let sub_excerpt = element(document, "div", "sub-result-excerpt")?;
        sub_excerpt.set_inner_html(&sub.excerpt);
        sub_link.append_child(&sub_excerpt)?;
        link.append_child(&sub_link)?;
    }
    Ok(link)
}

// ============================================================================
// ENTRY POINT
// ============================================================================

type Widget = SearchController<PagefindSource, BrowserPlatform>;

fn js_error(err: SearchError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Attach `handler` to `target` for the page's lifetime.
fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> std::result::Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Mount the search widget.
///
/// `import` is a zero-argument function returning (a promise of) the index
/// module. `options` is an optional camelCase config object. Only the input
/// element is required; the rest of the chrome is wired when present.
#[wasm_bindgen(js_name = mountSearch)]
pub fn mount_search(import: Function, options: JsValue) -> std::result::Result<(), JsValue> {
    let config = if options.is_undefined() || options.is_null() {
        SearchConfig::default()
    } else {
        serde_wasm_bindgen::from_value::<SearchConfig>(options)
            .map_err(|e| js_error(SearchError::Config(e.to_string())))?
    };
    let config = config.validate().map_err(js_error)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let deferred = document.clone();
        listen(&document, "DOMContentLoaded", move |_| {
            if let Err(err) = wire(&deferred, import.clone(), &config) {
                tracing::warn!(err = %describe(&err), "search widget failed to mount");
            }
        })?;
        return Ok(());
    }
    wire(&document, import, &config)
}

fn wire(
    document: &Document,
    import: Function,
    config: &SearchConfig,
) -> std::result::Result<(), JsValue> {
    let ids: &ElementIds = &config.elements;
    let input: HtmlInputElement = document
        .get_element_by_id(&ids.input)
        .ok_or_else(|| JsValue::from_str(&format!("#{} not found", ids.input)))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("#{} is not an input", ids.input)))?;
    let search_area = document.get_element_by_id(&ids.search_area);
    let clear_button = document.get_element_by_id(&ids.clear_button);
    let open_button = document.get_element_by_id(&ids.open_button);
    let navigation = document.get_element_by_id(&ids.navigation_bar);
    let container = document
        .get_element_by_id(&ids.results_container)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    let elements = Elements {
        input: Rc::new(DomInput(input.clone())),
        search_area: search_area.clone().map(|element| {
            Rc::new(DomClass {
                element,
                class: OPEN_CLASS,
            }) as Rc<dyn ClassSwitch>
        }),
        clear_button: clear_button.clone().map(|element| {
            Rc::new(DomClass {
                element,
                class: ACTIVE_CLASS,
            }) as Rc<dyn ClassSwitch>
        }),
        results: container.clone().map(|container| {
            Rc::new(DomResultsPanel {
                document: document.clone(),
                container,
            }) as Rc<dyn ResultsPanel>
        }),
    };

    let widget: Rc<Widget> = SearchController::mount(
        PagefindSource::new(import),
        BrowserPlatform,
        elements,
        config,
    );

    let w = Rc::clone(&widget);
    listen(&input, "input", move |_| w.on_input())?;
    let w = Rc::clone(&widget);
    listen(&input, "focus", move |_| w.on_focus())?;

    if let Some(open) = &open_button {
        let w = Rc::clone(&widget);
        listen(open, "click", move |_| w.on_open_toggle())?;
    }
    if let Some(clear) = &clear_button {
        let w = Rc::clone(&widget);
        listen(clear, "click", move |_| w.on_clear())?;
    }

    if let Some(container) = &container {
        // Pagination nodes are rebuilt on every paint, so listen on the container
        let w = Rc::clone(&widget);
        listen(container, "click", move |event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if let Ok(Some(_)) = target.closest(".pagination .arrow-left") {
                let _ = w.on_previous_page();
            } else if let Ok(Some(_)) = target.closest(".pagination .arrow-right") {
                let _ = w.on_next_page();
            }
        })?;
        let w = Rc::clone(&widget);
        listen(container, "change", move |event| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            if target.class_list().contains("search-results-page-input") {
                let _ = w.on_page_input(&target.value());
            }
        })?;
    }

    if let Some(navigation) = &navigation {
        let w = Rc::clone(&widget);
        let on_resize = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
            let Ok(entry) = entries.get(0).dyn_into::<ResizeObserverEntry>() else {
                return;
            };
            if let Ok(size) = entry.border_box_size().get(0).dyn_into::<ResizeObserverSize>() {
                w.on_navigation_resize(size.block_size());
            }
        });
        let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;
        observer.observe(navigation);
        on_resize.forget();
    }

    tracing::debug!("search widget wired");
    Ok(())
}
