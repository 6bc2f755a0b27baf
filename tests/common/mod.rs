//! Shared test utilities and fixtures.

#![allow(dead_code)]

use searchlight::testing::{RecordingPage, Script, ScriptedSource};
use searchlight::{
    BackendSource, InputElement, Platform, SearchConfig, SearchController, TokioPlatform,
};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::LocalSet;

// Re-export canonical test utilities from searchlight::testing
pub use searchlight::testing::{make_detail, make_hits, HitSpec};

/// Blog-shaped corpus used by the end-to-end tests and the benchmarks.
pub const BLOG_CORPUS: &str = "tests/fixtures/blog.json";

pub type ScriptedWidget = SearchController<ScriptedSource<TokioPlatform>, TokioPlatform>;

/// Run `future` on a `LocalSet` so `spawn_local` works.
pub async fn run_local<F: Future>(future: F) -> F::Output {
    LocalSet::new().run_until(future).await
}

/// Let every ready local task run without advancing the clock.
pub async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

/// Advance paused time by `ms`, running timers that fire on the way.
pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Mount a widget over a scripted backend with default config.
pub fn mount(script: &Rc<Script>, page: &RecordingPage) -> Rc<ScriptedWidget> {
    mount_with(script, page, &SearchConfig::default())
}

pub fn mount_with(
    script: &Rc<Script>,
    page: &RecordingPage,
    config: &SearchConfig,
) -> Rc<ScriptedWidget> {
    SearchController::mount(
        ScriptedSource::new(script, TokioPlatform),
        TokioPlatform,
        page.elements(),
        config,
    )
}

/// Type `text` into the widget's input.
pub fn type_text<S: BackendSource, P: Platform>(
    widget: &SearchController<S, P>,
    page: &RecordingPage,
    text: &str,
) {
    page.input.set_value(text);
    widget.on_input();
}

/// Ids of the hits currently painted.
pub fn shown_ids(page: &RecordingPage) -> Vec<String> {
    page.panel
        .showing()
        .map(|view| view.hits().iter().map(|hit| hit.id.clone()).collect())
        .unwrap_or_default()
}

/// Whether any paint so far showed a hit with `id`.
pub fn ever_shown(page: &RecordingPage, id: &str) -> bool {
    page.panel
        .history()
        .iter()
        .flatten()
        .any(|view| view.hits().iter().any(|hit| hit.id == id))
}

/// Hits with ids `prefix1..=prefixN`.
pub fn hits_named(prefix: &str, count: usize) -> Vec<HitSpec> {
    (1..=count)
        .map(|i| HitSpec::new(&format!("{}{}", prefix, i)))
        .collect()
}
