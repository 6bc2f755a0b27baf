// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The widget without a page.
//!
//! Drives the same controller the browser uses, with an in-memory input and a
//! panel that forwards every paint over a channel. Typing the query and
//! typing the page number go through the ordinary event methods, so the CLI
//! output is exactly what the panel would have shown.

use searchlight::{
    Elements, InputElement, MemorySource, Result, ResultsPanel, ResultsView, SearchConfig,
    SearchController, SearchError, TokioPlatform,
};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Longest we wait for a render pass to paint.
const PAINT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Default)]
struct HeadlessInput {
    value: RefCell<String>,
    placeholder: RefCell<Option<String>>,
}

impl InputElement for HeadlessInput {
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
        *self.placeholder.borrow_mut() = placeholder.map(str::to_string);
    }

    fn set_loading(&self, loading: bool) {
        tracing::trace!(loading, "loading hint");
    }

    fn set_enabled(&self, _enabled: bool) {}

    fn focus(&self) {}
}

struct ChannelPanel {
    paints: UnboundedSender<Option<ResultsView>>,
}

impl ResultsPanel for ChannelPanel {
    fn set_top_offset(&self, _px: f64) {}

    fn show(&self, view: Option<&ResultsView>) {
        // Receiver outlives the widget; a closed channel only means we're done
        let _ = self.paints.send(view.cloned());
    }
}

async fn next_paint(paints: &mut UnboundedReceiver<Option<ResultsView>>) -> Result<Option<ResultsView>> {
    match tokio::time::timeout(PAINT_TIMEOUT, paints.recv()).await {
        Ok(Some(view)) => Ok(view),
        Ok(None) => Err(SearchError::Query("results panel closed".to_string())),
        Err(_) => Err(SearchError::Query("timed out waiting for results".to_string())),
    }
}

/// Type `query`, then `page` into the page input, and return what is painted.
///
/// Must run inside a `LocalSet`.
pub async fn search(
    corpus: &Path,
    query: &str,
    page: &str,
    config: &SearchConfig,
) -> Result<Option<ResultsView>> {
    let (sender, mut paints) = unbounded_channel();
    let input = Rc::new(HeadlessInput::default());
    let elements = Elements {
        input: input.clone(),
        search_area: None,
        clear_button: None,
        results: Some(Rc::new(ChannelPanel { paints: sender })),
    };

    let source = MemorySource::from_path(corpus, TokioPlatform).with_debounce(Duration::ZERO);
    let widget = SearchController::mount(source, TokioPlatform, elements, config);
    widget.ready().await?;

    input.set_value(query);
    widget.on_input();
    let mut view = next_paint(&mut paints).await?;

    if widget.on_page_input(page) {
        view = next_paint(&mut paints).await?;
    }
    tracing::debug!(
        hits = widget.result_count().unwrap_or(0),
        page = widget.page_state().page(),
        "headless search done"
    );
    Ok(view)
}
