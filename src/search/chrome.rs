// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Open/close/clear affordances around the search box.
//!
//! On mobile the search box hides behind a toggle button, and opening it
//! replaces the navigation bar. The clear button is then the only way back,
//! so it stays visible while the area is open even with an empty input.
//! None of this touches the query path except through the store clear the
//! controller performs.

use crate::view::{ClassSwitch, Elements, InputElement, ResultsPanel};
use std::rc::Rc;

/// Pure event wiring for the search chrome.
pub struct ChromeController {
    input: Rc<dyn InputElement>,
    search_area: Option<Rc<dyn ClassSwitch>>,
    clear_button: Option<Rc<dyn ClassSwitch>>,
    results: Option<Rc<dyn ResultsPanel>>,
}

impl ChromeController {
    pub fn new(elements: &Elements) -> Self {
        Self {
            input: Rc::clone(&elements.input),
            search_area: elements.search_area.clone(),
            clear_button: elements.clear_button.clone(),
            results: elements.results.clone(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.search_area.as_ref().is_some_and(|area| area.is_on())
    }

    /// Flip the search area. Returns `true` if it is now open.
    ///
    /// Opening focuses the input.
    pub fn toggle_open(&self) -> bool {
        let Some(area) = &self.search_area else {
            return false;
        };
        let opened = !area.is_on();
        area.set_on(opened);
        if opened {
            self.input.focus();
        }
        self.update_clear_visibility();
        opened
    }

    /// Empty the input and close the area.
    pub fn reset(&self) {
        self.input.set_value("");
        if let Some(area) = &self.search_area {
            area.set_on(false);
        }
        self.update_clear_visibility();
    }

    /// Clear button is visible iff the area is open or there is text.
    pub fn update_clear_visibility(&self) {
        let Some(clear) = &self.clear_button else {
            return;
        };
        clear.set_on(self.is_open() || !self.input.value().is_empty());
    }

    /// Keep the results panel's top edge at the navigation bar's bottom edge.
    pub fn sync_results_offset(&self, navigation_height: f64) {
        if let Some(results) = &self.results {
            results.set_top_offset(navigation_height);
        }
    }
}
