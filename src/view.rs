// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Capability-typed view of the page.
//!
//! The pipeline only needs a handful of things from the DOM: read and write an
//! input, flip a class, and paint a results panel. Keeping those behind small
//! object-safe traits means the whole state machine runs in native tests with
//! recording doubles (see `testing`), and the browser adapters in
//! `runtime::wasm` stay thin.

use crate::search::render::ResultsView;
use std::rc::Rc;

/// The search text field.
pub trait InputElement {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);

    /// Current placeholder, `None` if the attribute is absent.
    fn placeholder(&self) -> Option<String>;
    /// Set the placeholder, or remove it with `None`.
    fn set_placeholder(&self, placeholder: Option<&str>);

    /// Toggle the loading style (a CSS class in the browser).
    fn set_loading(&self, loading: bool);
    fn set_enabled(&self, enabled: bool);
    fn focus(&self);
}

/// An element whose state is a single CSS class being present.
pub trait ClassSwitch {
    fn is_on(&self) -> bool;
    fn set_on(&self, on: bool);
}

/// The fixed-position container results are painted into.
pub trait ResultsPanel {
    /// Pin the panel's top edge at `px` pixels.
    fn set_top_offset(&self, px: f64);

    /// Replace the panel contents. `None` empties it.
    fn show(&self, view: Option<&ResultsView>);
}

/// Every element the widget binds to.
///
/// Only the input is required. Missing optional elements turn the dependent
/// behavior into a no-op, since search is not essential to the page.
#[derive(Clone)]
pub struct Elements {
    pub input: Rc<dyn InputElement>,
    /// Mobile search area, "open" class
    pub search_area: Option<Rc<dyn ClassSwitch>>,
    /// Clear button, "active" class
    pub clear_button: Option<Rc<dyn ClassSwitch>>,
    pub results: Option<Rc<dyn ResultsPanel>>,
}

impl Elements {
    /// Bind to an input only.
    pub fn input_only(input: Rc<dyn InputElement>) -> Self {
        Self {
            input,
            search_area: None,
            clear_button: None,
            results: None,
        }
    }
}
