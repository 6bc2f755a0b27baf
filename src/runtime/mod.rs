// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime bindings for the browser.
//!
//! The pipeline in [`crate::search`] is runtime-agnostic. This is where it meets
//! a real page: `web-sys` adapters for the view traits, a Pagefind-style index
//! over JS interop, and the exported `mountSearch` entry point.

#[cfg(feature = "wasm")]
pub mod wasm;
