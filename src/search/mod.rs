// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search-results pipeline.
//!
//! ```text
//! input ──▶ dispatch ──▶ loader ──▶ backend.debounced_search
//!                                          │
//!                                          ▼
//!                          store (generation-tagged result set)
//!                                          │ notify
//!                                          ▼
//!                 render (page slice ──▶ data() ──▶ staleness check ──▶ panel)
//!
//! chrome: open / clear / offset, orthogonal to the query path
//! ```

pub mod chrome;
pub mod controller;
pub mod dispatch;
pub mod loader;
pub mod pagination;
pub mod render;
pub mod store;
