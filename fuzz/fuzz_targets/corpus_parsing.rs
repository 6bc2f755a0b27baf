// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for corpus JSON and the search that runs over it.
//!
//! Malformed corpora must fail with an error, never a panic. Corpora that
//! parse must survive any query.

#![no_main]

use futures::executor::block_on;
use libfuzzer_sys::fuzz_target;
use searchlight::{BackendSource, MemorySource, ResultRef, SearchBackend, TokioPlatform};

fuzz_target!(|data: (&str, &str)| {
    let (json, query) = data;
    let Ok(source) = MemorySource::from_json(json, TokioPlatform) else {
        return;
    };
    let Ok(index) = block_on(source.load()) else {
        return;
    };
    block_on(index.init()).expect("init over parsed pages cannot fail");

    let query: String = query.chars().take(200).collect();
    let hits = index.search(&query).expect("search after init cannot fail");

    // INVARIANT: a page matches at most once
    let mut ids: Vec<&str> = hits.iter().map(|hit| hit.id()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), hits.len());
});
