// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the page-number input.
//!
//! Whatever lands in the number field, navigation must never panic and the
//! page must stay inside `[1, num_pages]` once there is something to page.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use searchlight::search::pagination::{page_range, parse_page_input, PageState};

#[derive(Arbitrary, Debug)]
struct Input {
    total: u16,
    per_page: u8,
    start: u8,
    raw: String,
}

fuzz_target!(|input: Input| {
    let per_page = usize::from(input.per_page.max(1));
    let total = usize::from(input.total);
    let num_pages = total.div_ceil(per_page);
    let start = if num_pages == 0 {
        0
    } else {
        usize::from(input.start).clamp(1, num_pages)
    };

    let mut state = PageState::new(start, num_pages);
    let changed = state.jump_to(&input.raw);

    if num_pages == 0 || parse_page_input(&input.raw).is_none() {
        assert!(!changed, "rejected input moved the page");
        assert_eq!(state.page(), start);
        return;
    }

    // INVARIANT: accepted input lands on a real page
    assert!((1..=num_pages).contains(&state.page()));

    // INVARIANT: the page's slice is inside the result set and non-empty
    let range = page_range(state.page(), per_page, total);
    assert!(range.end <= total);
    assert!(!range.is_empty());
});
