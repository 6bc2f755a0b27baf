// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Page arithmetic and the pagination state machine.
//!
//! Pages are 1-based. Page 0 is the "no pages" sentinel used after a query
//! resolves with zero hits, which makes both navigation buttons disabled
//! without special cases: `0 <= 1` and `0 >= 0`.
//!
//! **Invariants**:
//! - `num_pages = ceil(total / per_page)`, always from the full result set
//! - page K shows items `[(K-1)*per_page, K*per_page)`, clamped to `total`
//! - after a navigation, `1 <= page <= max(num_pages, 1)`

use std::ops::Range;

/// The "no pages" sentinel.
pub const NO_PAGE: usize = 0;

/// Number of pages needed for `total` hits.
#[inline]
pub fn page_count(total: usize, per_page: usize) -> usize {
    debug_assert!(per_page > 0, "per_page must be non-zero");
    total.div_ceil(per_page)
}

/// Index range of page `page` (1-based), clamped to `total`.
///
/// Page 0 and pages past the end yield an empty range.
pub fn page_range(page: usize, per_page: usize, total: usize) -> Range<usize> {
    if page == NO_PAGE {
        return 0..0;
    }
    let start = (page - 1).saturating_mul(per_page).min(total);
    let end = page.saturating_mul(per_page).min(total);
    start..end
}

/// Parse the page-number input the way a number field reports it.
///
/// Returns `None` for anything that isn't a finite number (empty, text,
/// `NaN`, infinities). Fractions are truncated toward zero.
pub fn parse_page_input(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then_some(value.trunc())
}

/// Current page and page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page: usize,
    num_pages: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            num_pages: 0,
        }
    }
}

impl PageState {
    pub fn new(page: usize, num_pages: usize) -> Self {
        Self { page, num_pages }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.num_pages
    }

    /// The page-number input is only usable when there is something to page.
    pub fn input_enabled(&self) -> bool {
        self.num_pages != 0
    }

    /// Step back one page. Returns whether the page changed.
    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Step forward one page. Returns whether the page changed.
    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Jump to the page typed into the page-number input.
    ///
    /// The value is clamped into `[1, num_pages]`. Non-finite input is
    /// ignored, as is any input while there are no pages. Returns whether the
    /// page changed.
    pub fn jump_to(&mut self, raw: &str) -> bool {
        if !self.input_enabled() {
            return false;
        }
        let Some(value) = parse_page_input(raw) else {
            return false;
        };
        let target = value.clamp(1.0, self.num_pages as f64) as usize;
        if target == self.page {
            return false;
        }
        self.page = target;
        true
    }
}
