// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Static HTML for a results view.
//!
//! Produces the same structure and class names the browser runtime builds as
//! DOM nodes, so the theme's CSS applies to both. Titles and URLs are escaped;
//! excerpts come from the index with `<mark>` highlighting already applied and
//! are emitted as-is.
//!
//! One difference from the live DOM: nested anchors are not valid HTML, so
//! sub-results are siblings of the result link here rather than children.

use crate::search::render::{Pagination, RenderedHit, ResultsBody, ResultsView};
use std::fmt::Write;

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a results view as an HTML fragment.
pub fn render_html(view: &ResultsView) -> String {
    let mut html = String::new();
    html.push_str(r#"<div class="search-results">"#);
    render_pagination(&mut html, &view.pagination);
    html.push_str(r#"<div class="search-results-list">"#);
    match &view.body {
        ResultsBody::NoResults => {
            html.push_str(r#"<div class="search-no-results">No results</div>"#);
        }
        ResultsBody::Hits(hits) => {
            for hit in hits {
                render_hit(&mut html, hit);
            }
        }
    }
    html.push_str("</div></div>");
    html
}

fn disabled(flag: bool) -> &'static str {
    if flag {
        ""
    } else {
        " disabled"
    }
}

fn render_pagination(html: &mut String, pagination: &Pagination) {
    // Writing into a String cannot fail
    let _ = write!(
        html,
        concat!(
            r#"<div class="pagination">"#,
            r#"<button class="icon-button arrow-left" title="Previous page"{}></button>"#,
            r#"<input type="number" class="search-results-page-input" value="{}"{}>"#,
            r#"<span> of {}</span>"#,
            r#"<button class="icon-button arrow-right" title="Next page"{}></button>"#,
            "</div>"
        ),
        disabled(pagination.previous_enabled),
        pagination.page,
        disabled(pagination.input_enabled),
        pagination.num_pages,
        disabled(pagination.next_enabled),
    );
}

fn render_hit(html: &mut String, hit: &RenderedHit) {
    let _ = write!(
        html,
        r#"<div class="search-result-group" data-id="{}"><a class="search-result" href="{}"><header class="result-title">{}</header><div class="result-excerpt">{}</div></a>"#,
        escape(&hit.id),
        escape(&hit.url),
        escape(&hit.title),
        hit.excerpt,
    );
    for sub in &hit.sub_results {
        let _ = write!(
            html,
            r#"<a class="search-sub-result" href="{}"><header class="sub-result-title">{}</header><div class="sub-result-excerpt">{}</div></a>"#,
            escape(&sub.url),
            escape(&sub.title),
            sub.excerpt,
        );
    }
    html.push_str("</div>");
}
