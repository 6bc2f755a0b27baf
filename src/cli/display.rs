// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the searchlight CLI.
//!
//! OneDark for dark terminals, One Light for light ones. Detection tries
//! `SEARCHLIGHT_THEME` first, then `COLORFGBG`, then defaults to dark. Colors
//! are dropped for `NO_COLOR` and when stdout is not a TTY.
//!
//! Excerpts arrive as HTML with `<mark>` around matched words. In the terminal
//! the marks become bold highlight color and every other tag is stripped.

use searchlight::memory::CorpusStats;
use searchlight::{Pagination, RenderedHit, ResultsBody, ResultsView};
use std::sync::OnceLock;

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("SEARCHLIGHT_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // COLORFGBG is "fg;bg"; 7 and up (except 8) are light backgrounds
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

mod onedark {
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
}

mod onelight {
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242); // #4078f2
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Cut `s` to at most `max` visible characters, adding `…` if cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ═══════════════════════════════════════════════════════════════════════════
// EXCERPTS
// ═══════════════════════════════════════════════════════════════════════════

/// Split an excerpt into `(text, highlighted)` runs.
///
/// `<mark>` toggles highlighting, other tags are dropped, and the five
/// entities `markup::escape` produces are decoded.
pub fn excerpt_runs(html: &str) -> Vec<(String, bool)> {
    let mut runs: Vec<(String, bool)> = Vec::new();
    let mut current = String::new();
    let mut highlighted = false;
    let mut rest = html;

    while let Some(c) = rest.chars().next() {
        if c == '<' {
            let end = rest.find('>').map_or(rest.len(), |i| i + 1);
            let tag = rest[..end].to_ascii_lowercase();
            let toggles = match tag.as_str() {
                "<mark>" => Some(true),
                "</mark>" => Some(false),
                _ => None,
            };
            if let Some(on) = toggles {
                if !current.is_empty() {
                    runs.push((std::mem::take(&mut current), highlighted));
                }
                highlighted = on;
            }
            rest = &rest[end..];
        } else if c == '&' {
            let entity = ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"]
                .iter()
                .zip(['&', '<', '>', '"', '\''])
                .find(|(e, _)| rest.starts_with(**e));
            match entity {
                Some((e, decoded)) => {
                    current.push(decoded);
                    rest = &rest[e.len()..];
                }
                None => {
                    current.push('&');
                    rest = &rest[1..];
                }
            }
        } else {
            current.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    if !current.is_empty() {
        runs.push((current, highlighted));
    }
    runs
}

/// Excerpt as terminal text, at most `max` visible characters.
pub fn excerpt_line(html: &str, max: usize) -> String {
    let mut budget = max;
    let mut line = String::new();
    for (text, highlighted) in excerpt_runs(html) {
        if budget == 0 {
            break;
        }
        let cut = truncate(&text, budget);
        budget = budget.saturating_sub(cut.chars().count());
        if highlighted {
            line.push_str(&themed(YELLOW, &[BOLD], &cut));
        } else {
            line.push_str(&cut);
        }
    }
    line
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border(glyphs: &str) -> String {
    themed(GRAY, &[], glyphs)
}

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}{}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("┌"),
        label_part,
        border(&format!("{}┐", "─".repeat(remaining)))
    );
}

/// Print section divider: ├──────────────────┤
pub fn section_mid() {
    println!("{}", border(&format!("├{}┤", "─".repeat(BOX_WIDTH))));
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// `‹ 2 of 3 ›`, arrows dimmed when disabled.
pub fn pagination_label(p: &Pagination) -> String {
    let arrow = |glyph: &str, enabled: bool| {
        if enabled {
            themed(BLUE, &[BOLD], glyph)
        } else {
            themed(GRAY, &[], glyph)
        }
    };
    format!(
        "{} {} of {} {}",
        arrow("‹", p.previous_enabled),
        p.page,
        p.num_pages,
        arrow("›", p.next_enabled)
    )
}

fn print_hit(hit: &RenderedHit) {
    let width = BOX_WIDTH - 2;
    row(&format!(" {}", themed(GREEN, &[BOLD], &truncate(&hit.title, width))));
    row(&format!(" {}", themed(GRAY, &[], &truncate(&hit.url, width))));
    row(&format!(" {}", excerpt_line(&hit.excerpt, width)));
    for sub in &hit.sub_results {
        row(&format!("   {} {}", themed(CYAN, &[], "↳"), truncate(&sub.title, width - 4)));
        if !sub.excerpt.is_empty() {
            row(&format!("     {}", excerpt_line(&sub.excerpt, width - 4)));
        }
    }
}

/// Print one page of results.
pub fn print_results(query: &str, view: Option<&ResultsView>) {
    section_top(&format!("SEARCH \"{}\"", truncate(query, 40)));
    let Some(view) = view else {
        row(" (empty query)");
        section_bot();
        return;
    };

    row(&format!(" {}", pagination_label(&view.pagination)));
    match &view.body {
        ResultsBody::NoResults => {
            section_mid();
            row(" No results");
        }
        ResultsBody::Hits(hits) => {
            for hit in hits {
                section_mid();
                print_hit(hit);
            }
        }
    }
    section_bot();
}

/// Print the outcome of `searchlight check`.
pub fn print_check(path: &str, stats: &CorpusStats) {
    section_top("CORPUS");
    row(&format!(" {}", truncate(path, BOX_WIDTH - 2)));
    row(&format!(" pages     {}", themed(GREEN, &[BOLD], &stats.pages.to_string())));
    row(&format!(" sections  {}", stats.sections));
    if stats.untitled > 0 {
        row(&format!(
            " untitled  {} (shown as \"{}\")",
            themed(YELLOW, &[BOLD], &stats.untitled.to_string()),
            searchlight::types::UNTITLED
        ));
    }
    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
