// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the tabula CLI.
//!
//! Tables, highlighted matches and ladder explanations that respect your color
//! scheme. OneDark for dark terminals, One Light for light ones. Respects
//! `NO_COLOR` and falls back to plain text when stdout is not a TTY, so piping
//! a table into `less` or a file stays readable.
//!
//! Without colors, highlighted spans are shown in brackets: `[Roberto] Martínez`.
//!
//! # Theme detection order
//!
//! 1. `TABULA_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. macOS appearance (via defaults read)
//! 4. Default to dark theme

use std::sync::OnceLock;

use tabula::export::DEFAULT_DATE_FORMAT;
use tabula::{Column, MatchStrategy, QueryDescriptor, Record, Segment, Value, ViewResult};

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

/// Widest a table column gets before its cells are truncated.
pub const MAX_COLUMN_WIDTH: usize = 28;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("TABULA_THEME") {
        if let Some(theme) = parse_theme(&theme) {
            return theme;
        }
    }

    // COLORFGBG is "fg;bg"; xterm and rxvt set it
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(theme) = theme_from_colorfgbg(&colorfgbg) {
            return theme;
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(output) = std::process::Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
        {
            // "Dark" means dark mode; absence or error means light mode
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.contains("Dark") && output.status.success() {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

fn parse_theme(value: &str) -> Option<Theme> {
    match value.to_lowercase().as_str() {
        "light" | "l" => Some(Theme::Light),
        "dark" | "d" => Some(Theme::Dark),
        _ => None,
    }
}

/// Background colors 0-6 and 8 are dark; 7 and 9+ are light.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let bg = value.split(';').next_back()?.parse::<u8>().ok()?;
    if bg >= 7 && bg != 8 {
        Some(Theme::Light)
    } else {
        Some(Theme::Dark)
    }
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// ONEDARK / ONE LIGHT COLOR PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════
//
// OneDark: https://github.com/joshdick/onedark.vim
// One Light: https://github.com/sonph/onehalf

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
}

pub use colors::*;

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221); // #c678dd
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
    pub const BRIGHT_YELLOW: (u8, u8, u8) = (255, 215, 0);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242); // #4078f2
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164); // #a626a4
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
    pub const BRIGHT_YELLOW: (u8, u8, u8) = (152, 104, 1);
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

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_YELLOW);

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

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Cut plain text to `max` characters, ending in `…` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border(line: &str) -> String {
    themed(GRAY, &[], line)
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

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("├"),
        label_part,
        border(&format!("{}┤", "─".repeat(remaining)))
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Render highlight segments: bold yellow with colors, `[..]` without.
pub fn segments(segments: &[Segment<'_>]) -> String {
    let colors = use_colors();
    segments
        .iter()
        .map(|s| match (s.matched, colors) {
            (false, _) => s.text.to_string(),
            (true, true) => format!("{}{}{}{}", BOLD, BRIGHT_YELLOW(), s.text, RESET),
            (true, false) => format!("[{}]", s.text),
        })
        .collect()
}

/// Color-coded ladder rung: green for exact rungs, blue for normalized ones,
/// magenta for fuzzy.
pub fn strategy_label(strategy: Option<MatchStrategy>) -> String {
    let Some(strategy) = strategy else {
        return themed(RED, &[BOLD], "no match");
    };
    let color: fn() -> String = match strategy {
        MatchStrategy::Empty | MatchStrategy::Exact => GREEN,
        MatchStrategy::Normalized
        | MatchStrategy::Prefix
        | MatchStrategy::Suffix
        | MatchStrategy::Substring => BLUE,
        MatchStrategy::FuzzyWhole | MatchStrategy::FuzzyWord => MAGENTA,
    };
    themed(color, &[BOLD], strategy.as_str())
}

/// Similarity with color relative to the threshold.
pub fn similarity_colored(score: f64, threshold: f64) -> String {
    let text = format!("{:.3}", score);
    if score >= threshold {
        themed(GREEN, &[BOLD], &text)
    } else if score >= threshold - 0.15 {
        themed(YELLOW, &[], &text)
    } else {
        themed(GRAY, &[], &text)
    }
}

/// Text for one table cell. Dates use the export date format.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Date(d)) => d.format(DEFAULT_DATE_FORMAT).to_string(),
        Some(other) => other.display().into_owned(),
        None => String::new(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TABLE
// ═══════════════════════════════════════════════════════════════════════════

/// Print one page as an aligned table with search matches highlighted.
pub fn print_table<R: Record>(
    view: &ViewResult<'_, R>,
    columns: &[Column],
    descriptor: &QueryDescriptor,
) {
    let cells: Vec<Vec<String>> = view
        .items
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| {
                    let value = record.field(&c.field);
                    truncate(&cell_text(value.as_deref()), MAX_COLUMN_WIDTH)
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(c.label.chars().count().min(MAX_COLUMN_WIDTH)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| pad_right(&themed(CYAN, &[BOLD], &truncate(&c.label, *w)), *w))
        .collect();
    println!("{}", header.join("  "));
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    println!("{}", themed(GRAY, &[], &rule.join("  ")));

    let term = descriptor.search_term.trim();
    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(columns.iter().zip(&widths))
            .map(|(text, (column, width))| {
                let rendered = if !term.is_empty() && descriptor.search_fields.contains(&column.field) {
                    segments(&tabula::highlight(text, term))
                } else {
                    text.clone()
                };
                pad_right(&rendered, *width)
            })
            .collect();
        println!("{}", line.join("  ").trim_end());
    }

    println!();
    println!("{}", themed(GRAY, &[], &summary_line(view, descriptor)));
}

/// "Mostrando 21–40 de 45 (filtrado de 120) · página 2/3"
pub fn summary_line<R>(view: &ViewResult<'_, R>, descriptor: &QueryDescriptor) -> String {
    let mut line = match view.item_range() {
        Some((first, last)) => format!("Mostrando {}–{} de {}", first, last, view.total_count),
        None => format!("Sin resultados ({} registros)", view.total_count),
    };
    if view.is_filtered() {
        line.push_str(&format!(" (filtrado de {})", view.filtered_from));
    }
    line.push_str(&format!(" · página {}/{}", view.page, view.total_pages));
    let active = descriptor.active_filter_count();
    if active > 0 {
        line.push_str(&format!(" · {} filtro(s) activo(s)", active));
    }
    if let Some(sort) = &descriptor.sort {
        line.push_str(&format!(" · orden {}", sort));
    }
    line
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
