/// The Obsidian-flavored note format, both directions.
///
/// Export renders a dated note:
///
///   # Antigravity Tool Research - 2026-08-25
///
///   ## To Explore
///   - [ ] [gost](https://github.com/go-gost/gost) - GO Simple Tunnel (⭐16.8k) #lang/go
///
///   ## In Progress
///   ...
///
/// Import walks the same shape back into a board. The format is lossy
/// on purpose: stars, update age, language and category are rendered
/// for reading but not recovered; name, url, description and the
/// priority flag survive a round trip.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::LazyLock;

use chrono::Local;
use regex::Regex;

use crate::board::Board;
use crate::types::{ColumnKind, RepoItem, IMPORTED_CATEGORY, UNKNOWN_LANGUAGE};

/// Title prefix of every exported note; the export date follows it.
pub const EXPORT_TITLE: &str = "Antigravity Tool Research";

/// Suggested filename for exported notes.
pub const EXPORT_FILENAME: &str = "antigravity-board.md";

const PRIORITY_TAG: &str = "#priority/high";

/// Task line: checkbox, bracketed name, parenthesized url, dash,
/// remainder (description, star count, tags). The checkbox is consumed
/// by the anchor, never captured into the name.
static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- \[ \] \[(.*?)\]\((.*?)\)\s*-\s*(.*)$").unwrap());

/// Rendered star count at the end of the pre-tag remainder, e.g. "(⭐16.8k)".
static STAR_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(⭐[^)]*\)\s*$").unwrap());

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique item id: prefix, sequence number, millisecond timestamp.
pub fn generate_id(prefix: &str) -> String {
    let seq = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let ts = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("{}-{}-{:x}", prefix, seq, ts)
}

/// Render the board as a note dated today.
pub fn generate_markdown(board: &Board) -> String {
    let date = Local::now().date_naive().format("%Y-%m-%d").to_string();
    render_markdown(board, &date)
}

/// Render with an explicit date string (the date only appears in the
/// title line, so this is the deterministic variant).
pub fn render_markdown(board: &Board, date: &str) -> String {
    let mut markdown = format!("# {} - {}\n\n", EXPORT_TITLE, date);

    for kind in ColumnKind::ALL {
        let lines: Vec<String> = board.column(kind).iter().map(render_item).collect();
        markdown.push_str(&format!(
            "## {}\n{}\n\n",
            kind.section_title(),
            lines.join("\n")
        ));
    }

    markdown
}

fn render_item(item: &RepoItem) -> String {
    let stars = format!("(⭐{:.1}k)", item.stars as f64 / 1000.0);
    let lang_tag = format!(" #lang/{}", language_tag(&item.language));
    let priority_tag = if item.is_priority {
        format!(" {}", PRIORITY_TAG)
    } else {
        String::new()
    };
    format!(
        "- [ ] [{}]({}) - {} {}{}{}",
        item.name, item.url, item.description, stars, lang_tag, priority_tag
    )
}

/// Tag body for a language: lowercase, everything outside [a-z0-9]
/// stripped. "C++" becomes "c", "N/A" becomes "na", a symbols-only
/// language collapses to an empty body.
pub fn language_tag(language: &str) -> String {
    language
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Parse note text back into a board. Full replace: whatever board
/// existed before is the caller's to confirm away.
///
/// Line state machine: a section heading switches the current column,
/// task lines are collected into it, and everything else (the title,
/// blank lines, malformed bullets, lines before any known section) is
/// skipped. Never fails; text with no recognized sections yields an
/// empty board.
pub fn parse_markdown(content: &str) -> Board {
    let content = content.replace("\r\n", "\n").replace('\r', "\n");

    let mut board = Board::new();
    let mut current: Option<ColumnKind> = None;

    for line in content.split('\n') {
        let trimmed = line.trim();

        if let Some(kind) = section_for_line(trimmed) {
            current = Some(kind);
            continue;
        }

        let Some(kind) = current else { continue };
        if !trimmed.starts_with("- [ ] [") {
            continue;
        }
        let Some(caps) = ITEM_RE.captures(trimmed) else {
            log::debug!("[gravboard.markdown] skipping malformed task line: {}", trimmed);
            continue;
        };

        let rest = &caps[3];
        let is_priority = rest.contains(PRIORITY_TAG);
        let description = recover_description(rest);

        let item = RepoItem {
            id: generate_id("imported"),
            name: caps[1].to_string(),
            url: caps[2].to_string(),
            stars: 0,
            days_since_update: 0,
            language: UNKNOWN_LANGUAGE.to_string(),
            category: IMPORTED_CATEGORY.to_string(),
            description,
            is_priority,
        };

        match kind {
            ColumnKind::Todo => board.todo.push(item),
            ColumnKind::InProgress => board.in_progress.push(item),
            ColumnKind::Done => board.done.push(item),
        }
    }

    board
}

/// Section headings match by prefix, so a dated or annotated heading
/// like "## Done (week 34)" still routes to its column.
fn section_for_line(trimmed: &str) -> Option<ColumnKind> {
    let rest = trimmed.strip_prefix("## ")?;
    ColumnKind::ALL
        .into_iter()
        .find(|kind| rest.starts_with(kind.section_title()))
}

/// The description is the remainder up to the first tag, minus the
/// rendered star count. Only a trailing "(⭐…)" group is treated as a
/// star count; parentheses inside the description survive.
fn recover_description(rest: &str) -> String {
    let before_tags = rest.split('#').next().unwrap_or("").trim();
    STAR_SUFFIX_RE.replace(before_tags, "").to_string()
}
