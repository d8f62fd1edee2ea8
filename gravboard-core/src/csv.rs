/// Catalog ingestion from header-prefixed CSV.
///
/// Expected column order:
///   Repo Name, URL, Stars, Days Since Update, Primary Language, Category, Brief Description
///
/// The field scanner honors double quotes (commas inside a quoted run
/// do not split) but does not understand RFC 4180 doubled-quote
/// escaping: a `""` inside a quoted field toggles out and straight back
/// in, and both quote characters are dropped. The catalog exports this
/// tool ingests never escape quotes, so the simpler scanner stays
/// compatible with them.

use crate::types::RepoItem;

/// Substrings that mark an item as priority when found in its
/// lowercased name or description.
pub const PRIORITY_KEYWORDS: [&str; 6] =
    ["proxy", "manager", "account", "rotation", "switch", "auth"];

/// Parse catalog CSV into items ordered for first display: priority
/// items first, then by descending stars, ties keeping input order.
///
/// The first line is always treated as the header and skipped. Rows
/// with fewer than 5 fields are skipped, missing trailing fields become
/// empty strings, and unparsable numeric fields become 0. Never fails;
/// the worst malformed input yields an empty vec.
pub fn parse_csv(raw: &str) -> Vec<RepoItem> {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut items: Vec<RepoItem> = Vec::new();

    // Line 0 is the header; ids number data rows from repo-1.
    for (line_no, line) in trimmed.split('\n').enumerate().skip(1) {
        let fields = split_csv_line(line);
        if fields.len() < 5 {
            log::debug!(
                "[gravboard.csv] skipping row {}: {} field(s), need at least 5",
                line_no,
                fields.len()
            );
            continue;
        }

        let field = |index: usize| fields.get(index).map(String::as_str).unwrap_or("");

        let name = field(0).to_string();
        let description = field(6).to_string();
        let is_priority = matches_priority_keyword(&name, &description);

        items.push(RepoItem {
            id: format!("repo-{}", line_no),
            name,
            url: field(1).to_string(),
            stars: field(2).trim().parse().unwrap_or(0),
            days_since_update: field(3).trim().parse().unwrap_or(0),
            language: field(4).to_string(),
            category: field(5).to_string(),
            description,
            is_priority,
        });
    }

    // sort_by is stable, so equal keys keep their input order.
    items.sort_by(|a, b| {
        b.is_priority
            .cmp(&a.is_priority)
            .then_with(|| b.stars.cmp(&a.stars))
    });

    items
}

fn matches_priority_keyword(name: &str, description: &str) -> bool {
    let name = name.to_lowercase();
    let description = description.to_lowercase();
    PRIORITY_KEYWORDS
        .iter()
        .any(|kw| name.contains(kw) || description.contains(kw))
}

/// Split one line into fields: a double quote toggles quoted mode and
/// is dropped, a comma splits only outside quoted mode.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}
