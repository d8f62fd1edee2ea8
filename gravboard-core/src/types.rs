use serde::{Deserialize, Serialize};

/// Language sentinel for items whose source language is unknown
/// (the note format does not carry one, so imports always use this).
pub const UNKNOWN_LANGUAGE: &str = "N/A";

/// Category assigned to items recovered from a note import.
pub const IMPORTED_CATEGORY: &str = "Imported";

/// A curated reference to one external tool/repository.
///
/// `is_priority` is computed once when the item is created and never
/// recomputed; all fields except column membership are immutable after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoItem {
    pub id: String,
    pub name: String,
    pub url: String,
    pub stars: u32,
    pub days_since_update: u32,
    pub language: String,
    pub category: String,
    pub description: String,
    pub is_priority: bool,
}

/// The three workflow stages. The set is closed: an item always lives
/// in exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKind {
    Todo,
    InProgress,
    Done,
}

impl ColumnKind {
    /// Board order, which is also section order in the note format.
    pub const ALL: [ColumnKind; 3] = [ColumnKind::Todo, ColumnKind::InProgress, ColumnKind::Done];

    /// Section heading used in the note format.
    pub fn section_title(self) -> &'static str {
        match self {
            ColumnKind::Todo => "To Explore",
            ColumnKind::InProgress => "In Progress",
            ColumnKind::Done => "Done",
        }
    }
}

/// Per-column item counts for status/list responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
}
