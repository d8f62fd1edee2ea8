/// The triage board: three fixed, ordered columns of items.
///
/// `move_item` is the only mutating operation. The exclusive borrow
/// makes each move atomic from any observer's point of view: there is
/// no state in which an item is in zero or two columns.

use serde::{Deserialize, Serialize};

use crate::types::{ColumnCounts, ColumnKind, RepoItem};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub todo: Vec<RepoItem>,
    pub in_progress: Vec<RepoItem>,
    pub done: Vec<RepoItem>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from a freshly ingested catalog: every item starts
    /// in todo, in catalog order.
    pub fn from_catalog(items: Vec<RepoItem>) -> Self {
        Board {
            todo: items,
            in_progress: Vec::new(),
            done: Vec::new(),
        }
    }

    pub fn column(&self, kind: ColumnKind) -> &[RepoItem] {
        match kind {
            ColumnKind::Todo => &self.todo,
            ColumnKind::InProgress => &self.in_progress,
            ColumnKind::Done => &self.done,
        }
    }

    fn column_mut(&mut self, kind: ColumnKind) -> &mut Vec<RepoItem> {
        match kind {
            ColumnKind::Todo => &mut self.todo,
            ColumnKind::InProgress => &mut self.in_progress,
            ColumnKind::Done => &mut self.done,
        }
    }

    /// The column currently holding the item, and its position there.
    pub fn locate(&self, item_id: &str) -> Option<(ColumnKind, usize)> {
        for kind in ColumnKind::ALL {
            if let Some(pos) = self.column(kind).iter().position(|i| i.id == item_id) {
                return Some((kind, pos));
            }
        }
        None
    }

    pub fn find_item(&self, item_id: &str) -> Option<&RepoItem> {
        self.locate(item_id).map(|(kind, pos)| &self.column(kind)[pos])
    }

    /// Move an item to the target column.
    ///
    /// Priority items land at the head of todo so they surface first;
    /// every other move appends at the tail. Moving an item onto the
    /// column it already occupies re-inserts it under the same rule.
    ///
    /// Returns false when no item with that id exists anywhere on the
    /// board; the board is left untouched in that case.
    pub fn move_item(&mut self, item_id: &str, target: ColumnKind) -> bool {
        let Some((source, pos)) = self.locate(item_id) else {
            log::debug!(
                "[gravboard.board.move] ignored, no item with id {}",
                item_id
            );
            return false;
        };

        let item = self.column_mut(source).remove(pos);
        let head_of_todo = target == ColumnKind::Todo && item.is_priority;
        let column = self.column_mut(target);
        if head_of_todo {
            column.insert(0, item);
        } else {
            column.push(item);
        }
        true
    }

    pub fn counts(&self) -> ColumnCounts {
        ColumnCounts {
            todo: self.todo.len(),
            in_progress: self.in_progress.len(),
            done: self.done.len(),
        }
    }

    /// Total item count across all three columns.
    pub fn total(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, priority: bool) -> RepoItem {
        RepoItem {
            id: id.to_string(),
            name: format!("tool-{}", id),
            url: format!("https://github.com/example/{}", id),
            stars: 1200,
            days_since_update: 3,
            language: "Rust".to_string(),
            category: "Tooling".to_string(),
            description: "a test tool".to_string(),
            is_priority: priority,
        }
    }

    fn ids(column: &[RepoItem]) -> Vec<&str> {
        column.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_move_between_columns() {
        let mut board = Board::from_catalog(vec![item("a", false), item("b", false)]);

        assert!(board.move_item("a", ColumnKind::InProgress));
        assert_eq!(ids(&board.todo), vec!["b"]);
        assert_eq!(ids(&board.in_progress), vec!["a"]);

        assert!(board.move_item("a", ColumnKind::Done));
        assert!(board.in_progress.is_empty());
        assert_eq!(ids(&board.done), vec!["a"]);
    }

    #[test]
    fn test_priority_item_moves_to_head_of_todo() {
        let mut board = Board::from_catalog(vec![item("a", false), item("b", false)]);
        board.done.push(item("p", true));

        assert!(board.move_item("p", ColumnKind::Todo));
        assert_eq!(ids(&board.todo), vec!["p", "a", "b"]);
    }

    #[test]
    fn test_non_priority_item_appends_to_todo() {
        let mut board = Board::from_catalog(vec![item("a", false)]);
        board.done.push(item("n", false));

        assert!(board.move_item("n", ColumnKind::Todo));
        assert_eq!(ids(&board.todo), vec!["a", "n"]);
    }

    #[test]
    fn test_priority_item_appends_outside_todo() {
        let mut board = Board::from_catalog(vec![item("p", true)]);
        board.done.push(item("x", false));

        assert!(board.move_item("p", ColumnKind::Done));
        assert_eq!(ids(&board.done), vec!["x", "p"]);
    }

    #[test]
    fn test_move_unknown_id_is_noop() {
        let mut board = Board::from_catalog(vec![item("a", false), item("b", true)]);
        let before = board.clone();

        assert!(!board.move_item("missing", ColumnKind::Done));
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_preserves_total_count() {
        let mut board = Board::from_catalog(vec![item("a", true), item("b", false), item("c", false)]);
        assert_eq!(board.total(), 3);

        board.move_item("b", ColumnKind::Done);
        board.move_item("a", ColumnKind::InProgress);
        board.move_item("a", ColumnKind::Todo);
        board.move_item("nope", ColumnKind::Done);
        assert_eq!(board.total(), 3);
    }

    #[test]
    fn test_move_within_same_column_reinserts() {
        let mut board = Board::from_catalog(vec![item("a", false), item("p", true)]);

        // Priority rule applies even when source and target are both todo.
        assert!(board.move_item("p", ColumnKind::Todo));
        assert_eq!(ids(&board.todo), vec!["p", "a"]);

        assert!(board.move_item("p", ColumnKind::Todo));
        assert_eq!(ids(&board.todo), vec!["p", "a"]);
    }

    #[test]
    fn test_counts() {
        let mut board = Board::from_catalog(vec![item("a", false), item("b", false), item("c", false)]);
        board.move_item("b", ColumnKind::InProgress);
        board.move_item("c", ColumnKind::Done);

        let counts = board.counts();
        assert_eq!(counts.todo, 1);
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.done, 1);
    }

    #[test]
    fn test_find_and_locate() {
        let mut board = Board::from_catalog(vec![item("a", false), item("b", false)]);
        board.move_item("b", ColumnKind::Done);

        assert_eq!(board.locate("b"), Some((ColumnKind::Done, 0)));
        assert_eq!(board.find_item("b").map(|i| i.name.as_str()), Some("tool-b"));
        assert_eq!(board.locate("zzz"), None);
        assert!(board.find_item("zzz").is_none());
    }

    #[test]
    fn test_board_serializes_camel_case() {
        let board = Board::from_catalog(vec![item("a", false)]);
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.contains("\"inProgress\""));
        assert!(json.contains("\"daysSinceUpdate\""));
        assert!(json.contains("\"isPriority\""));
    }
}
