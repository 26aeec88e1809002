//! Board View
//!
//! What the controller needs from the page. The DOM implementation lives in
//! `dom.rs`; tests use an in-memory board.

use crate::models::{StatusTable, TaskId, TaskStatus};

pub trait BoardView {
    /// Column currently holding the card
    fn column_of(&self, task: &TaskId) -> Option<TaskStatus>;

    /// Vertical midpoints of the cards in `column`, minus `excluding`, in
    /// display order
    fn card_midpoints(&self, column: TaskStatus, excluding: &TaskId) -> Vec<(TaskId, f64)>;

    /// Reparent the card into `column`, before `before` or at the end.
    /// False when the card or column does not exist.
    fn place_card(&self, task: &TaskId, column: TaskStatus, before: Option<&TaskId>) -> bool;

    /// Recount cards per column and toggle empty-column placeholders
    fn refresh_counts(&self);

    /// Restyle a card for its confirmed status
    fn apply_status(&self, task: &TaskId, status: TaskStatus, table: &StatusTable, label: &str);

    /// Throw away local state and reload from the server
    fn reload(&self);
}
