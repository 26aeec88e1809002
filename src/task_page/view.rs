use crate::models::{StatusTable, TaskStatus};

/// Status controls and indicators on a single task's page.
pub trait TaskPageView {
    /// Disable every status control while a request is in flight
    fn set_busy(&self, busy: bool);

    /// Point the dropdowns at `status`; "mark complete" is disabled once completed
    fn show_status(&self, status: TaskStatus);

    /// Restyle the status tag and progress bar for a confirmed status
    fn apply_status(&self, status: TaskStatus, table: &StatusTable, label: &str);
}
