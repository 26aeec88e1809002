//! Task Page Status Controller
//!
//! Status dropdowns and buttons on a task's own page. Unlike the board, a
//! failed update keeps the page and puts the controls back.

use std::cell::Cell;

use super::view::TaskPageView;
use crate::api::StatusClient;
use crate::components::{Notifier, ToastKind};
use crate::models::{StatusTable, TaskId, TaskStatus};

const DEFAULT_SUCCESS_MESSAGE: &str = "Task status updated successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    Applied,
    /// Request failed; controls show the last confirmed status again
    Reverted,
    /// Already at that status, or another update is running
    Skipped,
}

pub struct TaskPageController<V, C, N> {
    view: V,
    client: C,
    notifier: N,
    table: StatusTable,
    task: TaskId,
    confirmed: Cell<Option<TaskStatus>>,
    busy: Cell<bool>,
}

impl<V, C, N> TaskPageController<V, C, N>
where
    V: TaskPageView,
    C: StatusClient,
    N: Notifier,
{
    pub fn new(view: V, client: C, notifier: N, table: StatusTable, task: TaskId, current: Option<TaskStatus>) -> Self {
        Self {
            view,
            client,
            notifier,
            table,
            task,
            confirmed: Cell::new(current),
            busy: Cell::new(false),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub async fn change_status(&self, status: TaskStatus) -> ChangeOutcome {
        if self.busy.get() || self.confirmed.get() == Some(status) {
            log::debug!("[task] {} -> {} skipped", self.task, status);
            return ChangeOutcome::Skipped;
        }
        self.busy.set(true);
        self.view.set_busy(true);
        let result = self.client.set_status(&self.task, status).await;
        self.view.set_busy(false);
        self.busy.set(false);

        match result {
            Ok(update) => {
                let label = update
                    .status_display
                    .as_deref()
                    .unwrap_or(&self.table.meta(status).label);
                self.view.apply_status(status, &self.table, label);
                self.view.show_status(status);
                self.confirmed.set(Some(status));
                self.notifier.notify(
                    ToastKind::Success,
                    update.message.as_deref().unwrap_or(DEFAULT_SUCCESS_MESSAGE),
                );
                ChangeOutcome::Applied
            }
            Err(err) => {
                log::error!("[task] status update for {} failed: {}", self.task, err);
                self.notifier.notify(ToastKind::Error, err.user_message());
                if let Some(previous) = self.confirmed.get() {
                    self.view.show_status(previous);
                }
                ChangeOutcome::Reverted
            }
        }
    }
}
