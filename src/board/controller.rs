//! Kanban Drag-Sync Controller
//!
//! Turns finished drag gestures into at most one status request each and
//! reconciles the page with the server's answer.

use kanban_dragdrop::{insertion_point, DropOutcome};

use super::view::BoardView;
use crate::api::StatusClient;
use crate::components::{Notifier, ToastKind};
use crate::models::{StatusTable, TaskId, TaskStatus};

const DEFAULT_SUCCESS_MESSAGE: &str = "Task status updated";

/// A status change applied locally and awaiting the server
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSync {
    pub task: TaskId,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Server accepted; card restyled in place
    Confirmed,
    /// Something failed; page reload requested
    Reloaded,
}

pub struct KanbanController<V, C, N> {
    view: V,
    client: C,
    notifier: N,
    table: StatusTable,
}

impl<V, C, N> KanbanController<V, C, N>
where
    V: BoardView,
    C: StatusClient,
    N: Notifier,
{
    pub fn new(view: V, client: C, notifier: N, table: StatusTable) -> Self {
        Self {
            view,
            client,
            notifier,
            table,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Card the dragged card should land before in `column`; `None` appends.
    pub fn compute_insertion_point(&self, column: TaskStatus, dragged: &TaskId, pointer_y: f64) -> Option<TaskId> {
        let cards = self.view.card_midpoints(column, dragged);
        insertion_point(cards.iter().map(|(_, mid)| *mid), pointer_y).map(|index| cards[index].0.clone())
    }

    /// Apply a finished gesture to the DOM.
    ///
    /// Returns the sync to run for a cross-column move. A same-column drop
    /// only reorders.
    pub fn commit_drop(&self, outcome: DropOutcome<TaskStatus>, pointer_y: f64) -> Option<PendingSync> {
        let (item, from, to) = match outcome {
            DropOutcome::SameColumn { item, column } => (item, column, column),
            DropOutcome::Moved { item, from, to } => (item, from, to),
            DropOutcome::Ignored => return None,
        };
        let task = TaskId::new(item);
        let before = self.compute_insertion_point(to, &task, pointer_y);
        if !self.view.place_card(&task, to, before.as_ref()) {
            log::warn!("[board] card {} vanished before drop", task);
            return None;
        }
        if from == to {
            log::debug!("[board] reordered {} within {}", task, to);
            return None;
        }
        self.view.refresh_counts();
        log::info!("[board] moved {} from {} to {}", task, from, to);
        Some(PendingSync { task, status: to })
    }

    /// Quick status button: send the card to the end of `status`'s column.
    pub fn move_to_status(&self, task: TaskId, status: TaskStatus) -> Option<PendingSync> {
        match self.view.column_of(&task) {
            None => {
                log::warn!("[board] no card for task {}", task);
                None
            }
            Some(current) if current == status => None,
            Some(_) => {
                if !self.view.place_card(&task, status, None) {
                    log::warn!("[board] no column for status {}", status);
                    return None;
                }
                self.view.refresh_counts();
                Some(PendingSync { task, status })
            }
        }
    }

    /// Persist a pending change. Failure of any kind reloads the page.
    pub async fn sync(&self, pending: PendingSync) -> SyncOutcome {
        let PendingSync { task, status } = pending;
        match self.client.set_status(&task, status).await {
            Ok(update) => {
                let label = update
                    .status_display
                    .as_deref()
                    .unwrap_or(&self.table.meta(status).label);
                self.view.apply_status(&task, status, &self.table, label);
                self.view.refresh_counts();
                self.notifier.notify(
                    ToastKind::Success,
                    update.message.as_deref().unwrap_or(DEFAULT_SUCCESS_MESSAGE),
                );
                SyncOutcome::Confirmed
            }
            Err(err) => {
                log::error!("[board] status update for {} failed: {}", task, err);
                self.notifier.notify(ToastKind::Error, err.user_message());
                self.view.reload();
                SyncOutcome::Reloaded
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use async_trait::async_trait;

    use super::*;
    use crate::api::StatusUpdate;
    use crate::error::{SyncError, GENERIC_SYNC_ERROR};

    /// Columns of card ids; card i in a column sits at midpoint (i + 1) * 100
    struct FakeBoard {
        columns: RefCell<Vec<(TaskStatus, Vec<TaskId>)>>,
        applied: RefCell<Vec<(TaskId, TaskStatus, String)>>,
        count_refreshes: Cell<u32>,
        reloads: Cell<u32>,
    }

    impl FakeBoard {
        fn new(layout: &[(TaskStatus, &[&str])]) -> Self {
            let columns = TaskStatus::ALL
                .into_iter()
                .map(|status| {
                    let ids = layout
                        .iter()
                        .find(|(s, _)| *s == status)
                        .map(|(_, ids)| ids.iter().map(|id| TaskId::new(*id)).collect::<Vec<_>>())
                        .unwrap_or_default();
                    (status, ids)
                })
                .collect();
            Self {
                columns: RefCell::new(columns),
                applied: RefCell::new(Vec::new()),
                count_refreshes: Cell::new(0),
                reloads: Cell::new(0),
            }
        }

        fn ids(&self, status: TaskStatus) -> Vec<String> {
            self.columns
                .borrow()
                .iter()
                .find(|(s, _)| *s == status)
                .map(|(_, ids)| ids.iter().map(|id| id.as_str().to_string()).collect())
                .unwrap_or_default()
        }
    }

    impl BoardView for FakeBoard {
        fn column_of(&self, task: &TaskId) -> Option<TaskStatus> {
            self.columns
                .borrow()
                .iter()
                .find(|(_, ids)| ids.contains(task))
                .map(|(status, _)| *status)
        }

        fn card_midpoints(&self, column: TaskStatus, excluding: &TaskId) -> Vec<(TaskId, f64)> {
            self.columns
                .borrow()
                .iter()
                .find(|(s, _)| *s == column)
                .map(|(_, ids)| {
                    ids.iter()
                        .enumerate()
                        .filter(|(_, id)| *id != excluding)
                        .map(|(i, id)| (id.clone(), (i as f64 + 1.0) * 100.0))
                        .collect()
                })
                .unwrap_or_default()
        }

        fn place_card(&self, task: &TaskId, column: TaskStatus, before: Option<&TaskId>) -> bool {
            let mut columns = self.columns.borrow_mut();
            let Some(source) = columns.iter_mut().find(|(_, ids)| ids.contains(task)) else {
                return false;
            };
            source.1.retain(|id| id != task);
            let Some((_, target)) = columns.iter_mut().find(|(s, _)| *s == column) else {
                return false;
            };
            let at = before
                .and_then(|b| target.iter().position(|id| id == b))
                .unwrap_or(target.len());
            target.insert(at, task.clone());
            true
        }

        fn refresh_counts(&self) {
            self.count_refreshes.set(self.count_refreshes.get() + 1);
        }

        fn apply_status(&self, task: &TaskId, status: TaskStatus, _table: &StatusTable, label: &str) {
            self.applied
                .borrow_mut()
                .push((task.clone(), status, label.to_string()));
        }

        fn reload(&self) {
            self.reloads.set(self.reloads.get() + 1);
        }
    }

    struct FakeClient {
        reply: Result<StatusUpdate, SyncError>,
        calls: RefCell<Vec<(TaskId, TaskStatus)>>,
    }

    impl FakeClient {
        fn replying(reply: Result<StatusUpdate, SyncError>) -> Self {
            Self {
                reply,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl StatusClient for FakeClient {
        async fn set_status(&self, task: &TaskId, status: TaskStatus) -> Result<StatusUpdate, SyncError> {
            self.calls.borrow_mut().push((task.clone(), status));
            self.reply.clone()
        }
    }

    #[derive(Default)]
    struct FakeNotifier {
        shown: RefCell<Vec<(ToastKind, String)>>,
    }

    impl Notifier for FakeNotifier {
        fn notify(&self, kind: ToastKind, message: &str) {
            self.shown.borrow_mut().push((kind, message.to_string()));
        }
    }

    type TestController = KanbanController<FakeBoard, FakeClient, FakeNotifier>;

    fn controller(layout: &[(TaskStatus, &[&str])], reply: Result<StatusUpdate, SyncError>) -> TestController {
        KanbanController::new(
            FakeBoard::new(layout),
            FakeClient::replying(reply),
            FakeNotifier::default(),
            StatusTable::new(StatusTable::standard_entries()).unwrap(),
        )
    }

    fn moved(item: &str, from: TaskStatus, to: TaskStatus) -> DropOutcome<TaskStatus> {
        DropOutcome::Moved { item: item.to_string(), from, to }
    }

    fn ok() -> Result<StatusUpdate, SyncError> {
        Ok(StatusUpdate::default())
    }

    #[tokio::test]
    async fn same_column_drop_reorders_without_request() {
        let ctrl = controller(&[(TaskStatus::Todo, &["a", "b", "c"])], ok());

        let outcome = DropOutcome::SameColumn { item: "c".to_string(), column: TaskStatus::Todo };
        // b sits at 200; pointer at 150 lands c before b
        assert_eq!(ctrl.commit_drop(outcome, 150.0), None);

        assert_eq!(ctrl.view.ids(TaskStatus::Todo), ["a", "c", "b"]);
        assert!(ctrl.client.calls.borrow().is_empty());
        assert_eq!(ctrl.view.count_refreshes.get(), 0);
    }

    #[tokio::test]
    async fn cross_column_drop_syncs_exactly_once_with_target_status() {
        let ctrl = controller(
            &[(TaskStatus::Todo, &["a"]), (TaskStatus::Review, &["x", "y", "z"])],
            ok(),
        );

        let pending = ctrl
            .commit_drop(moved("a", TaskStatus::Todo, TaskStatus::Review), 210.0)
            .expect("cross-column drop should sync");
        assert_eq!(pending, PendingSync { task: TaskId::new("a"), status: TaskStatus::Review });
        // Midpoints 100/200/300, pointer 210: lands before z
        assert_eq!(ctrl.view.ids(TaskStatus::Review), ["x", "y", "a", "z"]);
        assert!(ctrl.view.ids(TaskStatus::Todo).is_empty());

        assert_eq!(ctrl.sync(pending).await, SyncOutcome::Confirmed);
        assert_eq!(
            *ctrl.client.calls.borrow(),
            vec![(TaskId::new("a"), TaskStatus::Review)]
        );
    }

    #[tokio::test]
    async fn drop_below_every_card_appends() {
        let ctrl = controller(&[(TaskStatus::Todo, &["a"]), (TaskStatus::Completed, &["x", "y"])], ok());
        ctrl.commit_drop(moved("a", TaskStatus::Todo, TaskStatus::Completed), 900.0);
        assert_eq!(ctrl.view.ids(TaskStatus::Completed), ["x", "y", "a"]);
    }

    #[tokio::test]
    async fn ignored_drop_does_nothing() {
        let ctrl = controller(&[(TaskStatus::Todo, &["a"])], ok());
        assert_eq!(ctrl.commit_drop(DropOutcome::Ignored, 0.0), None);
        assert_eq!(ctrl.view.ids(TaskStatus::Todo), ["a"]);
    }

    #[tokio::test]
    async fn vanished_card_is_not_synced() {
        let ctrl = controller(&[(TaskStatus::Todo, &["a"])], ok());
        assert_eq!(ctrl.commit_drop(moved("ghost", TaskStatus::Todo, TaskStatus::Review), 0.0), None);
    }

    #[tokio::test]
    async fn success_restyles_card_without_reload() {
        let ctrl = controller(&[(TaskStatus::Todo, &["a"])], ok());
        let pending = ctrl
            .commit_drop(moved("a", TaskStatus::Todo, TaskStatus::InProgress), 0.0)
            .unwrap();

        assert_eq!(ctrl.sync(pending).await, SyncOutcome::Confirmed);
        assert_eq!(
            *ctrl.view.applied.borrow(),
            vec![(TaskId::new("a"), TaskStatus::InProgress, "In Progress".to_string())]
        );
        assert_eq!(ctrl.view.reloads.get(), 0);
        assert_eq!(
            *ctrl.notifier.shown.borrow(),
            vec![(ToastKind::Success, DEFAULT_SUCCESS_MESSAGE.to_string())]
        );
    }

    #[tokio::test]
    async fn success_prefers_server_label_and_message() {
        let reply = Ok(StatusUpdate {
            message: Some("Task status updated to Review".into()),
            status_display: Some("Under review".into()),
        });
        let ctrl = controller(&[(TaskStatus::Todo, &["a"])], reply);
        let pending = ctrl.move_to_status(TaskId::new("a"), TaskStatus::Review).unwrap();
        ctrl.sync(pending).await;

        assert_eq!(ctrl.view.applied.borrow()[0].2, "Under review");
        assert_eq!(ctrl.notifier.shown.borrow()[0].1, "Task status updated to Review");
    }

    #[tokio::test]
    async fn server_rejection_shows_message_and_reloads() {
        let ctrl = controller(
            &[(TaskStatus::Todo, &["a"])],
            Err(SyncError::Rejected { message: "X".into() }),
        );
        let pending = ctrl
            .commit_drop(moved("a", TaskStatus::Todo, TaskStatus::Completed), 0.0)
            .unwrap();

        assert_eq!(ctrl.sync(pending).await, SyncOutcome::Reloaded);
        assert_eq!(*ctrl.notifier.shown.borrow(), vec![(ToastKind::Error, "X".to_string())]);
        assert_eq!(ctrl.view.reloads.get(), 1);
        assert!(ctrl.view.applied.borrow().is_empty());
    }

    #[tokio::test]
    async fn network_failure_reloads_with_generic_message() {
        let ctrl = controller(
            &[(TaskStatus::Todo, &["a"])],
            Err(SyncError::Network("connection refused".into())),
        );
        let pending = ctrl
            .commit_drop(moved("a", TaskStatus::Todo, TaskStatus::Archived), 0.0)
            .unwrap();

        assert_eq!(ctrl.sync(pending).await, SyncOutcome::Reloaded);
        assert_eq!(
            *ctrl.notifier.shown.borrow(),
            vec![(ToastKind::Error, GENERIC_SYNC_ERROR.to_string())]
        );
        assert_eq!(ctrl.view.reloads.get(), 1);
    }

    #[tokio::test]
    async fn status_button_moves_card_to_end_of_column() {
        let ctrl = controller(&[(TaskStatus::Todo, &["a"]), (TaskStatus::Review, &["x"])], ok());
        let pending = ctrl.move_to_status(TaskId::new("a"), TaskStatus::Review);

        assert_eq!(pending, Some(PendingSync { task: TaskId::new("a"), status: TaskStatus::Review }));
        assert_eq!(ctrl.view.ids(TaskStatus::Review), ["x", "a"]);
        assert_eq!(ctrl.view.count_refreshes.get(), 1);
    }

    #[tokio::test]
    async fn status_button_for_current_column_is_noop() {
        let ctrl = controller(&[(TaskStatus::Todo, &["a"])], ok());
        assert_eq!(ctrl.move_to_status(TaskId::new("a"), TaskStatus::Todo), None);
        assert_eq!(ctrl.move_to_status(TaskId::new("missing"), TaskStatus::Review), None);
        assert!(ctrl.client.calls.borrow().is_empty());
    }

    #[test]
    fn insertion_point_skips_dragged_card() {
        let ctrl = controller(&[(TaskStatus::Todo, &["a", "b", "c"])], ok());
        // a at 100 is the dragged card; nearest below 50 among b/c is b
        assert_eq!(
            ctrl.compute_insertion_point(TaskStatus::Todo, &TaskId::new("a"), 50.0),
            Some(TaskId::new("b"))
        );
        assert_eq!(ctrl.compute_insertion_point(TaskStatus::Todo, &TaskId::new("a"), 350.0), None);
    }
}
