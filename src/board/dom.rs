//! DOM Board
//!
//! `BoardView` over the server-rendered markup under one root element.

use chrono::NaiveDate;
use kanban_dragdrop::element_midpoint;
use web_sys::{Element, HtmlElement, Node};

use super::view::BoardView;
use crate::config::BoardConfig;
use crate::models::{StatusTable, TaskId, TaskStatus};
use crate::page::{class_of, find, find_all, reload_page, restyle, set_progress, COMPLETED_CLASS};

const COMPLETED_STAMP_CLASS: &str = "task-completed";
const EMPTY_COLUMN_TEXT: &str = "No tasks in this column";

pub struct DomBoard {
    root: HtmlElement,
    config: BoardConfig,
}

/// Marker text for a card completed on `date`
pub fn completion_stamp(date: NaiveDate) -> String {
    format!("Completed: {}", date.format("%b %-d"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StampChange {
    Add,
    Remove,
    Keep,
}

/// What to do with a card's completion stamp. Cards leaving Completed lose it.
fn stamp_change(completed: bool, stamped: bool) -> StampChange {
    match (completed, stamped) {
        (true, false) => StampChange::Add,
        (false, true) => StampChange::Remove,
        _ => StampChange::Keep,
    }
}

impl DomBoard {
    pub fn new(root: HtmlElement, config: BoardConfig) -> Self {
        Self { root, config }
    }

    pub fn columns(&self) -> Vec<HtmlElement> {
        find_all(&self.root, &self.config.selectors.column)
    }

    pub fn cards(&self) -> Vec<HtmlElement> {
        find_all(&self.root, &self.config.selectors.card)
    }

    pub fn status_buttons(&self) -> Vec<HtmlElement> {
        find_all(&self.root, &self.config.selectors.status_button)
    }

    pub fn column_status(&self, column: &Element) -> Option<TaskStatus> {
        let raw = column.get_attribute(&self.config.status_attr)?;
        match raw.parse() {
            Ok(status) => Some(status),
            Err(err) => {
                log::warn!("[board] {}", err);
                None
            }
        }
    }

    pub fn card_id(&self, card: &Element) -> Option<TaskId> {
        card.get_attribute(&self.config.task_id_attr)
            .filter(|id| !id.is_empty())
            .map(TaskId::new)
    }

    /// Status of the column a card element currently sits in
    pub fn status_of_card(&self, card: &Element) -> Option<TaskStatus> {
        let column = card.closest(&self.config.selectors.column).ok().flatten()?;
        self.column_status(&column)
    }

    /// `(task, status)` a quick status button asks for
    pub fn button_target(&self, button: &Element) -> Option<(TaskId, TaskStatus)> {
        let task = self.card_id(button)?;
        let status = button.get_attribute(&self.config.status_attr)?.parse().ok()?;
        Some((task, status))
    }

    fn column(&self, status: TaskStatus) -> Option<HtmlElement> {
        self.columns()
            .into_iter()
            .find(|col| self.column_status(col) == Some(status))
    }

    fn body(&self, column: &HtmlElement) -> HtmlElement {
        find(column, &self.config.selectors.column_body).unwrap_or_else(|| column.clone())
    }

    fn card(&self, task: &TaskId) -> Option<HtmlElement> {
        self.cards()
            .into_iter()
            .find(|card| self.card_id(card).as_ref() == Some(task))
    }

    fn sync_empty_state(&self, body: &HtmlElement, count: usize) {
        let selector = &self.config.selectors.empty_state;
        match (count, find(body, selector)) {
            (0, None) => {
                let Some(doc) = body.owner_document() else { return };
                if let Ok(placeholder) = doc.create_element("div") {
                    placeholder.set_class_name(class_of(selector));
                    if let Ok(text) = doc.create_element("p") {
                        text.set_text_content(Some(EMPTY_COLUMN_TEXT));
                        let _ = placeholder.append_child(&text);
                    }
                    let _ = body.append_child(&placeholder);
                }
            }
            (n, Some(placeholder)) if n > 0 => placeholder.remove(),
            _ => {}
        }
    }

    fn mark_completed(&self, card: &HtmlElement, completed: bool) {
        let _ = card.class_list().toggle_with_force(COMPLETED_CLASS, completed);
        let stamp = find(card, &format!(".{}", COMPLETED_STAMP_CLASS));
        match stamp_change(completed, stamp.is_some()) {
            StampChange::Keep => {}
            StampChange::Remove => {
                if let Some(stamp) = stamp {
                    stamp.remove();
                }
            }
            StampChange::Add => {
                let Some(meta) = find(card, &self.config.selectors.meta) else { return };
                let Some(doc) = card.owner_document() else { return };
                if let Ok(stamp) = doc.create_element("div") {
                    stamp.set_class_name(COMPLETED_STAMP_CLASS);
                    stamp.set_text_content(Some(&completion_stamp(chrono::Local::now().date_naive())));
                    let _ = meta.append_child(&stamp);
                }
            }
        }
    }
}

impl BoardView for DomBoard {
    fn column_of(&self, task: &TaskId) -> Option<TaskStatus> {
        let card = self.card(task)?;
        self.status_of_card(&card)
    }

    fn card_midpoints(&self, column: TaskStatus, excluding: &TaskId) -> Vec<(TaskId, f64)> {
        let Some(column) = self.column(column) else { return Vec::new() };
        find_all(&self.body(&column), &self.config.selectors.card)
            .into_iter()
            .filter_map(|card| {
                let id = self.card_id(&card)?;
                (&id != excluding).then(|| (id, element_midpoint(&card)))
            })
            .collect()
    }

    fn place_card(&self, task: &TaskId, column: TaskStatus, before: Option<&TaskId>) -> bool {
        let (Some(card), Some(column)) = (self.card(task), self.column(column)) else {
            return false;
        };
        let body = self.body(&column);
        let anchor = before.and_then(|id| self.card(id));
        let anchor_node: Option<&Node> = anchor.as_ref().map(|el| {
            let node: &Node = el;
            node
        });
        if body.insert_before(&card, anchor_node).is_ok() {
            return true;
        }
        // Anchor was not a child of this body
        body.append_child(&card).is_ok()
    }

    fn refresh_counts(&self) {
        for column in self.columns() {
            let body = self.body(&column);
            let count = find_all(&body, &self.config.selectors.card).len();
            if let Some(counter) = find(&column, &self.config.selectors.count) {
                counter.set_text_content(Some(&count.to_string()));
            }
            self.sync_empty_state(&body, count);
        }
    }

    fn apply_status(&self, task: &TaskId, status: TaskStatus, table: &StatusTable, label: &str) {
        let Some(card) = self.card(task) else {
            log::debug!("[board] card {} gone before restyle", task);
            return;
        };
        let meta = table.meta(status);
        restyle(&card, table, &meta.css_class);

        if let Some(badge) = find(&card, &self.config.selectors.badge) {
            restyle(&badge, table, &meta.css_class);
            badge.set_text_content(Some(label));
        }

        set_progress(
            find(&card, &self.config.selectors.progress_fill),
            find(&card, &self.config.selectors.progress_label),
            meta.percentage,
        );

        self.mark_completed(&card, status == TaskStatus::Completed);
    }

    fn reload(&self) {
        reload_page(&self.root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_stamp_uses_short_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 7).unwrap();
        assert_eq!(completion_stamp(date), "Completed: Oct 7");
    }

    #[test]
    fn stamp_is_added_once_on_completion() {
        assert_eq!(stamp_change(true, false), StampChange::Add);
        assert_eq!(stamp_change(true, true), StampChange::Keep);
    }

    #[test]
    fn card_leaving_completed_loses_its_stamp() {
        assert_eq!(stamp_change(false, true), StampChange::Remove);
        assert_eq!(stamp_change(false, false), StampChange::Keep);
    }
}
