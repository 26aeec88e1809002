//! DOM Task Page
//!
//! Status controls for one task outside any attached board.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlSelectElement};

use super::view::TaskPageView;
use crate::board::ATTACHED_ATTR as BOARD_ATTACHED_ATTR;
use crate::config::BoardConfig;
use crate::models::{StatusTable, TaskId, TaskStatus};
use crate::page::{find, find_all, restyle, set_progress};

pub struct DomTaskPage {
    root: HtmlElement,
    config: BoardConfig,
    task: TaskId,
    selects: Vec<HtmlSelectElement>,
    buttons: Vec<HtmlElement>,
}

/// Board buttons belong to the board controller
fn outside_board(el: &Element) -> bool {
    el.closest(&format!("[{}]", BOARD_ATTACHED_ATTR))
        .ok()
        .flatten()
        .is_none()
}

impl DomTaskPage {
    /// `None` when `root` has no status controls of its own.
    ///
    /// The first control names the task; controls for other tasks are left
    /// alone.
    pub fn new(root: HtmlElement, config: BoardConfig) -> Option<Self> {
        let selects: Vec<HtmlElement> = find_all(&root, &config.selectors.status_select)
            .into_iter()
            .filter(|el| outside_board(el))
            .collect();
        let buttons: Vec<HtmlElement> = find_all(&root, &config.selectors.status_button)
            .into_iter()
            .filter(|el| outside_board(el))
            .collect();

        let task = selects
            .iter()
            .chain(buttons.iter())
            .find_map(|el| el.get_attribute(&config.task_id_attr))
            .filter(|id| !id.is_empty())
            .map(TaskId::new)?;
        let owned = |el: &HtmlElement| el.get_attribute(&config.task_id_attr).as_deref() == Some(task.as_str());

        let selects = selects
            .into_iter()
            .filter(|el| owned(el))
            .filter_map(|el| el.dyn_into::<HtmlSelectElement>().ok())
            .collect();
        let buttons = buttons.into_iter().filter(|el| owned(el)).collect();

        Some(Self {
            root,
            config,
            task,
            selects,
            buttons,
        })
    }

    pub fn task(&self) -> &TaskId {
        &self.task
    }

    pub fn selects(&self) -> &[HtmlSelectElement] {
        &self.selects
    }

    pub fn buttons(&self) -> &[HtmlElement] {
        &self.buttons
    }

    pub fn button_status(&self, button: &Element) -> Option<TaskStatus> {
        button.get_attribute(&self.config.status_attr)?.parse().ok()
    }

    /// Status the server rendered: the dropdown's value, else the tag's class.
    pub fn rendered_status(&self, table: &StatusTable) -> Option<TaskStatus> {
        if let Some(status) = self.selects.iter().find_map(|s| s.value().parse().ok()) {
            return Some(status);
        }
        let tag = find(&self.root, &self.config.selectors.status_tag)?;
        let classes = tag.class_list();
        TaskStatus::ALL
            .into_iter()
            .find(|status| classes.contains(&table.meta(*status).css_class))
    }
}

impl TaskPageView for DomTaskPage {
    fn set_busy(&self, busy: bool) {
        for select in &self.selects {
            select.set_disabled(busy);
        }
        for button in &self.buttons {
            let _ = if busy {
                button.set_attribute("disabled", "")
            } else {
                button.remove_attribute("disabled")
            };
        }
    }

    fn show_status(&self, status: TaskStatus) {
        for select in &self.selects {
            select.set_value(status.as_str());
        }
        let completed = status == TaskStatus::Completed;
        for button in &self.buttons {
            if self.button_status(button) != Some(TaskStatus::Completed) {
                continue;
            }
            let _ = if completed {
                button.set_attribute("disabled", "")
            } else {
                button.remove_attribute("disabled")
            };
        }
    }

    fn apply_status(&self, status: TaskStatus, table: &StatusTable, label: &str) {
        let meta = table.meta(status);
        if let Some(tag) = find(&self.root, &self.config.selectors.status_tag) {
            restyle(&tag, table, &meta.css_class);
            if let Some(text) = find(&tag, "span") {
                text.set_text_content(Some(label));
            }
        }
        set_progress(
            find(&self.root, &self.config.selectors.progress_fill),
            find(&self.root, &self.config.selectors.progress_label),
            meta.percentage,
        );
    }
}
