//! Task Page
//!
//! Status dropdowns and quick status buttons on a task's detail page, synced
//! through the same status endpoint as the board.

mod controller;
mod dom;
mod view;

use std::rc::Rc;

use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, MouseEvent};

use controller::TaskPageController;
use dom::DomTaskPage;

use crate::api::{DomCsrf, HttpStatusClient};
use crate::components::ToastCenter;
use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::logging;
use crate::models::{StatusTable, TaskStatus};
use crate::page;

const ATTACHED_ATTR: &str = "data-task-page-attached";

pub type DomTaskController = TaskPageController<DomTaskPage, HttpStatusClient<DomCsrf>, ToastCenter>;

/// Bind the status controls under `root`. `Ok(None)` when there are none.
pub fn attach(root: HtmlElement, config: BoardConfig) -> Result<Option<Rc<DomTaskController>>, BoardError> {
    page::ensure_unclaimed(root.get_attribute(ATTACHED_ATTR))?;
    config.validate()?;
    let table = StatusTable::new(StatusTable::standard_entries())?;

    let origin = root
        .owner_document()
        .and_then(|doc| doc.default_view())
        .and_then(|win| win.location().origin().ok())
        .ok_or(BoardError::NoDocument)?;
    let config = config.with_origin(&origin);

    let Some(view) = DomTaskPage::new(root.clone(), config.clone()) else {
        return Ok(None);
    };
    logging::init(config.log_level()?);

    let toasts = ToastCenter::new(config.toast_duration_ms);
    toasts.mount(page::messages_container(&root, &config.selectors.messages)?);
    page::claim(&root, ATTACHED_ATTR)?;

    let task = view.task().clone();
    let current = view.rendered_status(&table);
    let csrf = DomCsrf::new(root, &config.csrf_field, &config.csrf_cookie);
    let client = HttpStatusClient::new(config, csrf);
    let controller = Rc::new(TaskPageController::new(view, client, toasts, table, task.clone(), current));

    bind_selects(&controller);
    bind_buttons(&controller);
    log::info!(
        "[task] attached to {}: {} selects, {} buttons",
        task,
        controller.view().selects().len(),
        controller.view().buttons().len()
    );
    Ok(Some(controller))
}

fn spawn_change(controller: &Rc<DomTaskController>, status: TaskStatus) {
    let controller = Rc::clone(controller);
    spawn_local(async move {
        controller.change_status(status).await;
    });
}

fn bind_selects(controller: &Rc<DomTaskController>) {
    for select in controller.view().selects() {
        let ctrl = Rc::clone(controller);
        let el = select.clone();
        let on_change = Closure::<dyn FnMut(Event)>::new(move |_ev: Event| match el.value().parse() {
            Ok(status) => spawn_change(&ctrl, status),
            Err(err) => log::warn!("[task] {}", err),
        });
        let _ = select.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
        on_change.forget();
    }
}

fn bind_buttons(controller: &Rc<DomTaskController>) {
    for button in controller.view().buttons() {
        let ctrl = Rc::clone(controller);
        let el = button.clone();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            ev.prevent_default();
            if el.has_attribute("disabled") {
                return;
            }
            match ctrl.view().button_status(&el) {
                Some(status) => spawn_change(&ctrl, status),
                None => log::warn!("[task] status button without status"),
            }
        });
        let _ = button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        on_click.forget();
    }
}
