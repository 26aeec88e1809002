//! Kanban Board
//!
//! Builds the drag-sync controller for one board root and wires it to the
//! page's cards, columns and quick status buttons.

mod controller;
mod dom;
mod view;

use controller::{KanbanController, PendingSync};
use dom::DomBoard;

use std::rc::Rc;

use kanban_dragdrop::{bind_draggable, bind_drop_column, create_dnd_signals, DndSignals};
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, MouseEvent};

use crate::api::{DomCsrf, HttpStatusClient};
use crate::components::ToastCenter;
use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::logging;
use crate::models::{StatusTable, TaskStatus};
use crate::page;

/// Set on a board root once its listeners are bound
pub const ATTACHED_ATTR: &str = "data-kanban-attached";

pub type DomController = KanbanController<DomBoard, HttpStatusClient<DomCsrf>, ToastCenter>;

/// Attach drag-sync behaviour to the board under `root`.
///
/// A root can be attached once; later calls fail with `AlreadyAttached` so a
/// drop never produces two requests.
pub fn attach(root: HtmlElement, config: BoardConfig) -> Result<Rc<DomController>, BoardError> {
    page::ensure_unclaimed(root.get_attribute(ATTACHED_ATTR))?;
    config.validate()?;
    logging::init(config.log_level()?);
    let table = StatusTable::new(StatusTable::standard_entries())?;

    let origin = root
        .owner_document()
        .and_then(|doc| doc.default_view())
        .and_then(|win| win.location().origin().ok())
        .ok_or(BoardError::NoDocument)?;
    let config = config.with_origin(&origin);

    let toasts = ToastCenter::new(config.toast_duration_ms);
    toasts.mount(page::messages_container(&root, &config.selectors.messages)?);
    page::claim(&root, ATTACHED_ATTR)?;

    let view = DomBoard::new(root.clone(), config.clone());
    let csrf = DomCsrf::new(root, &config.csrf_field, &config.csrf_cookie);
    let client = HttpStatusClient::new(config, csrf);
    let controller = Rc::new(KanbanController::new(view, client, toasts, table));

    let dnd = create_dnd_signals::<TaskStatus>();
    let columns = bind_columns(&controller, dnd);
    let cards = bind_cards(&controller, dnd);
    bind_status_buttons(&controller);
    log::info!("[board] attached: {} columns, {} cards", columns, cards);

    Ok(controller)
}

/// JS entry point: `attachKanbanBoard(root, config?)`.
#[wasm_bindgen(js_name = attachKanbanBoard)]
pub fn attach_kanban_board(root: HtmlElement, config: JsValue) -> Result<(), JsValue> {
    let config = if config.is_undefined() || config.is_null() {
        BoardConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config).map_err(|e| js_sys::Error::new(&e.to_string()))?
    };
    attach(root, config)
        .map(|_| ())
        .map_err(|e| js_sys::Error::new(&e.to_string()).into())
}

fn spawn_sync(controller: &Rc<DomController>, pending: PendingSync) {
    let controller = Rc::clone(controller);
    spawn_local(async move {
        controller.sync(pending).await;
    });
}

fn bind_columns(controller: &Rc<DomController>, dnd: DndSignals<TaskStatus>) -> usize {
    let mut bound = 0;
    for column in controller.view().columns() {
        let Some(status) = controller.view().column_status(&column) else {
            continue;
        };
        let ctrl = Rc::clone(controller);
        bind_drop_column(&column, dnd, status, move |outcome, pointer_y| {
            if let Some(pending) = ctrl.commit_drop(outcome, pointer_y) {
                spawn_sync(&ctrl, pending);
            }
        });
        bound += 1;
    }
    bound
}

fn bind_cards(controller: &Rc<DomController>, dnd: DndSignals<TaskStatus>) -> usize {
    let mut bound = 0;
    for card in controller.view().cards() {
        let Some(task) = controller.view().card_id(&card) else {
            log::warn!("[board] card without task id skipped");
            continue;
        };
        let ctrl = Rc::clone(controller);
        bind_draggable(&card, dnd, task.as_str().to_string(), move |el| {
            ctrl.view().status_of_card(el)
        });
        bound += 1;
    }
    bound
}

fn bind_status_buttons(controller: &Rc<DomController>) {
    for button in controller.view().status_buttons() {
        let ctrl = Rc::clone(controller);
        let el = button.clone();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            ev.prevent_default();
            let Some((task, status)) = ctrl.view().button_target(&el) else {
                log::warn!("[board] status button without task/status");
                return;
            };
            if let Some(pending) = ctrl.move_to_status(task, status) {
                spawn_sync(&ctrl, pending);
            }
        });
        let _ = button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        on_click.forget();
    }
}
