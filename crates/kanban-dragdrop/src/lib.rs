//! Kanban DragDrop Utilities
//!
//! HTML5 drag-and-drop for server-rendered boards, driven by Leptos signals.
//! The DOM is never touched while hovering; callers mutate it once, on drop.

mod geometry;
mod session;

pub use geometry::{element_midpoint, insertion_point, midpoint};
pub use session::{DragSession, DropOutcome};

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlElement, Node};

/// Class on the card being dragged
pub const DRAGGING_CLASS: &str = "is-dragging";
/// Class on the column under the pointer
pub const DRAG_OVER_CLASS: &str = "drag-over";

/// DnD state signals
pub struct DndSignals<C: 'static> {
    pub session_read: ReadSignal<DragSession<C>>,
    session_write: WriteSignal<DragSession<C>>,
}

impl<C: 'static> Clone for DndSignals<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: 'static> Copy for DndSignals<C> {}

pub fn create_dnd_signals<C>() -> DndSignals<C>
where
    C: Clone + PartialEq + Send + Sync + 'static,
{
    let (session_read, session_write) = signal(DragSession::<C>::Idle);
    DndSignals {
        session_read,
        session_write,
    }
}

impl<C> DndSignals<C>
where
    C: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn begin(&self, item: String, source: C) {
        self.session_write.update(|s| s.begin(item, source));
    }

    pub fn hover(&self, column: C) {
        // Skip the write on repeated dragover ticks over the same column
        if self.session_read.with_untracked(|s| s.over() == Some(&column)) {
            return;
        }
        self.session_write.update(|s| s.hover(column));
    }

    pub fn leave(&self, column: &C) {
        self.session_write.update(|s| s.leave(column));
    }

    pub fn drop_on(&self, column: C) -> DropOutcome<C> {
        self.session_write
            .try_update(|s| s.drop_on(column))
            .unwrap_or(DropOutcome::Ignored)
    }

    pub fn cancel(&self) {
        if self.is_dragging() {
            log::debug!("[dnd] drag cancelled");
            self.session_write.update(|s| s.cancel());
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session_read.with_untracked(|s| s.is_dragging())
    }

    /// Id of the card in flight
    pub fn dragging_item(&self) -> Option<String> {
        self.session_read.with_untracked(|s| s.item().map(str::to_owned))
    }
}

/// Make a card draggable.
///
/// `resolve_source` reads the card's current column at dragstart; cards move
/// between columns over the page's lifetime so it cannot be fixed at bind time.
pub fn bind_draggable<C, R>(card: &HtmlElement, dnd: DndSignals<C>, item: String, resolve_source: R)
where
    C: Clone + PartialEq + Send + Sync + 'static,
    R: Fn(&HtmlElement) -> Option<C> + 'static,
{
    let _ = card.set_attribute("draggable", "true");

    let el = card.clone();
    let on_dragstart = Closure::<dyn FnMut(DragEvent)>::new(move |ev: DragEvent| {
        let Some(source) = resolve_source(&el) else {
            log::warn!("[dnd] card {} is not inside a known column", item);
            return;
        };
        if let Some(dt) = ev.data_transfer() {
            let _ = dt.set_data("text/plain", &item);
            dt.set_effect_allowed("move");
        }
        let _ = el.class_list().add_1(DRAGGING_CLASS);
        dnd.begin(item.clone(), source);
    });
    let _ = card.add_event_listener_with_callback("dragstart", on_dragstart.as_ref().unchecked_ref());
    on_dragstart.forget();

    // dragend fires after drop, so a session still open here was cancelled
    let el = card.clone();
    let on_dragend = Closure::<dyn FnMut(DragEvent)>::new(move |_ev: DragEvent| {
        let _ = el.class_list().remove_1(DRAGGING_CLASS);
        dnd.cancel();
    });
    let _ = card.add_event_listener_with_callback("dragend", on_dragend.as_ref().unchecked_ref());
    on_dragend.forget();
}

/// Make a column a drop target.
///
/// `on_drop` runs exactly once per completed gesture over this column with
/// the outcome and the pointer's viewport Y coordinate.
pub fn bind_drop_column<C, F>(column: &HtmlElement, dnd: DndSignals<C>, key: C, on_drop: F)
where
    C: Clone + PartialEq + Send + Sync + 'static,
    F: Fn(DropOutcome<C>, f64) + 'static,
{
    for event in ["dragenter", "dragover"] {
        let el = column.clone();
        let key = key.clone();
        let on_over = Closure::<dyn FnMut(DragEvent)>::new(move |ev: DragEvent| {
            // Only accept our own cards, not files or foreign drags
            if !dnd.is_dragging() {
                return;
            }
            ev.prevent_default();
            if let Some(dt) = ev.data_transfer() {
                dt.set_drop_effect("move");
            }
            let _ = el.class_list().add_1(DRAG_OVER_CLASS);
            dnd.hover(key.clone());
        });
        let _ = column.add_event_listener_with_callback(event, on_over.as_ref().unchecked_ref());
        on_over.forget();
    }

    let el = column.clone();
    let leave_key = key.clone();
    let on_dragleave = Closure::<dyn FnMut(DragEvent)>::new(move |ev: DragEvent| {
        // Moving onto a child element also fires dragleave
        let entered = ev.related_target().and_then(|t| t.dyn_into::<Node>().ok());
        if entered.is_some() && el.contains(entered.as_ref()) {
            return;
        }
        let _ = el.class_list().remove_1(DRAG_OVER_CLASS);
        dnd.leave(&leave_key);
    });
    let _ = column.add_event_listener_with_callback("dragleave", on_dragleave.as_ref().unchecked_ref());
    on_dragleave.forget();

    let el = column.clone();
    let on_drop_event = Closure::<dyn FnMut(DragEvent)>::new(move |ev: DragEvent| {
        ev.prevent_default();
        let _ = el.class_list().remove_1(DRAG_OVER_CLASS);
        let outcome = dnd.drop_on(key.clone());
        if outcome != DropOutcome::Ignored {
            on_drop(outcome, f64::from(ev.client_y()));
        }
    });
    let _ = column.add_event_listener_with_callback("drop", on_drop_event.as_ref().unchecked_ref());
    on_drop_event.forget();
}
