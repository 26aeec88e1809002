//! Toast Center Component
//!
//! Transient success/error messages, rendered by Leptos into an explicit
//! container and dismissed after a fixed delay.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    // Not raised by the status flows
    #[allow(dead_code)]
    Info,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Anything that can show the user a short message.
pub trait Notifier {
    fn notify(&self, kind: ToastKind, message: &str);
}

#[derive(Clone, Copy)]
pub struct ToastCenter {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u32>,
    duration_ms: u32,
}

impl ToastCenter {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
            duration_ms,
        }
    }

    /// Render into `container` for the lifetime of the page.
    pub fn mount(self, container: HtmlElement) {
        let handle = leptos::mount::mount_to(container, move || view! { <ToastList center=self /> });
        handle.forget();
    }

    pub fn push(&self, kind: ToastKind, message: &str) -> u32 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id.wrapping_add(1));
        self.toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                kind,
                message: message.to_string(),
            })
        });
        id
    }

    pub fn dismiss(&self, id: u32) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    #[cfg(test)]
    pub fn visible(&self) -> Vec<Toast> {
        self.toasts.get_untracked()
    }
}

impl Notifier for ToastCenter {
    fn notify(&self, kind: ToastKind, message: &str) {
        let id = self.push(kind, message);
        let center = *self;
        spawn_local(async move {
            TimeoutFuture::new(center.duration_ms).await;
            center.dismiss(id);
        });
    }
}

#[component]
fn ToastList(center: ToastCenter) -> impl IntoView {
    view! {
        <For
            each=move || center.toasts.get()
            key=|toast| toast.id
            children=move |toast: Toast| {
                let id = toast.id;
                view! {
                    <div class=format!("message message-{} show", toast.kind.as_str())>
                        <div class="message-content">{toast.message}</div>
                        <button class="message-close" on:click=move |_| center.dismiss(id)>
                            "×"
                        </button>
                    </div>
                }
            }
        />
    }
}
