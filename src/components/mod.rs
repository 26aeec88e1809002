//! UI Components

mod toast_center;

pub use toast_center::{Notifier, ToastCenter, ToastKind};
