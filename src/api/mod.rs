//! Server API
//!
//! The status-update endpoint and the CSRF token it requires.

mod csrf;
mod status;

pub use csrf::DomCsrf;
pub use status::{HttpStatusClient, StatusClient};

#[cfg(test)]
pub use status::StatusUpdate;
