//! Board Configuration
//!
//! Read from the `data-board-config` JSON attribute on the board root, or
//! passed in from JS. Every field has a default matching the server templates.

use log::LevelFilter;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use web_sys::Element;

use crate::error::ConfigError;
use crate::models::TaskId;

const TASK_ID_PLACEHOLDER: &str = "{task_id}";

/// Escapes everything but RFC 3986 unreserved characters
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// CSS selectors for the server-rendered markup
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub column: String,
    /// Card container inside a column; the column itself when absent
    pub column_body: String,
    pub card: String,
    pub count: String,
    pub empty_state: String,
    pub status_button: String,
    /// Status dropdowns on the task detail page
    pub status_select: String,
    /// Status tag in the task detail header
    pub status_tag: String,
    pub messages: String,
    pub badge: String,
    pub progress_fill: String,
    pub progress_label: String,
    pub meta: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            column: ".kanban-column".into(),
            column_body: ".column-body".into(),
            card: ".draggable".into(),
            count: ".task-count".into(),
            empty_state: ".empty-column".into(),
            status_button: ".task-status-btn".into(),
            status_select: ".task-status-select".into(),
            status_tag: ".task-status-tag".into(),
            messages: ".messages".into(),
            badge: ".status-badge".into(),
            progress_fill: ".progress-fill".into(),
            progress_label: ".progress-percentage".into(),
            meta: ".task-meta".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Origin prefixed to the endpoint; the page origin when unset
    pub base_url: Option<String>,
    pub status_endpoint: String,
    pub csrf_field: String,
    pub csrf_cookie: String,
    pub csrf_header: String,
    pub task_id_attr: String,
    pub status_attr: String,
    pub selectors: Selectors,
    pub toast_duration_ms: u32,
    pub log_level: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            status_endpoint: "/tasks/{task_id}/update-status/".into(),
            csrf_field: "csrfmiddlewaretoken".into(),
            csrf_cookie: "csrftoken".into(),
            csrf_header: "X-CSRFToken".into(),
            task_id_attr: "data-task-id".into(),
            status_attr: "data-status".into(),
            selectors: Selectors::default(),
            toast_duration_ms: 5000,
            log_level: "info".into(),
        }
    }
}

impl BoardConfig {
    pub const ATTRIBUTE: &'static str = "data-board-config";

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Config from the root's attribute, defaults when it is missing or blank.
    pub fn from_element(root: &Element) -> Result<Self, ConfigError> {
        match root.get_attribute(Self::ATTRIBUTE) {
            Some(json) if !json.trim().is_empty() => Self::from_json(&json),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.status_endpoint.contains(TASK_ID_PLACEHOLDER) {
            return Err(ConfigError::EndpointTemplate(self.status_endpoint.clone()));
        }
        if self.toast_duration_ms == 0 {
            return Err(ConfigError::ToastDuration);
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// Fill `base_url` from the page origin unless configured.
    pub fn with_origin(mut self, origin: &str) -> Self {
        if self.base_url.is_none() {
            self.base_url = Some(origin.to_string());
        }
        self
    }

    /// Status endpoint URL for one task.
    pub fn status_url(&self, task: &TaskId) -> String {
        let id = utf8_percent_encode(task.as_str(), PATH_SEGMENT).to_string();
        let path = self.status_endpoint.replace(TASK_ID_PLACEHOLDER, &id);
        match &self.base_url {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), path),
            None => path,
        }
    }
}
