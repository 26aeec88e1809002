//! Frontend Models
//!
//! Task references, status values and the status presentation table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Opaque id correlating a card with its server-side task
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task status, matching the server's choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Completed,
    Archived,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Completed,
        TaskStatus::Archived,
    ];

    /// Wire value, also used in `data-status` attributes
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Review => "review",
            TaskStatus::Completed => "completed",
            TaskStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown task status {:?}", self.0)
    }
}

impl FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// How a status is presented on a card
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMeta {
    pub label: String,
    /// Progress bar fill, 0..=100
    pub percentage: u8,
    pub css_class: String,
}

impl StatusMeta {
    pub fn new(label: &str, percentage: u8, css_class: &str) -> Self {
        Self {
            label: label.to_string(),
            percentage,
            css_class: css_class.to_string(),
        }
    }
}

/// Exhaustive status → presentation mapping.
///
/// Construction fails unless every status appears exactly once, so lookups
/// can never miss.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusTable {
    /// Indexed by `TaskStatus as usize`
    metas: Vec<StatusMeta>,
}

impl StatusTable {
    pub fn new(entries: Vec<(TaskStatus, StatusMeta)>) -> Result<Self, ConfigError> {
        let mut slots: Vec<Option<StatusMeta>> = vec![None; TaskStatus::ALL.len()];
        for (status, meta) in entries {
            if meta.percentage > 100 {
                return Err(ConfigError::Percentage {
                    status: status.as_str(),
                    percentage: meta.percentage,
                });
            }
            let slot = &mut slots[status as usize];
            if slot.is_some() {
                return Err(ConfigError::DuplicateStatus(status.as_str()));
            }
            *slot = Some(meta);
        }
        let metas = TaskStatus::ALL
            .into_iter()
            .map(|status| slots[status as usize].take().ok_or(ConfigError::MissingStatus(status.as_str())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { metas })
    }

    /// Labels and classes the server templates use
    pub fn standard_entries() -> Vec<(TaskStatus, StatusMeta)> {
        vec![
            (TaskStatus::Todo, StatusMeta::new("To Do", 0, "status-todo")),
            (TaskStatus::InProgress, StatusMeta::new("In Progress", 50, "status-in-progress")),
            (TaskStatus::Review, StatusMeta::new("Review", 80, "status-review")),
            (TaskStatus::Completed, StatusMeta::new("Completed", 100, "status-completed")),
            (TaskStatus::Archived, StatusMeta::new("Archived", 100, "status-archived")),
        ]
    }

    pub fn meta(&self, status: TaskStatus) -> &StatusMeta {
        &self.metas[status as usize]
    }

    /// Every status class, for stripping before applying a new one
    pub fn css_classes(&self) -> impl Iterator<Item = &str> {
        self.metas.iter().map(|meta| meta.css_class.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_value() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>(), Ok(status));
        }
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_eq!(
            "done".parse::<TaskStatus>(),
            Err(UnknownStatus("done".to_string()))
        );
    }

    #[test]
    fn standard_table_is_valid() {
        let table = StatusTable::new(StatusTable::standard_entries()).unwrap();
        assert_eq!(table.meta(TaskStatus::Review).percentage, 80);
        assert_eq!(table.meta(TaskStatus::InProgress).css_class, "status-in-progress");
        assert_eq!(table.css_classes().count(), 5);
    }

    #[test]
    fn table_missing_a_status_is_rejected() {
        let mut entries = StatusTable::standard_entries();
        entries.retain(|(s, _)| *s != TaskStatus::Archived);
        assert_eq!(StatusTable::new(entries), Err(ConfigError::MissingStatus("archived")));
    }

    #[test]
    fn table_with_duplicate_is_rejected() {
        let mut entries = StatusTable::standard_entries();
        entries.push((TaskStatus::Todo, StatusMeta::new("Backlog", 0, "status-backlog")));
        assert_eq!(StatusTable::new(entries), Err(ConfigError::DuplicateStatus("todo")));
    }

    #[test]
    fn percentage_over_100_is_rejected() {
        let mut entries = StatusTable::standard_entries();
        entries[0].1.percentage = 120;
        assert!(matches!(
            StatusTable::new(entries),
            Err(ConfigError::Percentage { status: "todo", percentage: 120 })
        ));
    }
}
