//! Task and board types matching the service's wire format.

pub mod api;

pub use api::TaskApi;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::TacksError;

/// Which column a task sits in. The three base statuses are fixed; boards
/// may also carry numbered custom columns (`custom-<n>` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    Custom(u32),
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Todo => f.write_str("todo"),
            Self::InProgress => f.write_str("inprogress"),
            Self::Done => f.write_str("done"),
            Self::Custom(n) => write!(f, "custom-{n}"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = TacksError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "todo" => Ok(Self::Todo),
            "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => other
                .strip_prefix("custom-")
                .and_then(|n| n.parse::<u32>().ok())
                .map(Self::Custom)
                .ok_or_else(|| TacksError::Validation(format!("unknown task status: {other}"))),
        }
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// A task as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
}

/// Payload for creating a task. The service assigns `id` and the owner;
/// timestamps are stamped by [`TaskApi::create`].
#[derive(Debug, Clone, Builder, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    #[builder(into)]
    pub title: String,
    #[builder(into)]
    pub description: String,
    pub status: TaskStatus,
    #[builder(default)]
    pub priority: TaskPriority,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Partial update for an existing task; unset fields are left untouched.
#[derive(Debug, Clone, Default, Builder, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// One board column: a status plus the ordered ids of its tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: TaskStatus,
    pub title: String,
    pub task_ids: Vec<String>,
}

impl Column {
    fn new(id: TaskStatus, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            task_ids: Vec::new(),
        }
    }
}

/// A fully-assembled board view: columns in display order plus a task
/// lookup by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
    pub tasks: HashMap<String, Task>,
}

impl Board {
    /// Group tasks into the three base columns, appending a column per
    /// custom status encountered. Input order is preserved within each
    /// column; no task is ever dropped.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut columns = vec![
            Column::new(TaskStatus::Todo, "To Do"),
            Column::new(TaskStatus::InProgress, "In Progress"),
            Column::new(TaskStatus::Done, "Done"),
        ];
        let mut by_id = HashMap::with_capacity(tasks.len());
        for task in tasks {
            match columns.iter_mut().find(|column| column.id == task.status) {
                Some(column) => column.task_ids.push(task.id.clone()),
                None => {
                    let mut column = Column::new(task.status, task.status.to_string());
                    column.task_ids.push(task.id.clone());
                    columns.push(column);
                }
            }
            by_id.insert(task.id.clone(), task);
        }
        Self {
            columns,
            tasks: by_id,
        }
    }

    pub fn column(&self, id: TaskStatus) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == id)
    }
}
