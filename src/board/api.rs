use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{NewTask, Task, TaskPatch};
use crate::error::Result;
use crate::gateway::Gateway;

/// Typed task operations over the request gateway.
///
/// Creation and update timestamps are stamped client-side at dispatch, the
/// way the board UI always has.
#[derive(Clone)]
pub struct TaskApi {
    gateway: Arc<Gateway>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskPayload<'a> {
    #[serde(flatten)]
    task: &'a NewTask,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTaskPayload<'a> {
    #[serde(flatten)]
    patch: &'a TaskPatch,
    updated_at: DateTime<Utc>,
}

impl TaskApi {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Fetch every task owned by the current user.
    pub async fn list(&self) -> Result<Vec<Task>> {
        self.gateway.get_json("/api/tasks").await
    }

    pub async fn create(&self, task: &NewTask) -> Result<Task> {
        let now = Utc::now();
        let payload = CreateTaskPayload {
            task,
            created_at: now,
            updated_at: now,
        };
        self.gateway.post_json("/api/tasks", &payload).await
    }

    pub async fn update(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        let payload = UpdateTaskPayload {
            patch,
            updated_at: Utc::now(),
        };
        self.gateway
            .put_json(&format!("/api/tasks/{id}"), &payload)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.gateway.delete(&format!("/api/tasks/{id}")).await
    }
}
