// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Department handler that records what it was asked to do.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use director_core::{DepartmentHandler, DirectorError, Task};

/// A handler that stores every task it receives and answers with a small
/// JSON document naming itself.
pub struct RecordingHandler {
    department: String,
    failure: Option<String>,
    delay: Duration,
    handled: Mutex<Vec<Task>>,
}

impl RecordingHandler {
    pub fn new(department: &str) -> Self {
        Self {
            department: department.to_string(),
            failure: None,
            delay: Duration::ZERO,
            handled: Mutex::new(Vec::new()),
        }
    }

    /// A handler that records the task and then fails with `message`.
    pub fn failing(department: &str, message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(department)
        }
    }

    /// Sleep `delay` (on the tokio clock) before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Tasks received so far, oldest first.
    pub async fn handled(&self) -> Vec<Task> {
        self.handled.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.handled.lock().await.len()
    }
}

#[async_trait]
impl DepartmentHandler for RecordingHandler {
    async fn handle(&self, task: &Task) -> Result<serde_json::Value, DirectorError> {
        self.handled.lock().await.push(task.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.failure {
            Some(message) => Err(DirectorError::Handler {
                department: self.department.clone(),
                message: message.clone(),
            }),
            None => Ok(serde_json::json!({
                "department": self.department,
                "title": task.title,
            })),
        }
    }
}
