// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Department handler trait invoked by the dispatcher.

use async_trait::async_trait;

use crate::error::DirectorError;
use crate::types::Task;

/// A department's task handler, registered by id at startup.
#[async_trait]
pub trait DepartmentHandler: Send + Sync + 'static {
    /// Processes `task` and returns a JSON result for aggregation.
    async fn handle(&self, task: &Task) -> Result<serde_json::Value, DirectorError>;
}
