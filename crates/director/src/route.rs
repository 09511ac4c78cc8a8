// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `director route` command implementation.

use std::sync::Arc;

use clap::Args;
use director_config::DirectorConfig;
use director_core::{DirectorError, RoutingResponse, Task, TaskComplexity};
use director_router::{InMemoryMetrics, IntentRouter};

/// Arguments for `director route`.
#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Task description (the text that is classified).
    #[arg(long, short = 'd')]
    pub description: String,

    /// Task title, used in logs.
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Task type label.
    #[arg(long = "type")]
    pub task_type: Option<String>,

    /// Complexity 1-10. Estimated from the description when omitted.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub complexity: Option<u8>,
}

impl RouteArgs {
    fn task(&self) -> Task {
        let mut task = Task::new(self.description.clone());
        if let Some(title) = &self.title {
            task = task.with_title(title.clone());
        }
        if let Some(task_type) = &self.task_type {
            task = task.with_type(task_type.clone());
        }
        task
    }
}

/// Runs the `director route` command.
pub async fn run_route(config: &DirectorConfig, args: RouteArgs) -> Result<(), DirectorError> {
    let router = crate::setup::build_router(config, Arc::new(InMemoryMetrics::new()))?;
    let response = route_one(&router, &args).await?;
    let json = serde_json::to_string_pretty(&response)
        .map_err(|e| DirectorError::Internal(format!("failed to serialize decision: {e}")))?;
    println!("{json}");
    Ok(())
}

async fn route_one(router: &IntentRouter, args: &RouteArgs) -> Result<RoutingResponse, DirectorError> {
    let task = args.task();
    let decision = match args.complexity.and_then(TaskComplexity::new) {
        Some(complexity) => router.route_with_complexity(&task, complexity).await?,
        None => router.route(&task).await?,
    };
    Ok(RoutingResponse::from(&decision))
}
