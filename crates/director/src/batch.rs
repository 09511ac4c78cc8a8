// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `director batch` command implementation.
//!
//! Reads one JSON task per stdin line, routes up to `--concurrency` tasks at
//! a time, and writes one JSON result per line to stdout. Output order
//! follows completion, so every result carries its input line number.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use director_config::DirectorConfig;
use director_core::{DirectorError, RoutingMetrics, RoutingResponse, Task};
use director_prometheus::PrometheusMetrics;
use director_router::{InMemoryMetrics, IntentRouter};
use futures::stream::{self, Stream, StreamExt};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::watch::ProfileWatcher;

/// Arguments for `director batch`.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Maximum number of tasks routed at the same time.
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Reload the keyword profile when `routing.profile_path` changes.
    #[arg(long)]
    pub watch: bool,

    /// Print Prometheus metrics to stderr when the batch finishes.
    #[arg(long)]
    pub metrics: bool,
}

/// One output line.
#[derive(Debug, Serialize)]
struct BatchLine {
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    decision: Option<RoutingResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Runs the `director batch` command.
pub async fn run_batch(config: &DirectorConfig, args: BatchArgs) -> Result<(), DirectorError> {
    let prometheus = if args.metrics {
        Some(Arc::new(PrometheusMetrics::install()?))
    } else {
        None
    };
    let metrics: Arc<dyn RoutingMetrics> = match &prometheus {
        Some(prometheus) => prometheus.clone(),
        None => Arc::new(InMemoryMetrics::new()),
    };
    let router = Arc::new(crate::setup::build_router(config, metrics)?);

    let _watcher = if args.watch {
        match &config.routing.profile_path {
            Some(path) => Some(ProfileWatcher::spawn(
                PathBuf::from(path),
                config.routing.default_department.clone(),
                router.clone(),
            )?),
            None => {
                warn!("--watch needs routing.profile_path; profile reload disabled");
                None
            }
        }
    } else {
        None
    };

    let shutdown = crate::shutdown::install_signal_handler();
    let stdin = BufReader::new(tokio::io::stdin());
    let (routed, failed) = route_lines(
        &router,
        stdin,
        usize::from(args.concurrency),
        shutdown.cancelled_owned(),
        |line| match serde_json::to_string(&line) {
            Ok(json) => println!("{json}"),
            Err(e) => warn!(line = line.line, error = %e, "failed to serialize batch line"),
        },
    )
    .await;
    info!(routed, failed, "batch finished");

    if let Some(prometheus) = prometheus {
        eprint!("{}", prometheus.render());
    }
    Ok(())
}

/// Route every non-blank line of `input`, handing each result to `emit`.
/// Once `stop` resolves no further lines are read; tasks already in flight
/// still complete. Returns the number of routed and failed lines.
async fn route_lines<R>(
    router: &IntentRouter,
    input: R,
    concurrency: usize,
    stop: impl Future<Output = ()>,
    mut emit: impl FnMut(BatchLine),
) -> (usize, usize)
where
    R: AsyncBufRead + Unpin,
{
    let results = numbered_lines(input)
        .take_until(stop)
        .map(|(line, text)| route_line(router, line, text))
        .buffer_unordered(concurrency.max(1));
    let mut results = std::pin::pin!(results);

    let (mut routed, mut failed) = (0, 0);
    while let Some(result) = results.next().await {
        if result.error.is_some() {
            failed += 1;
        } else {
            routed += 1;
        }
        emit(result);
    }
    (routed, failed)
}

async fn route_line(router: &IntentRouter, line: usize, text: Result<String, String>) -> BatchLine {
    let outcome = match text.and_then(|text| {
        serde_json::from_str::<Task>(&text).map_err(|e| format!("invalid task JSON: {e}"))
    }) {
        Ok(task) => router
            .route(&task)
            .await
            .map(|decision| RoutingResponse::from(&decision))
            .map_err(|e| e.to_string()),
        Err(e) => Err(e),
    };
    match outcome {
        Ok(decision) => BatchLine {
            line,
            decision: Some(decision),
            error: None,
        },
        Err(error) => BatchLine {
            line,
            decision: None,
            error: Some(error),
        },
    }
}

/// Non-blank lines with their 1-based line numbers. A read error is
/// reported once and ends the stream.
fn numbered_lines<R>(input: R) -> impl Stream<Item = (usize, Result<String, String>)>
where
    R: AsyncBufRead + Unpin,
{
    stream::unfold(Some((input.lines(), 0usize)), |state| async move {
        let (mut lines, mut number) = state?;
        loop {
            number += 1;
            match lines.next_line().await {
                Ok(Some(text)) if text.trim().is_empty() => continue,
                Ok(Some(text)) => return Some(((number, Ok(text)), Some((lines, number)))),
                Ok(None) => return None,
                Err(e) => return Some(((number, Err(format!("failed to read stdin: {e}"))), None)),
            }
        }
    })
}
