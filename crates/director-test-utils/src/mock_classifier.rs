// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted intent classifier for deterministic escalation tests.
//!
//! Replies are popped from a FIFO queue. When the queue is empty the
//! fallback reply is used, so a classifier can answer "always" or
//! "once, then fail" without extra setup.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use director_core::{DepartmentId, DirectorError, IntentClassifier, LlmVerdict};

/// One scripted reply.
#[derive(Debug, Clone)]
pub struct Reply {
    delay: Duration,
    outcome: Result<LlmVerdict, String>,
}

impl Reply {
    pub fn answer(department: &str, confidence: f64) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Ok(LlmVerdict {
                department: department.to_string(),
                confidence,
            }),
        }
    }

    pub fn fail(message: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Err(message.to_string()),
        }
    }

    /// Wait `delay` (on the tokio clock) before replying.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A mock classifier that replays scripted replies.
pub struct MockClassifier {
    queue: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, Vec<DepartmentId>)>>,
}

impl MockClassifier {
    /// A classifier whose every reply is `reply`.
    pub fn always(reply: Reply) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: reply,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answers `department` with `confidence`.
    pub fn answering(department: &str, confidence: f64) -> Self {
        Self::always(Reply::answer(department, confidence))
    }

    /// Always fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self::always(Reply::fail(message))
    }

    /// Always answers, but only after `delay`.
    pub fn hanging(delay: Duration) -> Self {
        Self::always(Reply::answer("general", 1.0).after(delay))
    }

    /// Queue `reply` ahead of the fallback.
    pub fn then(mut self, reply: Reply) -> Self {
        self.queue.get_mut().push_back(reply);
        self
    }

    /// Number of `classify` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Text and department list of every call, oldest first.
    pub async fn requests(&self) -> Vec<(String, Vec<DepartmentId>)> {
        self.requests.lock().await.clone()
    }

    async fn next_reply(&self) -> Reply {
        self.queue
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl IntentClassifier for MockClassifier {
    fn name(&self) -> &str {
        "mock-classifier"
    }

    async fn classify(
        &self,
        text: &str,
        departments: &[DepartmentId],
    ) -> Result<LlmVerdict, DirectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .await
            .push((text.to_string(), departments.to_vec()));

        let reply = self.next_reply().await;
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.outcome.map_err(DirectorError::classifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn departments() -> Vec<DepartmentId> {
        vec![DepartmentId::from("analysis")]
    }

    #[tokio::test]
    async fn queued_replies_then_fallback() {
        let classifier = MockClassifier::failing("down")
            .then(Reply::answer("analysis", 0.9))
            .then(Reply::fail("flaky"));

        let first = classifier.classify("x", &departments()).await.unwrap();
        assert_eq!(first.department, "analysis");
        assert!(classifier.classify("x", &departments()).await.is_err());
        let err = classifier.classify("x", &departments()).await.unwrap_err();
        assert!(err.to_string().contains("down"));
        assert_eq!(classifier.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_reply_waits_on_tokio_clock() {
        let classifier = MockClassifier::hanging(Duration::from_secs(30));
        let start = tokio::time::Instant::now();
        classifier.classify("x", &departments()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test]
    async fn records_requests() {
        let classifier = MockClassifier::answering("analysis", 0.5);
        classifier.classify("quarterly data", &departments()).await.unwrap();
        let requests = classifier.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "quarterly data");
        assert_eq!(requests[0].1, departments());
    }
}
