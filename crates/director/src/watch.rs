// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword profile hot reload.
//!
//! Watches the directory holding `routing.profile_path` (editors often
//! replace files rather than write in place) and, after a debounce, loads
//! and validates the profile before swapping it into the router. An invalid
//! profile is logged and the running one is kept.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use director_core::DirectorError;
use director_router::{IntentRouter, KeywordProfile};
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

const DEBOUNCE: Duration = Duration::from_millis(500);

/// Keeps the file watcher alive; dropping it stops reloading.
pub struct ProfileWatcher {
    _debouncer: Debouncer<RecommendedWatcher>,
    task: JoinHandle<()>,
}

impl ProfileWatcher {
    /// Start watching `path` and reload `router` on every change.
    pub fn spawn(
        path: PathBuf,
        default_department: String,
        router: Arc<IntentRouter>,
    ) -> Result<Self, DirectorError> {
        let path = std::fs::canonicalize(&path).map_err(|e| {
            DirectorError::Config(format!("cannot watch profile {}: {e}", path.display()))
        })?;
        let directory = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| DirectorError::Config(format!("profile {} has no parent", path.display())))?;

        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        let target = path.clone();
        let mut debouncer = new_debouncer(DEBOUNCE, move |result: DebounceEventResult| match result {
            Ok(events) => {
                if events.iter().any(|event| event.path == target) {
                    let _ = tx.send(());
                }
            }
            Err(e) => error!(error = %e, "profile watcher error"),
        })
        .map_err(|e| DirectorError::Internal(format!("failed to create file watcher: {e}")))?;

        debouncer
            .watcher()
            .watch(&directory, RecursiveMode::NonRecursive)
            .map_err(|e| DirectorError::Internal(format!("failed to watch {}: {e}", directory.display())))?;
        info!(profile = %path.display(), "watching keyword profile for changes");

        let task = tokio::spawn(async move {
            while rx.recv().await.is_some() {
                reload(&path, &default_department, &router);
            }
        });

        Ok(Self {
            _debouncer: debouncer,
            task,
        })
    }
}

impl Drop for ProfileWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Load, validate, and swap in the profile at `path`. Returns whether the
/// router now uses the new profile.
pub fn reload(path: &Path, default_department: &str, router: &IntentRouter) -> bool {
    let departments = match director_config::load_profile(path) {
        Ok(departments) => departments,
        Err(errors) => {
            for err in &errors {
                warn!(profile = %path.display(), error = %err, "rejected keyword profile");
            }
            return false;
        }
    };

    match KeywordProfile::from_config(&departments, default_department) {
        Ok(profile) => {
            router.reload_profile(profile);
            true
        }
        Err(e) => {
            warn!(profile = %path.display(), error = %e, "rejected keyword profile");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use director_config::DirectorConfig;
    use director_router::InMemoryMetrics;

    fn router() -> IntentRouter {
        crate::setup::build_router(&DirectorConfig::default(), Arc::new(InMemoryMetrics::new()))
            .unwrap()
    }

    #[test]
    fn valid_profile_replaces_running_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.toml");
        std::fs::write(
            &path,
            "[[departments]]\nname = \"billing\"\nkeywords = [\"invoice\", \"refund\"]\n",
        )
        .unwrap();

        let router = router();
        assert!(reload(&path, "general", &router));
        let profile = router.profile();
        assert_eq!(profile.len(), 1);
        assert_eq!(profile.departments()[0].id.as_str(), "billing");
    }

    #[test]
    fn invalid_profile_keeps_running_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.toml");
        std::fs::write(&path, "[[departments]]\nname = \"billing\"\nkeywords = []\n").unwrap();

        let router = router();
        assert!(!reload(&path, "general", &router));
        assert_eq!(router.profile().len(), 4);
    }

    #[test]
    fn missing_profile_keeps_running_one() {
        let router = router();
        assert!(!reload(Path::new("/nonexistent/profile.toml"), "general", &router));
        assert_eq!(router.profile().len(), 4);
    }

    #[tokio::test]
    async fn spawn_rejects_missing_file() {
        let err = ProfileWatcher::spawn(
            PathBuf::from("/nonexistent/profile.toml"),
            "general".into(),
            Arc::new(router()),
        )
        .err()
        .unwrap();
        assert!(matches!(err, DirectorError::Config(_)));
    }
}
