//! Run orchestration.
//!
//! # Lifecycle
//! ```text
//! Requested → Claimed → Active → Completing → Released
//!
//! Requested:  parameters valid, path list loaded
//! Claimed:    registry granted the target (else "already running", stop)
//! Active:     deadline armed, start notification, N pollers spawned
//! Completing: deadline fired (or process shutdown), token cancelled
//! Released:   registry entry cleared, pollers drained
//! ```
//!
//! The caller is answered as soon as the run is Active; the run itself is a
//! detached task.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use uuid::Uuid;

use crate::config::{BackoffConfig, PollerConfig, RunnerConfig};
use crate::lifecycle::Shutdown;
use crate::notify::{Notifications, RunEvent};
use crate::paths::{HttpCsvSource, PathList, PathSource};
use crate::run::poller::{Poller, PollerSummary};
use crate::run::registry::RunRegistry;
use crate::run::request::{RunError, RunParams, RunRequest};
use crate::run::target::Target;

/// Build the outbound client shared by pollers, path fetches and notifications.
pub fn build_client(config: &PollerConfig) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("smoke-runner/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Result of a submission that passed validation.
#[derive(Debug)]
pub enum Submission {
    /// A new run is active.
    Accepted(RunHandle),
    /// Another run already owns the target. Nothing was started.
    AlreadyRunning(Target),
}

/// Handle on a detached run. Dropping it leaves the run running.
#[derive(Debug)]
pub struct RunHandle {
    run_id: Uuid,
    target: Target,
    task: JoinHandle<RunReport>,
}

impl RunHandle {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Wait until the run is released and all pollers have stopped.
    pub async fn join(self) -> Result<RunReport, JoinError> {
        self.task.await
    }
}

/// What a finished run leaves behind.
///
/// Summaries stay per poller, one entry each, ordered by poller index.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub target: Target,
    pub dataset: String,
    pub summaries: Vec<PollerSummary>,
}

/// Accepts run requests and drives runs to completion.
pub struct RunOrchestrator {
    registry: Arc<RunRegistry>,
    paths: Arc<dyn PathSource>,
    notifications: Notifications,
    client: reqwest::Client,
    backoff: BackoffConfig,
    max_threads: usize,
    default_dataset: String,
    root: CancellationToken,
    tracker: TaskTracker,
}

impl RunOrchestrator {
    pub fn new(
        registry: Arc<RunRegistry>,
        paths: Arc<dyn PathSource>,
        notifications: Notifications,
        client: reqwest::Client,
        config: &RunnerConfig,
    ) -> Self {
        Self {
            registry,
            paths,
            notifications,
            client,
            backoff: config.poller.backoff.clone(),
            max_threads: config.poller.max_threads,
            default_dataset: config.paths.default_dataset.clone(),
            root: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// Wire the HTTP path list source and the configured notifier.
    pub fn from_config(config: &RunnerConfig) -> reqwest::Result<Self> {
        let client = build_client(&config.poller)?;
        let paths = Arc::new(HttpCsvSource::new(client.clone(), &config.paths));
        let notifications = Notifications::from_config(client.clone(), &config.notifications);
        Ok(Self::new(
            Arc::new(RunRegistry::new()),
            paths,
            notifications,
            client,
            config,
        ))
    }

    /// Derive the root token from `shutdown`, so triggering it cancels every run.
    pub fn with_shutdown(mut self, shutdown: &Shutdown) -> Self {
        self.root = shutdown.child_token();
        self
    }

    pub fn registry(&self) -> &Arc<RunRegistry> {
        &self.registry
    }

    /// Validate, load the path list, claim the target and start the run.
    ///
    /// Rejections are mirrored to the notification channel before returning.
    pub async fn submit(&self, params: RunParams) -> Result<Submission, RunError> {
        let mut request = match params.validate(&self.default_dataset) {
            Ok(request) => request,
            Err(e) => return Err(self.reject(e).await),
        };
        if request.threads > self.max_threads {
            tracing::warn!(
                requested = request.threads,
                max_threads = self.max_threads,
                "THREADS above the configured limit, clamping"
            );
            request.threads = self.max_threads;
        }

        let paths = match self.paths.load(&request.dataset).await {
            Ok(paths) => paths,
            Err(source) => {
                let error = RunError::InvalidService {
                    dataset: request.dataset.clone(),
                    source,
                };
                return Err(self.reject(error).await);
            }
        };

        if !self.registry.try_start(&request.target) {
            tracing::info!(endpoint = %request.target, "Run already active, request debounced");
            return Ok(Submission::AlreadyRunning(request.target));
        }

        Ok(Submission::Accepted(self.launch(request, paths)))
    }

    async fn reject(&self, error: RunError) -> RunError {
        tracing::warn!(error = %error, "Rejected run request");
        self.notifications
            .emit(RunEvent::Rejected {
                reason: error.notification_reason(),
            })
            .await;
        error
    }

    fn launch(&self, request: RunRequest, paths: PathList) -> RunHandle {
        let run_id = Uuid::new_v4();
        let target = request.target.clone();
        let run = ActiveRun {
            run_id,
            request,
            paths,
            cancel: self.root.child_token(),
            registry: self.registry.clone(),
            notifications: self.notifications.clone(),
            client: self.client.clone(),
            backoff: self.backoff.clone(),
        };

        let task = self.tracker.spawn(run.execute());
        RunHandle {
            run_id,
            target,
            task,
        }
    }

    /// Cancel every active run and wait up to `grace` for them to release.
    pub async fn shutdown(&self, grace: Duration) {
        self.root.cancel();
        self.tracker.close();
        if tokio::time::timeout(grace, self.tracker.wait()).await.is_err() {
            tracing::warn!(
                remaining = self.tracker.len(),
                "Runs still draining at shutdown deadline"
            );
        }
    }
}

/// Everything one run owns while it is active.
struct ActiveRun {
    run_id: Uuid,
    request: RunRequest,
    paths: PathList,
    cancel: CancellationToken,
    registry: Arc<RunRegistry>,
    notifications: Notifications,
    client: reqwest::Client,
    backoff: BackoffConfig,
}

impl ActiveRun {
    async fn execute(self) -> RunReport {
        let RunRequest {
            target,
            dataset,
            duration,
            threads,
        } = self.request;

        // Armed before anything else so the run lasts `duration` from acceptance.
        let deadline = tokio::time::sleep(duration);
        tokio::pin!(deadline);

        tracing::info!(
            run_id = %self.run_id,
            endpoint = %target,
            dataset = %dataset,
            duration = ?duration,
            threads,
            paths = self.paths.len(),
            "Run started"
        );
        self.notifications
            .emit(RunEvent::Started {
                dataset: dataset.clone(),
                target: target.clone(),
            })
            .await;

        let mut pollers = JoinSet::new();
        for id in 0..threads {
            let poller = Poller::new(
                id,
                target.clone(),
                &self.paths,
                self.client.clone(),
                &self.backoff,
                self.notifications.clone(),
            );
            pollers.spawn(poller.run(self.cancel.clone()));
        }

        tokio::select! {
            _ = &mut deadline => {
                tracing::info!(run_id = %self.run_id, "Run deadline reached");
            }
            _ = self.cancel.cancelled() => {
                tracing::info!(run_id = %self.run_id, "Run cancelled before its deadline");
            }
        }

        self.registry.finish(&target);
        self.cancel.cancel();

        let mut summaries = Vec::with_capacity(threads);
        while let Some(joined) = pollers.join_next().await {
            match joined {
                Ok(summary) => summaries.push(summary),
                Err(e) => tracing::error!(run_id = %self.run_id, error = %e, "Poller task failed"),
            }
        }
        summaries.sort_by_key(|s| s.poller);

        tracing::info!(run_id = %self.run_id, endpoint = %target, "Run released");

        RunReport {
            run_id: self.run_id,
            target,
            dataset,
            summaries,
        }
    }
}
