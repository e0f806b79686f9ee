//! Status poller: runs health checks and publishes the resulting status

use crate::{client::HealthClient, status::HealthStatus};
use std::sync::Arc;
use tokio::{sync::watch, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// A spawned health check together with the token that can silence it.
#[derive(Debug)]
pub struct PendingCheck {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PendingCheck {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Waits for the check to finish, whether it published a status or not.
    pub async fn finished(self) {
        if let Err(e) = self.task.await {
            warn!(error = %e, "Health check task ended abnormally");
        }
    }
}

/// Where checks publish. Tripping `unmounted` silences every check, including
/// refreshes whose own tokens are still live.
#[derive(Debug)]
struct StatusSink {
    status: watch::Sender<HealthStatus>,
    unmounted: CancellationToken,
}

impl StatusSink {
    /// Publishes `next` unless the poller is unmounted or `cancel` fired. The
    /// check runs under the channel's write lock, so it cannot interleave
    /// with `close`.
    fn publish(&self, next: HealthStatus, cancel: &CancellationToken) -> bool {
        self.status.send_if_modified(|current| {
            if self.unmounted.is_cancelled() || cancel.is_cancelled() {
                return false;
            }
            *current = next;
            true
        })
    }

    fn close(&self) {
        self.unmounted.cancel();
        // Waits out any publish that already passed its check.
        self.status.send_if_modified(|_| false);
    }
}

#[derive(Debug)]
pub struct StatusPoller {
    client: Arc<HealthClient>,
    sink: Arc<StatusSink>,
    mount_check: PendingCheck,
}

impl StatusPoller {
    /// Starts in `idle` and immediately launches a check bound to the mount token.
    pub fn mount(client: HealthClient) -> Self {
        let client = Arc::new(client);
        let (status, _) = watch::channel(HealthStatus::initial());
        let sink = Arc::new(StatusSink {
            status,
            unmounted: CancellationToken::new(),
        });

        let mount_check = spawn_check(
            Arc::clone(&client),
            Arc::clone(&sink),
            CancellationToken::new(),
        );

        Self {
            client,
            sink,
            mount_check,
        }
    }

    pub fn api_base(&self) -> &str {
        self.client.api_base()
    }

    pub fn status(&self) -> HealthStatus {
        self.sink.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HealthStatus> {
        self.sink.status.subscribe()
    }

    /// Mirrors the disabled refresh button: no new check while one is loading.
    pub fn can_refresh(&self) -> bool {
        !self.sink.status.borrow().is_loading()
    }

    /// Launches a new check with its own token. Earlier checks are left running.
    pub fn refresh(&self) -> PendingCheck {
        spawn_check(
            Arc::clone(&self.client),
            Arc::clone(&self.sink),
            CancellationToken::new(),
        )
    }

    /// Runs one check inline. Nothing is published once `cancel` fires.
    pub async fn run_health_check(&self, cancel: CancellationToken) {
        run_check(&self.client, &self.sink, cancel).await;
    }

    /// Cancels the mount-time check and stops every check from publishing.
    /// Refresh tokens are left untouched; their results are dropped instead.
    pub fn unmount(self) {
        debug!("Unmounting status poller");
        self.mount_check.cancel();
        self.sink.close();
    }
}

fn spawn_check(
    client: Arc<HealthClient>,
    sink: Arc<StatusSink>,
    cancel: CancellationToken,
) -> PendingCheck {
    let token = cancel.clone();
    let task = tokio::spawn(async move {
        run_check(&client, &sink, token).await;
    });

    PendingCheck { cancel, task }
}

async fn run_check(client: &HealthClient, sink: &StatusSink, cancel: CancellationToken) {
    if !sink.publish(HealthStatus::loading(), &cancel) {
        debug!("Health check skipped; poller unmounted or check cancelled");
        return;
    }

    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Health check cancelled before completion");
            return;
        }
        _ = sink.unmounted.cancelled() => {
            debug!("Poller unmounted during health check");
            return;
        }
        outcome = client.fetch() => outcome,
    };

    let next = match outcome {
        Ok(reachability) => {
            debug!(?reachability, "API reachable");
            HealthStatus::reachable(&reachability)
        }
        Err(e) => {
            warn!(error = %e, url = %client.health_url(), "Health check failed");
            HealthStatus::offline()
        }
    };

    if !sink.publish(next, &cancel) {
        debug!("Discarding health result; poller unmounted or check cancelled");
    }
}
