//! Background status polling
//!
//! A tokio task calls the supplied fetch function on every tick and publishes
//! the latest outcome on a watch channel. A failed tick publishes the failure
//! (never the previous status) and the next tick simply tries again.

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::PlayerError;
use super::status::PlaybackStatus;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, Default, PartialEq)]
pub enum PollOutcome {
    /// No tick has completed yet
    #[default]
    Pending,
    Ready(PlaybackStatus),
    /// `reachable` is false when the socket itself could not be used; a
    /// player that answered with an error (e.g. nothing loaded) is reachable
    Failed { reachable: bool, message: String },
}

/// Handle to the polling task; dropping it stops polling
pub struct StatusPoller {
    outcomes: watch::Receiver<PollOutcome>,
    task: JoinHandle<()>,
}

impl StatusPoller {
    pub fn spawn<F, Fut>(interval: Duration, mut fetch: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<PlaybackStatus, PlayerError>> + Send + 'static,
    {
        let (tx, outcomes) = watch::channel(PollOutcome::Pending);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let outcome = match fetch().await {
                    Ok(status) => PollOutcome::Ready(status),
                    Err(e) => {
                        tracing::trace!(error = %e, transport = e.is_transport(), "Status poll failed");
                        PollOutcome::Failed {
                            reachable: !e.is_transport(),
                            message: e.to_string(),
                        }
                    }
                };

                if tx.send(outcome).is_err() {
                    tracing::debug!("Status poller has no subscribers left, stopping");
                    break;
                }
            }
        });

        Self { outcomes, task }
    }

    /// Most recent outcome
    pub fn latest(&self) -> PollOutcome {
        self.outcomes.borrow().clone()
    }

    /// A receiver that can await the next outcome
    pub fn subscribe(&self) -> watch::Receiver<PollOutcome> {
        self.outcomes.clone()
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}
