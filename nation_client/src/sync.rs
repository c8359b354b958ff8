use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::time::MissedTickBehavior;
use tracing::{trace, warn};

use crate::remote::SimulationApi;
use crate::store::SyncEvent;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Keeps the view fresh by polling the remote service on a fixed
/// cadence and emitting [`SyncEvent`]s into the store's channel.
/// A closed channel (the viewing session ended) terminates the loop;
/// a failed cycle never does.
pub struct Synchronizer<A: SimulationApi> {
    api: A,
    events: UnboundedSender<SyncEvent>,
    poll_interval: Duration,
}

impl<A: SimulationApi> Synchronizer<A> {
    pub fn new(api: A, events: UnboundedSender<SyncEvent>) -> Self {
        Self {
            api,
            events,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// One poll cycle: fetch state, then (only if state succeeded)
    /// fetch history. The two are independent resources, so a history
    /// failure after a state success still leaves the new snapshot
    /// applied and the old series on screen.
    ///
    /// Returns `false` once the event channel is closed.
    pub async fn poll_once(&self) -> bool {
        match self.api.fetch_state().await {
            Ok(snapshot) => {
                trace!(tick = snapshot.tick, "state.replaced");
                if self.events.send(SyncEvent::Snapshot(snapshot)).is_err() {
                    return false;
                }
                match self.api.fetch_history().await {
                    Ok(history) => self.events.send(SyncEvent::History(history)).is_ok(),
                    Err(err) => {
                        warn!("history fetch failed: {err}");
                        self.emit_failure(&err)
                    }
                }
            }
            Err(err) => {
                warn!("state fetch failed: {err}");
                self.emit_failure(&err)
            }
        }
    }

    /// User-triggered one-shot advance, outside the poll cadence. On
    /// success the returned snapshot is applied immediately; it may
    /// race an in-flight poll, and whichever response arrives last
    /// wins. Returns `false` once the event channel is closed.
    pub async fn advance_once(&self) -> bool {
        match self.api.advance().await {
            Ok(snapshot) => {
                trace!(tick = snapshot.tick, "manual advance applied");
                self.events.send(SyncEvent::Snapshot(snapshot)).is_ok()
            }
            Err(err) => {
                warn!("manual advance failed: {err}");
                self.emit_failure(&err)
            }
        }
    }

    /// Polls until the event channel closes. There is no backoff: the
    /// fixed interval is the retry mechanism.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if !self.poll_once().await {
                trace!("event channel closed, stopping poll loop");
                break;
            }
        }
    }

    fn emit_failure(&self, err: &crate::remote::ClientError) -> bool {
        self.events
            .send(SyncEvent::Failed(err.user_message().to_string()))
            .is_ok()
    }
}
