use nation_proto::{HistoryPoint, SimulationSnapshot};

/// One update produced by the synchronizer or a manual advance.
/// Events are applied to the [`ViewStore`] in arrival order; a later
/// event always wins over an earlier one.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    Snapshot(SimulationSnapshot),
    History(Vec<HistoryPoint>),
    Failed(String),
}

/// Local view of the remote simulation. Owned by the UI thread; the
/// synchronizer reaches it only through [`SyncEvent`]s, so all mutation
/// is single-threaded and needs no locking.
#[derive(Debug)]
pub struct ViewStore {
    snapshot: Option<SimulationSnapshot>,
    history: Vec<HistoryPoint>,
    error: Option<String>,
    loading: bool,
}

impl ViewStore {
    pub fn new() -> Self {
        Self {
            snapshot: None,
            history: Vec::new(),
            error: None,
            loading: true,
        }
    }

    pub fn snapshot(&self) -> Option<&SimulationSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn history(&self) -> &[HistoryPoint] {
        &self.history
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True until the first response of any kind has been applied.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Unconditional overwrite. Clears any standing error: a fresh
    /// snapshot means the service is reachable again. Tick regressions
    /// are accepted as-is (the service restarted).
    pub fn replace_snapshot(&mut self, snapshot: SimulationSnapshot) {
        self.snapshot = Some(snapshot);
        self.error = None;
    }

    /// Unconditional overwrite of the metrics series.
    pub fn replace_history(&mut self, history: Vec<HistoryPoint>) {
        self.history = history;
    }

    /// Records a failure without discarding data already on screen;
    /// a stale view beats a blank one.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn mark_loaded(&mut self) {
        self.loading = false;
    }

    /// Applies one event. Any event, success or failure, ends the
    /// initial loading state.
    pub fn apply(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Snapshot(snapshot) => self.replace_snapshot(snapshot),
            SyncEvent::History(history) => self.replace_history(history),
            SyncEvent::Failed(message) => self.set_error(message),
        }
        self.mark_loaded();
    }
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}
