use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use nation_client::{ClientError, SimulationApi};
use nation_proto::{
    Agent, AgentKind, HistoryPoint, MetricsSnapshot, NationSnapshot, SimulationSnapshot,
    StateRecord,
};

/// Scripted remote service: every call pops the next queued response,
/// and an empty queue behaves like an unreachable service.
#[derive(Clone, Default)]
pub struct StubService {
    inner: Arc<Queues>,
}

#[derive(Default)]
struct Queues {
    states: Mutex<VecDeque<Result<SimulationSnapshot, ClientError>>>,
    histories: Mutex<VecDeque<Result<Vec<HistoryPoint>, ClientError>>>,
    advances: Mutex<VecDeque<Result<SimulationSnapshot, ClientError>>>,
}

pub fn unreachable() -> ClientError {
    ClientError::Status(reqwest::StatusCode::BAD_GATEWAY)
}

impl StubService {
    pub fn queue_state(&self, response: Result<SimulationSnapshot, ClientError>) {
        self.inner.states.lock().unwrap().push_back(response);
    }

    pub fn queue_history(&self, response: Result<Vec<HistoryPoint>, ClientError>) {
        self.inner.histories.lock().unwrap().push_back(response);
    }

    pub fn queue_advance(&self, response: Result<SimulationSnapshot, ClientError>) {
        self.inner.advances.lock().unwrap().push_back(response);
    }
}

impl SimulationApi for StubService {
    async fn fetch_state(&self) -> Result<SimulationSnapshot, ClientError> {
        self.inner
            .states
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(unreachable()))
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryPoint>, ClientError> {
        self.inner
            .histories
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(unreachable()))
    }

    async fn advance(&self) -> Result<SimulationSnapshot, ClientError> {
        self.inner
            .advances
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(unreachable()))
    }
}

pub fn snapshot(tick: u64) -> SimulationSnapshot {
    SimulationSnapshot {
        tick,
        nation: NationSnapshot {
            name: "Sworm".into(),
            states: vec![StateRecord {
                id: "st-1".into(),
                name: "North Province".into(),
                population: 120,
            }],
        },
        agents: vec![Agent {
            id: "ag-1".into(),
            kind: AgentKind::Citizen,
            x: 100.0,
            y: 200.0,
            trust_score: 55.0,
            wealth: Some(12.0),
            faction: None,
            last_action: None,
            age: Some(4),
            state_id: Some("st-1".into()),
        }],
        last_election_results: Vec::new(),
        metrics: MetricsSnapshot {
            avg_happiness: 61.0,
            avg_wealth: 14.0,
            avg_trust: 48.0,
            sl_budget: 1000.0,
        },
    }
}

pub fn history(ticks: &[u64]) -> Vec<HistoryPoint> {
    ticks
        .iter()
        .map(|&tick| HistoryPoint {
            tick,
            avg_happiness: 50.0 + tick as f64,
            avg_wealth: 10.0,
            avg_trust: 50.0,
            sl_budget: 1000.0,
        })
        .collect()
}
