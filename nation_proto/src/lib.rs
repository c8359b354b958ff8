use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Role of an agent inside the simulated nation. The remote service
/// encodes this as a snake_case string in its JSON payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Citizen,
    Leader,
    SupremeLeader,
    Media,
    External,
}

/// Ideological affiliation of a citizen. Opaque to this layer; it only
/// drives the map color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Faction {
    Industrialist,
    Environmentalist,
    Technocrat,
    Neutral,
}

impl Faction {
    /// Parse a wire faction name. Unrecognized names collapse to
    /// `Neutral` so that new server-side factions degrade to the
    /// default citizen rendering instead of poisoning the whole payload.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Industrialist" => Self::Industrialist,
            "Environmentalist" => Self::Environmentalist,
            "Technocrat" => Self::Technocrat,
            _ => Self::Neutral,
        }
    }
}

impl<'de> Deserialize<'de> for Faction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_name(&raw))
    }
}

/// Last action taken by an agent, encoded on the wire as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentAction {
    Invest,
    Steal,
    Maintain,
    Propaganda,
}

impl AgentAction {
    /// Decode the wire integer. Negative values are the service's
    /// "no action yet" sentinel and map to `None`; anything above the
    /// known range is a malformed payload.
    pub fn from_wire(raw: i64) -> Result<Option<Self>, String> {
        match raw {
            r if r < 0 => Ok(None),
            0 => Ok(Some(Self::Invest)),
            1 => Ok(Some(Self::Steal)),
            2 => Ok(Some(Self::Maintain)),
            3 => Ok(Some(Self::Propaganda)),
            other => Err(format!("unknown agent action {other}")),
        }
    }

    pub fn wire_value(self) -> u8 {
        match self {
            Self::Invest => 0,
            Self::Steal => 1,
            Self::Maintain => 2,
            Self::Propaganda => 3,
        }
    }
}

impl Serialize for AgentAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.wire_value())
    }
}

fn deserialize_last_action<'de, D>(deserializer: D) -> Result<Option<AgentAction>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<i64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => AgentAction::from_wire(raw).map_err(D::Error::custom),
    }
}

/// One agent as reported by the remote service. Agents are ephemeral:
/// every successful sync replaces the full set, and no identity is
/// tracked across snapshots on this side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AgentKind,
    pub x: f64,
    pub y: f64,
    pub trust_score: f64,
    #[serde(default)]
    pub wealth: Option<f64>,
    #[serde(default)]
    pub faction: Option<Faction>,
    #[serde(default, deserialize_with = "deserialize_last_action")]
    pub last_action: Option<AgentAction>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub state_id: Option<String>,
}

/// Administrative subdivision of the nation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateRecord {
    pub id: String,
    pub name: String,
    pub population: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NationSnapshot {
    pub name: String,
    pub states: Vec<StateRecord>,
}

/// One entry of the most recent election/news batch. Only the latest
/// batch is retained by the service; there is no history of these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElectionResult {
    pub outcome: String,
    pub winner_name: String,
    #[serde(default)]
    pub state_id: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub incumbent_votes: u64,
    #[serde(default)]
    pub challenger_votes: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetricsSnapshot {
    pub avg_happiness: f64,
    pub avg_wealth: f64,
    pub avg_trust: f64,
    pub sl_budget: f64,
}

/// Complete point-in-time copy of the observable simulation state.
/// A lower tick than the previously seen one means the remote service
/// restarted; consumers must accept it rather than reject it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationSnapshot {
    pub tick: u64,
    pub nation: NationSnapshot,
    pub agents: Vec<Agent>,
    pub last_election_results: Vec<ElectionResult>,
    pub metrics: MetricsSnapshot,
}

/// One sample of the aggregate-metrics series. The service owns the
/// series; clients replace the whole sequence on every fetch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HistoryPoint {
    pub tick: u64,
    pub avg_happiness: f64,
    pub avg_wealth: f64,
    pub avg_trust: f64,
    pub sl_budget: f64,
}

pub fn encode_snapshot_json(snapshot: &SimulationSnapshot) -> serde_json::Result<String> {
    serde_json::to_string(snapshot)
}

pub fn decode_snapshot_json(data: &str) -> serde_json::Result<SimulationSnapshot> {
    serde_json::from_str(data)
}

pub fn encode_history_json(history: &[HistoryPoint]) -> serde_json::Result<String> {
    serde_json::to_string(history)
}

pub fn decode_history_json(data: &str) -> serde_json::Result<Vec<HistoryPoint>> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> &'static str {
        r#"{
            "tick": 42,
            "nation": {
                "name": "Sworm",
                "states": [
                    {"id": "st-1", "name": "North Province", "population": 120},
                    {"id": "st-2", "name": "South Province", "population": 95}
                ]
            },
            "agents": [
                {
                    "id": "ag-1", "type": "citizen", "x": 10.0, "y": 20.0,
                    "trust_score": 55.0, "wealth": 12.5,
                    "faction": "Environmentalist", "age": 3, "state_id": "st-1"
                },
                {
                    "id": "ag-2", "type": "leader", "x": 30.0, "y": 40.0,
                    "trust_score": 70.0, "wealth": 0.0, "last_action": -1,
                    "state_id": "st-1"
                },
                {
                    "id": "ag-3", "type": "supreme_leader", "x": 400.0, "y": 300.0,
                    "trust_score": 80.0, "last_action": 3
                },
                {
                    "id": "ag-4", "type": "external", "x": 1.0, "y": 2.0,
                    "trust_score": 0.0
                }
            ],
            "last_election_results": [
                {
                    "outcome": "Challenger Victory", "winner_name": "New Leader",
                    "state_id": "st-1", "incumbent_votes": 40, "challenger_votes": 60
                },
                {
                    "outcome": "Social Feedback", "winner_name": "Citizens",
                    "reason": "Taxes are crushing us", "state_id": "st-2"
                }
            ],
            "metrics": {
                "avg_happiness": 61.2, "avg_wealth": 14.9,
                "avg_trust": 48.3, "sl_budget": 1043.77
            }
        }"#
    }

    #[test]
    fn decodes_full_state_payload() {
        let snapshot = decode_snapshot_json(full_payload()).expect("payload decodes");
        assert_eq!(snapshot.tick, 42);
        assert_eq!(snapshot.nation.states.len(), 2);
        assert_eq!(snapshot.agents.len(), 4);

        let citizen = &snapshot.agents[0];
        assert_eq!(citizen.kind, AgentKind::Citizen);
        assert_eq!(citizen.faction, Some(Faction::Environmentalist));
        assert_eq!(citizen.wealth, Some(12.5));
        assert_eq!(citizen.last_action, None);

        // -1 is the "no action yet" sentinel, not an error
        let leader = &snapshot.agents[1];
        assert_eq!(leader.last_action, None);

        let supreme = &snapshot.agents[2];
        assert_eq!(supreme.kind, AgentKind::SupremeLeader);
        assert_eq!(supreme.last_action, Some(AgentAction::Propaganda));
        assert_eq!(supreme.wealth, None);

        assert_eq!(snapshot.last_election_results[0].winner_name, "New Leader");
        assert_eq!(snapshot.last_election_results[1].incumbent_votes, 0);
        assert_eq!(snapshot.metrics.sl_budget, 1043.77);
    }

    #[test]
    fn missing_required_field_is_a_decode_error() {
        // agents entry without coordinates
        let payload = r#"{
            "tick": 1,
            "nation": {"name": "Sworm", "states": []},
            "agents": [{"id": "ag-1", "type": "citizen", "trust_score": 50.0}],
            "last_election_results": [],
            "metrics": {"avg_happiness": 0, "avg_wealth": 0, "avg_trust": 0, "sl_budget": 0}
        }"#;
        assert!(decode_snapshot_json(payload).is_err());
    }

    #[test]
    fn unknown_agent_kind_is_a_decode_error() {
        let payload = r#"{
            "tick": 1,
            "nation": {"name": "Sworm", "states": []},
            "agents": [{"id": "a", "type": "bureaucrat", "x": 0, "y": 0, "trust_score": 0}],
            "last_election_results": [],
            "metrics": {"avg_happiness": 0, "avg_wealth": 0, "avg_trust": 0, "sl_budget": 0}
        }"#;
        assert!(decode_snapshot_json(payload).is_err());
    }

    #[test]
    fn unknown_faction_collapses_to_neutral() {
        assert_eq!(Faction::from_name("Royalist"), Faction::Neutral);
        assert_eq!(Faction::from_name(""), Faction::Neutral);
        assert_eq!(Faction::from_name("Technocrat"), Faction::Technocrat);
    }

    #[test]
    fn out_of_range_action_is_a_decode_error() {
        assert!(AgentAction::from_wire(4).is_err());
        assert_eq!(AgentAction::from_wire(-1), Ok(None));
        assert_eq!(AgentAction::from_wire(3), Ok(Some(AgentAction::Propaganda)));
    }

    #[test]
    fn decodes_history_series() {
        let payload = r#"[
            {"tick": 1, "avg_happiness": 50.0, "avg_wealth": 10.0, "avg_trust": 50.0, "sl_budget": 1000.0},
            {"tick": 2, "avg_happiness": 51.5, "avg_wealth": 10.2, "avg_trust": 49.8, "sl_budget": 990.0}
        ]"#;
        let history = decode_history_json(payload).expect("history decodes");
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].tick, 2);
        assert_eq!(history[1].avg_happiness, 51.5);
    }

    #[test]
    fn snapshot_roundtrips_through_json() {
        let snapshot = decode_snapshot_json(full_payload()).expect("payload decodes");
        let encoded = encode_snapshot_json(&snapshot).expect("snapshot encodes");
        let again = decode_snapshot_json(&encoded).expect("encoded form decodes");
        assert_eq!(snapshot, again);
    }
}
