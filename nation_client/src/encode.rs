//! Deterministic mapping from agent records to drawable attributes.
//! Pure functions, recomputed for every snapshot; nothing here is
//! cached across snapshots because agents carry no cross-snapshot
//! identity.

use nation_proto::{Agent, AgentAction, AgentKind, Faction};

pub const COLOR_CITIZEN: u32 = 0x2196F3;
pub const COLOR_LEADER: u32 = 0x4CAF50;
pub const COLOR_SUPREME_LEADER: u32 = 0xFFFF00;
pub const COLOR_MEDIA: u32 = 0x9C27B0;
pub const COLOR_EXTERNAL: u32 = 0x9E9E9E;
pub const COLOR_ENVIRONMENTALIST: u32 = 0x8BC34A;
pub const COLOR_TECHNOCRAT: u32 = 0x9C27B0;
pub const COLOR_INDUSTRIALIST: u32 = 0x0D47A1;
pub const COLOR_PROPAGANDA_RING: u32 = 0xFFD700;

pub const BASE_RADIUS: f64 = 5.0;
pub const EXTERNAL_RADIUS: f64 = 15.0;
pub const EXTERNAL_OPACITY: f64 = 0.6;
pub const POVERTY_THRESHOLD: f64 = 5.0;
pub const POVERTY_OPACITY: f64 = 0.5;
pub const RING_OFFSET: f64 = 5.0;

/// Additional decoration drawn around an agent's base circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub radius: f64,
    pub color: u32,
}

/// Everything the map needs to draw one agent. Colors are 0xRRGGBB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentGlyph {
    pub color: u32,
    pub radius: f64,
    pub opacity: f64,
    pub ring: Option<Ring>,
}

pub fn glyph(agent: &Agent) -> AgentGlyph {
    AgentGlyph {
        color: fill_color(agent),
        radius: radius(agent),
        opacity: opacity(agent),
        ring: ring(agent),
    }
}

/// Ordered decision table: role first, then citizen faction, then the
/// default citizen blue.
pub fn fill_color(agent: &Agent) -> u32 {
    match agent.kind {
        AgentKind::Leader => COLOR_LEADER,
        AgentKind::SupremeLeader => COLOR_SUPREME_LEADER,
        AgentKind::Media => COLOR_MEDIA,
        AgentKind::External => COLOR_EXTERNAL,
        AgentKind::Citizen => match agent.faction {
            Some(Faction::Environmentalist) => COLOR_ENVIRONMENTALIST,
            Some(Faction::Technocrat) => COLOR_TECHNOCRAT,
            Some(Faction::Industrialist) => COLOR_INDUSTRIALIST,
            Some(Faction::Neutral) | None => COLOR_CITIZEN,
        },
    }
}

/// External factors render large regardless of wealth; everyone else
/// grows with wealth, unclamped.
pub fn radius(agent: &Agent) -> f64 {
    if agent.kind == AgentKind::External {
        return EXTERNAL_RADIUS;
    }
    match agent.wealth {
        Some(wealth) if wealth != 0.0 => BASE_RADIUS + wealth / 10.0,
        _ => BASE_RADIUS,
    }
}

/// External factors are de-emphasized despite their size; poverty
/// (wealth below the threshold) dims an agent. Wealth absent means
/// full opacity.
pub fn opacity(agent: &Agent) -> f64 {
    if agent.kind == AgentKind::External {
        return EXTERNAL_OPACITY;
    }
    match agent.wealth {
        Some(wealth) if wealth < POVERTY_THRESHOLD => POVERTY_OPACITY,
        _ => 1.0,
    }
}

/// Gold ring for propaganda, additive over whatever the base circle is.
pub fn ring(agent: &Agent) -> Option<Ring> {
    if agent.last_action == Some(AgentAction::Propaganda) {
        Some(Ring {
            radius: radius(agent) + RING_OFFSET,
            color: COLOR_PROPAGANDA_RING,
        })
    } else {
        None
    }
}
