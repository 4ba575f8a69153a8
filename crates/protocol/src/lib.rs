use elixoids_engine::{Decision, Entity, EntityId, WorldFrame};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("undecodable frame: {0}")]
    Decode(#[from] serde_json::Error),
}

/// `[id, bearing, radius, distance]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RockRow(pub EntityId, pub f64, pub f64, pub f64);

/// `[tag, bearing, distance]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipRow(pub EntityId, pub f64, pub f64);

/// A state frame as pushed by the server on the ship socket.
///
/// Every field is optional on the wire. Missing collections mean "nothing
/// visible"; a missing `theta` is passed through for the engine to reject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rocks: Option<Vec<RockRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ships: Option<Vec<ShipRow>>,
}

impl Frame {
    pub fn into_world(self) -> WorldFrame {
        let rocks = self
            .rocks
            .unwrap_or_default()
            .into_iter()
            .map(|RockRow(id, bearing, radius, distance)| Entity::rock(id, bearing, radius, distance))
            .collect();
        let ships = self
            .ships
            .unwrap_or_default()
            .into_iter()
            .map(|ShipRow(id, bearing, distance)| Entity::ship(id, bearing, distance))
            .collect();
        WorldFrame {
            own_bearing: self.theta,
            rocks,
            ships,
        }
    }
}

pub fn decode_frame(text: &str) -> Result<Frame, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}

/// Steering and trigger reply. The server accepts either field alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Command {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fire: Option<bool>,
}

impl Command {
    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<Decision> for Command {
    fn from(d: Decision) -> Self {
        Self {
            theta: Some(d.bearing),
            fire: Some(d.fire),
        }
    }
}

pub mod endpoints {
    pub const DEFAULT_SERVER: &str = "localhost:8065";
    pub const SERVER_ENV: &str = "ELIXOIDS_SERVER";
    pub const DEFAULT_GAME: u32 = 0;

    /// Socket a bot pilots its ship through.
    pub fn ship_url(server: &str, game: u32, tag: &str) -> String {
        format!("ws://{server}/{game}/ship/{tag}")
    }

    /// Plain-text stream of game news (kills, joins, hyperspace jumps).
    pub fn news_url(server: &str) -> String {
        format!("ws://{server}/news")
    }
}
