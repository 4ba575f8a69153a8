use crate::angle;
use crate::error::{EntityField, MalformedFrame};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rocks are numbered by the server, ships are identified by their tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Tag(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Tag(t) => f.write_str(t),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for EntityId {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for EntityId {
    fn from(t: &str) -> Self {
        Self::Tag(t.to_string())
    }
}

impl From<String> for EntityId {
    fn from(t: String) -> Self {
        Self::Tag(t)
    }
}

/// A rock or an opposing ship as seen from our ship in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub bearing: f64,
    pub radius: Option<f64>,
    pub distance: f64,
}

impl Entity {
    pub fn rock(id: impl Into<EntityId>, bearing: f64, radius: f64, distance: f64) -> Self {
        Self {
            id: id.into(),
            bearing,
            radius: Some(radius),
            distance,
        }
    }

    pub fn ship(id: impl Into<EntityId>, bearing: f64, distance: f64) -> Self {
        Self {
            id: id.into(),
            bearing,
            radius: None,
            distance,
        }
    }

    fn check(&self, needs_radius: bool) -> Result<(), MalformedFrame> {
        let bad = |field| MalformedFrame::BadEntity {
            id: self.id.clone(),
            field,
        };
        if !self.bearing.is_finite() {
            return Err(bad(EntityField::Bearing));
        }
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(bad(EntityField::Distance));
        }
        if needs_radius && !self.radius.is_some_and(f64::is_finite) {
            return Err(bad(EntityField::Radius));
        }
        Ok(())
    }
}

/// One decoded snapshot of the game from our ship's point of view.
///
/// `own_bearing` is optional because the server contract does not stop a
/// frame from arriving without `theta`; the engine rejects such frames
/// instead of guessing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldFrame {
    pub own_bearing: Option<f64>,
    pub rocks: Vec<Entity>,
    pub ships: Vec<Entity>,
}

impl WorldFrame {
    pub fn new(own_bearing: f64) -> Self {
        Self {
            own_bearing: Some(own_bearing),
            ..Self::default()
        }
    }

    pub fn with_rocks(mut self, rocks: Vec<Entity>) -> Self {
        self.rocks = rocks;
        self
    }

    pub fn with_ships(mut self, ships: Vec<Entity>) -> Self {
        self.ships = ships;
        self
    }

    /// Returns our own bearing once every field the engine reads is usable.
    pub fn validate(&self) -> Result<f64, MalformedFrame> {
        let own = self.own_bearing.ok_or(MalformedFrame::MissingBearing)?;
        if !own.is_finite() {
            return Err(MalformedFrame::NonFiniteBearing(own));
        }
        for rock in &self.rocks {
            rock.check(true)?;
        }
        for ship in &self.ships {
            ship.check(false)?;
        }
        Ok(own)
    }
}

/// What the bot tells the server to do next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub bearing: f64,
    pub fire: bool,
}

impl Decision {
    /// Keep pointing where we are and hold fire.
    pub fn hold(bearing: f64) -> Self {
        Self {
            bearing: angle::normalize(bearing),
            fire: false,
        }
    }
}

/// Per-connection targeting state. Only used to notice target changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BotState {
    #[default]
    NoTarget,
    Tracking(EntityId),
}

impl BotState {
    pub fn target(&self) -> Option<&EntityId> {
        match self {
            Self::NoTarget => None,
            Self::Tracking(id) => Some(id),
        }
    }
}
