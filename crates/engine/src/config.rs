use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Largest aim perturbation a bot may be configured with, in radians.
pub const MAX_JITTER: f64 = 0.2;

pub const DEFAULT_TOLERANCE: f64 = 0.1;
pub const DEFAULT_PATROL_STEP: f64 = 0.1;

/// Which collection a bot hunts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Rocks,
    Ships,
    /// Ships when any are visible, rocks otherwise.
    Hunter,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Rocks
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    Nearest,
    /// Biggest rock first. Ships have no radius and fall back to nearest.
    Largest,
}

impl Default for Selection {
    fn default() -> Self {
        Self::Nearest
    }
}

/// Bearing to steer toward while nothing is in sight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "policy")]
pub enum PatrolPolicy {
    Hold,
    Advance { step: f64 },
    /// Sweep one degree per second, counter to the second hand of a clock.
    ClockHand,
}

impl Default for PatrolPolicy {
    fn default() -> Self {
        Self::Advance {
            step: DEFAULT_PATROL_STEP,
        }
    }
}

/// Which entities may trigger the fire flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireScope {
    AnyVisible,
    SelectedOnly,
}

impl Default for FireScope {
    fn default() -> Self {
        Self::AnyVisible
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub mode: Mode,
    pub selection: Selection,
    pub tolerance: f64,
    pub jitter: f64,
    pub patrol: PatrolPolicy,
    pub fire_scope: FireScope,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            selection: Selection::default(),
            tolerance: DEFAULT_TOLERANCE,
            jitter: 0.0,
            patrol: PatrolPolicy::default(),
            fire_scope: FireScope::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0 && self.tolerance <= PI) {
            return Err(ConfigError::Tolerance(self.tolerance));
        }
        if !(self.jitter.is_finite() && (0.0..=MAX_JITTER).contains(&self.jitter)) {
            return Err(ConfigError::Jitter {
                value: self.jitter,
                max: MAX_JITTER,
            });
        }
        if let PatrolPolicy::Advance { step } = self.patrol {
            if !step.is_finite() {
                return Err(ConfigError::PatrolStep(step));
            }
        }
        Ok(())
    }
}
