//! Decision engine for Elixoids bots.
//!
//! Given one [`WorldFrame`], [`TargetingEngine::decide`] picks a target,
//! computes the bearing to steer toward and whether to fire. It performs no
//! I/O: randomness and wall-clock time come from the injected [`Jitter`]
//! and [`Clock`], and target changes are reported as [`Event`]s for the
//! caller to log.

pub mod angle;
pub mod config;
pub mod error;
pub mod select;
pub mod sources;
pub mod world;

pub use config::{EngineConfig, FireScope, Mode, PatrolPolicy, Selection};
pub use error::{ConfigError, EntityField, MalformedFrame};
pub use sources::{Clock, FixedClock, Jitter, NoJitter, SystemClock, UniformJitter};
pub use world::{BotState, Decision, Entity, EntityId, WorldFrame};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Acquired {
        id: EntityId,
        bearing: f64,
        candidates: usize,
    },
    Lost {
        previous: EntityId,
    },
    Rejected(MalformedFrame),
}

/// Result of one decision cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    pub decision: Decision,
    pub state: BotState,
    pub event: Option<Event>,
}

impl Cycle {
    pub fn is_rejected(&self) -> bool {
        matches!(self.event, Some(Event::Rejected(_)))
    }
}

#[derive(Debug, Clone)]
pub struct TargetingEngine<J = NoJitter, C = SystemClock> {
    config: EngineConfig,
    jitter: J,
    clock: C,
}

impl TargetingEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_sources(config, NoJitter, SystemClock)
    }
}

impl<J: Jitter, C: Clock> TargetingEngine<J, C> {
    pub fn with_sources(config: EngineConfig, jitter: J, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            jitter,
            clock,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn decide(&mut self, frame: &WorldFrame, state: &BotState) -> Cycle {
        let own = match frame.validate() {
            Ok(own) => own,
            Err(err) => return self.reject(frame, state, err),
        };

        let candidates = select::candidates(frame, self.config.mode);
        let Some(target) = select::select(candidates, self.config.selection) else {
            let bearing = select::patrol(self.config.patrol, own, &self.clock);
            let event = state.target().map(|previous| Event::Lost {
                previous: previous.clone(),
            });
            return Cycle {
                decision: Decision {
                    bearing,
                    fire: false,
                },
                state: BotState::NoTarget,
                event,
            };
        };

        let amplitude = self.config.jitter;
        let sample = self.jitter.sample(amplitude);
        let offset = if sample.is_finite() {
            sample.clamp(-amplitude, amplitude)
        } else {
            0.0
        };
        // Jitter first, then wrap.
        let bearing = angle::normalize(target.bearing + offset);

        let fire = match self.config.fire_scope {
            FireScope::AnyVisible => candidates.iter().any(|e| self.aligned(e, own)),
            FireScope::SelectedOnly => self.aligned(target, own),
        };

        let (next, event) = if state.target() == Some(&target.id) {
            (state.clone(), None)
        } else {
            let event = Event::Acquired {
                id: target.id.clone(),
                bearing,
                candidates: candidates.len(),
            };
            (BotState::Tracking(target.id.clone()), Some(event))
        };

        Cycle {
            decision: Decision { bearing, fire },
            state: next,
            event,
        }
    }

    fn aligned(&self, entity: &Entity, own: f64) -> bool {
        angle::is_aligned(angle::angular_delta(entity.bearing, own), self.config.tolerance)
    }

    fn reject(&self, frame: &WorldFrame, state: &BotState, err: MalformedFrame) -> Cycle {
        let hold = frame.own_bearing.filter(|b| b.is_finite()).unwrap_or(0.0);
        Cycle {
            decision: Decision::hold(hold),
            state: state.clone(),
            event: Some(Event::Rejected(err)),
        }
    }
}
