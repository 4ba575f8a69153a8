use elixoids_engine::{BotState, Clock, Event, Jitter, SystemClock, TargetingEngine, UniformJitter};
use elixoids_protocol::{decode_frame, Command};

/// Connection lifecycle hooks for one ship.
///
/// Owns the engine and the per-connection [`BotState`]; the session loop
/// calls `on_connect`, then `on_frame` for every text message, then
/// `on_disconnect`.
pub struct Pilot<J = UniformJitter, C = SystemClock> {
    tag: String,
    engine: TargetingEngine<J, C>,
    state: BotState,
    last_disconnect: Option<String>,
}

impl<J: Jitter, C: Clock> Pilot<J, C> {
    pub fn new(tag: impl Into<String>, engine: TargetingEngine<J, C>) -> Self {
        Self {
            tag: tag.into(),
            engine,
            state: BotState::NoTarget,
            last_disconnect: None,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn state(&self) -> &BotState {
        &self.state
    }

    /// Why the most recent session ended, if one has.
    pub fn last_disconnect(&self) -> Option<&str> {
        self.last_disconnect.as_deref()
    }

    pub fn on_connect(&mut self) {
        self.state = BotState::NoTarget;
        tracing::info!(tag = %self.tag, "connected");
    }

    /// Runs one decision cycle and returns the JSON command to send, or
    /// `None` when the frame was dropped.
    pub fn on_frame(&mut self, text: &str) -> Option<String> {
        let frame = match decode_frame(text) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(tag = %self.tag, "dropping frame: {e}");
                return None;
            }
        };

        let cycle = self.engine.decide(&frame.into_world(), &self.state);
        match &cycle.event {
            Some(Event::Rejected(e)) => {
                tracing::warn!(tag = %self.tag, "dropping frame: {e}");
                return None;
            }
            Some(Event::Acquired {
                id,
                bearing,
                candidates,
            }) => {
                tracing::info!(
                    tag = %self.tag,
                    "targeting {id} at {bearing:.3} (of {candidates} targets)"
                );
            }
            Some(Event::Lost { previous }) => {
                tracing::info!(tag = %self.tag, "lost {previous}, awaiting target");
            }
            None => {}
        }
        self.state = cycle.state;

        match Command::from(cycle.decision).encode() {
            Ok(json) => {
                tracing::debug!(tag = %self.tag, "command {json}");
                Some(json)
            }
            Err(e) => {
                tracing::error!(tag = %self.tag, "encode command failed: {e}");
                None
            }
        }
    }

    pub fn on_disconnect(&mut self, code: Option<u16>, reason: &str) {
        tracing::warn!(tag = %self.tag, ?code, reason, "game over");
        self.last_disconnect = Some(reason.to_string());
    }
}
