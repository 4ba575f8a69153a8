//! Elixoids bot toolkit: the targeting engine and its wire format.
//!
//! `use elixoids::prelude::*` brings in everything needed to turn a server
//! frame into a command:
//!
//! ```
//! use elixoids::prelude::*;
//!
//! let mut engine = TargetingEngine::new(EngineConfig::default()).unwrap();
//! let world = decode_frame(r#"{"theta":0.0,"rocks":[[1,0.05,2.0,10.0]]}"#)
//!     .unwrap()
//!     .into_world();
//! let cycle = engine.decide(&world, &BotState::NoTarget);
//! assert!(Command::from(cycle.decision).fire.unwrap());
//! ```

pub use elixoids_engine as engine;
pub use elixoids_protocol as protocol;

pub mod prelude {
    pub use elixoids_engine::{
        BotState, Clock, Cycle, Decision, EngineConfig, Event, FireScope, Jitter, Mode,
        PatrolPolicy, Selection, TargetingEngine, WorldFrame,
    };
    pub use elixoids_protocol::{decode_frame, Command, Frame};
}
