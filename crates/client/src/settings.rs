use crate::error::SettingsError;
use clap::{Parser, ValueEnum};
use elixoids_engine::config::{DEFAULT_PATROL_STEP, DEFAULT_TOLERANCE};
use elixoids_engine::{EngineConfig, FireScope, Mode, PatrolPolicy, Selection};
use elixoids_protocol::endpoints;
use rand::Rng;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Rocks,
    Ships,
    Hunter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SelectArg {
    Nearest,
    Largest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PatrolArg {
    Hold,
    Advance,
    Clock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FireScopeArg {
    Any,
    Selected,
}

#[derive(Debug, Parser)]
#[command(name = "elixoids-bot", about = "Pilot a ship in an Elixoids game")]
pub struct Args {
    /// Display tag for the ship (random three letters when omitted).
    pub tag: Option<String>,

    /// host:port of the Elixoids server.
    #[arg(long, env = endpoints::SERVER_ENV, default_value = endpoints::DEFAULT_SERVER)]
    pub server: String,

    #[arg(long, default_value_t = endpoints::DEFAULT_GAME)]
    pub game: u32,

    /// What to shoot at.
    #[arg(long, value_enum, default_value_t = ModeArg::Rocks)]
    pub mode: ModeArg,

    #[arg(long = "select", value_enum, default_value_t = SelectArg::Nearest)]
    pub selection: SelectArg,

    /// Alignment tolerance in radians.
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Maximum random aim error in radians (0 disables it).
    #[arg(long, default_value_t = 0.0)]
    pub jitter: f64,

    #[arg(long, value_enum, default_value_t = PatrolArg::Advance)]
    pub patrol: PatrolArg,

    /// Radians added per frame by the advance patrol.
    #[arg(long, default_value_t = DEFAULT_PATROL_STEP)]
    pub patrol_step: f64,

    #[arg(long, value_enum, default_value_t = FireScopeArg::Any)]
    pub fire_scope: FireScopeArg,

    /// Connection attempts before giving up.
    #[arg(long, default_value_t = RetryPolicy::default().attempts)]
    pub retries: u32,

    /// Seconds to wait between connection attempts.
    #[arg(long, default_value_t = RetryPolicy::default().interval.as_secs())]
    pub retry_interval: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            interval: Duration::from_secs(5),
        }
    }
}

/// Validated startup configuration for one bot.
#[derive(Debug, Clone)]
pub struct Settings {
    pub tag: String,
    pub ship_url: String,
    pub engine: EngineConfig,
    pub retry: RetryPolicy,
}

impl Settings {
    pub fn from_args(args: Args) -> Result<Self, SettingsError> {
        let tag = match args.tag {
            Some(tag) => normalize_tag(&tag)?,
            None => random_tag(&mut rand::thread_rng()),
        };

        let engine = EngineConfig {
            mode: match args.mode {
                ModeArg::Rocks => Mode::Rocks,
                ModeArg::Ships => Mode::Ships,
                ModeArg::Hunter => Mode::Hunter,
            },
            selection: match args.selection {
                SelectArg::Nearest => Selection::Nearest,
                SelectArg::Largest => Selection::Largest,
            },
            tolerance: args.tolerance,
            jitter: args.jitter,
            patrol: match args.patrol {
                PatrolArg::Hold => PatrolPolicy::Hold,
                PatrolArg::Advance => PatrolPolicy::Advance {
                    step: args.patrol_step,
                },
                PatrolArg::Clock => PatrolPolicy::ClockHand,
            },
            fire_scope: match args.fire_scope {
                FireScopeArg::Any => FireScope::AnyVisible,
                FireScopeArg::Selected => FireScope::SelectedOnly,
            },
        };
        engine.validate()?;

        if args.retries == 0 {
            return Err(SettingsError::NoAttempts);
        }

        Ok(Self {
            ship_url: endpoints::ship_url(&args.server, args.game, &tag),
            tag,
            engine,
            retry: RetryPolicy {
                attempts: args.retries,
                interval: Duration::from_secs(args.retry_interval),
            },
        })
    }
}

pub fn normalize_tag(raw: &str) -> Result<String, SettingsError> {
    let ok = (1..=3).contains(&raw.len()) && raw.bytes().all(|b| b.is_ascii_alphanumeric());
    if !ok {
        return Err(SettingsError::Tag(raw.to_string()));
    }
    Ok(raw.to_ascii_uppercase())
}

pub fn random_tag(rng: &mut impl Rng) -> String {
    (0..3).map(|_| char::from(rng.gen_range(b'A'..=b'Z'))).collect()
}
