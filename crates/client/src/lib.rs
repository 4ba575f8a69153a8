//! WebSocket transport for Elixoids bots.
//!
//! The decision logic lives in `elixoids-engine`; this crate connects it to
//! a game server: settings from the command line, one [`Pilot`] per ship,
//! and a reconnecting session loop.

pub mod error;
pub mod pilot;
pub mod session;
pub mod settings;

pub use error::{SettingsError, TransportError};
pub use pilot::Pilot;
pub use session::{fly, run_news, run_ship};
pub use settings::{Args, RetryPolicy, Settings};

/// Installs the `tracing` subscriber used by the binaries. `RUST_LOG`
/// overrides the default `info` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
}

#[cfg(test)]
mod tests;
