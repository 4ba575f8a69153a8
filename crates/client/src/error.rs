use elixoids_engine::ConfigError;
use tokio_tungstenite::tungstenite;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("websocket: {0}")]
    Socket(#[from] tungstenite::Error),
    #[error("gave up after {attempts} connection attempts")]
    RetriesExhausted { attempts: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("ship tag must be 1-3 ASCII letters or digits, got {0:?}")]
    Tag(String),
    #[error("retry budget must allow at least one attempt")]
    NoAttempts,
    #[error(transparent)]
    Engine(#[from] ConfigError),
}
