use crate::world::EntityId;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityField {
    Bearing,
    Distance,
    Radius,
}

impl fmt::Display for EntityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bearing => "bearing",
            Self::Distance => "distance",
            Self::Radius => "radius",
        })
    }
}

/// A frame the engine refuses to act on. Always recovered with a no-op.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedFrame {
    #[error("frame has no own bearing")]
    MissingBearing,
    #[error("own bearing is not finite: {0}")]
    NonFiniteBearing(f64),
    #[error("entity {id} has an invalid {field}")]
    BadEntity { id: EntityId, field: EntityField },
}

/// Rejected engine parameters. Fatal at startup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("alignment tolerance must be in (0, π], got {0}")]
    Tolerance(f64),
    #[error("jitter amplitude must be in [0, {max}], got {value}")]
    Jitter { value: f64, max: f64 },
    #[error("patrol step must be finite, got {0}")]
    PatrolStep(f64),
}
