use serde::{Deserialize, Serialize};

/// The remote operations a controller can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    HealthProbe,
    Summarise,
}

impl ActionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HealthProbe => "health_probe",
            Self::Summarise => "summarise",
        }
    }
}
