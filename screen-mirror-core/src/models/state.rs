use serde::{Deserialize, Serialize};

/// Mirror controller state machine.
///
/// State transitions:
/// ```text
/// idle → awaitingPermission → active
///  ↑            │               │
///  └────────────┴───────────────┘
///   (denial / failure / stop / teardown)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MirrorState {
    #[default]
    Idle,
    AwaitingPermission,
    Active,
}

impl MirrorState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_awaiting_permission(&self) -> bool {
        matches!(self, Self::AwaitingPermission)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Short lowercase name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingPermission => "awaiting-permission",
            Self::Active => "active",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert!(MirrorState::default().is_idle());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&MirrorState::AwaitingPermission).unwrap();
        assert_eq!(json, "\"awaitingPermission\"");
    }
}
