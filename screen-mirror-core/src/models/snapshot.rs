use serde::{Deserialize, Serialize};

use super::display::{DisplayDensity, SurfaceSize};
use super::state::MirrorState;

/// Description of the live virtual display binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingInfo {
    pub name: String,
    pub size: SurfaceSize,
    pub density: DisplayDensity,
    /// Id assigned when the capture session was obtained.
    pub session_id: String,
    /// RFC 3339 UTC timestamp of session start.
    pub started_at: String,
}

/// Serializable view of a mirror controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorSnapshot {
    pub state: MirrorState,
    pub status: String,
    pub toggle_label: String,
    pub density: DisplayDensity,
    pub binding: Option<BindingInfo>,
}

impl MirrorSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
