use thiserror::Error;

/// Errors that can occur while mirroring the display.
///
/// Every variant except `InvalidDensity` and `ConfigurationFailed` is
/// recovered by the controller: it returns to idle before the error is
/// handed back to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MirrorError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("permission approved without an approval token")]
    MissingApprovalToken,

    #[error("output surface not ready: {width}x{height}")]
    SurfaceNotReady { width: u32, height: u32 },

    #[error("invalid display density: {0} dpi")]
    InvalidDensity(u32),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("consent request failed: {0}")]
    ConsentRequestFailed(String),

    #[error("capture session unavailable: {0}")]
    SessionUnavailable(String),

    #[error("virtual display binding failed: {0}")]
    BindingFailed(String),
}

impl MirrorError {
    /// Whether the error is the user declining consent rather than a
    /// platform fault.
    pub fn is_denial(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::MissingApprovalToken)
    }
}
