//! # screen-mirror-core
//!
//! Platform-agnostic screen mirroring core.
//!
//! Runs the consent → capture session → virtual display lifecycle that
//! mirrors the device screen into an on-screen view. Platform hosts
//! implement the traits in [`traits`] and drive a [`MirrorController`]
//! from their event thread.
//!
//! ## Architecture
//!
//! ```text
//! screen-mirror-core (this crate)
//! ├── traits/    ← ConsentFacility, ProjectionService, CaptureSession, VirtualDisplay,
//! │                OutputSurface, DisplayMetricsProvider, NotificationSink
//! ├── models/    ← MirrorError, MirrorState, MirrorConfiguration, display and consent types
//! └── session/   ← MirrorController (the state machine)
//! ```

pub mod models;
pub mod session;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::config::MirrorConfiguration;
pub use models::consent::{ConsentOutcome, ConsentRequestId, ConsentResult};
pub use models::display::{DisplayDensity, DisplayFlags, SurfaceSize, SurfaceTarget, VirtualDisplaySpec};
pub use models::error::MirrorError;
pub use models::snapshot::{BindingInfo, MirrorSnapshot};
pub use models::state::MirrorState;
pub use session::mirror::MirrorController;
pub use traits::capture_session::{CaptureSession, VirtualDisplay};
pub use traits::consent_facility::ConsentFacility;
pub use traits::notification_sink::NotificationSink;
pub use traits::output_surface::{DisplayMetricsProvider, OutputSurface};
pub use traits::projection_service::ProjectionService;
