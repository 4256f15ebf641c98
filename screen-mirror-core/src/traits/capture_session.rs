use crate::models::display::{SurfaceTarget, VirtualDisplaySpec};
use crate::models::error::MirrorError;

/// A live capture session granted by the projection service.
///
/// Owned exclusively by the controller. `stop` is called exactly once,
/// after any virtual display created from the session has been released.
pub trait CaptureSession {
    /// Create a virtual display that mirrors the screen into `target`.
    fn create_binding(
        &mut self,
        spec: &VirtualDisplaySpec,
        target: &SurfaceTarget,
    ) -> Result<Box<dyn VirtualDisplay>, MirrorError>;

    /// End the session. The handle is dropped right after.
    fn stop(&mut self);
}

/// A virtual display bound to an output surface.
pub trait VirtualDisplay {
    /// Detach from the surface and free the display. Called exactly once.
    fn release(&mut self);
}
