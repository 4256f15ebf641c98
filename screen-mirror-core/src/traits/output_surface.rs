use crate::models::display::{SurfaceSize, SurfaceTarget};

/// The on-screen view the display is mirrored into.
pub trait OutputSurface {
    /// Current pixel size. Zero on either side until layout completes.
    fn size(&self) -> SurfaceSize;

    fn target(&self) -> SurfaceTarget;
}

/// Host display metrics, queried once when the controller is built.
pub trait DisplayMetricsProvider {
    fn density_dpi(&self) -> u32;
}
