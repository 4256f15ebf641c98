use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::MirrorError;

/// Display density in dots per inch. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayDensity(u32);

impl DisplayDensity {
    pub fn new(dpi: u32) -> Result<Self, MirrorError> {
        if dpi == 0 {
            return Err(MirrorError::InvalidDensity(dpi));
        }
        Ok(Self(dpi))
    }

    pub fn dpi(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DisplayDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} dpi", self.0)
    }
}

/// Pixel size of an output surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A surface that has not been laid out yet reports a zero side.
    pub fn is_renderable(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl fmt::Display for SurfaceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Virtual display creation flags.
///
/// Bit values follow the platform's display manager constants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DisplayFlags(u32);

impl DisplayFlags {
    pub const AUTO_MIRROR: Self = Self(1 << 4);

    pub fn bits(&self) -> u32 {
        self.0
    }
}

/// Opaque handle to the renderable target behind an output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceTarget(pub u64);

/// Arguments handed to `CaptureSession::create_binding`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualDisplaySpec {
    pub name: String,
    pub size: SurfaceSize,
    pub density: DisplayDensity,
    pub flags: DisplayFlags,
}

impl VirtualDisplaySpec {
    /// Creates an auto-mirroring display spec.
    pub fn auto_mirror(name: impl Into<String>, size: SurfaceSize, density: DisplayDensity) -> Self {
        Self {
            name: name.into(),
            size,
            density,
            flags: DisplayFlags::AUTO_MIRROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_density_rejected() {
        assert_eq!(DisplayDensity::new(0), Err(MirrorError::InvalidDensity(0)));
        assert_eq!(DisplayDensity::new(420).unwrap().dpi(), 420);
    }

    #[test]
    fn surface_with_zero_side_is_not_renderable() {
        assert!(!SurfaceSize::default().is_renderable());
        assert!(!SurfaceSize::new(1080, 0).is_renderable());
        assert!(!SurfaceSize::new(0, 1920).is_renderable());
        assert!(SurfaceSize::new(1080, 1920).is_renderable());
    }

    #[test]
    fn auto_mirror_flag_value() {
        assert_eq!(DisplayFlags::AUTO_MIRROR.bits(), 16);
        assert_eq!(DisplayFlags::default().bits(), 0);
    }

    #[test]
    fn auto_mirror_spec() {
        let density = DisplayDensity::new(320).unwrap();
        let spec = VirtualDisplaySpec::auto_mirror("ScreenCapture", SurfaceSize::new(720, 1280), density);

        assert_eq!(spec.name, "ScreenCapture");
        assert_eq!(spec.flags, DisplayFlags::AUTO_MIRROR);
        assert_eq!(spec.size.to_string(), "720x1280");
    }
}
