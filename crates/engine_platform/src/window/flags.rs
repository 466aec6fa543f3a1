//! Window creation options

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::platform::{PlatformError, PlatformResult};

/// Largest MSAA sample count accepted as a hint
pub const MAX_MSAA_SAMPLES: u32 = 32;

/// RGBA8 bitmap shown in the window decoration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowIcon {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long
    pub pixels: Vec<u8>,
}

impl WindowIcon {
    /// Create an icon from raw RGBA bytes
    pub const fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self { width, height, pixels }
    }

    /// Decode an icon from an image file (PNG)
    pub fn load(path: impl AsRef<Path>) -> PlatformResult<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| PlatformError::Icon(format!("{}: {e}", path.display())))?
            .to_rgba8();
        let (width, height) = image.dimensions();
        log::debug!("Loaded {width}x{height} window icon from {}", path.display());
        Ok(Self::new(width, height, image.into_raw()))
    }

    /// Check that the pixel buffer matches the dimensions
    pub fn validate(&self) -> PlatformResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlatformError::Icon(format!(
                "icon dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        let expected = self.width as usize * self.height as usize * 4;
        if self.pixels.len() != expected {
            return Err(PlatformError::Icon(format!(
                "icon of {}x{} needs {expected} bytes, got {}",
                self.width,
                self.height,
                self.pixels.len()
            )));
        }
        Ok(())
    }

    /// Pixels packed one `u32` per RGBA texel, in memory byte order
    pub fn packed_pixels(&self) -> Vec<u32> {
        bytemuck::pod_collect_to_vec(&self.pixels)
    }
}

/// Window creation options
///
/// A zero `width` or `height` means "use the primary monitor's current
/// video mode" for that dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowFlags {
    /// Window width in screen coordinates, 0 for the monitor width
    pub width: u32,
    /// Window height in screen coordinates, 0 for the monitor height
    pub height: u32,
    /// Exclusive fullscreen on the primary monitor at its native mode
    pub fullscreen: bool,
    /// Multisample count hint, 0 disables multisampling
    pub msaa: u32,
    /// Request an sRGB-capable framebuffer
    pub srgb: bool,
    /// Swap interval 1 when set, 0 otherwise
    pub vsync: bool,
    /// Window title
    pub title: String,
    /// Image file decoded into [`WindowFlags::icon`] by [`WindowFlags::load_icon`]
    pub icon_path: Option<PathBuf>,
    /// Decoration icon
    #[serde(skip)]
    pub icon: Option<WindowIcon>,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 600,
            fullscreen: false,
            msaa: 4,
            srgb: true,
            vsync: true,
            title: "engine_platform".to_string(),
            icon_path: None,
            icon: None,
        }
    }
}

impl Config for WindowFlags {}

impl WindowFlags {
    /// Set the window size (0 picks the monitor dimension)
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the window title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Enable or disable fullscreen
    #[must_use]
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Set the MSAA sample count hint
    #[must_use]
    pub fn with_msaa(mut self, samples: u32) -> Self {
        self.msaa = samples;
        self
    }

    /// Request or decline an sRGB framebuffer
    #[must_use]
    pub fn with_srgb(mut self, srgb: bool) -> Self {
        self.srgb = srgb;
        self
    }

    /// Enable or disable vsync
    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Set the decoration icon
    #[must_use]
    pub fn with_icon(mut self, icon: WindowIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Decode `icon_path` into `icon`, if a path is set
    pub fn load_icon(&mut self) -> PlatformResult<()> {
        if let Some(path) = &self.icon_path {
            self.icon = Some(WindowIcon::load(path)?);
        }
        Ok(())
    }

    /// Resolve the window size against a monitor mode
    pub const fn resolve_size(&self, monitor_width: u32, monitor_height: u32) -> (u32, u32) {
        let width = if self.width == 0 { monitor_width } else { self.width };
        let height = if self.height == 0 { monitor_height } else { self.height };
        (width, height)
    }

    /// Validate the flags
    pub fn validate(&self) -> PlatformResult<()> {
        if self.msaa != 0 && (!self.msaa.is_power_of_two() || self.msaa > MAX_MSAA_SAMPLES) {
            return Err(PlatformError::InvalidFlags(format!(
                "msaa must be 0 or a power of two up to {MAX_MSAA_SAMPLES}, got {}",
                self.msaa
            )));
        }
        if let Some(icon) = &self.icon {
            icon.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags_are_valid() {
        let flags = WindowFlags::default();
        assert!(flags.validate().is_ok());
        assert!(flags.vsync);
        assert!(!flags.fullscreen);
    }

    #[test]
    fn test_msaa_validation() {
        for samples in [0, 1, 2, 4, 8, 16, 32] {
            assert!(WindowFlags::default().with_msaa(samples).validate().is_ok());
        }
        for samples in [3, 6, 64] {
            let result = WindowFlags::default().with_msaa(samples).validate();
            assert!(matches!(result, Err(PlatformError::InvalidFlags(_))));
        }
    }

    #[test]
    fn test_icon_buffer_must_match_dimensions() {
        let good = WindowIcon::new(2, 2, vec![255; 16]);
        assert!(good.validate().is_ok());

        let short = WindowIcon::new(2, 2, vec![255; 15]);
        assert!(matches!(short.validate(), Err(PlatformError::Icon(_))));

        let empty = WindowIcon::new(0, 4, Vec::new());
        assert!(matches!(empty.validate(), Err(PlatformError::Icon(_))));

        let flags = WindowFlags::default().with_icon(short);
        assert!(flags.validate().is_err());
    }

    #[test]
    fn test_packed_pixels_keep_byte_order() {
        let icon = WindowIcon::new(1, 2, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        let packed = icon.packed_pixels();
        assert_eq!(packed.len(), 2);
        assert_eq!(packed[0].to_ne_bytes(), [1, 2, 3, 4]);
        assert_eq!(packed[1].to_ne_bytes(), [5, 6, 7, 8]);
    }

    #[test]
    fn test_zero_size_uses_monitor_mode() {
        let flags = WindowFlags::default().with_size(0, 0);
        assert_eq!(flags.resolve_size(1920, 1080), (1920, 1080));

        let flags = WindowFlags::default().with_size(800, 0);
        assert_eq!(flags.resolve_size(1920, 1080), (800, 1080));
    }

    #[test]
    fn test_flags_parse_from_partial_toml() {
        let flags: WindowFlags = toml::from_str("title = \"Demo\"\nvsync = false\n").unwrap();
        assert_eq!(flags.title, "Demo");
        assert!(!flags.vsync);
        assert_eq!(flags.width, WindowFlags::default().width);
        assert!(flags.icon.is_none());
    }

    #[test]
    fn test_missing_icon_file_is_an_icon_error() {
        let mut flags = WindowFlags {
            icon_path: Some(PathBuf::from("does/not/exist.png")),
            ..WindowFlags::default()
        };
        assert!(matches!(flags.load_icon(), Err(PlatformError::Icon(_))));
        assert!(flags.icon.is_none());
    }
}
