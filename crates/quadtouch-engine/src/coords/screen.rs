/// Drawable area of the display in physical pixels.
///
/// Starts from [`ScreenSize::FALLBACK`] and is replaced by the display
/// resolution when the platform reports one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScreenSize {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    /// Size used when no display can be queried.
    pub const FALLBACK: ScreenSize = ScreenSize::new(1024, 720);

    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height, used to keep the quad square on non-square screens.
    ///
    /// Returns `1.0` for an empty size so the shader never sees `inf`/`NaN`.
    #[inline]
    pub fn aspect_ratio(self) -> f32 {
        if self.is_empty() {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for ScreenSize {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_matches_default() {
        assert_eq!(ScreenSize::default(), ScreenSize { x: 0, y: 0, width: 1024, height: 720 });
    }

    #[test]
    fn aspect_ratio_is_width_over_height() {
        assert_eq!(ScreenSize::new(1080, 2160).aspect_ratio(), 0.5);
        assert_eq!(ScreenSize::new(1920, 1080).aspect_ratio(), 1920.0 / 1080.0);
    }

    #[test]
    fn aspect_ratio_of_empty_size_is_one() {
        assert_eq!(ScreenSize::new(0, 720).aspect_ratio(), 1.0);
        assert_eq!(ScreenSize::new(1024, 0).aspect_ratio(), 1.0);
    }
}
