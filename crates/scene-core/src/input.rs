//! Input sampling: viewport, cursor and scroll state.

use glam::Vec2;

/// Layout viewport in CSS pixels plus the (capped) device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64, max_pixel_ratio: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio, max_pixel_ratio),
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            (self.width / self.height) as f32
        } else {
            1.0
        }
    }

    /// Size of the renderer's drawing buffer in physical pixels (at least 1x1).
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.width * self.pixel_ratio).floor() as u32;
        let h = (self.height * self.pixel_ratio).floor() as u32;
        (w.max(1), h.max(1))
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            pixel_ratio: 1.0,
        }
    }
}

#[inline]
pub fn clamp_pixel_ratio(device_pixel_ratio: f64, max: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(max)
    } else {
        1.0
    }
}

/// Map client coordinates to a centered range: the viewport's left/top edge
/// maps to -0.5 and the right/bottom edge to +0.5.
#[inline]
pub fn normalize_cursor(client_x: f64, client_y: f64, viewport: &Viewport) -> Vec2 {
    if viewport.is_empty() {
        return Vec2::ZERO;
    }
    Vec2::new(
        (client_x / viewport.width - 0.5) as f32,
        (client_y / viewport.height - 0.5) as f32,
    )
}

/// Latest raw samples from the page.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSamples {
    pub cursor: Vec2,
    pub scroll_px: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_edges_map_to_half_range() {
        let vp = Viewport::new(800.0, 600.0, 1.0, 2.0);
        assert_eq!(normalize_cursor(0.0, 0.0, &vp), Vec2::new(-0.5, -0.5));
        assert_eq!(normalize_cursor(800.0, 600.0, &vp), Vec2::new(0.5, 0.5));
        assert_eq!(normalize_cursor(400.0, 300.0, &vp), Vec2::ZERO);
    }

    #[test]
    fn empty_viewport_centers_cursor() {
        let vp = Viewport::new(0.0, 600.0, 1.0, 2.0);
        assert_eq!(normalize_cursor(10.0, 10.0, &vp), Vec2::ZERO);
    }

    #[test]
    fn pixel_ratio_is_capped() {
        assert_eq!(clamp_pixel_ratio(3.0, 2.0), 2.0);
        assert_eq!(clamp_pixel_ratio(1.25, 2.0), 1.25);
        assert_eq!(clamp_pixel_ratio(f64::NAN, 2.0), 1.0);
        assert_eq!(clamp_pixel_ratio(0.0, 2.0), 1.0);
    }

    #[test]
    fn backing_size_scales_by_ratio() {
        let vp = Viewport::new(1280.0, 720.0, 3.0, 2.0);
        assert_eq!(vp.backing_size(), (2560, 1440));
        assert!((vp.aspect() - 16.0 / 9.0).abs() < 1e-6);
        assert_eq!(Viewport::new(0.0, 0.0, 1.0, 2.0).backing_size(), (1, 1));
    }
}
