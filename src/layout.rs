//! Display-surface layout mathematics.
//!
//! Maps between display-surface pixels and image pixels for an image that
//! is scaled uniformly to fit the surface and centred within it. The render
//! layer recomputes this on every refresh; hit-testing and box creation
//! rely on [`ViewLayout::surface_to_image`] being the exact inverse of the
//! scale-and-centre step.

/// Scale factor and centring offsets for the displayed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewLayout {
    /// Uniform image-to-surface scale factor.
    pub scale: f32,
    /// Horizontal offset of the scaled image within the surface.
    pub offset_x: i32,
    /// Vertical offset of the scaled image within the surface.
    pub offset_y: i32,
}

impl ViewLayout {
    /// Compute the aspect-preserving fit of an image onto a surface.
    ///
    /// The scaled image never exceeds the surface and is centred within it.
    /// A zero-sized image or surface yields a zero scale, which makes every
    /// coordinate conversion return `None`.
    pub fn fit(image_w: u32, image_h: u32, surface_w: u32, surface_h: u32) -> Self {
        if image_w == 0 || image_h == 0 || surface_w == 0 || surface_h == 0 {
            return Self {
                scale: 0.0,
                offset_x: 0,
                offset_y: 0,
            };
        }

        let scale = (surface_w as f32 / image_w as f32).min(surface_h as f32 / image_h as f32);
        let scaled_w = (image_w as f32 * scale) as i32;
        let scaled_h = (image_h as f32 * scale) as i32;

        Self {
            scale,
            offset_x: (surface_w as i32 - scaled_w) / 2,
            offset_y: (surface_h as i32 - scaled_h) / 2,
        }
    }

    /// Convert a surface point to image-pixel coordinates.
    ///
    /// Returns `None` when no image is displayed (zero scale or zero image
    /// dimensions). The result is truncated to whole pixels and clamped
    /// into `[0, image_w-1] x [0, image_h-1]`, so points outside the
    /// displayed image area land on its nearest edge pixel.
    pub fn surface_to_image(
        &self,
        px: f32,
        py: f32,
        image_w: u32,
        image_h: u32,
    ) -> Option<(u32, u32)> {
        if image_w == 0 || image_h == 0 || self.scale == 0.0 {
            return None;
        }

        let x = ((px - self.offset_x as f32) / self.scale) as i64;
        let y = ((py - self.offset_y as f32) / self.scale) as i64;

        let x = x.clamp(0, image_w as i64 - 1) as u32;
        let y = y.clamp(0, image_h as i64 - 1) as u32;
        Some((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_landscape_image_centres_vertically() {
        // 640x480 into 800x800: scale limited by width
        let layout = ViewLayout::fit(640, 480, 800, 800);

        assert!((layout.scale - 1.25).abs() < 1e-6);
        assert_eq!(layout.offset_x, 0);
        // (800 - 480 * 1.25) / 2 = 100
        assert_eq!(layout.offset_y, 100);
    }

    #[test]
    fn test_fit_portrait_image_centres_horizontally() {
        let layout = ViewLayout::fit(480, 640, 800, 800);

        assert_eq!(layout.offset_y, 0);
        assert_eq!(layout.offset_x, 100);
    }

    #[test]
    fn test_fit_zero_dimensions_yields_zero_scale() {
        let layout = ViewLayout::fit(0, 480, 800, 800);
        assert_eq!(layout.scale, 0.0);
        assert_eq!(layout.surface_to_image(100.0, 100.0, 0, 480), None);
    }

    #[test]
    fn test_surface_to_image_inverts_scale_step() {
        let layout = ViewLayout::fit(640, 480, 800, 800);

        // Every image pixel mapped to the surface must map back exactly
        for &(ix, iy) in &[(0u32, 0u32), (1, 1), (320, 240), (639, 479)] {
            let sx = ix as f32 * layout.scale + layout.offset_x as f32;
            let sy = iy as f32 * layout.scale + layout.offset_y as f32;
            let (bx, by) = layout.surface_to_image(sx, sy, 640, 480).unwrap();
            assert_eq!((bx, by), (ix, iy), "pixel ({ix}, {iy}) did not survive");
        }
    }

    #[test]
    fn test_surface_to_image_clamps_outside_points() {
        let layout = ViewLayout::fit(640, 480, 800, 800);

        // Above-left of the displayed image
        assert_eq!(layout.surface_to_image(-50.0, -50.0, 640, 480), Some((0, 0)));
        // Beyond bottom-right
        assert_eq!(
            layout.surface_to_image(5000.0, 5000.0, 640, 480),
            Some((639, 479))
        );
    }

    #[test]
    fn test_surface_to_image_respects_offsets() {
        let layout = ViewLayout::fit(640, 480, 800, 800);

        // A point inside the vertical letterbox clamps to row 0
        let (_, y) = layout.surface_to_image(400.0, 10.0, 640, 480).unwrap();
        assert_eq!(y, 0);
    }
}
