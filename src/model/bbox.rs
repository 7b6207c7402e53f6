//! Normalized bounding-box type shared by the store and the label codec.

/// One bounding-box annotation in YOLO normalized coordinates.
///
/// Centre and extent are fractions of image width/height in `[0, 1]`.
/// The class index is a position into the class registry at the time the
/// box was created or loaded, not an owning reference; the registry may
/// shrink underneath it (see [`crate::store::AnnotationStore::visible`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Position of the class in the registry.
    pub class_index: usize,
    /// Box centre X as a fraction of image width.
    pub x_center: f32,
    /// Box centre Y as a fraction of image height.
    pub y_center: f32,
    /// Box width as a fraction of image width.
    pub width: f32,
    /// Box height as a fraction of image height.
    pub height: f32,
}

impl BoundingBox {
    /// Build a normalized box from two corner points in image pixels.
    ///
    /// The corners may be given in any order; extents are absolute.
    pub fn from_corners(
        x1: u32,
        y1: u32,
        x2: u32,
        y2: u32,
        class_index: usize,
        image_w: u32,
        image_h: u32,
    ) -> Self {
        let w = image_w as f32;
        let h = image_h as f32;
        Self {
            class_index,
            x_center: (x1 + x2) as f32 / 2.0 / w,
            y_center: (y1 + y2) as f32 / 2.0 / h,
            width: x1.abs_diff(x2) as f32 / w,
            height: y1.abs_diff(y2) as f32 / h,
        }
    }

    /// Denormalize to a pixel rectangle `(x1, y1, x2, y2)`.
    ///
    /// Coordinates are truncated to whole pixels, so a round trip through
    /// [`BoundingBox::from_corners`] reproduces the original rectangle to
    /// within one pixel.
    pub fn pixel_rect(&self, image_w: u32, image_h: u32) -> (i32, i32, i32, i32) {
        let w = image_w as f32;
        let h = image_h as f32;
        (
            ((self.x_center - self.width / 2.0) * w) as i32,
            ((self.y_center - self.height / 2.0) * h) as i32,
            ((self.x_center + self.width / 2.0) * w) as i32,
            ((self.y_center + self.height / 2.0) * h) as i32,
        )
    }

    /// Check whether an image-pixel point falls inside this box.
    pub fn contains(&self, x: u32, y: u32, image_w: u32, image_h: u32) -> bool {
        let (x1, y1, x2, y2) = self.pixel_rect(image_w, image_h);
        let (x, y) = (x as i32, y as i32);
        x1 <= x && x <= x2 && y1 <= y && y <= y2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes_to_unit_range() {
        let b = BoundingBox::from_corners(100, 120, 180, 320, 0, 640, 480);

        assert!((b.x_center - 0.21875).abs() < 1e-6); // (100 + 180) / 2 / 640
        assert!((b.y_center - 0.458333).abs() < 1e-5); // (120 + 320) / 2 / 480
        assert!((b.width - 0.125).abs() < 1e-6); // 80 / 640
        assert!((b.height - 0.416667).abs() < 1e-5); // 200 / 480
    }

    #[test]
    fn test_from_corners_order_independent() {
        let a = BoundingBox::from_corners(100, 120, 180, 320, 2, 640, 480);
        let b = BoundingBox::from_corners(180, 320, 100, 120, 2, 640, 480);
        assert_eq!(a, b);
    }

    #[test]
    fn test_pixel_rect_round_trip_within_one_pixel() {
        let (x1, y1, x2, y2) = (37, 51, 211, 302);
        let b = BoundingBox::from_corners(x1, y1, x2, y2, 0, 640, 480);
        let (rx1, ry1, rx2, ry2) = b.pixel_rect(640, 480);

        assert!((rx1 - x1 as i32).abs() <= 1);
        assert!((ry1 - y1 as i32).abs() <= 1);
        assert!((rx2 - x2 as i32).abs() <= 1);
        assert!((ry2 - y2 as i32).abs() <= 1);
    }

    #[test]
    fn test_contains_boundary_points() {
        let b = BoundingBox::from_corners(100, 100, 200, 200, 0, 640, 480);

        assert!(b.contains(100, 100, 640, 480));
        assert!(b.contains(200, 200, 640, 480));
        assert!(b.contains(150, 150, 640, 480));
        assert!(!b.contains(99, 150, 640, 480));
        assert!(!b.contains(150, 201, 640, 480));
    }
}
