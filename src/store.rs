//! Mutable per-image annotation store with deterministic hit-testing.

use thiserror::Error;

use crate::model::BoundingBox;

/// Errors from store mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Dragged rectangle was below the minimum size in one dimension
    #[error("box {width}x{height} is below the minimum size {min_size}")]
    DegenerateBox {
        width: u32,
        height: u32,
        min_size: u32,
    },

    /// No image is loaded, so pixel coordinates cannot be normalized
    #[error("no image loaded")]
    NoImage,
}

/// Description of what a store mutation changed.
///
/// Mutations return this so a caller can refresh whatever mirrors the store
/// (annotation list, overlay) without the store knowing about any view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    /// A box was appended at `index`.
    Added { index: usize },
    /// The box at `index` was removed; later boxes shifted down.
    Removed { index: usize },
    /// The box at `index` now has `class_index`.
    Reclassified { index: usize, class_index: usize },
}

/// Ordered set of boxes for exactly one image.
///
/// Insertion order is display order and hit-test priority: the linear scan
/// returns the earliest-created box when boxes overlap. The store is fully
/// replaced when a different image becomes current, never merged.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    boxes: Vec<BoundingBox>,
    image_w: u32,
    image_h: u32,
}

impl AnnotationStore {
    /// Create an empty store for an image of the given dimensions.
    pub fn new(image_w: u32, image_h: u32) -> Self {
        Self {
            boxes: Vec::new(),
            image_w,
            image_h,
        }
    }

    /// Replace the whole box list, e.g. with a decoded label file.
    pub fn replace(&mut self, boxes: Vec<BoundingBox>) {
        self.boxes = boxes;
    }

    /// Dimensions of the image this store belongs to.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image_w, self.image_h)
    }

    /// All boxes in insertion order.
    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    /// Number of boxes, including ones with stale class indices.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Check if the store has no boxes.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Create a box from two corner points in image pixels.
    ///
    /// Rejects the box without mutating when either extent is smaller than
    /// `min_box_size`; on success the box is appended at the end.
    pub fn create(
        &mut self,
        x1: u32,
        y1: u32,
        x2: u32,
        y2: u32,
        class_index: usize,
        min_box_size: u32,
    ) -> Result<StoreChange, StoreError> {
        if self.image_w == 0 || self.image_h == 0 {
            return Err(StoreError::NoImage);
        }

        let width = x1.abs_diff(x2);
        let height = y1.abs_diff(y2);
        if width < min_box_size || height < min_box_size {
            return Err(StoreError::DegenerateBox {
                width,
                height,
                min_size: min_box_size,
            });
        }

        self.boxes.push(BoundingBox::from_corners(
            x1,
            y1,
            x2,
            y2,
            class_index,
            self.image_w,
            self.image_h,
        ));
        Ok(StoreChange::Added {
            index: self.boxes.len() - 1,
        })
    }

    /// Find the first box containing the given image-pixel point.
    ///
    /// Scans in insertion order, so when boxes overlap the earliest-created
    /// one wins. That ordering decides which box a delete or reclassify
    /// targets and must not change.
    pub fn hit_test(&self, x: u32, y: u32) -> Option<usize> {
        self.boxes
            .iter()
            .position(|b| b.contains(x, y, self.image_w, self.image_h))
    }

    /// Delete the first box containing the point, if any.
    pub fn delete_at(&mut self, x: u32, y: u32) -> Option<StoreChange> {
        let index = self.hit_test(x, y)?;
        self.boxes.remove(index);
        Some(StoreChange::Removed { index })
    }

    /// Advance the class of the first box containing the point, wrapping
    /// modulo `class_count`. No-op when the registry is empty or nothing
    /// is hit.
    pub fn cycle_class_at(
        &mut self,
        x: u32,
        y: u32,
        class_count: usize,
    ) -> Option<StoreChange> {
        if class_count == 0 {
            return None;
        }
        let index = self.hit_test(x, y)?;
        let class_index = (self.boxes[index].class_index + 1) % class_count;
        self.boxes[index].class_index = class_index;
        Some(StoreChange::Reclassified { index, class_index })
    }

    /// Remove every box, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.boxes.len();
        self.boxes.clear();
        count
    }

    /// Boxes whose class index is still valid, with their store indices.
    ///
    /// Boxes referencing a since-removed class are excluded here but stay
    /// in the store and in saved label files.
    pub fn visible(
        &self,
        class_count: usize,
    ) -> impl Iterator<Item = (usize, &BoundingBox)> {
        self.boxes
            .iter()
            .enumerate()
            .filter(move |(_, b)| b.class_index < class_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(boxes: &[(u32, u32, u32, u32, usize)]) -> AnnotationStore {
        let mut store = AnnotationStore::new(640, 480);
        for &(x1, y1, x2, y2, class) in boxes {
            store.create(x1, y1, x2, y2, class, 1).unwrap();
        }
        store
    }

    #[test]
    fn test_create_appends_in_order() {
        let store = store_with(&[(10, 10, 50, 50, 0), (100, 100, 200, 200, 1)]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.boxes()[0].class_index, 0);
        assert_eq!(store.boxes()[1].class_index, 1);
    }

    #[test]
    fn test_create_rejects_degenerate_box() {
        let mut store = AnnotationStore::new(640, 480);
        // Width 2 < min size 10
        let result = store.create(10, 10, 12, 20, 0, 10);

        assert_eq!(
            result,
            Err(StoreError::DegenerateBox {
                width: 2,
                height: 10,
                min_size: 10
            })
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_without_image_fails() {
        let mut store = AnnotationStore::default();
        assert_eq!(
            store.create(10, 10, 50, 50, 0, 10),
            Err(StoreError::NoImage)
        );
    }

    #[test]
    fn test_hit_test_first_match_wins() {
        // Two overlapping boxes inserted A then B; a point inside both
        // must resolve to A.
        let store = store_with(&[(10, 10, 100, 100, 0), (50, 50, 200, 200, 1)]);
        assert_eq!(store.hit_test(60, 60), Some(0));
        assert_eq!(store.hit_test(150, 150), Some(1));
        assert_eq!(store.hit_test(300, 300), None);
    }

    #[test]
    fn test_delete_at_removes_earliest_hit_only() {
        let mut store = store_with(&[(10, 10, 100, 100, 0), (50, 50, 200, 200, 1)]);

        assert_eq!(store.delete_at(60, 60), Some(StoreChange::Removed { index: 0 }));
        assert_eq!(store.len(), 1);
        assert_eq!(store.boxes()[0].class_index, 1);
        assert_eq!(store.delete_at(300, 300), None);
    }

    #[test]
    fn test_cycle_class_wraps() {
        let mut store = store_with(&[(10, 10, 100, 100, 2)]);

        assert_eq!(
            store.cycle_class_at(50, 50, 3),
            Some(StoreChange::Reclassified {
                index: 0,
                class_index: 0
            })
        );
        assert_eq!(store.boxes()[0].class_index, 0);
    }

    #[test]
    fn test_cycle_class_empty_registry_is_noop() {
        let mut store = store_with(&[(10, 10, 100, 100, 0)]);
        assert_eq!(store.cycle_class_at(50, 50, 0), None);
        assert_eq!(store.boxes()[0].class_index, 0);
    }

    #[test]
    fn test_clear_returns_count() {
        let mut store = store_with(&[(10, 10, 100, 100, 0), (50, 50, 200, 200, 1)]);
        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_visible_skips_stale_class_indices() {
        let store = store_with(&[(10, 10, 100, 100, 0), (110, 110, 200, 200, 5)]);

        let visible: Vec<usize> = store.visible(3).map(|(i, _)| i).collect();
        assert_eq!(visible, vec![0]);
        // The stale box is still in the store
        assert_eq!(store.len(), 2);
    }
}
