//! Shared constants for the annotation engine.

/// Image extensions the session lists when scanning a folder (lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff"];

/// Default minimum box edge in image pixels; smaller drags are rejected.
pub const DEFAULT_MIN_BOX_SIZE: u32 = 10;

/// Default bounding-box outline thickness, carried for the presentation layer.
pub const DEFAULT_BOX_THICKNESS: u32 = 2;

/// Class list filename looked up next to the images.
pub const CLASSES_FILENAME: &str = "classes.txt";

/// Annotations subfolder used when no output folder is configured.
pub const DEFAULT_ANNOTATIONS_DIR: &str = "annotations";
