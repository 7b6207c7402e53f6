//! Annotation session: image list, navigation, auto-save, and statistics.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::SessionConfig;
use crate::constants::{
    CLASSES_FILENAME, DEFAULT_ANNOTATIONS_DIR, DEFAULT_BOX_THICKNESS, DEFAULT_MIN_BOX_SIZE,
    IMAGE_EXTENSIONS,
};
use crate::format::{self, FormatError};
use crate::model::ClassRegistry;
use crate::store::{AnnotationStore, StoreChange, StoreError};

/// Errors from session folder and image operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// I/O error while scanning the images folder
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image header could not be read for dimensions
    #[error("failed to read image dimensions for {path:?}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// One operator's annotation session over a folder of images.
///
/// Owns the sorted image list, the active image's [`AnnotationStore`], and
/// the [`ClassRegistry`]. Navigation always saves the outgoing image's
/// labels before the incoming image's store is populated; that ordering is
/// what makes edits impossible to lose by stepping through the folder.
#[derive(Debug)]
pub struct AnnotationSession {
    images_folder: PathBuf,
    output_folder: PathBuf,
    image_files: Vec<String>,
    current_index: usize,
    store: AnnotationStore,
    registry: ClassRegistry,
    selected_class: usize,
    min_box_size: u32,
    box_thickness: u32,
}

impl AnnotationSession {
    /// Create an empty session with default settings.
    pub fn new() -> Self {
        Self {
            images_folder: PathBuf::new(),
            output_folder: PathBuf::new(),
            image_files: Vec::new(),
            current_index: 0,
            store: AnnotationStore::default(),
            registry: ClassRegistry::new(),
            selected_class: 0,
            min_box_size: DEFAULT_MIN_BOX_SIZE,
            box_thickness: DEFAULT_BOX_THICKNESS,
        }
    }

    /// Restore a session from persisted settings.
    ///
    /// Invalid or stale fields (a folder that no longer exists, an index
    /// past the end of the list) are skipped with a warning; this never
    /// fails to produce a usable session.
    pub fn from_config(config: &SessionConfig) -> Self {
        let mut session = Self::new();
        session.min_box_size = config.min_box_size;
        session.box_thickness = config.box_thickness;
        session.output_folder = PathBuf::from(&config.output_folder);

        if !config.images_folder.is_empty() {
            if let Err(e) = session.set_images_folder(&config.images_folder) {
                log::warn!(
                    "Could not restore images folder {:?}: {}",
                    config.images_folder,
                    e
                );
            }
        }

        // Settings classes win over any classes.txt picked up from the folder
        if !config.classes.is_empty() {
            session
                .registry
                .load_from_lines(config.classes.iter().map(String::as_str));
        }

        if config.current_image_index > 0 {
            session.set_current_index(config.current_image_index);
        }

        session
    }

    /// Snapshot the session settings for persistence at shutdown.
    pub fn to_config(&self) -> SessionConfig {
        SessionConfig {
            images_folder: self.images_folder.to_string_lossy().into_owned(),
            output_folder: self.output_folder.to_string_lossy().into_owned(),
            classes: self.registry.save_to_lines(),
            box_thickness: self.box_thickness,
            min_box_size: self.min_box_size,
            current_image_index: self.current_index,
        }
    }

    /// Build the image list from a folder and make its first image current.
    ///
    /// Lists entries whose extension is a supported image type
    /// (case-insensitive), sorted ascending by name. An empty folder is not
    /// an error; the session just has nothing to navigate. When no output
    /// folder is configured yet, an `annotations` subfolder is derived, and
    /// a `classes.txt` next to the images is loaded if present.
    pub fn set_images_folder(&mut self, path: impl AsRef<Path>) -> Result<&[String], SessionError> {
        let folder = path.as_ref();

        let mut files: Vec<String> = std::fs::read_dir(folder)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && has_image_extension(p))
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect();
        files.sort();

        log::info!("Scanned folder {:?}: {} images", folder, files.len());

        self.images_folder = folder.to_path_buf();
        self.image_files = files;
        self.current_index = 0;

        if self.output_folder.as_os_str().is_empty() {
            self.output_folder = folder.join(DEFAULT_ANNOTATIONS_DIR);
        }

        let classes_path = folder.join(CLASSES_FILENAME);
        if classes_path.exists() {
            match format::read_classes_file(&classes_path) {
                Ok(names) => {
                    log::info!("Loaded {} classes from {:?}", names.len(), classes_path);
                    self.registry.load_from_lines(names.iter().map(String::as_str));
                }
                Err(e) => log::warn!("Failed to load {:?}: {}", classes_path, e),
            }
        }

        self.reload_current();
        Ok(&self.image_files)
    }

    /// Set the folder label files are written to.
    pub fn set_output_folder(&mut self, path: impl AsRef<Path>) {
        self.output_folder = path.as_ref().to_path_buf();
    }

    /// Load the current image's dimensions and persisted labels into a
    /// fresh store, replacing the previous one entirely.
    pub fn load_current(&mut self) -> Result<(), SessionError> {
        let Some(image_path) = self.current_image_path() else {
            self.store = AnnotationStore::default();
            return Ok(());
        };

        let (width, height) =
            image::image_dimensions(&image_path).map_err(|source| SessionError::ImageRead {
                path: image_path.clone(),
                source,
            })?;

        let boxes = match self.current_label_path() {
            Some(label_path) => match format::read_label_file(&label_path) {
                Ok(boxes) => boxes,
                Err(e) => {
                    log::warn!("Failed to read labels {:?}: {}", label_path, e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        log::debug!(
            "Loaded {:?} ({}x{}) with {} annotations",
            image_path,
            width,
            height,
            boxes.len()
        );

        let mut store = AnnotationStore::new(width, height);
        store.replace(boxes);
        self.store = store;
        Ok(())
    }

    /// Persist the active store to the current image's label file.
    ///
    /// With no current image or no output folder there is nothing to save.
    pub fn save_current(&self) -> Result<(), FormatError> {
        let Some(label_path) = self.current_label_path() else {
            return Ok(());
        };
        format::write_label_file(&label_path, self.store.boxes())
    }

    /// Step to another image, wrapping in both directions.
    ///
    /// The outgoing image is always saved before the index changes and the
    /// incoming store is populated. A failed save is reported back as a
    /// warning but never blocks the navigation itself.
    pub fn advance(&mut self, delta: i32) -> Option<FormatError> {
        if self.image_files.is_empty() {
            return None;
        }

        let warning = self.save_current().err();
        if let Some(e) = &warning {
            log::warn!("Auto-save before navigation failed: {}", e);
        }

        let len = self.image_files.len() as i64;
        self.current_index = (self.current_index as i64 + delta as i64).rem_euclid(len) as usize;
        self.reload_current();

        warning
    }

    /// Jump directly to an image index, e.g. when restoring a session.
    ///
    /// Out-of-range indices are ignored. Unlike [`Self::advance`] this does
    /// not save the outgoing image first.
    pub fn set_current_index(&mut self, index: usize) {
        if index < self.image_files.len() {
            self.current_index = index;
            self.reload_current();
        }
    }

    /// Labeling progress through the folder as a whole percentage.
    pub fn progress(&self) -> u32 {
        if self.image_files.is_empty() {
            return 0;
        }
        ((self.current_index + 1) * 100 / self.image_files.len()) as u32
    }

    /// Total annotations persisted across every image in the folder.
    ///
    /// Re-reads each label file on demand; the in-memory store of the
    /// active image is not consulted.
    pub fn aggregate_annotation_count(&self) -> usize {
        if self.output_folder.as_os_str().is_empty() {
            return 0;
        }
        self.image_files
            .iter()
            .map(|name| {
                let path = format::label_path(&self.output_folder, name);
                match format::read_label_file(&path) {
                    Ok(boxes) => boxes.len(),
                    Err(e) => {
                        log::debug!("Skipping unreadable label file {:?}: {}", path, e);
                        0
                    }
                }
            })
            .sum()
    }

    /// Create a box from a completed drag, using the selected class and the
    /// configured minimum size.
    pub fn create_box(
        &mut self,
        x1: u32,
        y1: u32,
        x2: u32,
        y2: u32,
    ) -> Result<StoreChange, StoreError> {
        self.store
            .create(x1, y1, x2, y2, self.selected_class, self.min_box_size)
    }

    /// Delete the earliest-created box under the point, if any.
    pub fn delete_box_at(&mut self, x: u32, y: u32) -> Option<StoreChange> {
        self.store.delete_at(x, y)
    }

    /// Cycle the class of the earliest-created box under the point.
    pub fn cycle_box_class_at(&mut self, x: u32, y: u32) -> Option<StoreChange> {
        self.store.cycle_class_at(x, y, self.registry.len())
    }

    /// Select the class used for new boxes. Out-of-range indices are ignored.
    pub fn select_class(&mut self, index: usize) {
        if index < self.registry.len() {
            self.selected_class = index;
        }
    }

    /// Step the selected class forward or backward, wrapping.
    pub fn cycle_selected_class(&mut self, direction: i32) {
        if self.registry.is_empty() {
            return;
        }
        let len = self.registry.len() as i64;
        self.selected_class =
            (self.selected_class as i64 + direction as i64).rem_euclid(len) as usize;
    }

    /// Save the active image and hand back the settings to persist.
    pub fn shutdown(&mut self) -> SessionConfig {
        if let Err(e) = self.save_current() {
            log::warn!("Save on shutdown failed: {}", e);
        }
        self.to_config()
    }

    /// Filenames of the images in the session, sorted.
    pub fn images(&self) -> &[String] {
        &self.image_files
    }

    /// Index of the current image.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Filename of the current image.
    pub fn current_name(&self) -> Option<&str> {
        self.image_files.get(self.current_index).map(String::as_str)
    }

    /// Full path of the current image.
    pub fn current_image_path(&self) -> Option<PathBuf> {
        self.current_name().map(|name| self.images_folder.join(name))
    }

    /// Label file path of the current image, if an output folder is set.
    pub fn current_label_path(&self) -> Option<PathBuf> {
        if self.output_folder.as_os_str().is_empty() {
            return None;
        }
        self.current_name()
            .map(|name| format::label_path(&self.output_folder, name))
    }

    /// The active image's annotation store.
    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// Mutable access to the active image's annotation store.
    pub fn store_mut(&mut self) -> &mut AnnotationStore {
        &mut self.store
    }

    /// The class registry.
    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    /// Mutable access to the class registry.
    pub fn registry_mut(&mut self) -> &mut ClassRegistry {
        &mut self.registry
    }

    /// Index of the class used for new boxes.
    pub fn selected_class(&self) -> usize {
        self.selected_class
    }

    /// Folder the image list was built from.
    pub fn images_folder(&self) -> &Path {
        &self.images_folder
    }

    /// Folder label files are written to.
    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }

    /// Minimum box edge in pixels for new boxes.
    pub fn min_box_size(&self) -> u32 {
        self.min_box_size
    }

    /// Set the minimum box edge in pixels.
    pub fn set_min_box_size(&mut self, size: u32) {
        self.min_box_size = size;
    }

    /// Box outline thickness carried for the presentation layer.
    pub fn box_thickness(&self) -> u32 {
        self.box_thickness
    }

    /// Set the box outline thickness.
    pub fn set_box_thickness(&mut self, thickness: u32) {
        self.box_thickness = thickness;
    }

    /// Reload the current image, downgrading failures to a warning so
    /// navigation and folder scans keep working past a broken image.
    fn reload_current(&mut self) {
        if let Err(e) = self.load_current() {
            log::warn!("Failed to load current image: {}", e);
            self.store = AnnotationStore::default();
        }
    }
}

impl Default for AnnotationSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Check whether a path has a supported image extension (case-insensitive).
fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
