//! yolabel - annotation session engine for YOLO bounding-box labeling.
//!
//! The engine owns per-image annotation state for a step-through-a-folder
//! labeling workflow: pointer coordinates map through [`ViewLayout`] into
//! image pixels, edits go through [`AnnotationStore`] under deterministic
//! first-match hit-testing, and label sets round-trip through the YOLO TXT
//! codec in [`format`]. [`AnnotationSession`] drives the sorted image list
//! and always saves the outgoing image before a switch.
//!
//! Rendering, windowing, and file dialogs are external collaborators; they
//! consume this state and invoke these operations but are not part of the
//! crate.

pub mod config;
pub mod constants;
pub mod format;
pub mod layout;
pub mod model;
pub mod session;
pub mod store;

pub use config::{ConfigError, SessionConfig};
pub use format::FormatError;
pub use layout::ViewLayout;
pub use model::{BoundingBox, ClassError, ClassRegistry};
pub use session::{AnnotationSession, SessionError};
pub use store::{AnnotationStore, StoreChange, StoreError};
