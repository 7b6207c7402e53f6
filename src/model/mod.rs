//! Data models for the annotation engine.

mod bbox;
mod classes;

pub use bbox::BoundingBox;
pub use classes::{ClassError, ClassRegistry};
