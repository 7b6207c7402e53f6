//! YOLO TXT label files: encoding, decoding, and on-disk layout.
//!
//! One label file per image, same base name with a `.txt` extension, stored
//! under the session's output folder. The class list lives in a plain-text
//! `classes.txt`, one name per line.

mod error;
mod yolo;

pub use error::FormatError;
pub use yolo::{
    decode, encode, label_path, read_classes_file, read_label_file, write_classes_file,
    write_label_file,
};
