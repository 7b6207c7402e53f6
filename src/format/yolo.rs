//! YOLO TXT codec for one image's label set.
//!
//! Each line is `<class> <x_center> <y_center> <width> <height>` with
//! coordinates normalized to the image and written to six decimal places.
//! The reader tolerates extra whitespace and skips lines that do not yield
//! exactly five parseable tokens.

use std::path::{Path, PathBuf};

use crate::format::error::FormatError;
use crate::model::BoundingBox;

/// Encode boxes in insertion order, one line per box.
///
/// Six-decimal fixed-point, newline-terminated lines, no trailing blank
/// line beyond the final newline.
pub fn encode(boxes: &[BoundingBox]) -> String {
    let mut out = String::new();
    for b in boxes {
        out.push_str(&format!(
            "{} {:.6} {:.6} {:.6} {:.6}\n",
            b.class_index, b.x_center, b.y_center, b.width, b.height
        ));
    }
    out
}

/// Decode label text into boxes, skipping malformed lines.
///
/// A bad line is dropped and decoding continues; one corrupt entry never
/// discards the rest of the file.
pub fn decode(text: &str) -> Vec<BoundingBox> {
    let mut boxes = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(b) => boxes.push(b),
            None => log::debug!("Skipping malformed label line: {:?}", line),
        }
    }
    boxes
}

/// Parse a single label line. Accepts exactly 5 whitespace-separated
/// tokens: a non-negative class index and four floats.
fn parse_line(line: &str) -> Option<BoundingBox> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 5 {
        return None;
    }

    let class_index: usize = parts[0].parse().ok()?;
    let x_center: f32 = parts[1].parse().ok()?;
    let y_center: f32 = parts[2].parse().ok()?;
    let width: f32 = parts[3].parse().ok()?;
    let height: f32 = parts[4].parse().ok()?;

    Some(BoundingBox {
        class_index,
        x_center,
        y_center,
        width,
        height,
    })
}

/// Label file path for an image: same stem, `.txt` extension, under the
/// output directory.
pub fn label_path(output_dir: &Path, image_filename: &str) -> PathBuf {
    let stem = Path::new(image_filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(image_filename);
    output_dir.join(format!("{stem}.txt"))
}

/// Read and decode a label file.
///
/// A file that does not exist means zero annotations, not an error.
pub fn read_label_file(path: &Path) -> Result<Vec<BoundingBox>, FormatError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = std::fs::read_to_string(path)?;
    Ok(decode(&text))
}

/// Encode and write a label file, creating the output directory if needed.
pub fn write_label_file(path: &Path, boxes: &[BoundingBox]) -> Result<(), FormatError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, encode(boxes))?;
    log::debug!("Wrote {} annotations to {:?}", boxes.len(), path);
    Ok(())
}

/// Read a class list file, one name per non-empty trimmed line.
pub fn read_classes_file(path: &Path) -> Result<Vec<String>, FormatError> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

/// Write a class list file, one name per line in registry order.
pub fn write_classes_file(path: &Path, names: &[String]) -> Result<(), FormatError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut content = names.join("\n");
    content.push('\n');
    std::fs::write(path, content)?;
    log::info!("Wrote {} classes to {:?}", names.len(), path);
    Ok(())
}
