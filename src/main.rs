//! Headless session inspector.
//!
//! Opens a folder of images (restoring persisted settings when no folder is
//! given) and prints the labeling state recorded in the output folder.

use yolabel::{AnnotationSession, SessionConfig};

fn main() {
    env_logger::init();

    let mut session = match SessionConfig::load_from_default_path() {
        Some(config) => AnnotationSession::from_config(&config),
        None => AnnotationSession::new(),
    };

    if let Some(folder) = std::env::args().nth(1) {
        if let Err(e) = session.set_images_folder(&folder) {
            eprintln!("Failed to open folder {folder}: {e}");
            std::process::exit(1);
        }
    }

    println!("Images folder:  {}", session.images_folder().display());
    println!("Output folder:  {}", session.output_folder().display());
    println!("Images:         {}", session.images().len());
    println!("Classes:        {}", session.registry().len());
    println!("Progress:       {}%", session.progress());
    println!("Annotations:    {}", session.aggregate_annotation_count());
}
