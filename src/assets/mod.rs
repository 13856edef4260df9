//! Static asset conversion (the `convert-assets` tool)
//!
//! This module handles:
//! - Classifying files under the asset directory
//! - Converting JPEG/PNG sources to the target format (raster.rs)
//! - Shrinking oversized WebP files in place (raster.rs)
//! - Compressing MP4 videos with ffmpeg (video.rs)
//! - Running all of it on a bounded worker pool (pipeline.rs)

use std::path::{Path, PathBuf};

pub mod raster;
pub mod pipeline;
pub mod video;

pub use pipeline::{ConversionReport, Converter};

/// What to do with a discovered file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// `.jpg`, `.jpeg` or `.png`: convert to the target format
    Image,
    /// `.webp`: re-encode if larger than the target bounds
    WebP,
    /// `.mp4`: compress with ffmpeg
    Video,
}

/// A single file scheduled for conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetJob {
    pub source: PathBuf,
    pub kind: AssetKind,
}

/// Classify a path by extension (case-insensitive)
///
/// Videos we produced ourselves (`*_compressed.mp4`) are skipped so a
/// second run does not compress them again.
pub fn classify(path: &Path) -> Option<AssetKind> {
    let extension = path.extension()?.to_string_lossy().to_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" | "png" => Some(AssetKind::Image),
        "webp" => Some(AssetKind::WebP),
        "mp4" if !video::is_compressed_output(path) => Some(AssetKind::Video),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(Path::new("public/new/ADM_4614.JPG")), Some(AssetKind::Image));
        assert_eq!(classify(Path::new("a.jpeg")), Some(AssetKind::Image));
        assert_eq!(classify(Path::new("logo.png")), Some(AssetKind::Image));
        assert_eq!(classify(Path::new("hero.webp")), Some(AssetKind::WebP));
        assert_eq!(classify(Path::new("intro.mp4")), Some(AssetKind::Video));
        assert_eq!(classify(Path::new("intro_compressed.mp4")), None);
        assert_eq!(classify(Path::new("notes.txt")), None);
        assert_eq!(classify(Path::new("hero.webp.partial")), None);
        assert_eq!(classify(Path::new("README")), None);
    }
}
