/// Image conversion: decode, resize, encode
///
/// All functions here are blocking and CPU-bound; the pipeline runs them
/// on tokio's blocking pool.

use image::codecs::jpeg::JpegEncoder;
use image::{imageops::FilterType, DynamicImage, ExtendedColorType, ImageEncoder};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{ConverterConfig, Dimensions, ImageFormat};
use crate::error::{Error, Result};

/// Encoder settings taken from the converter config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSettings {
    pub format: ImageFormat,
    /// Lossy encoder quality (1-100)
    pub quality: u8,
    pub resize: Option<Dimensions>,
}

impl From<&ConverterConfig> for ImageSettings {
    fn from(config: &ConverterConfig) -> Self {
        Self {
            format: config.image_format,
            quality: config.image_quality,
            resize: config.resize,
        }
    }
}

/// Convert `source` into `destination` in the configured format
///
/// With a resize target the image is scaled to cover the target and
/// cropped around its center.
pub fn convert_image(source: &Path, destination: &Path, settings: &ImageSettings) -> Result<()> {
    let img = image::open(source)?;
    let original = (img.width(), img.height());

    let img = match settings.resize {
        Some(bounds) => img.resize_to_fill(bounds.width, bounds.height, FilterType::Lanczos3),
        None => img,
    };

    write_encoded(&img, destination, settings.format, settings.quality)?;

    tracing::debug!(
        source = %source.display(),
        destination = %destination.display(),
        from = ?original,
        to = ?(img.width(), img.height()),
        "converted image"
    );
    Ok(())
}

/// Shrink a WebP file in place when it exceeds the target bounds
///
/// Returns `true` if the file was rewritten.
pub fn optimize_webp(path: &Path, settings: &ImageSettings) -> Result<bool> {
    let Some(bounds) = settings.resize else {
        return Ok(false);
    };

    let (width, height) = image::image_dimensions(path)?;
    if width <= bounds.width && height <= bounds.height {
        return Ok(false);
    }

    let img = image::open(path)?;
    let resized = img.resize(bounds.width, bounds.height, FilterType::Lanczos3);
    write_encoded(&resized, path, ImageFormat::WebP, settings.quality)?;

    tracing::debug!(
        path = %path.display(),
        from = ?(width, height),
        to = ?(resized.width(), resized.height()),
        "optimized webp"
    );
    Ok(true)
}

/// Encode to a `.partial` sibling, then rename over the destination
fn write_encoded(img: &DynamicImage, destination: &Path, format: ImageFormat, quality: u8) -> Result<()> {
    let partial = partial_path(destination);
    let result = encode_to(img, &partial, format, quality)
        .and_then(|()| fs::rename(&partial, destination).map_err(Into::into));
    if result.is_err() {
        let _ = fs::remove_file(&partial);
    }
    result
}

fn encode_to(img: &DynamicImage, path: &Path, format: ImageFormat, quality: u8) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    match format {
        ImageFormat::WebP => {
            let rgba = img.to_rgba8();
            let encoded = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
                .encode_simple(false, f32::from(quality))
                .map_err(|e| Error::WebP(format!("{e:?}")))?;
            writer.write_all(&encoded)?;
        }
        ImageFormat::Jpeg => {
            let rgb = img.to_rgb8();
            JpegEncoder::new_with_quality(&mut writer, quality).write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ExtendedColorType::Rgb8,
            )?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// `hero.webp` → `hero.webp.partial`
pub(crate) fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    destination.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn settings(format: ImageFormat, resize: Option<(u32, u32)>) -> ImageSettings {
        ImageSettings {
            format,
            quality: 80,
            resize: resize.map(|(width, height)| Dimensions { width, height }),
        }
    }

    fn write_png(path: &Path, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([200, 120, 10]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_convert_png_to_webp_with_cover_resize() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("banner.png");
        let destination = dir.path().join("banner.webp");
        write_png(&source, 80, 40);

        convert_image(&source, &destination, &settings(ImageFormat::WebP, Some((32, 32)))).unwrap();

        assert_eq!(image::image_dimensions(&destination).unwrap(), (32, 32));
        assert!(!partial_path(&destination).exists());
    }

    #[test]
    fn test_webp_quality_controls_size() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("noise.png");
        // Deterministic noise so the encoder has detail to throw away
        let mut seed = 0x2545_f491_u32;
        let noise = RgbImage::from_fn(256, 256, |_, _| {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let [r, g, b, _] = seed.to_le_bytes();
            Rgb([r, g, b])
        });
        noise.save(&source).unwrap();

        let encode = |quality: u8| {
            let destination = dir.path().join(format!("noise_q{quality}.webp"));
            let settings = ImageSettings {
                format: ImageFormat::WebP,
                quality,
                resize: None,
            };
            convert_image(&source, &destination, &settings).unwrap();
            fs::metadata(&destination).unwrap().len()
        };

        let low = encode(10);
        let high = encode(100);
        assert!(low < high, "q10 = {low} bytes, q100 = {high} bytes");
    }

    #[test]
    fn test_convert_to_jpeg_without_resize() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("logo.png");
        let destination = dir.path().join("logo.jpg");
        write_png(&source, 30, 20);

        convert_image(&source, &destination, &settings(ImageFormat::Jpeg, None)).unwrap();

        assert_eq!(image::image_dimensions(&destination).unwrap(), (30, 20));
    }

    #[test]
    fn test_corrupt_source_fails_and_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("broken.jpg");
        let destination = dir.path().join("broken.webp");
        fs::write(&source, b"definitely not a jpeg").unwrap();

        assert!(convert_image(&source, &destination, &settings(ImageFormat::WebP, None)).is_err());
        assert!(!destination.exists());
        assert!(!partial_path(&destination).exists());
    }

    #[test]
    fn test_optimize_webp_only_when_oversized() {
        let dir = tempfile::tempdir().unwrap();
        let small = dir.path().join("small.webp");
        let large = dir.path().join("large.webp");
        let png = dir.path().join("seed.png");

        write_png(&png, 16, 16);
        convert_image(&png, &small, &settings(ImageFormat::WebP, None)).unwrap();
        write_png(&png, 64, 32);
        convert_image(&png, &large, &settings(ImageFormat::WebP, None)).unwrap();

        let bounds = settings(ImageFormat::WebP, Some((32, 32)));
        assert!(!optimize_webp(&small, &bounds).unwrap());
        assert!(optimize_webp(&large, &bounds).unwrap());
        assert_eq!(image::image_dimensions(&large).unwrap(), (32, 16));
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/tmp/a/hero.webp")),
            PathBuf::from("/tmp/a/hero.webp.partial")
        );
    }
}
