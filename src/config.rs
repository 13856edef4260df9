//! Configuration for the storefront and the asset converter
//!
//! Both configs are read from the environment after `.env` files are
//! loaded. Parsing goes through a lookup function so tests can feed a map
//! instead of touching the process environment.

use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, Result};

/// Default catalog API location
const DEFAULT_API_URL: &str = "http://localhost:5000/api/";
/// Default directory holding the static assets (logo, hero slides)
const DEFAULT_ASSET_DIR: &str = "public";

/// Load `.env` from the working directory, then the per-user config file
///
/// - Linux: ~/.config/golden-extreme/storefront.env
/// - macOS: ~/Library/Application Support/golden-extreme/storefront.env
/// - Windows: %APPDATA%\golden-extreme\storefront.env
///
/// Values already present in the environment win.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env");
    }
    if let Some(mut path) = dirs::config_dir() {
        path.push("golden-extreme");
        path.push("storefront.env");
        if path.exists() && dotenvy::from_path(&path).is_ok() {
            tracing::debug!(path = %path.display(), "loaded user config");
        }
    }
}

/// Settings for the GUI storefront
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the catalog API (always ends with '/')
    pub api_base_url: Url,
    /// Directory holding the logo and hero slide images
    pub asset_dir: PathBuf,
}

impl StorefrontConfig {
    /// Read from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_url = lookup("CATALOG_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut api_base_url = Url::parse(raw_url.trim())
            .map_err(|e| Error::config("CATALOG_API_URL", format!("invalid URL {raw_url:?}: {e}")))?;
        if api_base_url.cannot_be_a_base() {
            return Err(Error::config(
                "CATALOG_API_URL",
                format!("{raw_url:?} cannot be used as a base URL"),
            ));
        }
        // Url::join drops the last segment unless the path ends with '/'
        if !api_base_url.path().ends_with('/') {
            let path = format!("{}/", api_base_url.path());
            api_base_url.set_path(&path);
        }

        let asset_dir = lookup("STOREFRONT_ASSET_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_DIR));

        Ok(Self {
            api_base_url,
            asset_dir,
        })
    }

    /// Path to the brand logo used by the loading indicators
    pub fn logo_path(&self) -> PathBuf {
        self.asset_dir.join("logo.png")
    }
}

/// Output format for converted images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    WebP,
    Jpeg,
}

impl ImageFormat {
    /// File extension written for this format
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::WebP => "webp",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "webp" => Ok(ImageFormat::WebP),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            other => Err(format!("unknown image format {other:?} (expected webp or jpeg)")),
        }
    }
}

/// Target bounds for converted images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Dimensions {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
        let width: u32 = w.trim().parse().map_err(|_| format!("bad width in {s:?}"))?;
        let height: u32 = h.trim().parse().map_err(|_| format!("bad height in {s:?}"))?;
        if width == 0 || height == 0 {
            return Err(format!("dimensions must be non-zero, got {s:?}"));
        }
        Ok(Dimensions { width, height })
    }
}

/// Settings for the `convert-assets` tool
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Directory walked recursively for images and videos
    pub input_dir: PathBuf,
    /// Mirror converted files here instead of next to the source
    pub output_dir: Option<PathBuf>,
    /// Target format for `.jpg/.jpeg/.png` sources
    pub image_format: ImageFormat,
    /// Lossy encoder quality (1-100) for WebP and JPEG output
    pub image_quality: u8,
    /// Cover-resize target; `None` keeps the source size
    pub resize: Option<Dimensions>,
    /// x264 constant rate factor for video compression
    pub video_crf: u8,
    /// Upper bound on conversions running at once
    pub max_concurrent: usize,
    /// Remove a source image once its conversion succeeded
    pub delete_originals: bool,
}

impl ConverterConfig {
    /// Read from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let default_parallelism = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        let input_dir = lookup("ASSET_INPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_DIR));
        let output_dir = lookup("ASSET_OUTPUT_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let image_format: ImageFormat = parse_or(&lookup, "ASSET_IMAGE_FORMAT", ImageFormat::WebP)?;

        let image_quality: u8 = parse_or(&lookup, "ASSET_IMAGE_QUALITY", 80)?;
        if !(1..=100).contains(&image_quality) {
            return Err(Error::config(
                "ASSET_IMAGE_QUALITY",
                format!("must be between 1 and 100, got {image_quality}"),
            ));
        }

        let resize = match lookup("ASSET_RESIZE") {
            Some(v) if v.trim().eq_ignore_ascii_case("none") => None,
            Some(v) => Some(
                v.parse::<Dimensions>()
                    .map_err(|e| Error::config("ASSET_RESIZE", e))?,
            ),
            None => Some(Dimensions {
                width: 1920,
                height: 1080,
            }),
        };

        let video_crf: u8 = parse_or(&lookup, "ASSET_VIDEO_CRF", 28)?;
        if video_crf > 51 {
            return Err(Error::config(
                "ASSET_VIDEO_CRF",
                format!("must be between 0 and 51, got {video_crf}"),
            ));
        }

        let max_concurrent: usize = parse_or(&lookup, "ASSET_MAX_CONCURRENT", default_parallelism)?;
        if max_concurrent == 0 {
            return Err(Error::config("ASSET_MAX_CONCURRENT", "must be at least 1"));
        }

        let delete_originals = match lookup("ASSET_DELETE_ORIGINALS") {
            Some(v) => parse_bool(&v).ok_or_else(|| {
                Error::config("ASSET_DELETE_ORIGINALS", format!("expected true/false, got {v:?}"))
            })?,
            None => false,
        };

        Ok(Self {
            input_dir,
            output_dir,
            image_format,
            image_quality,
            resize,
            video_crf,
            max_concurrent,
            delete_originals,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::config(key, format!("invalid value {raw:?}: {e}"))),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
