/// Conversion pipeline: discovery, bounded fan-out and the final report
///
/// Every discovered file becomes one job. Jobs run with at most
/// `max_concurrent` in flight; a failing job is recorded in the report and
/// never stops the others.

use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::raster::{self, ImageSettings};
use super::video::{self, VideoEncoder};
use super::{classify, AssetJob, AssetKind};
use crate::config::ConverterConfig;
use crate::error::{Error, Result};

/// What happened to a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Image converted to the target format
    Converted { output: PathBuf, deleted_original: bool },
    /// WebP re-encoded in place
    Optimized,
    /// Video compressed next to the source
    Compressed { output: PathBuf },
    /// Nothing to do
    Unchanged,
}

/// Aggregated result of a converter run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub converted: usize,
    pub optimized: usize,
    pub compressed: usize,
    pub unchanged: usize,
    pub deleted: usize,
    pub failed: Vec<(PathBuf, String)>,
}

impl ConversionReport {
    fn record(&mut self, source: PathBuf, result: Result<Outcome>) {
        match result {
            Ok(Outcome::Converted { deleted_original, .. }) => {
                self.converted += 1;
                if deleted_original {
                    self.deleted += 1;
                }
            }
            Ok(Outcome::Optimized) => self.optimized += 1,
            Ok(Outcome::Compressed { .. }) => self.compressed += 1,
            Ok(Outcome::Unchanged) => self.unchanged += 1,
            Err(e) => self.failed.push((source, e.to_string())),
        }
    }

    /// Number of files processed, failures included
    pub fn total(&self) -> usize {
        self.converted + self.optimized + self.compressed + self.unchanged + self.failed.len()
    }

    pub fn log_summary(&self) {
        for (path, error) in &self.failed {
            tracing::error!(path = %path.display(), %error, "conversion failed");
        }
        tracing::info!(
            total = self.total(),
            converted = self.converted,
            optimized = self.optimized,
            compressed = self.compressed,
            unchanged = self.unchanged,
            deleted = self.deleted,
            failed = self.failed.len(),
            "asset conversion finished"
        );
    }
}

pub struct Converter {
    config: ConverterConfig,
    video: Option<VideoEncoder>,
}

impl Converter {
    /// Build a converter, looking up ffmpeg on PATH
    pub fn new(config: ConverterConfig) -> Self {
        let video = VideoEncoder::from_path(config.video_crf);
        match &video {
            Some(encoder) => {
                tracing::debug!(ffmpeg = %encoder.binary_path().display(), "found ffmpeg");
            }
            None => tracing::warn!("ffmpeg not found in PATH; videos will be reported as failed"),
        }
        Self { config, video }
    }

    /// Replace (or remove) the video encoder
    pub fn with_video_encoder(mut self, video: Option<VideoEncoder>) -> Self {
        self.video = video;
        self
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Walk the input directory and classify every file, sorted by name per directory
    pub fn discover(&self) -> Result<Vec<AssetJob>> {
        let input = &self.config.input_dir;
        if !input.is_dir() {
            return Err(Error::config(
                "ASSET_INPUT_DIR",
                format!("input directory {} does not exist", input.display()),
            ));
        }

        let output = self.config.output_dir.as_deref();
        let jobs: Vec<AssetJob> = WalkDir::new(input)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| match output {
                // Don't pick up our own outputs when they live under the input
                Some(out) => entry.path() != out,
                None => true,
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let kind = classify(entry.path())?;
                Some(AssetJob {
                    source: entry.into_path(),
                    kind,
                })
            })
            .collect();

        Ok(jobs)
    }

    /// Where the converted form of `source` goes
    ///
    /// Without an output directory the file lands next to its source;
    /// with one, the source's position under the input directory is mirrored.
    pub fn output_for(&self, source: &Path, file_name: &str) -> PathBuf {
        let sibling = source.with_file_name(file_name);
        let Some(out_dir) = &self.config.output_dir else {
            return sibling;
        };
        match sibling.strip_prefix(&self.config.input_dir) {
            Ok(relative) => out_dir.join(relative),
            Err(_) => out_dir.join(file_name),
        }
    }

    /// Give every image output a single source
    ///
    /// The first image (in discovery order) claims its output; later images
    /// mapping to the same file come back as failures. A WebP whose path an
    /// image conversion rewrites is not optimized separately.
    pub fn claim_outputs(&self, jobs: Vec<AssetJob>) -> (Vec<AssetJob>, Vec<(PathBuf, Error)>) {
        let extension = self.config.image_format.extension();
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut collisions = Vec::new();
        let mut kept = Vec::with_capacity(jobs.len());

        for job in jobs {
            if job.kind == AssetKind::Image {
                let file_name = file_name_with_extension(&job.source, extension);
                let output = self.output_for(&job.source, &file_name);
                if let Some(first) = claimed.get(&output) {
                    let err = Error::OutputCollision {
                        output: output.display().to_string(),
                        claimed_by: first.display().to_string(),
                    };
                    collisions.push((job.source, err));
                    continue;
                }
                claimed.insert(output, job.source.clone());
            }
            kept.push(job);
        }

        kept.retain(|job| {
            let rewritten = job.kind == AssetKind::WebP && claimed.contains_key(&job.source);
            if rewritten {
                tracing::debug!(path = %job.source.display(), "skipping optimize, file is reconverted");
            }
            !rewritten
        });
        (kept, collisions)
    }

    /// Discover and process every asset
    pub async fn run(&self) -> Result<ConversionReport> {
        let (jobs, collisions) = self.claim_outputs(self.discover()?);
        tracing::info!(
            files = jobs.len(),
            concurrency = self.config.max_concurrent,
            input = %self.config.input_dir.display(),
            "starting asset conversion"
        );

        let results: Vec<(PathBuf, Result<Outcome>)> = stream::iter(jobs)
            .map(|job| async move {
                let result = self.process(&job).await;
                match &result {
                    Ok(outcome) => {
                        tracing::debug!(source = %job.source.display(), ?outcome, "processed");
                    }
                    Err(e) => {
                        tracing::warn!(source = %job.source.display(), error = %e, "failed");
                    }
                }
                (job.source, result)
            })
            .buffer_unordered(self.config.max_concurrent.max(1))
            .collect()
            .await;

        let mut report = ConversionReport::default();
        for (source, err) in collisions {
            report.record(source, Err(err));
        }
        for (source, result) in results {
            report.record(source, result);
        }
        Ok(report)
    }

    async fn process(&self, job: &AssetJob) -> Result<Outcome> {
        let settings = ImageSettings::from(&self.config);

        match job.kind {
            AssetKind::Image => {
                let file_name = file_name_with_extension(&job.source, settings.format.extension());
                let output = self.output_for(&job.source, &file_name);
                if let Some(parent) = output.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }

                let source = job.source.clone();
                let destination = output.clone();
                tokio::task::spawn_blocking(move || {
                    raster::convert_image(&source, &destination, &settings)
                })
                .await??;

                // A same-format conversion rewrote the source; keep it
                let deleted_original = self.config.delete_originals && output != job.source;
                if deleted_original {
                    tokio::fs::remove_file(&job.source).await?;
                }
                Ok(Outcome::Converted {
                    output,
                    deleted_original,
                })
            }
            AssetKind::WebP => {
                let path = job.source.clone();
                let rewritten =
                    tokio::task::spawn_blocking(move || raster::optimize_webp(&path, &settings))
                        .await??;
                Ok(if rewritten {
                    Outcome::Optimized
                } else {
                    Outcome::Unchanged
                })
            }
            AssetKind::Video => {
                let Some(encoder) = &self.video else {
                    return Err(Error::NotSupported(
                        "video compression requires ffmpeg on PATH".to_string(),
                    ));
                };

                let compressed = video::compressed_path(&job.source);
                let file_name = compressed
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let output = self.output_for(&job.source, &file_name);
                if tokio::fs::try_exists(&output).await? {
                    return Ok(Outcome::Unchanged);
                }
                if let Some(parent) = output.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }

                encoder.compress(&job.source, &output).await?;
                Ok(Outcome::Compressed { output })
            }
        }
    }
}

fn file_name_with_extension(source: &Path, extension: &str) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Dimensions, ImageFormat};
    use image::{Rgb, RgbImage};

    fn config(input: &Path) -> ConverterConfig {
        ConverterConfig {
            input_dir: input.to_path_buf(),
            output_dir: None,
            image_format: ImageFormat::WebP,
            image_quality: 80,
            resize: Some(Dimensions {
                width: 64,
                height: 32,
            }),
            video_crf: 28,
            max_concurrent: 2,
            delete_originals: false,
        }
    }

    fn write_png(path: &Path, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([200, 150, 20]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_discover_sorts_and_classifies() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("new")).unwrap();
        write_png(&dir.path().join("new/b.png"), 4, 4);
        write_png(&dir.path().join("a.png"), 4, 4);
        std::fs::write(dir.path().join("notes.txt"), "skip me").unwrap();
        std::fs::write(dir.path().join("intro.mp4"), b"fake").unwrap();
        std::fs::write(dir.path().join("intro_compressed.mp4"), b"fake").unwrap();

        let converter = Converter::new(config(dir.path())).with_video_encoder(None);
        let jobs = converter.discover().unwrap();
        let names: Vec<_> = jobs
            .iter()
            .map(|j| j.source.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.png"),
                PathBuf::from("intro.mp4"),
                PathBuf::from("new/b.png")
            ]
        );
        assert_eq!(jobs[1].kind, AssetKind::Video);
    }

    #[test]
    fn test_missing_input_dir_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let converter = Converter::new(config(&dir.path().join("missing")));
        match converter.discover() {
            Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("ASSET_INPUT_DIR")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_output_for_mirrors_into_output_dir() {
        let mut cfg = config(Path::new("public"));
        let converter = Converter::new(cfg.clone());
        assert_eq!(
            converter.output_for(Path::new("public/new/a.png"), "a.webp"),
            PathBuf::from("public/new/a.webp")
        );

        cfg.output_dir = Some(PathBuf::from("dist"));
        let converter = Converter::new(cfg);
        assert_eq!(
            converter.output_for(Path::new("public/new/a.png"), "a.webp"),
            PathBuf::from("dist/new/a.webp")
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_while_others_succeed() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("good.png"), 128, 128);
        std::fs::write(dir.path().join("broken.jpg"), b"definitely not a jpeg").unwrap();

        let report = Converter::new(config(dir.path()))
            .with_video_encoder(None)
            .run()
            .await
            .unwrap();

        assert_eq!(report.converted, 1);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].0.ends_with("broken.jpg"));
        assert_eq!(report.total(), 2);

        let converted = dir.path().join("good.webp");
        assert_eq!(image::image_dimensions(&converted).unwrap(), (64, 32));
        assert!(dir.path().join("good.png").exists(), "originals kept by default");
        assert!(!dir.path().join("broken.webp").exists());
        assert!(!dir.path().join("broken.webp.partial").exists());
    }

    #[tokio::test]
    async fn test_delete_originals_after_success() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("logo.png"), 16, 16);

        let mut cfg = config(dir.path());
        cfg.delete_originals = true;
        let report = Converter::new(cfg)
            .with_video_encoder(None)
            .run()
            .await
            .unwrap();

        assert_eq!(report.converted, 1);
        assert_eq!(report.deleted, 1);
        assert!(!dir.path().join("logo.png").exists());
        assert!(dir.path().join("logo.webp").exists());
    }

    #[tokio::test]
    async fn test_sources_sharing_an_output_convert_once() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("logo.png"), 16, 16);
        RgbImage::from_pixel(16, 16, Rgb([10, 10, 10]))
            .save(dir.path().join("logo.jpg"))
            .unwrap();

        let mut cfg = config(dir.path());
        cfg.delete_originals = true;
        let report = Converter::new(cfg)
            .with_video_encoder(None)
            .run()
            .await
            .unwrap();

        assert_eq!(report.converted, 1);
        assert_eq!(report.deleted, 1);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].0.ends_with("logo.png"));
        assert!(report.failed[0].1.contains("logo.jpg"));
        assert!(!dir.path().join("logo.jpg").exists());
        assert!(dir.path().join("logo.png").exists(), "the losing source is kept");
        assert!(dir.path().join("logo.webp").exists());
    }

    #[test]
    fn test_reconverted_webp_is_not_optimized_twice() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("hero.png"), 4, 4);
        std::fs::write(dir.path().join("hero.webp"), b"stale").unwrap();
        std::fs::write(dir.path().join("other.webp"), b"keep").unwrap();

        let converter = Converter::new(config(dir.path())).with_video_encoder(None);
        let (jobs, collisions) = converter.claim_outputs(converter.discover().unwrap());
        let names: Vec<_> = jobs
            .iter()
            .map(|j| j.source.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["hero.png", "other.webp"]);
        assert!(collisions.is_empty());
    }

    #[tokio::test]
    async fn test_webp_optimized_only_when_oversized() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("big.png"), 200, 100);
        write_png(&dir.path().join("small.png"), 10, 10);

        // First pass converts both to WebP without resizing
        let mut cfg = config(dir.path());
        cfg.resize = None;
        cfg.delete_originals = true;
        Converter::new(cfg).with_video_encoder(None).run().await.unwrap();

        let report = Converter::new(config(dir.path()))
            .with_video_encoder(None)
            .run()
            .await
            .unwrap();
        assert_eq!(report.optimized, 1);
        assert_eq!(report.unchanged, 1);

        let (w, h) = image::image_dimensions(dir.path().join("big.webp")).unwrap();
        assert!(w <= 64 && h <= 32);
    }

    #[tokio::test]
    async fn test_video_without_ffmpeg_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("intro.mp4"), b"fake").unwrap();

        let report = Converter::new(config(dir.path()))
            .with_video_encoder(None)
            .run()
            .await
            .unwrap();
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].1.contains("ffmpeg"));
    }

    #[tokio::test]
    async fn test_existing_compressed_output_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("intro.mp4"), b"fake").unwrap();
        std::fs::write(dir.path().join("intro_compressed.mp4"), b"done").unwrap();

        let encoder = VideoEncoder::new(dir.path().join("no-such-ffmpeg"), 28);
        let report = Converter::new(config(dir.path()))
            .with_video_encoder(Some(encoder))
            .run()
            .await
            .unwrap();
        assert_eq!(report.unchanged, 1);
        assert!(report.failed.is_empty());
    }
}
