//! Video compression using the external ffmpeg binary

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{Error, Result};

/// Suffix appended to the stem of compressed outputs
const COMPRESSED_SUFFIX: &str = "_compressed";

/// Whether `path` is an output we wrote (`*_compressed.mp4`)
pub fn is_compressed_output(path: &Path) -> bool {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().ends_with(COMPRESSED_SUFFIX))
        .unwrap_or(false)
}

/// `intro.mp4` → `intro_compressed.mp4`
pub fn compressed_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{stem}{COMPRESSED_SUFFIX}.mp4"))
}

/// H.264/AAC compressor driving ffmpeg
///
/// ```no_run
/// use golden_extreme::assets::video::VideoEncoder;
/// use std::path::Path;
///
/// # async fn demo() -> golden_extreme::Result<()> {
/// let encoder = VideoEncoder::from_path(28).expect("ffmpeg not found in PATH");
/// encoder.compress(Path::new("public/intro.mp4"), Path::new("public/intro_compressed.mp4")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VideoEncoder {
    binary_path: PathBuf,
    crf: u8,
}

impl VideoEncoder {
    pub fn new(binary_path: PathBuf, crf: u8) -> Self {
        Self { binary_path, crf }
    }

    /// Attempt to find ffmpeg in PATH
    pub fn from_path(crf: u8) -> Option<Self> {
        which::which("ffmpeg").ok().map(|path| Self::new(path, crf))
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Command-line arguments for one compression
    pub fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-hide_banner",
            "-nostdin",
            "-loglevel",
            "error",
            "-y",
            "-i",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        args.push(input.as_os_str().to_os_string());
        args.extend(
            [
                "-vcodec",
                "libx264",
                "-crf",
                &self.crf.to_string(),
                "-preset",
                "medium",
                "-acodec",
                "aac",
                "-b:a",
                "128k",
                // The output goes to a .partial file, so name the container
                "-f",
                "mp4",
            ]
            .iter()
            .map(OsString::from),
        );
        args.push(output.as_os_str().to_os_string());
        args
    }

    /// Compress `input` into `output`
    ///
    /// ffmpeg writes to a `.partial` sibling which is renamed on success,
    /// so an interrupted run never leaves a truncated video behind.
    pub async fn compress(&self, input: &Path, output: &Path) -> Result<()> {
        let partial = super::raster::partial_path(output);

        let result = Command::new(&self.binary_path)
            .args(self.args(input, &partial))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| Error::ExternalTool(format!("Failed to execute ffmpeg: {}", e)));

        let out = match result {
            Ok(out) => out,
            Err(e) => {
                let _ = tokio::fs::remove_file(&partial).await;
                return Err(e);
            }
        };

        if !out.status.success() {
            let _ = tokio::fs::remove_file(&partial).await;
            let stderr = String::from_utf8_lossy(&out.stderr);
            let tail: Vec<&str> = stderr.lines().rev().take(3).collect();
            let detail = tail.into_iter().rev().collect::<Vec<_>>().join(" | ");
            return Err(Error::ExternalTool(format!(
                "ffmpeg exited with {}: {}",
                out.status, detail
            )));
        }

        tokio::fs::rename(&partial, output).await?;
        Ok(())
    }
}
