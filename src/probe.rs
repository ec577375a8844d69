//! Audio stream probing
//!
//! Stream properties come from an external `ffprobe` run rather than from the
//! tag libraries, which do not agree on how they report bit rates.

use crate::error::ProbeError;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Display-ready properties of a file's first audio stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamStats {
    /// e.g. "320 kbps"
    pub bitrate: String,
    /// Raw channel count, e.g. "2"
    pub channels: String,
    /// e.g. "44100 Hz"
    pub sample_rate: String,
}

impl StreamStats {
    /// Format raw prober values. The bit rate is in bits per second.
    pub fn from_raw(sample_rate: u32, channels: u32, bit_rate: f64) -> Self {
        Self {
            bitrate: format!("{} kbps", (bit_rate / 1000.0).round() as u64),
            channels: channels.to_string(),
            sample_rate: format!("{} Hz", sample_rate),
        }
    }

    /// The section appended after the lyrics block
    pub fn summary(&self) -> String {
        format!(
            "\n\nBitrate: {}\nChannels: {}\nSample Rate: {}",
            self.bitrate, self.channels, self.sample_rate
        )
    }
}

#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<StreamStats, ProbeError>;
}

/// Prober that shells out to ffprobe
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    program: String,
}

impl FfprobeProber {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

#[async_trait]
impl Prober for FfprobeProber {
    async fn probe(&self, path: &Path) -> Result<StreamStats, ProbeError> {
        tracing::debug!("Probing stream info: {}", path.display());

        let output = Command::new(&self.program)
            .args([
                "-v",
                "error",
                "-select_streams",
                "a:0",
                "-show_entries",
                "stream=sample_rate,channels,bit_rate:format=bit_rate",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .output()
            .await
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_ffprobe_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse the value-per-line output of the ffprobe invocation above.
///
/// Expected lines: stream sample rate, stream channels, stream bit rate and
/// container bit rate. The container bit rate is only consulted when the
/// stream reports `N/A`.
pub fn parse_ffprobe_output(output: &str) -> Result<StreamStats, ProbeError> {
    let mut lines = output.lines().map(str::trim);

    let sample_rate = parse_field(lines.next(), "sample_rate")?;
    let channels = parse_field(lines.next(), "channels")?;

    let bit_rate = match lines.next() {
        Some("N/A") => parse_field(lines.next(), "bit_rate")?,
        stream_rate => parse_field(stream_rate, "bit_rate")?,
    };

    Ok(StreamStats::from_raw(sample_rate, channels, bit_rate))
}

fn parse_field<T: std::str::FromStr>(
    line: Option<&str>,
    field: &'static str,
) -> Result<T, ProbeError> {
    let value = line
        .filter(|l| !l.is_empty())
        .ok_or(ProbeError::MissingField(field))?;
    value.parse().map_err(|_| ProbeError::InvalidField {
        field,
        value: value.to_string(),
    })
}
