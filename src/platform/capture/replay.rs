// Pose stream reader: one JSON object per line, as written by an external
// landmark detector. Works on regular files and on FIFOs fed live.

use super::FrameSource;
use crate::models::capture::{CaptureError, CaptureResult, FrameFormat, RawFrame};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

/// Per-frame metadata; the landmark payload itself is decoded by the pose backend
#[derive(Debug, Deserialize)]
struct FrameHeader {
    timestamp: Option<i64>,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

pub struct ReplayCapture<R> {
    lines: Lines<R>,
    origin: String,
    line_number: u64,
}

impl ReplayCapture<BufReader<tokio::fs::File>> {
    /// Open a pose stream file
    pub async fn open(path: &Path) -> CaptureResult<Self> {
        let file = tokio::fs::File::open(path).await.map_err(|e| {
            CaptureError::SourceUnavailable(format!("{}: {}", path.display(), e))
        })?;

        Ok(Self::from_reader(
            BufReader::new(file),
            path.display().to_string(),
        ))
    }
}

impl<R: AsyncBufRead + Unpin + Send> ReplayCapture<R> {
    pub fn from_reader(reader: R, origin: String) -> Self {
        Self {
            lines: reader.lines(),
            origin,
            line_number: 0,
        }
    }

    fn parse_line(&self, line: String) -> CaptureResult<RawFrame> {
        let header: FrameHeader = serde_json::from_str(&line).map_err(|e| {
            CaptureError::CaptureFailed(format!(
                "{} line {}: {}",
                self.origin, self.line_number, e
            ))
        })?;

        Ok(RawFrame {
            timestamp: header
                .timestamp
                .unwrap_or_else(|| chrono::Utc::now().timestamp_millis()),
            width: header.width,
            height: header.height,
            data: line.into_bytes(),
            format: FrameFormat::LandmarkJson,
        })
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> FrameSource for ReplayCapture<R> {
    async fn next_frame(&mut self) -> CaptureResult<Option<RawFrame>> {
        loop {
            let Some(line) = self.lines.next_line().await? else {
                return Ok(None);
            };
            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            return self.parse_line(line).map(Some);
        }
    }

    fn describe(&self) -> String {
        format!("pose stream {}", self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(input: &'static str) -> ReplayCapture<&'static [u8]> {
        ReplayCapture::from_reader(input.as_bytes(), "test".to_string())
    }

    #[tokio::test]
    async fn test_reads_frames_and_skips_blank_lines() {
        let mut source = capture(
            "{\"timestamp\":100,\"width\":640,\"height\":480,\"body_pose\":null}\n\n{\"timestamp\":133}\n",
        );

        let first = source.next_frame().await.unwrap().unwrap();
        assert_eq!(first.timestamp, 100);
        assert_eq!((first.width, first.height), (640, 480));
        assert_eq!(first.format, FrameFormat::LandmarkJson);

        let second = source.next_frame().await.unwrap().unwrap();
        assert_eq!(second.timestamp, 133);
        assert_eq!(second.width, 0);

        assert!(source.next_frame().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_timestamp_uses_wall_clock() {
        let before = chrono::Utc::now().timestamp_millis();
        let mut source = capture("{\"body_pose\":null}\n");
        let frame = source.next_frame().await.unwrap().unwrap();
        assert!(frame.timestamp >= before);
    }

    #[tokio::test]
    async fn test_malformed_line_reports_position() {
        let mut source = capture("{\"timestamp\":1}\nnot json\n");
        source.next_frame().await.unwrap();

        match source.next_frame().await {
            Err(CaptureError::CaptureFailed(msg)) => assert!(msg.contains("line 2"), "{msg}"),
            other => panic!("expected capture failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let result = ReplayCapture::open(&dir.path().join("absent.jsonl")).await;
        assert!(matches!(result, Err(CaptureError::SourceUnavailable(_))));
    }
}
