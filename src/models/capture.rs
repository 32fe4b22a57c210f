// Data structures for frame acquisition

/// A single frame handed from the frame source to the pose backend
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub timestamp: i64, // Milliseconds since the Unix epoch
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub format: FrameFormat,
}

/// Payload format of captured frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    RGBA8,
    /// Landmarks already extracted by an external detector, as one JSON object
    LandmarkJson,
}

/// Error types for frame acquisition
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Source not available: {0}")]
    SourceUnavailable(String),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CaptureResult<T> = Result<T, CaptureError>;
