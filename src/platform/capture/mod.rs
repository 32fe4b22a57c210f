// Frame sources feeding the session driver
// A live camera pipeline and a recorded pose stream share the same interface

pub mod replay;

pub use replay::ReplayCapture;

use crate::models::capture::{CaptureResult, RawFrame};
use async_trait::async_trait;

#[async_trait]
pub trait FrameSource: Send {
    /// Next frame, or `None` once the source is exhausted
    async fn next_frame(&mut self) -> CaptureResult<Option<RawFrame>>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}
