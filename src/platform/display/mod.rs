// Display sinks receiving each frame with its overlay text

pub mod console;

pub use console::ConsoleOverlay;

use crate::core::overlay::Overlay;
use crate::models::capture::RawFrame;

pub trait OverlaySink: Send {
    /// Show a frame. `None` shows the frame without any overlay.
    fn render(&mut self, frame: &RawFrame, overlay: Option<&Overlay>);
}
