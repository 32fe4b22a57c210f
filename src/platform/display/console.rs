// Terminal sink: reports overlay changes through the log instead of drawing them

use super::OverlaySink;
use crate::core::overlay::Overlay;
use crate::models::capture::RawFrame;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayChange {
    Guideline(&'static str),
    Reps(String),
    Alert(String),
    Milestone(String),
}

/// Emits only what changed since the previous frame, so a steady stream of
/// identical overlays stays quiet
#[derive(Default)]
pub struct ConsoleOverlay {
    last: Option<Overlay>,
}

impl ConsoleOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changes(&mut self, overlay: &Overlay) -> Vec<OverlayChange> {
        let mut changes = Vec::new();
        let previous = self.last.as_ref();

        if !overlay.guideline.is_empty()
            && previous.map_or(true, |p| p.guideline != overlay.guideline)
        {
            changes.push(OverlayChange::Guideline(overlay.guideline));
        }

        if previous.map_or(true, |p| p.reps_line != overlay.reps_line) {
            changes.push(OverlayChange::Reps(overlay.reps_line.clone()));
        }

        if let Some(alert) = &overlay.posture_alert {
            if previous.map_or(true, |p| p.posture_alert.as_ref() != Some(alert)) {
                changes.push(OverlayChange::Alert(alert.clone()));
            }
        }

        if let Some(line) = &overlay.milestone_line {
            if previous.map_or(true, |p| p.milestone_line.as_ref() != Some(line)) {
                changes.push(OverlayChange::Milestone(line.clone()));
            }
        }

        self.last = Some(overlay.clone());
        changes
    }
}

impl OverlaySink for ConsoleOverlay {
    fn render(&mut self, _frame: &RawFrame, overlay: Option<&Overlay>) {
        let Some(overlay) = overlay else {
            return;
        };

        for change in self.changes(overlay) {
            match change {
                OverlayChange::Guideline(text) => info!("{}", text),
                OverlayChange::Reps(line) => info!("{}", line),
                OverlayChange::Alert(line) => warn!("{}", line),
                OverlayChange::Milestone(line) => info!("{}", line),
            }
        }
    }
}
