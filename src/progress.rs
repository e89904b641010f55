//! Render progress reporting.

use indicatif::{ProgressBar, ProgressStyle};

/// Observer notified as the camera works through the image.
pub trait RenderObserver {
    /// A scanline is about to be rendered; `remaining` counts it and every line after it.
    fn scanline(&self, remaining: u32);

    /// The last pixel has been written.
    fn done(&self);
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl RenderObserver for NoProgress {
    fn scanline(&self, _remaining: u32) {}

    fn done(&self) {}
}

/// Build a terminal progress bar counting scanlines.
pub fn scanline_bar(image_height: u32) -> ProgressBar {
    let pb = ProgressBar::new(image_height as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {pos}/{len} scanlines ETA: {eta}") {
        pb.set_style(style);
    }
    pb
}

impl RenderObserver for ProgressBar {
    fn scanline(&self, remaining: u32) {
        if let Some(total) = self.length() {
            self.set_position(total.saturating_sub(remaining as u64));
        }
    }

    fn done(&self) {
        self.finish();
    }
}
