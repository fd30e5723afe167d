//! Frames-per-second counter driven by a one second tick.

/// Counts paints between ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FpsCounter {
    frames: u32,
    framerate: u32,
}

impl FpsCounter {
    /// Counts one painted frame.
    #[inline]
    pub fn frame(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }

    /// Closes the current second. Returns whether a repaint should be
    /// requested: only when frames were painted and the user is not panning.
    pub fn tick(&mut self, panning: bool) -> bool {
        self.framerate = self.frames;
        self.frames = 0;
        !panning && self.framerate > 0
    }

    /// Frames painted during the last full second.
    #[inline]
    pub fn framerate(&self) -> u32 {
        self.framerate
    }
}
