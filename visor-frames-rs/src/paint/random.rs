//! Uniform random noise painter.

use crate::frames::{FrameBuffer, Rgbw};
use crate::produce::FrameProducer;
use crate::rng::XorShift32;

/// Whole-frame noise on a single colour channel.
///
/// Each frame lights exactly one channel, rotating red → green → blue
/// with a cycle counter that advances once per painted frame. Every pixel
/// gets an independent random magnitude in 8 coarse levels (0–7); the
/// other channels and white stay 0.
pub struct RandomFill {
    cycle: u32,
    rng: XorShift32,
}

impl RandomFill {
    /// Create a painter starting on the red cycle.
    pub const fn new(seed: u32) -> Self {
        Self {
            cycle: 0,
            rng: XorShift32::new(seed),
        }
    }

    /// Frames painted so far; `cycle % 3` selects the next frame's channel.
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Paint one frame of single-channel noise into `frame`.
    pub fn fill(&mut self, frame: &mut FrameBuffer) {
        let channel = self.cycle % 3;
        for px in frame.pixels_mut().iter_mut() {
            let level = (self.rng.next_below(255) / 32) as u8;
            *px = match channel {
                0 => Rgbw::new(level, 0, 0, 0),
                1 => Rgbw::new(0, level, 0, 0),
                _ => Rgbw::new(0, 0, level, 0),
            };
        }
        self.cycle = self.cycle.wrapping_add(1);
    }
}

impl FrameProducer for RandomFill {
    async fn produce(&mut self, target: &mut FrameBuffer) -> bool {
        self.fill(target);
        true
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
