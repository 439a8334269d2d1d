//! Animated colour-wheel painter.

use core::f32::consts::TAU;

use crate::frames::{FrameBuffer, Rgbw, FRAME_PIXELS};
use crate::produce::FrameProducer;
use crate::rng::XorShift32;

/// Phase steps in one full wheel revolution.
pub const WHEEL_PERIOD: u16 = 4096;

/// One-in-N odds of a pixel passing the sparkle gate.
const SPARKLE_ODDS: u32 = 12;

/// Sparkling rainbow painter.
///
/// Every pixel gets an angle from its position along the strip plus the
/// wheel phase, and a sinusoidal RGB colour with the three channels
/// offset by thirds of the circle, scaled to a 0–63 level. A random gate
/// keeps only about one pixel in twelve lit per frame, the rest stay
/// dark. The phase advances once per painted frame and wraps at
/// [`WHEEL_PERIOD`].
///
/// With the gate disabled ([`with_sparkle`](Self::with_sparkle)) the
/// painter is a pure function of its phase, which is what the periodicity
/// tests pin down.
pub struct SparkleWheel {
    phase: u16,
    rng: XorShift32,
    sparkle: bool,
}

impl SparkleWheel {
    /// Create a painter at phase 0 with the sparkle gate enabled.
    pub const fn new(seed: u32) -> Self {
        Self {
            phase: 0,
            rng: XorShift32::new(seed),
            sparkle: true,
        }
    }

    /// Enable or disable the sparkle gate.
    pub const fn with_sparkle(mut self, sparkle: bool) -> Self {
        self.sparkle = sparkle;
        self
    }

    /// Current wheel phase, `0..WHEEL_PERIOD`.
    pub fn phase(&self) -> u16 {
        self.phase
    }

    /// Paint one frame of the wheel into `frame` and advance the phase.
    pub fn fill(&mut self, frame: &mut FrameBuffer) {
        for (i, px) in frame.pixels_mut().iter_mut().enumerate() {
            *px = Rgbw::OFF;
            if self.sparkle && self.rng.next_below(SPARKLE_ODDS) != 0 {
                continue;
            }

            let angle = (i as f32 / FRAME_PIXELS as f32) * TAU + f32::from(self.phase) / 3.0;
            px.r = sine_level(angle);
            px.g = sine_level(angle + 0.33 * TAU);
            px.b = sine_level(angle + 0.67 * TAU);
        }
        self.phase = (self.phase + 1) % WHEEL_PERIOD;
    }
}

impl FrameProducer for SparkleWheel {
    async fn produce(&mut self, target: &mut FrameBuffer) -> bool {
        self.fill(target);
        true
    }
}

/// Map an angle to a 0–63 channel level: `(255 · (sin + 1) / 2) / 4`.
fn sine_level(angle: f32) -> u8 {
    (255.0 * (libm::sinf(angle) + 1.0) / 2.0) as u8 / 4
}

/// Classic three-segment colour wheel over the [`WHEEL_PERIOD`] domain.
///
/// Returns `[red, green, blue]` weights. Within each segment exactly two
/// components are active, one ramping up while the other ramps down, so
/// the weights always sum to 4095. Segment breakpoints sit at 1365 and
/// 2731; phases at or past [`WHEEL_PERIOD`] fold back into the domain.
pub fn wheel_weights(phase: u16) -> [u16; 3] {
    let p = phase % WHEEL_PERIOD;
    if p < 1365 {
        [3 * p, 4095 - 3 * p, 0]
    } else if p < 2731 {
        let p = p - 1365;
        [4095 - 3 * p, 0, 3 * p]
    } else {
        let p = p - 2731;
        [0, 3 * p, 4095 - 3 * p]
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
