//! Pixel format and frame storage.
//!
//! A frame is a fixed run of [`FRAME_PIXELS`] RGBW pixels: 7 groups of 64
//! LEDs chained into one strip per panel. The same memory is read three
//! ways — as [`Rgbw`] pixels by the painters, as raw bytes by the serial
//! ingestion link, and as 32-bit transfer words by the scan-out engine —
//! so the layout is pinned down here once and the views are free.

mod buffer;
mod pixel;

pub use buffer::FrameBuffer;
pub use pixel::Rgbw;

/// LEDs per power group on a panel.
pub const GROUP_LEDS: usize = 64;

/// Power groups chained per panel.
pub const FRAME_GROUPS: usize = 7;

/// Pixels in one frame (one full panel).
pub const FRAME_PIXELS: usize = GROUP_LEDS * FRAME_GROUPS;

/// Bytes per pixel on the wire and in memory.
pub const BYTES_PER_PIXEL: usize = 4;

/// Raw size of one frame in bytes.
pub const FRAME_BYTES: usize = FRAME_PIXELS * BYTES_PER_PIXEL;

/// Bits shifted out per pixel during scan-out.
pub const BITS_PER_PIXEL: usize = 32;
