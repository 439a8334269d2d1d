//! Frame model and painters for a pair of SK6812 RGBW LED panels.
//!
//! This crate holds everything about frames that does not need an
//! executor or a peripheral: the pixel format, the fixed-size
//! [`FrameBuffer`](frames::FrameBuffer), the noise and colour-wheel
//! painters, and the [`FrameProducer`] contract that the scan-out side
//! consumes.
//!
//! # Architecture
//!
//! - **[`frames`]** — `Rgbw` pixel and `FrameBuffer` storage, with byte,
//!   pixel and transfer-word views over the same memory.
//! - **[`paint`]** — frame painters: [`RandomFill`](paint::RandomFill)
//!   noise and the [`SparkleWheel`](paint::SparkleWheel) animation.
//! - **[`produce`]** — the [`FrameProducer`] trait implemented by the
//!   painters here and by the serial ingestion link elsewhere.
//! - **[`rng`]** — a small deterministic PRNG the painters draw from.
//!
//! # Quick start
//!
//! ```
//! use visor::frames::FrameBuffer;
//! use visor::paint::RandomFill;
//!
//! let mut frame = FrameBuffer::new();
//! let mut painter = RandomFill::new(0x1234_5678);
//! painter.fill(&mut frame);
//!
//! // The engine streams the same memory as raw 32-bit words.
//! let words = frame.words();
//! assert_eq!(words.len(), visor::frames::FRAME_PIXELS);
//! ```
//!
//! # Crate features
//!
//! - **`defmt`** — derive `defmt::Format` on public types for embedded
//!   logging.

#![no_std]

pub mod frames;
pub mod paint;
pub mod produce;
pub mod rng;

pub use produce::FrameProducer;
