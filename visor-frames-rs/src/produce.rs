//! Frame producer contract.

use crate::frames::FrameBuffer;

/// A source of complete frames.
///
/// A producer fills the caller-supplied back buffer with one whole frame
/// per call; it never sees the buffer currently being scanned out. The
/// painters in [`paint`](crate::paint) produce synchronously, the serial
/// ingestion link suspends until a frame has arrived.
///
/// Returning `false` means the target was left incomplete (for example a
/// link error mid-frame) and must not be published.
#[allow(async_fn_in_trait)]
pub trait FrameProducer {
    /// Fill `target` with the next frame.
    async fn produce(&mut self, target: &mut FrameBuffer) -> bool;
}
