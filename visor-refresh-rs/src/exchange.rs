//! Buffer ownership handoff between a producer and a transfer engine.
//!
//! Each panel owns two [`FrameBuffer`]s that shuttle between one producer
//! and one engine through a pair of single-slot channels: `ready` carries
//! published frames towards the wire, `recycle` carries spent buffers
//! back. A buffer handle is `&'static mut`, so whoever holds it has
//! exclusive access and a frame being streamed can never be written —
//! there is no shared index or flag to race on.
//!
//! Steady state: the producer checks a buffer out, fills it and publishes
//! it; the engine adopts it at the next fire point and releases its
//! previous front buffer, which becomes the producer's next checkout.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use visor::frames::FrameBuffer;
use visor::FrameProducer;

/// Exclusive handle to one frame buffer.
pub type FrameHandle = &'static mut FrameBuffer;

/// Single-producer single-consumer frame handoff for one panel.
///
/// Const-constructible so each panel's exchange can live in a `static`.
pub struct FrameExchange {
    ready: Channel<CriticalSectionRawMutex, FrameHandle, 1>,
    recycle: Channel<CriticalSectionRawMutex, FrameHandle, 1>,
}

impl FrameExchange {
    /// Create an empty exchange.
    pub const fn new() -> Self {
        Self {
            ready: Channel::new(),
            recycle: Channel::new(),
        }
    }

    /// Hand the producer side its initial spare buffer.
    ///
    /// Call exactly once per exchange, before any producer runs.
    pub fn seed(&self, frame: FrameHandle) {
        let seeded = self.recycle.try_send(frame);
        debug_assert!(seeded.is_ok(), "exchange seeded twice");
    }

    /// Take the spare buffer to draw into, waiting until the engine
    /// returns one.
    pub async fn checkout(&self) -> FrameHandle {
        self.recycle.receive().await
    }

    /// Submit a completed frame for scan-out.
    ///
    /// At most one published frame is pending; publishing faster than the
    /// engine consumes suspends the producer until the slot frees.
    pub async fn publish(&self, frame: FrameHandle) {
        self.ready.send(frame).await;
    }

    /// Return a buffer to the spare pool without publishing it: the
    /// engine's displaced front buffer, or a producer abandoning a failed
    /// fill.
    pub async fn release(&self, frame: FrameHandle) {
        self.recycle.send(frame).await;
    }

    /// Engine side: adopt the freshest published frame, if any.
    ///
    /// Non-blocking; `None` means nothing new was published and the
    /// engine keeps streaming its current frame.
    pub fn latest(&self) -> Option<FrameHandle> {
        self.ready.try_receive().ok()
    }

    /// Check out the spare buffer, run `producer` over it, then publish
    /// on success or release on failure.
    ///
    /// Returns the producer's verdict.
    pub async fn publish_from(&self, producer: &mut impl FrameProducer) -> bool {
        let target = self.checkout().await;
        if producer.produce(&mut *target).await {
            self.publish(target).await;
            true
        } else {
            self.release(target).await;
            false
        }
    }
}

impl Default for FrameExchange {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    extern crate std;

    use std::boxed::Box;

    use embassy_futures::block_on;
    use visor::frames::{FrameBuffer, Rgbw};
    use visor::paint::RandomFill;

    use super::*;

    fn leak_frame() -> FrameHandle {
        Box::leak(Box::new(FrameBuffer::new()))
    }

    /// Producer that always refuses to fill.
    struct NeverProduce;

    impl FrameProducer for NeverProduce {
        async fn produce(&mut self, _target: &mut FrameBuffer) -> bool {
            false
        }
    }

    #[test]
    fn checkout_returns_the_seeded_buffer() {
        let ex = FrameExchange::new();
        let spare = leak_frame();
        let spare_addr: *const FrameBuffer = spare;

        ex.seed(spare);
        let got = block_on(ex.checkout());
        let got_addr: *const FrameBuffer = got;
        assert_eq!(spare_addr, got_addr);
    }

    #[test]
    fn latest_is_none_until_something_is_published() {
        let ex = FrameExchange::new();
        ex.seed(leak_frame());
        assert!(ex.latest().is_none());

        let frame = block_on(ex.checkout());
        block_on(ex.publish(frame));
        assert!(ex.latest().is_some());
        assert!(ex.latest().is_none());
    }

    #[test]
    fn released_buffers_come_back_on_checkout() {
        let ex = FrameExchange::new();
        let frame = leak_frame();
        let addr: *const FrameBuffer = frame;

        block_on(ex.release(frame));
        let again = block_on(ex.checkout());
        let again_addr: *const FrameBuffer = again;
        assert_eq!(addr, again_addr);
    }

    #[test]
    fn publish_from_routes_filled_frames_to_ready() {
        let ex = FrameExchange::new();
        ex.seed(leak_frame());
        let mut painter = RandomFill::new(1);

        assert!(block_on(ex.publish_from(&mut painter)));
        let published = ex.latest().expect("frame published");
        assert!(published.pixels().iter().any(|px| *px != Rgbw::OFF));
        assert!(ex.latest().is_none());
    }

    #[test]
    fn publish_from_recycles_failed_fills() {
        let ex = FrameExchange::new();
        ex.seed(leak_frame());

        assert!(!block_on(ex.publish_from(&mut NeverProduce)));
        // Nothing published, but the spare is back for the next attempt.
        assert!(ex.latest().is_none());
        let _spare = block_on(ex.checkout());
    }

    #[test]
    fn full_producer_engine_round_trip() {
        let ex = FrameExchange::new();
        let spare = leak_frame();
        let front = leak_frame();
        let spare_addr: *const FrameBuffer = spare;
        let front_addr: *const FrameBuffer = front;
        ex.seed(spare);

        // Producer: checkout the spare, publish it.
        let target = block_on(ex.checkout());
        block_on(ex.publish(target));

        // Engine at fire time: adopt the published frame, release `front`.
        let adopted = ex.latest().expect("published frame pending");
        let adopted_addr: *const FrameBuffer = adopted;
        assert_eq!(adopted_addr, spare_addr);
        block_on(ex.release(front));

        // Producer's next checkout gets the engine's old front buffer.
        let next = block_on(ex.checkout());
        let next_addr: *const FrameBuffer = next;
        assert_eq!(next_addr, front_addr);
    }
}
