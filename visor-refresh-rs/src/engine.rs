//! Free-running transfer engine.
//!
//! One [`TransferEngine`] per panel owns the front buffer and streams it
//! through a [`FrameSink`] over and over, with a fixed settle window
//! after every transfer so the strip latches. At each fire point the
//! engine asks the exchange for a newer published frame; if none is
//! pending it streams the same frame again (stale hold), so a stalled
//! producer degrades to a frozen image, never to a dark or torn one.
//!
//! The cycle period is the wire time plus the settle window. At 800 kHz
//! and 32 bits per pixel a 448-pixel frame takes 17.92 ms on the wire,
//! giving 18.92 ms per cycle, about 53 Hz per panel.

use core::mem;

use embassy_time::{Duration, Timer};

use visor::frames::FrameBuffer;

use crate::exchange::{FrameExchange, FrameHandle};

/// Low period after every transfer, long enough for the strip to latch.
pub const SETTLE_DELAY: Duration = Duration::from_micros(1_000);

/// Where the engine currently is in its scan-out cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineState {
    /// Created but not yet kicked; nothing has been streamed.
    Idle,
    /// A transfer is on the wire.
    Streaming,
    /// Transfer done, settle window armed; next fire pending.
    ArmedPending,
}

/// Sink that scans one frame out to the wire.
///
/// `stream` resolves when the whole frame has left the sink, because the
/// engine times its settle window from that point.
#[allow(async_fn_in_trait)]
pub trait FrameSink {
    async fn stream(&mut self, frame: &FrameBuffer);
}

/// Free-running scan-out loop for one panel.
pub struct TransferEngine<S: FrameSink> {
    sink: S,
    exchange: &'static FrameExchange,
    front: FrameHandle,
    settle: Duration,
    state: EngineState,
    streamed: u32,
}

impl<S: FrameSink> TransferEngine<S> {
    /// Create an idle engine whose first transfer will stream `front`.
    ///
    /// The engine stays [`EngineState::Idle`] until the first
    /// [`cycle`](Self::cycle); spawning [`run`](Self::run) is the kick.
    pub fn new(sink: S, exchange: &'static FrameExchange, front: FrameHandle) -> Self {
        Self {
            sink,
            exchange,
            front,
            settle: SETTLE_DELAY,
            state: EngineState::Idle,
            streamed: 0,
        }
    }

    /// Override the settle window.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Current position in the scan-out cycle.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Frames streamed since creation (wrapping).
    pub fn frames_streamed(&self) -> u32 {
        self.streamed
    }

    /// One transfer cycle: the fire point, the transfer, the settle.
    ///
    /// The published-frame check happens exactly once per cycle, here at
    /// the fire point; a frame published mid-transfer or mid-settle is
    /// adopted at the next fire, never sooner.
    pub async fn cycle(&mut self) {
        if let Some(fresh) = self.exchange.latest() {
            let stale = mem::replace(&mut self.front, fresh);
            self.exchange.release(stale).await;
        }

        self.state = EngineState::Streaming;
        self.sink.stream(&*self.front).await;
        self.streamed = self.streamed.wrapping_add(1);

        self.state = EngineState::ArmedPending;
        Timer::after(self.settle).await;
    }

    /// Run the free-running loop forever.
    pub async fn run(mut self) -> ! {
        loop {
            self.cycle().await;
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
