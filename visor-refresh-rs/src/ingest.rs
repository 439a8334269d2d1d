//! Serial frame ingestion.
//!
//! Upstream frames arrive as exactly [`FRAME_BYTES`] raw bytes per
//! frame, already in the pixel memory order (`w, b, r, g` per pixel), no
//! header, no checksum, no resync. The receive is logically blocking:
//! [`SerialIngest`] suspends until the link has delivered a whole frame,
//! however long that takes, and the engines keep scanning the last
//! published frames meanwhile.
//!
//! [`FRAME_BYTES`]: visor::frames::FRAME_BYTES

use embedded_io_async::{Read, ReadExactError};

use visor::frames::FrameBuffer;
use visor::FrameProducer;

/// Byte the full-duplex link clocks back to the controller while
/// receiving.
pub const LINK_FILLER: u8 = 0x33;

/// Frame producer that reads whole frames from an async byte link.
pub struct SerialIngest<R> {
    link: R,
}

impl<R: Read> SerialIngest<R> {
    /// Wrap a byte link.
    pub const fn new(link: R) -> Self {
        Self { link }
    }

    /// Receive one complete frame into `target`.
    ///
    /// Reads exactly [`FRAME_BYTES`] bytes straight into the buffer's
    /// byte view. There is no timeout; the call suspends until the
    /// controller has sent a whole frame.
    ///
    /// # Errors
    ///
    /// Propagates the link's own error, or
    /// [`ReadExactError::UnexpectedEof`] if the link ends mid-frame. In
    /// both cases `target` may be partially overwritten.
    pub async fn receive_into(
        &mut self,
        target: &mut FrameBuffer,
    ) -> Result<(), ReadExactError<R::Error>> {
        self.link.read_exact(target.bytes_mut()).await
    }
}

impl<R: Read> FrameProducer for SerialIngest<R> {
    /// Receive one frame; on a link error the target is incomplete and
    /// the verdict is `false`, so the stale frame stays on the wire.
    async fn produce(&mut self, target: &mut FrameBuffer) -> bool {
        match self.receive_into(target).await {
            Ok(()) => true,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("frame ingestion failed, holding last good frame");
                false
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    extern crate std;

    use core::convert::Infallible;
    use std::vec::Vec;

    use embassy_futures::block_on;
    use embedded_io_async::ErrorType;
    use visor::frames::{Rgbw, FRAME_BYTES};

    use super::*;

    /// Link that serves a canned byte stream in fixed-size chunks.
    struct ScriptedLink {
        data: Vec<u8>,
        pos: usize,
        chunk: usize,
    }

    impl ScriptedLink {
        fn new(data: Vec<u8>, chunk: usize) -> Self {
            Self { data, pos: 0, chunk }
        }
    }

    impl ErrorType for ScriptedLink {
        type Error = Infallible;
    }

    impl Read for ScriptedLink {
        async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
            let remaining = self.data.len() - self.pos;
            let n = remaining.min(self.chunk).min(buf.len());
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    /// One frame of ramp bytes: byte i has value i mod 251.
    fn ramp_frame() -> Vec<u8> {
        (0..FRAME_BYTES).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn receives_a_full_frame_across_chunked_reads() {
        let mut ingest = SerialIngest::new(ScriptedLink::new(ramp_frame(), 16));
        let mut frame = FrameBuffer::new();

        block_on(ingest.receive_into(&mut frame)).expect("full frame");
        assert_eq!(frame.as_bytes(), ramp_frame().as_slice());
    }

    #[test]
    fn received_bytes_land_as_pixels_in_link_order() {
        let mut data = std::vec![0u8; FRAME_BYTES];
        // Pixel 5: w=9, b=8, r=7, g=6.
        data[20..24].copy_from_slice(&[9, 8, 7, 6]);
        let mut ingest = SerialIngest::new(ScriptedLink::new(data, 64));
        let mut frame = FrameBuffer::new();

        assert!(block_on(ingest.produce(&mut frame)));
        assert_eq!(frame.pixels()[5], Rgbw { w: 9, b: 8, r: 7, g: 6 });
        assert_eq!(frame.words()[5], Rgbw { w: 9, b: 8, r: 7, g: 6 }.word());
    }

    #[test]
    fn short_link_fails_the_produce_verdict() {
        let mut ingest = SerialIngest::new(ScriptedLink::new(ramp_frame()[..100].to_vec(), 16));
        let mut frame = FrameBuffer::new();

        assert!(!block_on(ingest.produce(&mut frame)));
    }

    #[test]
    fn short_link_reports_unexpected_eof() {
        let mut ingest = SerialIngest::new(ScriptedLink::new(std::vec![0xAB; 10], 4));
        let mut frame = FrameBuffer::new();

        let err = block_on(ingest.receive_into(&mut frame));
        assert!(matches!(err, Err(ReadExactError::UnexpectedEof)));
    }

    #[test]
    fn consecutive_frames_come_from_one_stream() {
        let mut stream = ramp_frame();
        let mut second: Vec<u8> = ramp_frame().iter().map(|b| b.wrapping_add(1)).collect();
        stream.append(&mut second);

        let mut ingest = SerialIngest::new(ScriptedLink::new(stream, 256));
        let mut a = FrameBuffer::new();
        let mut b = FrameBuffer::new();

        assert!(block_on(ingest.produce(&mut a)));
        assert!(block_on(ingest.produce(&mut b)));
        assert_eq!(a.as_bytes()[0], 0);
        assert_eq!(b.as_bytes()[0], 1);
        assert_ne!(a, b);
    }

    #[test]
    fn filler_byte_is_the_alternating_bit_pattern() {
        assert_eq!(LINK_FILLER, 0b0011_0011);
    }
}
