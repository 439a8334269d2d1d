//! Fixed-size frame storage.

use bytemuck::{Pod, Zeroable};

use super::{Rgbw, FRAME_PIXELS};

/// One complete frame of [`FRAME_PIXELS`] RGBW pixels.
///
/// Backed by the `[u32; 448]` transfer words the engine streams, so the
/// scan-out view is the storage itself and the whole buffer is 4-byte
/// aligned for DMA. The pixel and byte views are bytemuck casts over the
/// same memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
pub struct FrameBuffer {
    words: [u32; FRAME_PIXELS],
}

impl FrameBuffer {
    /// A frame with every pixel off.
    pub const fn new() -> Self {
        Self { words: [0; FRAME_PIXELS] }
    }

    /// Pixel view.
    pub fn pixels(&self) -> &[Rgbw; FRAME_PIXELS] {
        bytemuck::cast_ref(&self.words)
    }

    /// Mutable pixel view for painters.
    pub fn pixels_mut(&mut self) -> &mut [Rgbw; FRAME_PIXELS] {
        bytemuck::cast_mut(&mut self.words)
    }

    /// Scan-out view: one 32-bit word per pixel, green byte first when
    /// shifted out MSB-first.
    pub fn words(&self) -> &[u32; FRAME_PIXELS] {
        &self.words
    }

    /// Raw byte view.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.words)
    }

    /// Mutable raw byte view; the serial link receives straight into this.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::bytes_of_mut(&mut self.words)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::FRAME_BYTES;

    #[test]
    fn new_frame_is_dark() {
        let frame = FrameBuffer::new();
        assert!(frame.pixels().iter().all(|px| *px == Rgbw::OFF));
        assert!(frame.words().iter().all(|w| *w == 0));
    }

    #[test]
    fn views_share_one_storage() {
        let mut frame = FrameBuffer::new();
        frame.pixels_mut()[3] = Rgbw::new(0x10, 0x20, 0x30, 0x40);

        assert_eq!(frame.words()[3], frame.pixels()[3].word());
        assert_eq!(&frame.as_bytes()[12..16], &[0x40, 0x30, 0x10, 0x20]);
    }

    #[test]
    fn byte_view_covers_the_whole_frame() {
        let mut frame = FrameBuffer::new();
        assert_eq!(frame.as_bytes().len(), FRAME_BYTES);
        assert_eq!(frame.bytes_mut().len(), FRAME_BYTES);
    }

    #[test]
    fn bytes_written_land_in_link_field_order() {
        let mut frame = FrameBuffer::new();
        let bytes = frame.bytes_mut();
        bytes[0] = 1; // w
        bytes[1] = 2; // b
        bytes[2] = 3; // r
        bytes[3] = 4; // g

        let px = frame.pixels()[0];
        assert_eq!(px, Rgbw { w: 1, b: 2, r: 3, g: 4 });
    }

    #[test]
    fn frames_compare_whole() {
        let mut a = FrameBuffer::new();
        let b = FrameBuffer::new();
        assert_eq!(a, b);

        a.pixels_mut()[FRAME_PIXELS - 1].g = 1;
        assert_ne!(a, b);
    }
}
