//! Single RGBW pixel.

use bytemuck::{Pod, Zeroable};

/// One SK6812 RGBW pixel, stored in the byte order the serial link
/// delivers: white, blue, red, green.
///
/// The field order is load-bearing: on a little-endian target the four
/// bytes reinterpret directly as the 32-bit transfer word (green in the
/// high byte), so a received frame needs no per-pixel repacking before
/// scan-out. [`Rgbw::word`] documents and tests that relationship.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgbw {
    /// White channel. Carried in the format; the built-in painters leave
    /// it at 0.
    pub w: u8,
    /// Blue channel.
    pub b: u8,
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
}

impl Rgbw {
    /// All channels off.
    pub const OFF: Rgbw = Rgbw { w: 0, b: 0, r: 0, g: 0 };

    /// Construct from channel values in conventional r/g/b/w order.
    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { w, b, r, g }
    }

    /// Pack into the 32-bit transfer word: `g << 24 | r << 16 | b << 8 | w`.
    ///
    /// Shifted out MSB-first this yields the GRBW wire order the strip
    /// expects. Equal to `u32::from_le_bytes([w, b, r, g])`, i.e. to
    /// reinterpreting the pixel's own bytes on a little-endian target.
    pub const fn word(self) -> u32 {
        (self.g as u32) << 24 | (self.r as u32) << 16 | (self.b as u32) << 8 | self.w as u32
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
