//! SPI peripheral-mode frame link.
//!
//! The upstream host clocks raw frames into SPI0 with this device as
//! the bus peripheral, mode 3, MSB first, byte-sized words. The HAL
//! only drives the PL022 as a controller, so this driver programs the
//! registers directly and services both FIFOs from a polling loop that
//! yields to the executor whenever neither side can make progress.

use core::convert::Infallible;

use embassy_futures::yield_now;
use embassy_rp::pac;
use embassy_rp::peripherals::{PIN_16, PIN_17, PIN_18, PIN_19, SPI0};
use embassy_rp::{into_ref, Peripheral, PeripheralRef};
use embedded_io_async::{ErrorType, Read};

use visor_refresh::LINK_FILLER;

// PL022 FIFOs are eight frames deep in either direction.
const FIFO_DEPTH: usize = 8;

/// SPI0 in peripheral mode on GP16 (RX), GP17 (CSn), GP18 (SCK) and
/// GP19 (TX).
pub struct SpiSlaveLink<'d> {
    _bus: PeripheralRef<'d, SPI0>,
    _rx: PeripheralRef<'d, PIN_16>,
    _csn: PeripheralRef<'d, PIN_17>,
    _sck: PeripheralRef<'d, PIN_18>,
    _tx: PeripheralRef<'d, PIN_19>,
}

impl<'d> SpiSlaveLink<'d> {
    /// Claim SPI0 and its pins and switch the block to peripheral mode.
    ///
    /// The host drives the bit rate; the prescaler here only has to
    /// leave the PL022 with a valid internal clock.
    pub fn new(
        bus: impl Peripheral<P = SPI0> + 'd,
        rx: impl Peripheral<P = PIN_16> + 'd,
        csn: impl Peripheral<P = PIN_17> + 'd,
        sck: impl Peripheral<P = PIN_18> + 'd,
        tx: impl Peripheral<P = PIN_19> + 'd,
    ) -> Self {
        into_ref!(bus, rx, csn, sck, tx);

        let spi = pac::SPI0;
        spi.cr1().write(|w| w.set_sse(false));
        spi.cpsr().write(|w| w.set_cpsdvsr(2));
        spi.cr0().write(|w| {
            w.set_dss(0b0111); // 8-bit frames
            w.set_spo(true);
            w.set_sph(true);
        });

        // Route the pins to the SPI function with their input paths live.
        for pin in [16usize, 17, 18, 19] {
            pac::PADS_BANK0.gpio(pin).modify(|w| {
                w.set_iso(false);
                w.set_ie(true);
            });
            pac::IO_BANK0.gpio(pin).ctrl().write(|w| w.set_funcsel(1));
        }

        spi.cr1().write(|w| {
            w.set_ms(true);
            w.set_sse(true);
        });

        Self {
            _bus: bus,
            _rx: rx,
            _csn: csn,
            _sck: sck,
            _tx: tx,
        }
    }

    /// Drain `buf.len()` bytes from the receive FIFO while keeping the
    /// transmit side topped up with [`LINK_FILLER`]. The transmit FIFO
    /// is never allowed to run more than a FIFO depth ahead of the
    /// receive side.
    async fn transfer(&mut self, buf: &mut [u8]) {
        let spi = pac::SPI0;
        let mut tx_remaining = buf.len();
        let mut rx_remaining = buf.len();
        let mut filled = 0;

        while tx_remaining > 0 || rx_remaining > 0 {
            let mut progressed = false;

            if tx_remaining > 0
                && rx_remaining < tx_remaining + FIFO_DEPTH
                && spi.sr().read().tnf()
            {
                spi.dr().write(|w| w.set_data(u16::from(LINK_FILLER)));
                tx_remaining -= 1;
                progressed = true;
            }

            if rx_remaining > 0 && spi.sr().read().rne() {
                buf[filled] = spi.dr().read().data() as u8;
                filled += 1;
                rx_remaining -= 1;
                progressed = true;
            }

            if !progressed {
                yield_now().await;
            }
        }
    }
}

impl<'d> ErrorType for SpiSlaveLink<'d> {
    type Error = Infallible;
}

impl<'d> Read for SpiSlaveLink<'d> {
    /// Fills the whole buffer: a read only resolves once the host has
    /// clocked every requested byte across.
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.transfer(buf).await;
        Ok(buf.len())
    }
}
