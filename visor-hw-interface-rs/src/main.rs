//! visor-hw-interface
//!
//! Firmware for the dual-panel SK6812 visor on the Raspberry Pi Pico 2.
//! Two free-running refresh engines scan the left and right panels out
//! of PIO0 while painters hand them freshly filled frames through
//! per-panel exchanges:
//!
//! 1. At boot each panel is primed with a single random fill.
//! 2. A sparkle wheel animates both panels for a short startup window.
//! 3. The firmware then ingests frame pairs from the SPI link forever,
//!    left panel first, holding the last good frame whenever the
//!    upstream stalls.
//!
//! The engines never block on the painters: a publication that misses a
//! fire point is simply picked up at the next one.

#![no_std]
#![no_main]

mod spi_link;
mod ws2812;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{PIO0, TRNG};
use embassy_rp::pio::{self, Pio};
use embassy_rp::trng::{self, Trng};
use embassy_time::{Duration, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use visor::frames::FrameBuffer;
use visor::paint::{RandomFill, SparkleWheel};
use visor_refresh::{FrameExchange, SerialIngest, TransferEngine};

use crate::spi_link::SpiSlaveLink;
use crate::ws2812::{Ws2812Output, Ws2812Program};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
    TRNG_IRQ => trng::InterruptHandler<TRNG>;
});

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Backing storage for each panel's pair of frame buffers. One buffer
/// is always on the engine side, the other cycles through the exchange.
static LEFT_FRAMES: StaticCell<[FrameBuffer; 2]> = StaticCell::new();
static RIGHT_FRAMES: StaticCell<[FrameBuffer; 2]> = StaticCell::new();

/// Handoff channels between the painters and the panel engines.
static LEFT_EXCHANGE: FrameExchange = FrameExchange::new();
static RIGHT_EXCHANGE: FrameExchange = FrameExchange::new();

// ---------------------------------------------------------------------------
// Startup animation parameters
// ---------------------------------------------------------------------------

/// Published rainbow frames per panel before the link takes over.
const WHEEL_TICKS: u32 = 60;

/// Minimum spacing between rainbow publications. With the exchange
/// applying backpressure the effective tick tracks the scan-out period.
const WHEEL_TICK: Duration = Duration::from_millis(8);

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

// Thin wrappers that monomorphise the generic engine so it can be
// spawned as a concrete Embassy task, one per panel.

#[embassy_executor::task]
async fn left_panel_task(engine: TransferEngine<Ws2812Output<'static, PIO0, 0>>) {
    engine.run().await
}

#[embassy_executor::task]
async fn right_panel_task(engine: TransferEngine<Ws2812Output<'static, PIO0, 1>>) {
    engine.run().await
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("visor-hw-interface starting");

    // Pin assignments:
    //   LED_LEFT  -> GP10  (PIO0 SM0, DMA_CH0)
    //   LED_RIGHT -> GP11  (PIO0 SM1, DMA_CH1)
    //   SPI0      -> GP16 RX, GP17 CSn, GP18 SCK, GP19 TX
    //   STATUS    -> GP25  (onboard LED)

    // Seed the painters from the hardware entropy source.
    let mut trng = Trng::new(p.TRNG, Irqs, trng::Config::default());
    let mut word = [0u8; 4];
    trng.blocking_fill_bytes(&mut word);
    let left_seed = u32::from_le_bytes(word);
    trng.blocking_fill_bytes(&mut word);
    let right_seed = u32::from_le_bytes(word);

    // One shared program, one state machine and DMA channel per panel.
    let Pio {
        mut common,
        sm0,
        sm1,
        ..
    } = Pio::new(p.PIO0, Irqs);
    let program = Ws2812Program::new(&mut common);
    let left_sink = Ws2812Output::new(&mut common, sm0, p.DMA_CH0, p.PIN_10, &program);
    let right_sink = Ws2812Output::new(&mut common, sm1, p.DMA_CH1, p.PIN_11, &program);

    // Each panel gets a front buffer owned by its engine and a spare
    // seeded into the exchange for the painters to draw on.
    let [left_front, left_spare] = LEFT_FRAMES.init([FrameBuffer::new(), FrameBuffer::new()]);
    let [right_front, right_spare] = RIGHT_FRAMES.init([FrameBuffer::new(), FrameBuffer::new()]);
    LEFT_EXCHANGE.seed(left_spare);
    RIGHT_EXCHANGE.seed(right_spare);

    // Prime both panels through the ordinary publish path, sharing one
    // painter so the panels come up on different colour channels.
    let mut primer = RandomFill::new(left_seed);
    LEFT_EXCHANGE.publish_from(&mut primer).await;
    RIGHT_EXCHANGE.publish_from(&mut primer).await;

    spawner
        .spawn(left_panel_task(TransferEngine::new(
            left_sink,
            &LEFT_EXCHANGE,
            left_front,
        )))
        .unwrap();
    spawner
        .spawn(right_panel_task(TransferEngine::new(
            right_sink,
            &RIGHT_EXCHANGE,
            right_front,
        )))
        .unwrap();
    info!("panel engines running");

    // Startup rainbow. The wheels tick in lockstep so both panels show
    // the same hue pattern with independent sparkle.
    let mut left_wheel = SparkleWheel::new(left_seed);
    let mut right_wheel = SparkleWheel::new(right_seed);
    for _ in 0..WHEEL_TICKS {
        LEFT_EXCHANGE.publish_from(&mut left_wheel).await;
        RIGHT_EXCHANGE.publish_from(&mut right_wheel).await;
        Timer::after(WHEEL_TICK).await;
    }
    info!("startup rainbow done");

    // From here on every frame pair arrives over the link. The status
    // LED sits low while a pair is in flight and pulses high between
    // batches. A stalled upstream just leaves the engines scanning the
    // last good frames.
    let link = SpiSlaveLink::new(p.SPI0, p.PIN_16, p.PIN_17, p.PIN_18, p.PIN_19);
    let mut ingest = SerialIngest::new(link);
    let mut status = Output::new(p.PIN_25, Level::High);
    info!("spi link up, ingesting frame pairs");

    loop {
        debug!("waiting for the next frame pair");
        status.set_low();
        LEFT_EXCHANGE.publish_from(&mut ingest).await;
        RIGHT_EXCHANGE.publish_from(&mut ingest).await;
        status.set_high();
    }
}
