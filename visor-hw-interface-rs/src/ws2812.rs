//! SK6812 serial output on PIO.
//!
//! One PIO block drives both panels: a single copy of the bit-banging
//! program sits in instruction memory and two state machines execute it
//! on their own data pins. Every FIFO word is one whole pixel, shifted
//! out MSB-first so the colour bytes leave the wire in `g, r, b, w`
//! order at the 800 kHz link rate.

use embassy_rp::clocks;
use embassy_rp::dma::{AnyChannel, Channel};
use embassy_rp::pio::{
    Common, Config, FifoJoin, Instance, LoadedProgram, PioPin, ShiftConfig, ShiftDirection,
    StateMachine,
};
use embassy_rp::{into_ref, Peripheral, PeripheralRef};
use fixed::types::U24F8;

use visor::frames::{FrameBuffer, BITS_PER_PIXEL};
use visor_refresh::FrameSink;

/// Bit clock on the data line, in kHz.
const LINK_RATE_KHZ: u32 = 800;

// Cycle counts for the three segments of one bit period.
const T1: u8 = 2; // start bit
const T2: u8 = 5; // data bit
const T3: u8 = 3; // stop bit
const CYCLES_PER_BIT: u32 = (T1 + T2 + T3) as u32;

/// The assembled bit-banging program, loaded once and shared by both
/// panel state machines.
pub struct Ws2812Program<'d, P: Instance> {
    prg: LoadedProgram<'d, P>,
}

impl<'d, P: Instance> Ws2812Program<'d, P> {
    pub fn new(common: &mut Common<'d, P>) -> Self {
        let side_set = pio::SideSet::new(false, 1, false);
        let mut a: pio::Assembler<32> = pio::Assembler::new_with_side_set(side_set);

        let mut wrap_target = a.label();
        let mut wrap_source = a.label();
        let mut do_zero = a.label();
        a.set_with_side_set(pio::SetDestination::PINDIRS, 1, 0);
        a.bind(&mut wrap_target);
        // Stop bit
        a.out_with_delay_and_side_set(pio::OutDestination::X, 1, T3 - 1, 0);
        // Start bit
        a.jmp_with_delay_and_side_set(pio::JmpCondition::XIsZero, &mut do_zero, T1 - 1, 1);
        // Data bit one
        a.jmp_with_delay_and_side_set(pio::JmpCondition::Always, &mut wrap_target, T2 - 1, 1);
        a.bind(&mut do_zero);
        // Data bit zero
        a.nop_with_delay_and_side_set(T2 - 1, 0);
        a.bind(&mut wrap_source);

        let prg = a.assemble_with_wrap(wrap_source, wrap_target);
        Self {
            prg: common.load_program(&prg),
        }
    }
}

/// One panel's data output: a state machine bound to its pin plus the
/// DMA channel that feeds the FIFO.
pub struct Ws2812Output<'d, P: Instance, const S: usize> {
    dma: PeripheralRef<'d, AnyChannel>,
    sm: StateMachine<'d, P, S>,
}

impl<'d, P: Instance, const S: usize> Ws2812Output<'d, P, S> {
    pub fn new(
        common: &mut Common<'d, P>,
        mut sm: StateMachine<'d, P, S>,
        dma: impl Peripheral<P = impl Channel> + 'd,
        pin: impl PioPin,
        program: &Ws2812Program<'d, P>,
    ) -> Self {
        into_ref!(dma);

        let out_pin = common.make_pio_pin(pin);
        let mut cfg = Config::default();
        cfg.set_out_pins(&[&out_pin]);
        cfg.set_set_pins(&[&out_pin]);
        cfg.use_program(&program.prg, &[&out_pin]);

        // Clock divider worked out in kHz so the fixed-point maths
        // cannot overflow.
        let clock_freq = U24F8::from_num(clocks::clk_sys_freq() / 1000);
        let bit_freq = U24F8::from_num(LINK_RATE_KHZ) * CYCLES_PER_BIT;
        cfg.clock_divider = clock_freq / bit_freq;

        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: BITS_PER_PIXEL as u8,
            direction: ShiftDirection::Left,
        };

        sm.set_config(&cfg);
        sm.set_enable(true);

        Self {
            dma: dma.map_into(),
            sm,
        }
    }
}

impl<'d, P: Instance, const S: usize> FrameSink for Ws2812Output<'d, P, S> {
    /// Push the whole frame into the FIFO, one word per pixel. Resolves
    /// once DMA has delivered the last word.
    async fn stream(&mut self, frame: &FrameBuffer) {
        self.sm.tx().dma_push(self.dma.reborrow(), frame.words()).await;
    }
}
