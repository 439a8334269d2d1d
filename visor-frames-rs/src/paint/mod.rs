//! Frame painters.
//!
//! Two animated painters write complete frames into a caller-supplied
//! [`FrameBuffer`](crate::frames::FrameBuffer): [`RandomFill`] paints
//! uniform single-channel noise and [`SparkleWheel`] a sparkling colour
//! wheel. Both carry their own state (cycle counter, phase, RNG) so two
//! panels can run independent instances, and both implement
//! [`FrameProducer`](crate::FrameProducer).

mod random;
mod wheel;

pub use random::RandomFill;
pub use wheel::{wheel_weights, SparkleWheel, WHEEL_PERIOD};
