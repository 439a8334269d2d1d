//! Double-buffered free-running scan-out for the visor panels, using Embassy.
//!
//! This crate provides the moving parts between a frame producer and the
//! wire: [`FrameExchange`], which hands `&'static mut` frame buffers back
//! and forth over single-slot channels, [`TransferEngine`], the
//! free-running loop that streams the front buffer through a
//! [`FrameSink`] and re-checks for a newer frame at every fire point, and
//! [`SerialIngest`], the blocking frame receiver for an upstream
//! controller.
//!
//! # Quick Start
//!
//! ```ignore
//! use visor_refresh::{FrameExchange, TransferEngine};
//!
//! static EXCHANGE: FrameExchange = FrameExchange::new();
//!
//! // In your Embassy main:
//! let [front, spare] = FRAMES.init([FrameBuffer::new(), FrameBuffer::new()]);
//! EXCHANGE.seed(spare);
//! spawner.spawn(panel_task(TransferEngine::new(sink, &EXCHANGE, front))).unwrap();
//!
//! // Thin task wrapper (Embassy tasks cannot be generic):
//! #[embassy_executor::task]
//! async fn panel_task(engine: TransferEngine<MySink>) {
//!     engine.run().await
//! }
//!
//! // Producer side, anywhere:
//! EXCHANGE.publish_from(&mut painter).await;
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging via `defmt`.

#![no_std]

pub mod engine;
pub mod exchange;
pub mod ingest;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use engine::{EngineState, FrameSink, TransferEngine, SETTLE_DELAY};
pub use exchange::{FrameExchange, FrameHandle};
pub use ingest::{SerialIngest, LINK_FILLER};
