//! Chat-completion stream emulator
//!
//! A session writes a fixed number of token chunks, a finish chunk and the
//! `[DONE]` sentinel to a [`FrameSink`], pausing between token chunks.

pub mod frame;
pub mod session;
pub mod sink;

pub use frame::{ChatChunk, DONE_FRAME, MODEL_NAME, VOCABULARY};
pub use session::{EmitOutcome, StreamRequest, StreamSession};
pub use sink::{ChannelSink, FrameSink};
