//! Per-format block decoders.
//!
//! Each decoder has an array based entry point and a `_from_slice` wrapper that
//! returns [`None`] when the input is shorter than one block.

mod bc1_decode;
mod bc2_decode;
mod bc3_decode;

pub use bc1_decode::*;
pub use bc2_decode::*;
pub use bc3_decode::*;
