//! Errors raised when decoding whole block compressed images.

use thiserror::Error;

/// Errors from [`decode_blocks`](crate::decode_blocks).
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum BlockDecodeError {
    /// The block data does not cover the requested image.
    #[error("Input too short: {required} bytes required for the image, got {actual}")]
    InputTooShort {
        /// Bytes needed for every block of the image.
        required: usize,
        /// Bytes supplied.
        actual: usize,
    },
}
