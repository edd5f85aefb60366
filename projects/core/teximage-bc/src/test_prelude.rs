//! Common test imports and utilities for block decoder tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.
#![allow(unused_imports)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use alloc::{vec, vec::Vec};

pub use rstest::rstest;

pub use crate::{
    decode_block, decode_blocks, BlockDecodeError, BlockFormat, Decoder,
};
pub use teximage_common::{
    color_565::Color565, color_8888::Color8888, decoded_4x4_block::Decoded4x4Block,
};

/// Builds the 8 byte colour half of a block from two endpoints and 16 2-bit indices,
/// the first index belonging to the top-left pixel.
pub fn color_block(c0: u16, c1: u16, indices: [u8; 16]) -> [u8; 8] {
    let mut packed = 0u32;
    for (i, index) in indices.iter().enumerate() {
        packed |= ((*index & 0x3) as u32) << (i * 2);
    }

    let mut block = [0u8; 8];
    block[0..2].copy_from_slice(&c0.to_le_bytes());
    block[2..4].copy_from_slice(&c1.to_le_bytes());
    block[4..8].copy_from_slice(&packed.to_le_bytes());
    block
}
