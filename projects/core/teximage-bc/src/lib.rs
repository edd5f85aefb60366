#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

mod error;
mod palette;
pub mod util;

#[cfg(test)]
pub(crate) mod test_prelude;

pub use error::BlockDecodeError;

use derive_enum_all_values::AllValues;
use teximage_common::decoded_4x4_block::Decoded4x4Block;

/// Block compressed formats that can be decoded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues)]
pub enum BlockFormat {
    /// BC1 (DXT1): RGB565 endpoints with 2-bit indices, optional 1-bit alpha. 8 bytes per block.
    Bc1,
    /// BC2 (DXT3): explicit 4-bit alpha followed by a BC1 colour block. 16 bytes per block.
    Bc2,
    /// BC3 (DXT5): interpolated 8-bit alpha followed by a BC1 colour block. 16 bytes per block.
    Bc3,
}

impl BlockFormat {
    /// Number of bytes in one encoded 4x4 block.
    #[inline]
    pub const fn block_size(self) -> usize {
        match self {
            BlockFormat::Bc1 => 8,
            BlockFormat::Bc2 | BlockFormat::Bc3 => 16,
        }
    }

    /// Number of bytes needed to hold a `width x height` image in this format.
    ///
    /// Partial blocks at the right and bottom edges still occupy a whole block.
    #[inline]
    pub const fn data_size(self, width: u32, height: u32) -> usize {
        blocks_wide(width) * blocks_high(height) * self.block_size()
    }
}

/// Palette evaluation strategy used when expanding colour endpoints.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, AllValues)]
pub enum Decoder {
    /// Exact integer interpolation from the DirectX documentation.
    #[default]
    Reference,
    /// Fixed point interpolation matching NVIDIA G80 (GeForce 8 series) hardware.
    Nv5x,
}

/// Number of 4x4 blocks needed to cover `width` pixels.
#[inline]
pub const fn blocks_wide(width: u32) -> usize {
    width.div_ceil(4) as usize
}

/// Number of 4x4 blocks needed to cover `height` pixels.
#[inline]
pub const fn blocks_high(height: u32) -> usize {
    height.div_ceil(4) as usize
}

/// Decodes a single block.
///
/// # Returns
///
/// The decoded block, else [`None`] if `src` is shorter than [`BlockFormat::block_size`].
#[inline]
pub fn decode_block(format: BlockFormat, decoder: Decoder, src: &[u8]) -> Option<Decoded4x4Block> {
    match format {
        BlockFormat::Bc1 => util::decode_bc1_block_from_slice(src, decoder),
        BlockFormat::Bc2 => util::decode_bc2_block_from_slice(src, decoder),
        BlockFormat::Bc3 => util::decode_bc3_block_from_slice(src, decoder),
    }
}

/// Decodes every block of a `width x height` image stored as sequential blocks in
/// row-major block order, handing each decoded tile to `tile` along with its block
/// coordinates.
///
/// The whole input is length checked before the first block is decoded, so a short
/// buffer results in an error and no calls to `tile`.
///
/// # Example
///
/// ```
/// use teximage_bc::{decode_blocks, BlockFormat, Decoder};
///
/// let data = [0u8; 8 * 4]; // 2x2 blocks of BC1
/// let mut tiles = 0;
/// decode_blocks(BlockFormat::Bc1, Decoder::Reference, 8, 8, &data, |_, _, _| tiles += 1).unwrap();
/// assert_eq!(tiles, 4);
/// ```
pub fn decode_blocks<F>(
    format: BlockFormat,
    decoder: Decoder,
    width: u32,
    height: u32,
    src: &[u8],
    mut tile: F,
) -> Result<(), BlockDecodeError>
where
    F: FnMut(usize, usize, &Decoded4x4Block),
{
    let required = format.data_size(width, height);
    if src.len() < required {
        return Err(BlockDecodeError::InputTooShort {
            required,
            actual: src.len(),
        });
    }

    let block_size = format.block_size();
    let bw = blocks_wide(width);
    let blocks = src[..required].chunks_exact(block_size);

    for (i, block) in blocks.enumerate() {
        // Length was checked up front, every chunk is a whole block.
        if let Some(decoded) = decode_block(format, decoder, block) {
            tile(i % bw, i / bw, &decoded);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[rstest]
    #[case(BlockFormat::Bc1, 4, 4, 8)]
    #[case(BlockFormat::Bc1, 5, 5, 32)]
    #[case(BlockFormat::Bc2, 8, 4, 32)]
    #[case(BlockFormat::Bc3, 1, 1, 16)]
    #[case(BlockFormat::Bc3, 0, 4, 0)]
    fn data_size_rounds_up_partial_blocks(
        #[case] format: BlockFormat,
        #[case] width: u32,
        #[case] height: u32,
        #[case] expected: usize,
    ) {
        assert_eq!(format.data_size(width, height), expected);
    }

    #[test]
    fn decode_block_rejects_short_input() {
        for format in BlockFormat::all_values() {
            for decoder in Decoder::all_values() {
                let src = vec![0u8; format.block_size() - 1];
                assert!(decode_block(*format, *decoder, &src).is_none());
            }
        }
    }

    #[test]
    fn decode_blocks_rejects_short_input_without_decoding() {
        let data = [0u8; 24];
        let mut calls = 0;
        let result = decode_blocks(BlockFormat::Bc1, Decoder::Reference, 8, 8, &data, |_, _, _| {
            calls += 1
        });

        assert_eq!(
            result,
            Err(BlockDecodeError::InputTooShort {
                required: 32,
                actual: 24
            })
        );
        assert_eq!(calls, 0);
    }

    #[test]
    fn decode_blocks_visits_blocks_in_row_major_order() {
        // 3 blocks wide (9 pixels), 2 blocks high (5 pixels)
        let mut data = vec![0u8; BlockFormat::Bc1.data_size(9, 5)];
        // Give block (2, 1) a solid white colour.
        let offset = (3 + 2) * 8;
        data[offset..offset + 4].copy_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);

        let mut visited = Vec::new();
        decode_blocks(BlockFormat::Bc1, Decoder::Reference, 9, 5, &data, |x, y, block| {
            visited.push((x, y, block.pixels[0]));
        })
        .unwrap();

        assert_eq!(visited.len(), 6);
        assert_eq!((visited[1].0, visited[1].1), (1, 0));
        assert_eq!((visited[3].0, visited[3].1), (0, 1));
        assert_eq!(visited[5], (2, 1, Color8888::new(255, 255, 255, 255)));
    }
}
