//! BC3 (DXT4/DXT5) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d10/d3d10-graphics-programming-guide-resources-block-compression#bc3>
//!
//! Uses the 'ideal' rounding/computing method described in the DX9 docs for the alpha
//! palette, regardless of the chosen [`Decoder`].

use super::bc1_decode::decode_color_section;
use crate::Decoder;
use teximage_common::decoded_4x4_block::Decoded4x4Block;

/// Evaluates the 8-entry alpha palette of a BC3 block.
#[inline]
fn alpha_palette(alpha0: u8, alpha1: u8) -> [u8; 8] {
    let a0 = alpha0 as u32;
    let a1 = alpha1 as u32;

    let mut dict = [0u8; 8];
    dict[0] = alpha0;
    dict[1] = alpha1;

    if alpha0 > alpha1 {
        // 8-alpha block: 6 interpolated values
        for i in 1..7u32 {
            dict[i as usize + 1] = (((7 - i) * a0 + i * a1) / 7) as u8;
        }
    } else {
        // 6-alpha block: 4 interpolated values plus fully transparent and opaque
        for i in 1..5u32 {
            dict[i as usize + 1] = (((5 - i) * a0 + i * a1) / 5) as u8;
        }
        dict[6] = 0;
        dict[7] = 255;
    }

    dict
}

/// Decodes a BC3 block into a structured representation of pixels
///
/// # Example
///
/// ```
/// use teximage_bc::util::decode_bc3_block;
/// use teximage_bc::Decoder;
///
/// let mut bc3_block = [0u8; 16];
/// bc3_block[0] = 200; // alpha0, every index selects it
/// let decoded = decode_bc3_block(&bc3_block, Decoder::Reference);
/// assert!(decoded.has_identical_pixels());
/// assert_eq!(decoded.pixel(3, 3).a, 200);
/// ```
#[inline]
pub fn decode_bc3_block(src: &[u8; 16], decoder: Decoder) -> Decoded4x4Block {
    let alpha_dict = alpha_palette(src[0], src[1]);

    // 48 bits of 3-bit indices
    let mut index_bytes = [0u8; 8];
    index_bytes[..6].copy_from_slice(&src[2..8]);
    let alpha_indices = u64::from_le_bytes(index_bytes);

    let mut color = [0u8; 8];
    color.copy_from_slice(&src[8..16]);

    let mut result = decode_color_section(&color, decoder, true);
    for (i, pixel) in result.pixels.iter_mut().enumerate() {
        let alpha_index = ((alpha_indices >> (i * 3)) & 0x7) as usize;
        pixel.a = alpha_dict[alpha_index];
    }

    result
}

/// Slice wrapper around [`decode_bc3_block`].
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline]
pub fn decode_bc3_block_from_slice(src: &[u8], decoder: Decoder) -> Option<Decoded4x4Block> {
    let block: &[u8; 16] = src.get(..16)?.try_into().ok()?;
    Some(decode_bc3_block(block, decoder))
}
