//! BC2 (DXT2/DXT3) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d10/d3d10-graphics-programming-guide-resources-block-compression#bc2>

use super::bc1_decode::decode_color_section;
use crate::Decoder;
use teximage_common::decoded_4x4_block::Decoded4x4Block;

/// Decodes a BC2 block into a structured representation of pixels
///
/// The first 8 bytes hold 4-bit alpha per pixel, the low nibble of each byte first.
/// The colour section always uses 4-colour interpolation.
///
/// # Example
///
/// ```
/// use teximage_bc::util::decode_bc2_block;
/// use teximage_bc::Decoder;
///
/// let mut bc2_block = [0u8; 16];
/// bc2_block[0] = 0xF0; // second pixel fully opaque
/// let decoded = decode_bc2_block(&bc2_block, Decoder::Reference);
/// assert_eq!(decoded.pixel(0, 0).a, 0);
/// assert_eq!(decoded.pixel(1, 0).a, 255);
/// ```
#[inline]
pub fn decode_bc2_block(src: &[u8; 16], decoder: Decoder) -> Decoded4x4Block {
    let (alpha_bytes, color_bytes) = src.split_at(8);
    let mut color = [0u8; 8];
    color.copy_from_slice(color_bytes);

    let mut result = decode_color_section(&color, decoder, true);
    for (i, pixel) in result.pixels.iter_mut().enumerate() {
        let shift_amount = (i & 0x1) * 4;
        let alpha_value = (alpha_bytes[i >> 1] >> shift_amount) & 0x0F;

        // 4-bit to 8-bit: 15 * 17 = 255
        pixel.a = alpha_value * 17;
    }

    result
}

/// Slice wrapper around [`decode_bc2_block`].
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline]
pub fn decode_bc2_block_from_slice(src: &[u8], decoder: Decoder) -> Option<Decoded4x4Block> {
    let block: &[u8; 16] = src.get(..16)?.try_into().ok()?;
    Some(decode_bc2_block(block, decoder))
}
