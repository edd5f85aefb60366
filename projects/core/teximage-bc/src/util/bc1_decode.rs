//! BC1 (DXT1) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d10/d3d10-graphics-programming-guide-resources-block-compression#bc1>

use crate::{palette::color_palette, Decoder};
use teximage_common::{
    color_565::Color565, color_8888::Color8888, decoded_4x4_block::Decoded4x4Block,
};

/// Decodes the 8 byte colour section shared by BC1, BC2 and BC3.
#[inline(always)]
pub(crate) fn decode_color_section(
    src: &[u8; 8],
    decoder: Decoder,
    four_color_only: bool,
) -> Decoded4x4Block {
    let c0 = Color565::from_le_bytes([src[0], src[1]]);
    let c1 = Color565::from_le_bytes([src[2], src[3]]);
    let idx = u32::from_le_bytes([src[4], src[5], src[6], src[7]]);

    let dict = color_palette(c0, c1, decoder, four_color_only);

    let mut result = Decoded4x4Block::new(Color8888::TRANSPARENT_BLACK);
    for (i, pixel) in result.pixels.iter_mut().enumerate() {
        *pixel = dict[((idx >> (i * 2)) & 0x3) as usize];
    }

    result
}

/// Decodes a BC1 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: The 8 byte BC1 block
/// - `decoder`: Palette evaluation strategy
///
/// # Example
///
/// ```
/// use teximage_bc::util::decode_bc1_block;
/// use teximage_bc::Decoder;
///
/// let bc1_block = [0u8; 8];
/// let decoded = decode_bc1_block(&bc1_block, Decoder::Reference);
/// let pixel_at_0_0 = decoded.pixel(0, 0);
/// assert_eq!(pixel_at_0_0.a, 255);
/// ```
#[inline]
pub fn decode_bc1_block(src: &[u8; 8], decoder: Decoder) -> Decoded4x4Block {
    decode_color_section(src, decoder, false)
}

/// Slice wrapper around [`decode_bc1_block`].
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline]
pub fn decode_bc1_block_from_slice(src: &[u8], decoder: Decoder) -> Option<Decoded4x4Block> {
    let block: &[u8; 8] = src.get(..8)?.try_into().ok()?;
    Some(decode_bc1_block(block, decoder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(Decoder::Reference)]
    #[case(Decoder::Nv5x)]
    fn can_decode_solid_red_block(#[case] decoder: Decoder) {
        let bc1_block = [
            0x00, 0xF8, // c0 = R:31 G:0 B:0
            0x00, 0xF8, // c1 = R:31 G:0 B:0
            0x00, 0x00, 0x00, 0x00, // All pixels use index 0
        ];

        let decoded = decode_bc1_block_from_slice(&bc1_block, decoder).unwrap();
        assert!(decoded.has_identical_pixels());
        assert_eq!(decoded.pixels[0], Color8888::new(255, 0, 0, 255));
    }

    #[test]
    fn three_color_block_has_transparent_texels() {
        // c0 < c1 selects the punch-through mode; index 3 is transparent black
        let mut indices = [0u8; 16];
        indices[5] = 3;
        indices[6] = 2;
        let bc1_block = color_block(0x0000, 0xFFFF, indices);

        let decoded = decode_bc1_block(&bc1_block, Decoder::Reference);
        assert_eq!(decoded.pixel(1, 1), Color8888::TRANSPARENT_BLACK);
        assert_eq!(decoded.pixel(2, 1), Color8888::new(127, 127, 127, 255));
        assert_eq!(decoded.pixel(0, 0), Color8888::new(0, 0, 0, 255));
    }

    #[test]
    fn indices_are_read_low_bits_first() {
        let indices = [0, 1, 2, 3, 3, 2, 1, 0, 0, 0, 0, 0, 1, 1, 1, 1];
        let bc1_block = color_block(0xFFFF, 0x0000, indices);

        let decoded = decode_bc1_block(&bc1_block, Decoder::Reference);
        let expected = [
            Color8888::new(255, 255, 255, 255),
            Color8888::new(0, 0, 0, 255),
            Color8888::new(170, 170, 170, 255),
            Color8888::new(85, 85, 85, 255),
        ];
        for (i, index) in indices.iter().enumerate() {
            assert_eq!(decoded.pixels[i], expected[*index as usize], "pixel {i}");
        }
    }

    #[test]
    fn test_slice_too_small() {
        let bc1_block = [0u8; 7];
        assert!(decode_bc1_block_from_slice(&bc1_block, Decoder::Reference).is_none());
    }
}
