//! Colour palette evaluation for the RGB565 half of BC1-BC3 blocks.
//!
//! The reference palette uses the 'ideal' integer interpolation from the DirectX docs.
//! The NV5x palette reproduces the fixed point arithmetic of G80-era NVIDIA hardware,
//! which expands red and blue with a `* 22 / 8` ramp instead of bit replication.

use crate::Decoder;
use teximage_common::{color_565::Color565, color_8888::Color8888};

/// Evaluates the 4-entry palette for a pair of endpoints.
///
/// When `four_color_only` is set (BC2, BC3) the block always uses 4-colour
/// interpolation. Otherwise (BC1) `c0 <= c1` selects the 3-colour mode, whose
/// last entry is transparent black.
#[inline]
pub(crate) fn color_palette(
    c0: Color565,
    c1: Color565,
    decoder: Decoder,
    four_color_only: bool,
) -> [Color8888; 4] {
    let four_color = four_color_only || c0.greater_than(&c1);
    match decoder {
        Decoder::Reference => reference_palette(c0, c1, four_color),
        Decoder::Nv5x => nv5x_palette(c0, c1, four_color),
    }
}

fn reference_palette(c0: Color565, c1: Color565, four_color: bool) -> [Color8888; 4] {
    let (r0, g0, b0) = (c0.red() as u32, c0.green() as u32, c0.blue() as u32);
    let (r1, g1, b1) = (c1.red() as u32, c1.green() as u32, c1.blue() as u32);

    let mut dict = [Color8888::TRANSPARENT_BLACK; 4];
    dict[0] = c0.to_color_8888();
    dict[1] = c1.to_color_8888();

    if four_color {
        dict[2] = Color8888::new(
            ((2 * r0 + r1) / 3) as u8,
            ((2 * g0 + g1) / 3) as u8,
            ((2 * b0 + b1) / 3) as u8,
            255,
        );
        dict[3] = Color8888::new(
            ((r0 + 2 * r1) / 3) as u8,
            ((g0 + 2 * g1) / 3) as u8,
            ((b0 + 2 * b1) / 3) as u8,
            255,
        );
    } else {
        dict[2] = Color8888::new(
            ((r0 + r1) / 2) as u8,
            ((g0 + g1) / 2) as u8,
            ((b0 + b1) / 2) as u8,
            255,
        );
    }

    dict
}

#[inline]
fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

fn nv5x_palette(c0: Color565, c1: Color565, four_color: bool) -> [Color8888; 4] {
    let (r0, g0, b0) = (c0.red_5() as i32, c0.green_6() as i32, c0.blue_5() as i32);
    let (r1, g1, b1) = (c1.red_5() as i32, c1.green_6() as i32, c1.blue_5() as i32);

    // Green keeps bit replication; red and blue use the hardware ramp.
    let g0_8 = (g0 << 2) | (g0 >> 4);
    let g1_8 = (g1 << 2) | (g1 >> 4);
    let gdiff = g1_8 - g0_8;

    let mut dict = [Color8888::TRANSPARENT_BLACK; 4];
    dict[0] = Color8888::new(
        clamp_u8((3 * r0 * 22) / 8),
        clamp_u8(g0_8),
        clamp_u8((3 * b0 * 22) / 8),
        255,
    );
    dict[1] = Color8888::new(
        clamp_u8((3 * r1 * 22) / 8),
        clamp_u8(g1_8),
        clamp_u8((3 * b1 * 22) / 8),
        255,
    );

    if four_color {
        dict[2] = Color8888::new(
            clamp_u8(((2 * r0 + r1) * 22) / 8),
            clamp_u8((256 * g0_8 + gdiff / 4 + 128 + gdiff * 80) / 256),
            clamp_u8(((2 * b0 + b1) * 22) / 8),
            255,
        );
        dict[3] = Color8888::new(
            clamp_u8(((2 * r1 + r0) * 22) / 8),
            clamp_u8((256 * g1_8 - gdiff / 4 + 128 - gdiff * 80) / 256),
            clamp_u8(((2 * b1 + b0) * 22) / 8),
            255,
        );
    } else {
        dict[2] = Color8888::new(
            clamp_u8(((r0 + r1) * 33) / 8),
            clamp_u8((256 * g0_8 + gdiff / 4 + 128 + gdiff * 128) / 256),
            clamp_u8(((b0 + b1) * 33) / 8),
            255,
        );
    }

    dict
}
