//! A decoded 4x4 tile, as produced by the BC1/BC2/BC3 decoders.
//!
//! Texels are stored row-major, `pixels[0]` top-left and `pixels[15]` bottom-right.

use crate::color_8888::Color8888;

/// 16 RGBA8 texels of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded4x4Block {
    /// Row-major texels.
    pub pixels: [Color8888; 16],
}

impl Decoded4x4Block {
    /// A tile with every texel set to `pixel`.
    pub fn new(pixel: Color8888) -> Self {
        Self {
            pixels: [pixel; 16],
        }
    }

    /// Gets the pixel at `(x, y)`; both coordinates must be below 4.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color8888 {
        debug_assert!(x < 4 && y < 4);
        self.pixels[y * 4 + x]
    }

    /// Sets the pixel at `(x, y)`; both coordinates must be below 4.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Color8888) {
        debug_assert!(x < 4 && y < 4);
        self.pixels[y * 4 + x] = pixel;
    }

    /// Whether the tile is a single solid colour.
    #[inline]
    pub fn has_identical_pixels(&self) -> bool {
        self.pixels.iter().all(|pixel| *pixel == self.pixels[0])
    }

    /// Iterates over `(x, y, pixel)` in row-major order.
    pub fn iter_pixels(&self) -> impl Iterator<Item = (usize, usize, Color8888)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .map(|(i, pixel)| (i % 4, i / 4, *pixel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_pixel_is_row_major() {
        let mut block = Decoded4x4Block::new(Color8888::TRANSPARENT_BLACK);
        block.set_pixel(3, 1, Color8888::new(1, 2, 3, 4));
        assert_eq!(block.pixels[7], Color8888::new(1, 2, 3, 4));
        assert_eq!(block.pixel(3, 1), Color8888::new(1, 2, 3, 4));
        assert!(!block.has_identical_pixels());
    }

    #[test]
    fn iter_pixels_yields_coordinates() {
        let block = Decoded4x4Block::new(Color8888::new(9, 9, 9, 9));
        let coords: Vec<(usize, usize)> = block.iter_pixels().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords.len(), 16);
        assert_eq!(coords[0], (0, 0));
        assert_eq!(coords[5], (1, 1));
        assert_eq!(coords[15], (3, 3));
    }
}
