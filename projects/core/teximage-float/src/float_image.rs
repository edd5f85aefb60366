//! # Float Image
//!
//! [`FloatImage`] stores a `width x height` RGBA image as four consecutive `f32` planes.
//!
//! ## Memory Layout
//!
//! ```text
//! [ R R R R ... ] [ G G G G ... ] [ B B B B ... ] [ A A A A ... ]
//!   width*height    width*height    width*height    width*height
//! ```
//!
//! Within each plane pixels are row-major, top row first.

use crate::wrap_mode::WrapMode;

/// Number of channels in every [`FloatImage`].
pub const CHANNEL_COUNT: usize = 4;

/// A planar 4 channel (R, G, B, A) floating point image.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FloatImage {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl FloatImage {
    /// Creates a zero-filled `width x height` image.
    ///
    /// # Examples
    ///
    /// ```
    /// use teximage_float::FloatImage;
    ///
    /// let image = FloatImage::new(4, 2);
    /// assert_eq!(image.pixel_count(), 8);
    /// assert!(image.channel(3).iter().all(|v| *v == 0.0));
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            data: vec![0.0; count * CHANNEL_COUNT],
        }
    }

    /// Creates an image from four planes of `width * height` values each.
    ///
    /// # Returns
    ///
    /// [`None`] if any plane has the wrong length.
    pub fn from_planes(width: u32, height: u32, planes: [&[f32]; CHANNEL_COUNT]) -> Option<Self> {
        let count = width as usize * height as usize;
        if planes.iter().any(|plane| plane.len() != count) {
            return None;
        }

        let mut data = Vec::with_capacity(count * CHANNEL_COUNT);
        for plane in planes {
            data.extend_from_slice(plane);
        }

        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels in one channel plane.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` when both images have the same width and height.
    #[inline]
    pub fn same_extent(&self, other: &FloatImage) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Linear index of `(x, y)` inside a channel plane.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }

    /// Linear index of `(x, y)` after applying `wrap` to out of range coordinates.
    #[inline]
    pub fn index_wrapped(&self, x: i32, y: i32, wrap: WrapMode) -> usize {
        let x = wrap.wrap(x, self.width);
        let y = wrap.wrap(y, self.height);
        y as usize * self.width as usize + x as usize
    }

    /// The plane of channel `c` (0 = R, 1 = G, 2 = B, 3 = A).
    #[inline]
    pub fn channel(&self, c: usize) -> &[f32] {
        let count = self.pixel_count();
        &self.data[c * count..(c + 1) * count]
    }

    /// Mutable plane of channel `c`.
    #[inline]
    pub fn channel_mut(&mut self, c: usize) -> &mut [f32] {
        let count = self.pixel_count();
        &mut self.data[c * count..(c + 1) * count]
    }

    /// All four planes, mutably and at once.
    pub fn planes_mut(&mut self) -> [&mut [f32]; CHANNEL_COUNT] {
        let count = self.pixel_count();
        let (r, rest) = self.data.split_at_mut(count);
        let (g, rest) = rest.split_at_mut(count);
        let (b, a) = rest.split_at_mut(count);
        [r, g, b, a]
    }

    /// Value of channel `c` at `(x, y)`.
    #[inline]
    pub fn pixel(&self, c: usize, x: u32, y: u32) -> f32 {
        self.channel(c)[self.index(x, y)]
    }

    /// Sets channel `c` at `(x, y)`.
    #[inline]
    pub fn set_pixel(&mut self, c: usize, x: u32, y: u32, value: f32) {
        let index = self.index(x, y);
        self.channel_mut(c)[index] = value;
    }

    /// Value of channel `c` at `(x, y)`, with out of range coordinates resolved by `wrap`.
    #[inline]
    pub fn pixel_wrapped(&self, c: usize, x: i32, y: i32, wrap: WrapMode) -> f32 {
        self.channel(c)[self.index_wrapped(x, y, wrap)]
    }

    /// All four channels at `(x, y)`.
    pub fn rgba(&self, x: u32, y: u32) -> [f32; CHANNEL_COUNT] {
        let index = self.index(x, y);
        let count = self.pixel_count();
        [
            self.data[index],
            self.data[count + index],
            self.data[2 * count + index],
            self.data[3 * count + index],
        ]
    }

    /// Sets every pixel to `rgba`.
    pub fn fill(&mut self, rgba: [f32; CHANNEL_COUNT]) {
        for (plane, value) in self.planes_mut().into_iter().zip(rgba) {
            plane.fill(value);
        }
    }

    /// Sets every pixel of channel `c` to `value`.
    pub fn clear_channel(&mut self, c: usize, value: f32) {
        self.channel_mut(c).fill(value);
    }

    /// Overwrites channel `dst_channel` with channel `src_channel` of `src`.
    ///
    /// Both images must have the same extent.
    pub fn copy_channel_from(&mut self, src: &FloatImage, src_channel: usize, dst_channel: usize) {
        debug_assert!(self.same_extent(src));
        self.channel_mut(dst_channel)
            .copy_from_slice(src.channel(src_channel));
    }

    /// Mirrors the image top to bottom.
    pub fn flip_vertically(&mut self) {
        let w = self.width as usize;
        let h = self.height as usize;
        for plane in self.planes_mut() {
            for y in 0..h / 2 {
                let (top, bottom) = plane.split_at_mut((h - 1 - y) * w);
                top[y * w..(y + 1) * w].swap_with_slice(&mut bottom[..w]);
            }
        }
    }

    /// Paints the outermost ring of pixels with `rgba`.
    pub fn set_border(&mut self, rgba: [f32; CHANNEL_COUNT]) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        let (w, h) = (self.width, self.height);
        for (c, value) in rgba.into_iter().enumerate() {
            for x in 0..w {
                self.set_pixel(c, x, 0, value);
                self.set_pixel(c, x, h - 1, value);
            }
            for y in 0..h {
                self.set_pixel(c, 0, y, value);
                self.set_pixel(c, w - 1, y, value);
            }
        }
    }
}
