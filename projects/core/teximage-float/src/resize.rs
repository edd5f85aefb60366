//! Separable polyphase resampling and mipmap downsampling.
//!
//! Resizing runs a horizontal pass into a `new_width x old_height` temporary followed by a
//! vertical pass into the destination, each channel independently. The alpha weighted
//! variant filters alpha first, then weights every colour tap by the (already filtered)
//! alpha so fully transparent texels do not bleed their colour into the result.

use crate::filter::{Filter, PolyphaseKernel, DEFAULT_SAMPLES};
use crate::float_image::{FloatImage, CHANNEL_COUNT};
use crate::wrap_mode::WrapMode;
use multiversion::multiversion;

/// Bias added to alpha so fully transparent neighbourhoods still produce a weighted average.
const ALPHA_WEIGHT_BIAS: f32 = 1.0 / 256.0;

/// A [`PolyphaseKernel`] with its source indices resolved through a [`WrapMode`].
struct Taps {
    window: usize,
    weights: Vec<f32>,
    indices: Vec<u32>,
}

impl Taps {
    fn new<F: Filter + ?Sized>(filter: &F, src_length: u32, dst_length: u32, wrap: WrapMode) -> Self {
        let kernel = PolyphaseKernel::new(filter, src_length, dst_length, DEFAULT_SAMPLES);
        let window = kernel.window_size();

        let mut indices = Vec::with_capacity(window * kernel.length());
        for i in 0..kernel.length() {
            let left = kernel.left(i);
            for j in 0..window {
                indices.push(wrap.wrap(left + j as i32, src_length));
            }
        }

        Self {
            window,
            weights: kernel.all_weights().to_vec(),
            indices,
        }
    }
}

#[multiversion(targets(
    // x86-64-v3 without lahfsahf
    "x86_64+avx+avx2+bmi1+bmi2+cmpxchg16b+f16c+fma+fxsr+lzcnt+movbe+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3+xsave",
    // x86-64-v2 without lahfsahf
    "x86_64+cmpxchg16b+fxsr+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3",
))]
fn convolve(weights: &[f32], indices: &[u32], window: usize, src: &[f32], dst: &mut [f32]) {
    let taps = weights.chunks_exact(window).zip(indices.chunks_exact(window));
    for (out, (w, idx)) in dst.iter_mut().zip(taps) {
        let mut sum = 0.0f32;
        for (wj, ij) in w.iter().zip(idx) {
            sum += wj * src[*ij as usize];
        }
        *out = sum;
    }
}

#[multiversion(targets(
    // x86-64-v3 without lahfsahf
    "x86_64+avx+avx2+bmi1+bmi2+cmpxchg16b+f16c+fma+fxsr+lzcnt+movbe+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3+xsave",
    // x86-64-v2 without lahfsahf
    "x86_64+cmpxchg16b+fxsr+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3",
))]
fn convolve_alpha_weighted(
    weights: &[f32],
    indices: &[u32],
    window: usize,
    src: &[f32],
    alpha: &[f32],
    dst: &mut [f32],
) {
    let taps = weights.chunks_exact(window).zip(indices.chunks_exact(window));
    for (out, (w, idx)) in dst.iter_mut().zip(taps) {
        let mut sum = 0.0f32;
        let mut norm = 0.0f32;
        for (wj, ij) in w.iter().zip(idx) {
            let i = *ij as usize;
            let weight = wj * (alpha[i] + ALPHA_WEIGHT_BIAS);
            norm += weight;
            sum += weight * src[i];
        }
        *out = if norm != 0.0 { sum / norm } else { 0.0 };
    }
}

impl Taps {
    #[inline]
    fn apply(&self, src: &[f32], alpha: Option<&[f32]>, dst: &mut [f32]) {
        match alpha {
            Some(alpha) => {
                convolve_alpha_weighted(&self.weights, &self.indices, self.window, src, alpha, dst)
            }
            None => convolve(&self.weights, &self.indices, self.window, src, dst),
        }
    }
}

/// Channel processing order: the weighting channel (if any) first, the rest in order.
fn channel_order(alpha: Option<usize>) -> impl Iterator<Item = usize> {
    let first = alpha.into_iter();
    first.chain((0..CHANNEL_COUNT).filter(move |c| Some(*c) != alpha))
}

/// Destination extent for one mip step: half size, rounded down, never below 1.
#[inline]
pub fn half_extent(width: u32, height: u32) -> (u32, u32) {
    ((width / 2).max(1), (height / 2).max(1))
}

impl FloatImage {
    /// Resamples to `width x height` with `filter`.
    ///
    /// With `alpha` set to a channel index, every other channel is weighted by that
    /// channel during filtering.
    ///
    /// # Examples
    ///
    /// ```
    /// use teximage_float::{filter::MitchellFilter, FloatImage, WrapMode};
    ///
    /// let mut image = FloatImage::new(5, 3);
    /// image.fill([0.25, 0.5, 0.75, 1.0]);
    ///
    /// let resized = image.resize(&MitchellFilter::default(), 12, 7, WrapMode::Clamp, Some(3));
    /// assert_eq!((resized.width(), resized.height()), (12, 7));
    /// assert!((resized.pixel(1, 11, 6) - 0.5).abs() < 1e-4);
    /// ```
    pub fn resize<F: Filter + ?Sized>(
        &self,
        filter: &F,
        width: u32,
        height: u32,
        wrap: WrapMode,
        alpha: Option<usize>,
    ) -> FloatImage {
        let (src_w, src_h) = (self.width(), self.height());
        if src_w == 0 || src_h == 0 || width == 0 || height == 0 {
            return FloatImage::new(width, height);
        }

        let xtaps = Taps::new(filter, src_w, width, wrap);
        let ytaps = Taps::new(filter, src_h, height, wrap);

        let (src_w, src_h) = (src_w as usize, src_h as usize);
        let (dst_w, dst_h) = (width as usize, height as usize);

        let mut tmp = FloatImage::new(width, self.height());
        let mut dst = FloatImage::new(width, height);

        let mut column = vec![0.0f32; src_h];
        let mut alpha_column = vec![0.0f32; src_h];
        let mut out_column = vec![0.0f32; dst_h];

        for c in channel_order(alpha) {
            let weighting = alpha.filter(|a| *a != c);

            // Horizontal pass: self -> tmp
            for y in 0..src_h {
                let src_row = &self.channel(c)[y * src_w..(y + 1) * src_w];
                let alpha_row = weighting.map(|a| &self.channel(a)[y * src_w..(y + 1) * src_w]);
                let tmp_row = &mut tmp.channel_mut(c)[y * dst_w..(y + 1) * dst_w];
                xtaps.apply(src_row, alpha_row, tmp_row);
            }

            // Vertical pass: tmp -> dst, one column at a time
            for x in 0..dst_w {
                let tmp_channel = tmp.channel(c);
                for (y, value) in column.iter_mut().enumerate() {
                    *value = tmp_channel[y * dst_w + x];
                }

                let alpha_source = match weighting {
                    Some(a) => {
                        let tmp_alpha = tmp.channel(a);
                        for (y, value) in alpha_column.iter_mut().enumerate() {
                            *value = tmp_alpha[y * dst_w + x];
                        }
                        Some(alpha_column.as_slice())
                    }
                    None => None,
                };

                ytaps.apply(&column, alpha_source, &mut out_column);

                let dst_channel = dst.channel_mut(c);
                for (y, value) in out_column.iter().enumerate() {
                    dst_channel[y * dst_w + x] = *value;
                }
            }
        }

        dst
    }

    /// Halves the image (rounding down, never below 1) with `filter`.
    pub fn downsample<F: Filter + ?Sized>(
        &self,
        filter: &F,
        wrap: WrapMode,
        alpha: Option<usize>,
    ) -> FloatImage {
        let (w, h) = half_extent(self.width(), self.height());
        self.resize(filter, w, h, wrap, alpha)
    }

    /// Halves the image with a 2x2 box filter.
    ///
    /// Odd extents use a 3-tap polyphase box so every source texel contributes
    /// equally. An extent of 1 is kept as is.
    ///
    /// # Examples
    ///
    /// ```
    /// use teximage_float::FloatImage;
    ///
    /// let mut image = FloatImage::new(2, 2);
    /// image.set_pixel(0, 0, 0, 1.0);
    /// let half = image.fast_downsample();
    /// assert_eq!(half.pixel(0, 0, 0), 0.25);
    /// ```
    pub fn fast_downsample(&self) -> FloatImage {
        let (src_w, src_h) = (self.width() as usize, self.height() as usize);
        let (w, h) = half_extent(self.width(), self.height());
        if src_w == 0 || src_h == 0 {
            return FloatImage::new(w, h);
        }
        let (dst_w, dst_h) = (w as usize, h as usize);

        let mut tmp = FloatImage::new(w, self.height());
        let mut dst = FloatImage::new(w, h);

        for c in 0..CHANNEL_COUNT {
            // Horizontal: each row independently
            let src = self.channel(c);
            let tmp_channel = tmp.channel_mut(c);
            for (src_row, tmp_row) in src
                .chunks_exact(src_w)
                .zip(tmp_channel.chunks_exact_mut(dst_w))
            {
                for (x, out) in tmp_row.iter_mut().enumerate() {
                    *out = box_halve_taps(src_w, x)
                        .iter()
                        .map(|(i, weight)| weight * src_row[*i])
                        .sum();
                }
            }

            // Vertical: whole rows at a time
            let tmp_channel = tmp.channel(c);
            let dst_channel = dst.channel_mut(c);
            for (y, dst_row) in dst_channel.chunks_exact_mut(dst_w).enumerate() {
                dst_row.fill(0.0);
                for (row, weight) in box_halve_taps(src_h, y) {
                    let tmp_row = &tmp_channel[row * dst_w..(row + 1) * dst_w];
                    for (out, value) in dst_row.iter_mut().zip(tmp_row) {
                        *out += weight * value;
                    }
                }
            }
        }

        dst
    }
}

/// Source taps `(index, weight)` feeding output `x` when halving a line of `n` texels.
#[inline]
fn box_halve_taps(n: usize, x: usize) -> [(usize, f32); 3] {
    if n == 1 {
        [(0, 1.0), (0, 0.0), (0, 0.0)]
    } else if n % 2 == 0 {
        [(2 * x, 0.5), (2 * x + 1, 0.5), (2 * x, 0.0)]
    } else {
        let half = n / 2;
        let scale = 1.0 / n as f32;
        [
            (2 * x, (half - x) as f32 * scale),
            (2 * x + 1, half as f32 * scale),
            (2 * x + 2, (1 + x) as f32 * scale),
        ]
    }
}
