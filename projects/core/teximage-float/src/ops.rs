//! Per-pixel colour operations on a [`FloatImage`].

use crate::float_image::{FloatImage, CHANNEL_COUNT};
use derive_enum_all_values::AllValues;
use multiversion::multiversion;

/// Source of an output channel in [`FloatImage::swizzle`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues)]
pub enum Channel {
    /// Channel 0.
    Red,
    /// Channel 1.
    Green,
    /// Channel 2.
    Blue,
    /// Channel 3.
    Alpha,
    /// Constant 0.
    Zero,
    /// Constant 1.
    One,
}

impl Channel {
    /// Index of the channel, else [`None`] for the constants.
    #[inline]
    pub fn index(self) -> Option<usize> {
        match self {
            Channel::Red => Some(0),
            Channel::Green => Some(1),
            Channel::Blue => Some(2),
            Channel::Alpha => Some(3),
            Channel::Zero | Channel::One => None,
        }
    }

    /// The channel stored at `index`, for indices below 4.
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Channel::Red),
            1 => Some(Channel::Green),
            2 => Some(Channel::Blue),
            3 => Some(Channel::Alpha),
            _ => None,
        }
    }
}

#[multiversion(targets(
    // x86-64-v3 without lahfsahf
    "x86_64+avx+avx2+bmi1+bmi2+cmpxchg16b+f16c+fma+fxsr+lzcnt+movbe+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3+xsave",
    // x86-64-v2 without lahfsahf
    "x86_64+cmpxchg16b+fxsr+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3",
))]
fn scale_bias_plane(plane: &mut [f32], scale: f32, bias: f32) {
    for v in plane.iter_mut() {
        *v = *v * scale + bias;
    }
}

impl FloatImage {
    /// Raises channels `base..base + count` to `gamma`. Negative values become 0.
    pub fn to_linear(&mut self, base: usize, count: usize, gamma: f32) {
        for c in base..base + count {
            for v in self.channel_mut(c) {
                *v = v.max(0.0).powf(gamma);
            }
        }
    }

    /// Raises channels `base..base + count` to `1 / gamma`. Negative values become 0.
    pub fn to_gamma(&mut self, base: usize, count: usize, gamma: f32) {
        self.to_linear(base, count, 1.0 / gamma);
    }

    /// Replaces every pixel `p` with `p.r * columns[0] + p.g * columns[1] + p.b * columns[2] +
    /// p.a * columns[3] + offset`.
    pub fn transform(&mut self, columns: [[f32; 4]; 4], offset: [f32; 4]) {
        let [r, g, b, a] = self.planes_mut();
        for i in 0..r.len() {
            let input = [r[i], g[i], b[i], a[i]];
            let mut out = offset;
            for (value, column) in input.iter().zip(columns.iter()) {
                for (o, w) in out.iter_mut().zip(column) {
                    *o += value * w;
                }
            }
            r[i] = out[0];
            g[i] = out[1];
            b[i] = out[2];
            a[i] = out[3];
        }
    }

    /// Rearranges channels: output channel `k` takes its value from `sources[k]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use teximage_float::{Channel, FloatImage};
    ///
    /// let mut image = FloatImage::new(1, 1);
    /// image.fill([0.1, 0.2, 0.3, 0.4]);
    /// image.swizzle([Channel::Blue, Channel::Green, Channel::Red, Channel::One]);
    /// assert_eq!(image.rgba(0, 0), [0.3, 0.2, 0.1, 1.0]);
    /// ```
    pub fn swizzle(&mut self, sources: [Channel; CHANNEL_COUNT]) {
        let original = self.clone();
        for (dst, source) in sources.into_iter().enumerate() {
            match source {
                Channel::Zero => self.clear_channel(dst, 0.0),
                Channel::One => self.clear_channel(dst, 1.0),
                _ => {
                    if let Some(src) = source.index() {
                        self.copy_channel_from(&original, src, dst);
                    }
                }
            }
        }
    }

    /// `v * scale + bias` on channels `base..base + count`.
    pub fn scale_bias(&mut self, base: usize, count: usize, scale: f32, bias: f32) {
        for c in base..base + count {
            scale_bias_plane(self.channel_mut(c), scale, bias);
        }
    }

    /// Clamps channels `base..base + count` into `[low, high]`.
    pub fn clamp(&mut self, base: usize, count: usize, low: f32, high: f32) {
        for c in base..base + count {
            for v in self.channel_mut(c) {
                *v = v.clamp(low, high);
            }
        }
    }

    /// Maps the 3 channels from `base` from `[-1, 1]` to `[0, 1]`.
    pub fn pack_normals(&mut self, base: usize) {
        self.scale_bias(base, 3, 0.5, 0.5);
    }

    /// Maps the 3 channels from `base` from `[0, 1]` to `[-1, 1]`.
    pub fn expand_normals(&mut self, base: usize) {
        self.scale_bias(base, 3, 2.0, -1.0);
    }

    /// Normalises the 3 channel vector starting at `base` in every pixel. Zero vectors are kept.
    pub fn normalize(&mut self, base: usize) {
        debug_assert!(base + 3 <= CHANNEL_COUNT);
        let [r, g, b, a] = self.planes_mut();
        let (x, y, z) = if base == 0 { (r, g, b) } else { (g, b, a) };
        for i in 0..x.len() {
            let length = (x[i] * x[i] + y[i] * y[i] + z[i] * z[i]).sqrt();
            if length > 0.0 {
                x[i] /= length;
                y[i] /= length;
                z[i] /= length;
            }
        }
    }

    /// Linearly interpolates every pixel towards `rgba` by `t`.
    pub fn blend(&mut self, rgba: [f32; CHANNEL_COUNT], t: f32) {
        for (plane, target) in self.planes_mut().into_iter().zip(rgba) {
            for v in plane.iter_mut() {
                *v += (target - *v) * t;
            }
        }
    }

    /// Multiplies the colour channels by alpha.
    pub fn premultiply_alpha(&mut self) {
        let [r, g, b, a] = self.planes_mut();
        for i in 0..a.len() {
            r[i] *= a[i];
            g[i] *= a[i];
            b[i] *= a[i];
        }
    }

    /// Replaces all four channels with a weighted sum of them. Weights are normalised
    /// by their total first.
    pub fn to_grey_scale(&mut self, weights: [f32; CHANNEL_COUNT]) {
        let sum: f32 = weights.iter().sum();
        let [wr, wg, wb, wa] = weights.map(|w| w / sum);

        let [r, g, b, a] = self.planes_mut();
        for i in 0..r.len() {
            let grey = r[i] * wr + g[i] * wg + b[i] * wb + a[i] * wa;
            r[i] = grey;
            g[i] = grey;
            b[i] = grey;
            a[i] = grey;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pixel(rgba: [f32; 4]) -> FloatImage {
        let mut image = FloatImage::new(1, 1);
        image.fill(rgba);
        image
    }

    fn assert_close(actual: [f32; 4], expected: [f32; 4]) {
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-5, "{actual:?} != {expected:?}");
        }
    }

    #[rstest]
    #[case(2.2)]
    #[case(0.5)]
    #[case(1.8)]
    fn gamma_round_trips(#[case] gamma: f32) {
        let mut image = pixel([0.1, 0.5, 0.9, 0.3]);
        image.to_linear(0, 3, gamma);
        image.to_gamma(0, 3, gamma);
        assert_close(image.rgba(0, 0), [0.1, 0.5, 0.9, 0.3]);
    }

    #[test]
    fn to_linear_clamps_negatives_and_skips_alpha() {
        let mut image = pixel([-0.5, 0.5, 1.0, -1.0]);
        image.to_linear(0, 3, 2.0);
        assert_close(image.rgba(0, 0), [0.0, 0.25, 1.0, -1.0]);
    }

    #[test]
    fn transform_uses_columns() {
        let mut image = pixel([1.0, 2.0, 3.0, 4.0]);
        // Swap red and green, scale blue, keep alpha, then offset
        let columns = [
            [0.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 2.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        image.transform(columns, [0.5, 0.0, 0.0, 0.0]);
        assert_close(image.rgba(0, 0), [2.5, 1.0, 6.0, 4.0]);
    }

    #[test]
    fn swizzle_supports_constants_and_duplicates() {
        let mut image = pixel([0.1, 0.2, 0.3, 0.4]);
        image.swizzle([Channel::Alpha, Channel::Alpha, Channel::Zero, Channel::Red]);
        assert_close(image.rgba(0, 0), [0.4, 0.4, 0.0, 0.1]);
    }

    #[test]
    fn channel_indices_round_trip() {
        for channel in Channel::all_values() {
            if let Some(index) = channel.index() {
                assert_eq!(Channel::from_index(index), Some(*channel));
            }
        }
        assert_eq!(Channel::from_index(4), None);
    }

    #[test]
    fn pack_then_expand_is_identity() {
        let mut image = pixel([-1.0, 0.0, 1.0, 0.7]);
        image.pack_normals(0);
        assert_close(image.rgba(0, 0), [0.0, 0.5, 1.0, 0.7]);
        image.expand_normals(0);
        assert_close(image.rgba(0, 0), [-1.0, 0.0, 1.0, 0.7]);
    }

    #[test]
    fn normalize_produces_unit_vectors() {
        let mut image = pixel([3.0, 0.0, 4.0, 9.0]);
        image.normalize(0);
        assert_close(image.rgba(0, 0), [0.6, 0.0, 0.8, 9.0]);

        let mut zero = pixel([0.0, 0.0, 0.0, 1.0]);
        zero.normalize(0);
        assert_close(zero.rgba(0, 0), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn blend_and_premultiply() {
        let mut image = pixel([1.0, 0.0, 0.5, 0.5]);
        image.blend([0.0, 1.0, 0.5, 1.0], 0.25);
        assert_close(image.rgba(0, 0), [0.75, 0.25, 0.5, 0.625]);

        let mut image = pixel([1.0, 0.5, 0.2, 0.5]);
        image.premultiply_alpha();
        assert_close(image.rgba(0, 0), [0.5, 0.25, 0.1, 0.5]);
    }

    #[test]
    fn grey_scale_normalises_weights() {
        let mut image = pixel([1.0, 0.5, 0.0, 0.0]);
        image.to_grey_scale([2.0, 2.0, 0.0, 0.0]);
        assert_close(image.rgba(0, 0), [0.75; 4]);
    }

    #[test]
    fn clamp_limits_range() {
        let mut image = pixel([-1.0, 0.5, 2.0, 3.0]);
        image.clamp(0, 3, 0.0, 1.0);
        assert_close(image.rgba(0, 0), [0.0, 0.5, 1.0, 3.0]);
    }
}
