//! Precomputed resampling weights for one axis.

use super::Filter;

/// Number of box sub-samples used to integrate a filter over a source texel when minifying.
pub const DEFAULT_SAMPLES: u32 = 32;

/// Normalised filter weights for resampling `src_length` texels into `dst_length` texels.
///
/// Output sample `i` reads `window_size` consecutive source texels starting at
/// [`left(i)`](Self::left), which may lie outside the source and need wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyphaseKernel {
    length: usize,
    window_size: usize,
    width: f32,
    lefts: Vec<i32>,
    weights: Vec<f32>,
}

impl PolyphaseKernel {
    /// Builds the kernel for `filter`.
    ///
    /// When upsampling (`dst_length > src_length`) the filter keeps its natural width and
    /// is point sampled; when downsampling it is widened by the reduction factor and
    /// integrated with `samples` sub-samples per source texel.
    ///
    /// # Examples
    ///
    /// ```
    /// use teximage_float::filter::{BoxFilter, PolyphaseKernel};
    ///
    /// let kernel = PolyphaseKernel::new(&BoxFilter, 8, 4, 32);
    /// assert_eq!(kernel.length(), 4);
    /// let total: f32 = kernel.weights(0).iter().sum();
    /// assert!((total - 1.0).abs() < 1e-5);
    /// ```
    pub fn new<F: Filter + ?Sized>(filter: &F, src_length: u32, dst_length: u32, samples: u32) -> Self {
        debug_assert!(src_length > 0 && dst_length > 0);

        let mut scale = dst_length as f32 / src_length as f32;
        let iscale = 1.0 / scale;
        let mut samples = samples.max(1);

        if scale > 1.0 {
            // Upsampling
            samples = 1;
            scale = 1.0;
        }

        let length = dst_length as usize;
        let width = filter.width() / scale;
        let window_size = (width * 2.0).ceil() as usize + 1;

        let mut lefts = Vec::with_capacity(length);
        let mut weights = vec![0.0f32; window_size * length];

        for (i, row) in weights.chunks_exact_mut(window_size).enumerate() {
            let center = (0.5 + i as f32) * iscale;
            let left = (center - width).floor() as i32;
            lefts.push(left);

            let mut total = 0.0f32;
            for (j, weight) in row.iter_mut().enumerate() {
                let sample = filter.sample_box((left + j as i32) as f32 - center, scale, samples);
                *weight = sample;
                total += sample;
            }

            if total != 0.0 {
                for weight in row.iter_mut() {
                    *weight /= total;
                }
            }
        }

        Self {
            length,
            window_size,
            width,
            lefts,
            weights,
        }
    }

    /// Number of output samples.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of source texels read per output sample.
    #[inline]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Half-width of the filter in source texels.
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// First source texel read by output sample `i`.
    #[inline]
    pub fn left(&self, i: usize) -> i32 {
        self.lefts[i]
    }

    /// Weights of output sample `i`, one per texel of the window.
    #[inline]
    pub fn weights(&self, i: usize) -> &[f32] {
        &self.weights[i * self.window_size..(i + 1) * self.window_size]
    }

    /// Every weight, `window_size` per output sample.
    #[inline]
    pub(crate) fn all_weights(&self) -> &[f32] {
        &self.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{BoxFilter, KaiserFilter, MitchellFilter, TriangleFilter};
    use rstest::rstest;

    fn assert_normalised(kernel: &PolyphaseKernel) {
        for i in 0..kernel.length() {
            let total: f32 = kernel.weights(i).iter().sum();
            assert!((total - 1.0).abs() < 1e-4, "sample {i} sums to {total}");
        }
    }

    #[rstest]
    #[case(16, 8)]
    #[case(15, 7)]
    #[case(8, 16)]
    #[case(5, 3)]
    #[case(1, 4)]
    fn weights_are_normalised(#[case] src: u32, #[case] dst: u32) {
        assert_normalised(&PolyphaseKernel::new(&BoxFilter, src, dst, DEFAULT_SAMPLES));
        assert_normalised(&PolyphaseKernel::new(&TriangleFilter, src, dst, DEFAULT_SAMPLES));
        assert_normalised(&PolyphaseKernel::new(&KaiserFilter::default(), src, dst, DEFAULT_SAMPLES));
        assert_normalised(&PolyphaseKernel::new(&MitchellFilter::default(), src, dst, DEFAULT_SAMPLES));
    }

    #[test]
    fn halving_box_widens_window() {
        let kernel = PolyphaseKernel::new(&BoxFilter, 8, 4, DEFAULT_SAMPLES);
        assert_eq!(kernel.width(), 1.0);
        assert_eq!(kernel.window_size(), 3);
        // centre of output 1 is source position 3.0, window starts at 2
        assert_eq!(kernel.left(1), 2);

        let weights = kernel.weights(1);
        assert!(weights[2].abs() < 1e-6);
        assert!((weights[0] - 0.5).abs() < 1e-5);
        assert!((weights[1] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn upsampling_keeps_filter_width() {
        let kernel = PolyphaseKernel::new(&TriangleFilter, 4, 8, DEFAULT_SAMPLES);
        assert_eq!(kernel.width(), 1.0);
        assert_eq!(kernel.window_size(), 3);
    }
}
