//! Height to normal map conversion.
//!
//! The height field is the pixel luminance. Its gradient is estimated with a 9x9 kernel
//! made by blending Sobel-like derivative kernels of size 3, 5, 7 and 9, so the caller
//! can trade fine detail against larger features.

use crate::float_image::FloatImage;
use crate::wrap_mode::WrapMode;

/// Edge length of the blended kernel.
const KERNEL_SIZE: usize = 9;

/// Z component of the unnormalised normal, controls how pronounced the bumps are.
const HEIGHT_SCALE: f32 = 1.0 / 16.0;

/// Rec. 601 luma weights used to derive height from colour.
pub const LUMINANCE_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

#[rustfmt::skip]
const SOBEL_3: [f32; 9] = [
    -1.0, 0.0, 1.0,
    -2.0, 0.0, 2.0,
    -1.0, 0.0, 1.0,
];

#[rustfmt::skip]
const SOBEL_5: [f32; 25] = [
    -1.0, -2.0, 0.0, 2.0, 1.0,
    -2.0, -3.0, 0.0, 3.0, 2.0,
    -3.0, -4.0, 0.0, 4.0, 3.0,
    -2.0, -3.0, 0.0, 3.0, 2.0,
    -1.0, -2.0, 0.0, 2.0, 1.0,
];

#[rustfmt::skip]
const SOBEL_7: [f32; 49] = [
    -1.0, -2.0, -3.0, 0.0, 3.0, 2.0, 1.0,
    -2.0, -3.0, -4.0, 0.0, 4.0, 3.0, 2.0,
    -3.0, -4.0, -5.0, 0.0, 5.0, 4.0, 3.0,
    -4.0, -5.0, -6.0, 0.0, 6.0, 5.0, 4.0,
    -3.0, -4.0, -5.0, 0.0, 5.0, 4.0, 3.0,
    -2.0, -3.0, -4.0, 0.0, 4.0, 3.0, 2.0,
    -1.0, -2.0, -3.0, 0.0, 3.0, 2.0, 1.0,
];

#[rustfmt::skip]
const SOBEL_9: [f32; 81] = [
    -1.0, -2.0, -3.0, -4.0, 0.0, 4.0, 3.0, 2.0, 1.0,
    -2.0, -3.0, -4.0, -5.0, 0.0, 5.0, 4.0, 3.0, 2.0,
    -3.0, -4.0, -5.0, -6.0, 0.0, 6.0, 5.0, 4.0, 3.0,
    -4.0, -5.0, -6.0, -7.0, 0.0, 7.0, 6.0, 5.0, 4.0,
    -5.0, -6.0, -7.0, -8.0, 0.0, 8.0, 7.0, 6.0, 5.0,
    -4.0, -5.0, -6.0, -7.0, 0.0, 7.0, 6.0, 5.0, 4.0,
    -3.0, -4.0, -5.0, -6.0, 0.0, 6.0, 5.0, 4.0, 3.0,
    -2.0, -3.0, -4.0, -5.0, 0.0, 5.0, 4.0, 3.0, 2.0,
    -1.0, -2.0, -3.0, -4.0, 0.0, 4.0, 3.0, 2.0, 1.0,
];

/// A square 2D convolution kernel, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel2 {
    size: usize,
    data: Vec<f32>,
}

impl Kernel2 {
    /// Horizontal derivative kernel: the 3, 5, 7 and 9 wide Sobel kernels centred,
    /// scaled by `weights[0..4]` respectively and summed, then normalised so the
    /// absolute values sum to 1.
    pub fn blended_sobel(weights: [f32; 4]) -> Self {
        let mut data = vec![0.0f32; KERNEL_SIZE * KERNEL_SIZE];
        let parts: [(&[f32], usize, f32); 4] = [
            (&SOBEL_3, 3, weights[0]),
            (&SOBEL_5, 5, weights[1]),
            (&SOBEL_7, 7, weights[2]),
            (&SOBEL_9, 9, weights[3]),
        ];

        for (elements, size, weight) in parts {
            let offset = (KERNEL_SIZE - size) / 2;
            for y in 0..size {
                for x in 0..size {
                    data[(y + offset) * KERNEL_SIZE + x + offset] += elements[y * size + x] * weight;
                }
            }
        }

        let mut kernel = Self {
            size: KERNEL_SIZE,
            data,
        };
        kernel.normalize();
        kernel
    }

    /// Scales the kernel so the sum of absolute values is 1. An all-zero kernel is unchanged.
    pub fn normalize(&mut self) {
        let total: f32 = self.data.iter().map(|v| v.abs()).sum();
        if total > 0.0 {
            for v in self.data.iter_mut() {
                *v /= total;
            }
        }
    }

    /// Swaps rows and columns, turning a horizontal derivative into a vertical one.
    pub fn transposed(&self) -> Self {
        let mut data = vec![0.0f32; self.data.len()];
        for y in 0..self.size {
            for x in 0..self.size {
                data[x * self.size + y] = self.data[y * self.size + x];
            }
        }
        Self {
            size: self.size,
            data,
        }
    }

    /// Edge length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Coefficient at column `x`, row `y`.
    #[inline]
    pub fn value_at(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.size + x]
    }
}

impl FloatImage {
    /// Convolves channel `c` around `(x, y)` with `kernel` centred on the pixel.
    pub fn apply_kernel(&self, kernel: &Kernel2, x: u32, y: u32, c: usize, wrap: WrapMode) -> f32 {
        let offset = (kernel.size() / 2) as i32;
        let plane = self.channel(c);

        let mut sum = 0.0f32;
        for ky in 0..kernel.size() {
            let src_y = y as i32 + ky as i32 - offset;
            for kx in 0..kernel.size() {
                let src_x = x as i32 + kx as i32 - offset;
                sum += kernel.value_at(kx, ky) * plane[self.index_wrapped(src_x, src_y, wrap)];
            }
        }
        sum
    }

    /// Builds a normal map from this image's luminance.
    ///
    /// `filter_weights` blends the 3, 5, 7 and 9 wide derivative kernels. The normal is
    /// packed into `[0, 1]` in the RGB channels and alpha is copied from the source.
    pub fn to_normal_map(&self, wrap: WrapMode, filter_weights: [f32; 4]) -> FloatImage {
        let (w, h) = (self.width(), self.height());

        let mut heights = FloatImage::new(w, h);
        {
            let (r, g, b) = (self.channel(0), self.channel(1), self.channel(2));
            let height_plane = heights.channel_mut(0);
            for (i, out) in height_plane.iter_mut().enumerate() {
                *out = r[i] * LUMINANCE_WEIGHTS[0]
                    + g[i] * LUMINANCE_WEIGHTS[1]
                    + b[i] * LUMINANCE_WEIGHTS[2];
            }
        }

        let kdu = Kernel2::blended_sobel(filter_weights);
        let kdv = kdu.transposed();

        let mut out = FloatImage::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let du = heights.apply_kernel(&kdu, x, y, 0, wrap);
                let dv = heights.apply_kernel(&kdv, x, y, 0, wrap);

                let length = (du * du + dv * dv + HEIGHT_SCALE * HEIGHT_SCALE).sqrt();
                out.set_pixel(0, x, y, du / length);
                out.set_pixel(1, x, y, dv / length);
                out.set_pixel(2, x, y, HEIGHT_SCALE / length);
            }
        }

        out.pack_normals(0);
        out.copy_channel_from(self, 3, 3);
        out
    }

    /// Re-normalises a packed normal map: expand to `[-1, 1]`, normalise, pack again.
    pub fn normalize_normal_map(&mut self) {
        self.expand_normals(0);
        self.normalize(0);
        self.pack_normals(0);
    }
}
