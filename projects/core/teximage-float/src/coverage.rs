//! Alpha-test coverage measurement and the alpha scaling that preserves it across mips.

use crate::float_image::FloatImage;

/// Number of bisection steps used to locate the alpha reference.
const COVERAGE_SEARCH_STEPS: usize = 10;

impl FloatImage {
    /// Fraction of pixels whose `alpha_channel` value is strictly greater than `alpha_ref`.
    ///
    /// An empty image has no coverage.
    ///
    /// # Examples
    ///
    /// ```
    /// use teximage_float::FloatImage;
    ///
    /// let mut image = FloatImage::new(2, 2);
    /// image.set_pixel(3, 0, 0, 1.0);
    /// assert_eq!(image.alpha_test_coverage(0.5, 3), 0.25);
    /// ```
    pub fn alpha_test_coverage(&self, alpha_ref: f32, alpha_channel: usize) -> f32 {
        let count = self.pixel_count();
        if count == 0 {
            return 0.0;
        }

        let covered = self
            .channel(alpha_channel)
            .iter()
            .filter(|alpha| **alpha > alpha_ref)
            .count();

        covered as f32 / count as f32
    }

    /// Scales `alpha_channel` so that testing against `alpha_ref` yields roughly
    /// `coverage`, then clamps it to `[0, 1]`.
    ///
    /// A bisection search over `[0, 1]` finds the reference value at which the current
    /// alpha has the requested coverage; alpha is then scaled by `alpha_ref / that value`.
    pub fn scale_alpha_to_coverage(&mut self, coverage: f32, alpha_ref: f32, alpha_channel: usize) {
        let mut min_alpha_ref = 0.0f32;
        let mut max_alpha_ref = 1.0f32;
        let mut mid_alpha_ref = 0.5f32;

        for _ in 0..COVERAGE_SEARCH_STEPS {
            let current = self.alpha_test_coverage(mid_alpha_ref, alpha_channel);

            if current > coverage {
                min_alpha_ref = mid_alpha_ref;
            } else if current < coverage {
                max_alpha_ref = mid_alpha_ref;
            } else {
                break;
            }

            mid_alpha_ref = (min_alpha_ref + max_alpha_ref) * 0.5;
        }

        let alpha_scale = alpha_ref / mid_alpha_ref;
        self.scale_bias(alpha_channel, 1, alpha_scale, 0.0);
        self.clamp(alpha_channel, 1, 0.0, 1.0);
    }
}
