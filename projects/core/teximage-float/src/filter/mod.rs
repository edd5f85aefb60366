//! Reconstruction filters used for resampling.
//!
//! Every filter is a symmetric function of distance from the sample centre that is zero
//! outside `[-width, width]`. [`PolyphaseKernel`] turns a filter into per-output-sample
//! weights for a fixed source and destination length.

mod kernels;
mod polyphase;

pub use kernels::*;
pub use polyphase::*;

/// A 1D reconstruction filter.
pub trait Filter {
    /// Half-width of the filter's support.
    fn width(&self) -> f32;

    /// Filter value at distance `x` from the centre.
    fn evaluate(&self, x: f32) -> f32;

    /// Averages `samples` evaluations spread evenly across the unit interval
    /// starting at `x`, each position multiplied by `scale`.
    ///
    /// This integrates the filter over one source texel, which is what keeps
    /// minification from aliasing.
    fn sample_box(&self, x: f32, scale: f32, samples: u32) -> f32 {
        let isamples = 1.0 / samples as f32;
        let mut sum = 0.0f64;
        for s in 0..samples {
            let p = (x + (s as f32 + 0.5) * isamples) * scale;
            sum += self.evaluate(p) as f64;
        }
        (sum * isamples as f64) as f32
    }
}

impl<F: Filter + ?Sized> Filter for &F {
    #[inline]
    fn width(&self) -> f32 {
        (**self).width()
    }

    #[inline]
    fn evaluate(&self, x: f32) -> f32 {
        (**self).evaluate(x)
    }

    #[inline]
    fn sample_box(&self, x: f32, scale: f32, samples: u32) -> f32 {
        (**self).sample_box(x, scale, samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_box_integrates_over_unit_interval() {
        // Triangle integrated over [0, 1] is 0.5
        let value = TriangleFilter.sample_box(0.0, 1.0, 1024);
        assert!((value - 0.5).abs() < 1e-4);
    }

    #[test]
    fn sample_box_with_one_sample_evaluates_midpoint() {
        assert_eq!(TriangleFilter.sample_box(-0.5, 1.0, 1), 1.0);
        assert_eq!(BoxFilter.sample_box(0.25, 1.0, 1), 0.0);
    }
}
