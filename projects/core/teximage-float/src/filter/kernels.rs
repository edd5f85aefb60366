//! The concrete reconstruction filters.

use super::Filter;
use core::f32::consts::PI;

/// Nearest-neighbour box, 1 inside `[-0.5, 0.5]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct BoxFilter;

impl Filter for BoxFilter {
    #[inline]
    fn width(&self) -> f32 {
        0.5
    }

    #[inline]
    fn evaluate(&self, x: f32) -> f32 {
        if x.abs() <= 0.5 {
            1.0
        } else {
            0.0
        }
    }
}

/// Linear tent, `1 - |x|` inside `[-1, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TriangleFilter;

impl Filter for TriangleFilter {
    #[inline]
    fn width(&self) -> f32 {
        1.0
    }

    #[inline]
    fn evaluate(&self, x: f32) -> f32 {
        let x = x.abs();
        if x < 1.0 {
            1.0 - x
        } else {
            0.0
        }
    }
}

/// Kaiser windowed sinc.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KaiserFilter {
    width: f32,
    alpha: f32,
    stretch: f32,
}

impl KaiserFilter {
    /// Creates a Kaiser filter of the given half-width with `alpha = 4` and `stretch = 1`.
    pub fn new(width: f32) -> Self {
        Self {
            width,
            alpha: 4.0,
            stretch: 1.0,
        }
    }

    /// Overrides the window shape (`alpha`) and the sinc frequency scale (`stretch`).
    pub fn with_parameters(mut self, alpha: f32, stretch: f32) -> Self {
        self.alpha = alpha;
        self.stretch = stretch;
        self
    }
}

impl Default for KaiserFilter {
    fn default() -> Self {
        Self::new(3.0)
    }
}

/// `sin(x) / x`, with a Taylor expansion around 0.
fn sinc(x: f32) -> f32 {
    if x.abs() < 0.0001 {
        1.0 + x * x * (-1.0 / 6.0 + x * x * 1.0 / 120.0)
    } else {
        x.sin() / x
    }
}

/// Zeroth order modified Bessel function of the first kind.
fn bessel0(x: f32) -> f32 {
    const EPSILON_RATIO: f32 = 1e-6;
    let xh = 0.5 * x;
    let mut sum = 1.0f32;
    let mut pow = 1.0f32;
    let mut k = 0;
    let mut ds = 1.0f32;

    while ds > sum * EPSILON_RATIO {
        k += 1;
        pow *= xh / k as f32;
        ds = pow * pow;
        sum += ds;
    }

    sum
}

impl Filter for KaiserFilter {
    #[inline]
    fn width(&self) -> f32 {
        self.width
    }

    fn evaluate(&self, x: f32) -> f32 {
        let sinc_value = sinc(PI * x * self.stretch);
        let t = x / self.width;
        if 1.0 - t * t >= 0.0 {
            sinc_value * bessel0(self.alpha * (1.0 - t * t).sqrt()) / bessel0(self.alpha)
        } else {
            0.0
        }
    }
}

/// Mitchell-Netravali cubic.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MitchellFilter {
    p0: f32,
    p2: f32,
    p3: f32,
    q0: f32,
    q1: f32,
    q2: f32,
    q3: f32,
}

impl MitchellFilter {
    /// Creates the cubic for the given `b` and `c` parameters.
    pub fn new(b: f32, c: f32) -> Self {
        Self {
            p0: (6.0 - 2.0 * b) / 6.0,
            p2: (-18.0 + 12.0 * b + 6.0 * c) / 6.0,
            p3: (12.0 - 9.0 * b - 6.0 * c) / 6.0,
            q0: (8.0 * b + 24.0 * c) / 6.0,
            q1: (-12.0 * b - 48.0 * c) / 6.0,
            q2: (6.0 * b + 30.0 * c) / 6.0,
            q3: (-b - 6.0 * c) / 6.0,
        }
    }
}

impl Default for MitchellFilter {
    /// `B = C = 1/3`.
    fn default() -> Self {
        Self::new(1.0 / 3.0, 1.0 / 3.0)
    }
}

impl Filter for MitchellFilter {
    #[inline]
    fn width(&self) -> f32 {
        2.0
    }

    #[inline]
    fn evaluate(&self, x: f32) -> f32 {
        let x = x.abs();
        if x < 1.0 {
            self.p0 + x * x * (self.p2 + x * self.p3)
        } else if x < 2.0 {
            self.q0 + x * (self.q1 + x * (self.q2 + x * self.q3))
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&BoxFilter)]
    #[case(&TriangleFilter)]
    #[case(&KaiserFilter::default())]
    #[case(&MitchellFilter::default())]
    fn filters_are_symmetric_and_vanish_outside_support(#[case] filter: &dyn Filter) {
        for i in 0..50 {
            let x = i as f32 * 0.07;
            assert!((filter.evaluate(x) - filter.evaluate(-x)).abs() < 1e-6);
        }
        assert_eq!(filter.evaluate(filter.width() + 0.01), 0.0);
        assert_eq!(filter.evaluate(-filter.width() - 0.01), 0.0);
    }

    #[test]
    fn kaiser_peaks_at_one_and_crosses_zero_at_integers() {
        let kaiser = KaiserFilter::default();
        assert!((kaiser.evaluate(0.0) - 1.0).abs() < 1e-6);
        assert!(kaiser.evaluate(1.0).abs() < 1e-5);
        assert!(kaiser.evaluate(2.0).abs() < 1e-5);
    }

    #[test]
    fn mitchell_matches_known_values() {
        let mitchell = MitchellFilter::default();
        // (6 - 2/3) / 6
        assert!((mitchell.evaluate(0.0) - 8.0 / 9.0).abs() < 1e-6);
        // q0 + q1 + q2 + q3 at x = 1, matches p0 + p2 + p3
        assert!((mitchell.evaluate(1.0) - 1.0 / 18.0).abs() < 1e-6);
    }

    #[test]
    fn bessel0_of_zero_is_one() {
        assert_eq!(bessel0(0.0), 1.0);
        // I0(4) ~ 11.3019
        assert!((bessel0(4.0) - 11.3019).abs() < 1e-3);
    }
}
