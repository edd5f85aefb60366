//! Resizing and mipmap generation for every face.

use crate::{AlphaMode, MipmapFilter, ResizeFilter, RoundMode, TexImage, TexImageError, TextureType};
use teximage_common::extent::{nearest_power_of_two, next_power_of_two, previous_power_of_two};
use teximage_float::filter::{BoxFilter, Filter, KaiserFilter, MitchellFilter, TriangleFilter};

/// Channel that weights the others when alpha is treated as transparency.
const ALPHA_CHANNEL: usize = 3;

/// Width of the Kaiser window used for resizing and mipmaps.
const KAISER_WIDTH: f32 = 3.0;

impl ResizeFilter {
    fn filter(self) -> Box<dyn Filter> {
        match self {
            ResizeFilter::Box => Box::new(BoxFilter),
            ResizeFilter::Triangle => Box::new(TriangleFilter),
            ResizeFilter::Kaiser => Box::new(KaiserFilter::new(KAISER_WIDTH)),
            ResizeFilter::Mitchell => Box::new(MitchellFilter::default()),
        }
    }
}

impl MipmapFilter {
    fn filter(self) -> Box<dyn Filter> {
        match self {
            MipmapFilter::Box => Box::new(BoxFilter),
            MipmapFilter::Triangle => Box::new(TriangleFilter),
            MipmapFilter::Kaiser => Box::new(KaiserFilter::new(KAISER_WIDTH)),
        }
    }
}

impl RoundMode {
    fn apply(self, extent: u32) -> u32 {
        match self {
            RoundMode::None => extent,
            RoundMode::ToNextPowerOfTwo => next_power_of_two(extent),
            RoundMode::ToNearestPowerOfTwo => nearest_power_of_two(extent),
            RoundMode::ToPreviousPowerOfTwo => previous_power_of_two(extent),
        }
    }
}

impl TexImage {
    fn weighting_channel(&self) -> Option<usize> {
        match self.alpha_mode() {
            AlphaMode::Transparency => Some(ALPHA_CHANNEL),
            AlphaMode::None => None,
        }
    }

    /// Resamples every face to `width x height`.
    ///
    /// Does nothing when face 0 already has that extent. Cube faces stay square: the
    /// height is replaced by the width.
    ///
    /// # Examples
    ///
    /// ```
    /// use teximage_api::{ResizeFilter, TexImage};
    ///
    /// let mut image = TexImage::new();
    /// image.allocate(16, 8);
    /// image.resize(5, 3, ResizeFilter::Mitchell);
    /// assert_eq!((image.width(), image.height()), (5, 3));
    /// ```
    pub fn resize(&mut self, width: u32, height: u32, filter: ResizeFilter) {
        if self.face_count() == 0 {
            return;
        }
        if self.face(0).is_some_and(|f| f.width() == width && f.height() == height) {
            return;
        }

        let height = match self.texture_type() {
            TextureType::Cube => width,
            TextureType::Plane => height,
        };

        let kernel = filter.filter();
        let wrap = self.wrap_mode();
        let alpha = self.weighting_channel();
        self.for_each_face(|image| {
            *image = image.resize(kernel.as_ref(), width, height, wrap, alpha);
        });
    }

    /// Shrinks the image so neither side exceeds `max_extent`, keeping the aspect ratio,
    /// then rounds each side with `round_mode`.
    ///
    /// A `max_extent` of 0 means unbounded. With rounding enabled the limit itself is
    /// first lowered to a power of two so rounding never exceeds it.
    pub fn resize_to_extent(&mut self, max_extent: u32, round_mode: RoundMode, filter: ResizeFilter) {
        let (mut w, mut h) = (self.width(), self.height());
        if w == 0 || h == 0 {
            return;
        }

        let max_extent = match round_mode {
            RoundMode::None => max_extent,
            _ => previous_power_of_two(max_extent),
        };

        let longest = w.max(h);
        if max_extent != 0 && longest > max_extent {
            w = ((w as u64 * max_extent as u64) / longest as u64).max(1) as u32;
            h = ((h as u64 * max_extent as u64) / longest as u64).max(1) as u32;
        }

        w = round_mode.apply(w);
        h = round_mode.apply(h);

        if self.texture_type() == TextureType::Cube {
            w = w.max(h);
            h = w;
        }

        self.resize(w, h, filter);
    }

    /// Replaces every face with its next mip level: half size, rounded down, never below 1.
    ///
    /// Fails without touching the image when the base level is 1x1 or no face is
    /// allocated.
    pub fn build_next_mipmap(&mut self, filter: MipmapFilter) -> Result<(), TexImageError> {
        let base = self
            .face(0)
            .or_else(|| (0..self.face_count()).find_map(|i| self.face(i)))
            .ok_or(TexImageError::NoFaces)?;
        if base.width() == 1 && base.height() == 1 {
            return Err(TexImageError::MipmapChainComplete);
        }

        let wrap = self.wrap_mode();
        let alpha = self.weighting_channel();
        if filter == MipmapFilter::Box && alpha.is_none() {
            self.for_each_face(|image| *image = image.fast_downsample());
        } else {
            let kernel = filter.filter();
            self.for_each_face(|image| {
                *image = image.downsample(kernel.as_ref(), wrap, alpha);
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    fn plane(width: u32, height: u32) -> TexImage {
        let mut image = TexImage::new();
        image.allocate(width, height);
        image.fill(0.25, 0.5, 0.75, 1.0);
        image
    }

    #[rstest]
    fn resize_to_same_extent_keeps_sharing(
        #[values(ResizeFilter::Box, ResizeFilter::Triangle, ResizeFilter::Kaiser, ResizeFilter::Mitchell)]
        filter: ResizeFilter,
    ) {
        let original = plane(7, 3);
        let mut copy = original.clone();
        copy.resize(7, 3, filter);
        assert!(copy.shares_storage_with(&original));
    }

    #[test]
    fn every_filter_preserves_constant_colour() {
        for filter in ResizeFilter::all_values() {
            let mut image = plane(9, 6);
            image.resize(4, 13, *filter);
            let face = image.face(0).unwrap();
            assert_eq!((face.width(), face.height()), (4, 13));
            for [r, g, b, a] in [face.rgba(0, 0), face.rgba(3, 12), face.rgba(2, 6)] {
                assert!((r - 0.25).abs() < 1e-4, "{filter:?}");
                assert!((g - 0.5).abs() < 1e-4, "{filter:?}");
                assert!((b - 0.75).abs() < 1e-4, "{filter:?}");
                assert!((a - 1.0).abs() < 1e-4, "{filter:?}");
            }
        }
    }

    #[test]
    fn cube_resize_forces_square() {
        let mut image = TexImage::new();
        image.set_texture_type(TextureType::Cube);
        image.allocate(8, 8);
        image.resize(4, 2, ResizeFilter::Box);
        for i in 0..6 {
            let face = image.face(i).unwrap();
            assert_eq!((face.width(), face.height()), (4, 4));
        }
    }

    #[rstest]
    #[case(300, 200, 0, RoundMode::None, 300, 200)]
    #[case(300, 200, 150, RoundMode::None, 150, 100)]
    #[case(300, 200, 150, RoundMode::ToNextPowerOfTwo, 128, 128)]
    #[case(300, 200, 150, RoundMode::ToPreviousPowerOfTwo, 128, 64)]
    #[case(300, 200, 150, RoundMode::ToNearestPowerOfTwo, 128, 64)]
    #[case(100, 60, 0, RoundMode::ToNearestPowerOfTwo, 128, 64)]
    #[case(1000, 2, 100, RoundMode::None, 100, 1)]
    fn resize_to_extent_scales_and_rounds(
        #[case] w: u32,
        #[case] h: u32,
        #[case] max_extent: u32,
        #[case] round_mode: RoundMode,
        #[case] expected_w: u32,
        #[case] expected_h: u32,
    ) {
        let mut image = plane(w, h);
        image.resize_to_extent(max_extent, round_mode, ResizeFilter::Box);
        assert_eq!((image.width(), image.height()), (expected_w, expected_h));
    }

    #[test]
    fn resize_to_extent_squares_cubes() {
        let mut image = TexImage::new();
        image.set_texture_type(TextureType::Cube);
        image.allocate(16, 16);
        image.resize_to_extent(8, RoundMode::None, ResizeFilter::Triangle);
        assert_eq!((image.width(), image.height()), (8, 8));
    }

    #[test]
    fn mipmap_chain_reaches_one_by_one() {
        for filter in MipmapFilter::all_values() {
            let mut image = plane(8, 2);
            let mut extents = vec![];
            while image.build_next_mipmap(*filter).is_ok() {
                extents.push((image.width(), image.height()));
            }
            assert_eq!(extents, vec![(4, 1), (2, 1), (1, 1)], "{filter:?}");
            assert_eq!(extents.len() as u32 + 1, plane(8, 2).count_mipmaps());
        }
    }

    #[test]
    fn mipmap_of_one_by_one_fails_unchanged() {
        let mut image = plane(1, 1);
        let before = image.clone();
        assert!(matches!(
            image.build_next_mipmap(MipmapFilter::Box),
            Err(TexImageError::MipmapChainComplete)
        ));
        assert!(image.shares_storage_with(&before));
    }

    #[test]
    fn mipmap_without_faces_fails() {
        let mut image = TexImage::new();
        image.set_texture_type(TextureType::Cube);
        assert!(matches!(
            image.build_next_mipmap(MipmapFilter::Triangle),
            Err(TexImageError::NoFaces)
        ));
    }

    #[test]
    fn transparent_texels_do_not_bleed_colour() {
        let mut image = TexImage::new();
        image.allocate(2, 2);
        image.set_alpha_mode(AlphaMode::Transparency);
        image
            .set_image_2d(
                InputData::Rgba32F(&[
                    1.0, 0.0, 0.0, 1.0, //
                    0.0, 1.0, 0.0, 0.0, //
                    1.0, 0.0, 0.0, 1.0, //
                    0.0, 1.0, 0.0, 0.0,
                ]),
                2,
                2,
                0,
            )
            .unwrap();

        image.build_next_mipmap(MipmapFilter::Box).unwrap();
        let [r, g, _, a] = image.face(0).unwrap().rgba(0, 0);
        assert!((a - 0.5).abs() < 1e-5);
        assert!(r > 0.99, "red = {r}");
        assert!(g < 0.01, "green = {g}");
    }
}
