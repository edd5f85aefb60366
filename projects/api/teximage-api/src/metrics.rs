//! Comparisons between texture images.
//!
//! The error metrics return [`f32::MAX`] when the two images cannot be compared
//! face by face.

use crate::{AlphaMode, TexImage};
use teximage_float::FloatImage;

const ALPHA: usize = 3;

/// Pairs up the faces of two images, or [`None`] if any pair is missing or mismatched.
fn face_pairs<'a>(a: &'a TexImage, b: &'a TexImage) -> Option<Vec<(&'a FloatImage, &'a FloatImage)>> {
    if a.face_count() != b.face_count() {
        return None;
    }

    (0..a.face_count())
        .map(|i| {
            let pair = (a.face(i)?, b.face(i)?);
            pair.0.same_extent(pair.1).then_some(pair)
        })
        .collect()
}

fn root_mean(sum: f64, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    (sum / count as f64).sqrt() as f32
}

impl TexImage {
    /// Mean, over allocated faces, of the fraction of texels whose alpha exceeds
    /// `alpha_ref`. 0 when no face is allocated.
    pub fn alpha_test_coverage(&self, alpha_ref: f32) -> f32 {
        let (sum, faces) = self
            .m
            .faces
            .iter()
            .flatten()
            .fold((0.0f32, 0usize), |(sum, faces), image| {
                (sum + image.alpha_test_coverage(alpha_ref, ALPHA), faces + 1)
            });

        if faces == 0 {
            return 0.0;
        }
        sum / faces as f32
    }

    /// Root mean squared RGB error against `reference`, summed over the three channels
    /// and averaged over all texels of all faces.
    ///
    /// When `reference` treats alpha as transparency each squared difference is
    /// multiplied by the reference alpha and divided by 255.
    pub fn root_mean_squared_error_rgb(&self, reference: &TexImage) -> f32 {
        let Some(pairs) = face_pairs(self, reference) else {
            log::debug!("RGB error requested for incompatible images");
            return f32::MAX;
        };

        let weighted = reference.alpha_mode() == AlphaMode::Transparency;
        let mut total = 0usize;
        let mut mse = 0.0f64;

        for (image, reference) in pairs {
            total += image.pixel_count();
            let alpha = reference.channel(ALPHA);
            for c in 0..3 {
                for (i, (x, y)) in image.channel(c).iter().zip(reference.channel(c)).enumerate() {
                    let d = x - y;
                    if weighted {
                        mse += (d * d * alpha[i]) as f64 / 255.0;
                    } else {
                        mse += (d * d) as f64;
                    }
                }
            }
        }

        root_mean(mse, total)
    }

    /// Root mean squared alpha error against `reference`, over all texels of all faces.
    pub fn root_mean_squared_error_alpha(&self, reference: &TexImage) -> f32 {
        let Some(pairs) = face_pairs(self, reference) else {
            log::debug!("Alpha error requested for incompatible images");
            return f32::MAX;
        };

        let mut total = 0usize;
        let mut mse = 0.0f64;
        for (image, reference) in pairs {
            total += image.pixel_count();
            for (x, y) in image.channel(ALPHA).iter().zip(reference.channel(ALPHA)) {
                let d = x - y;
                mse += (d * d) as f64;
            }
        }

        root_mean(mse, total)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    fn solid(width: u32, height: u32, rgba: [f32; 4]) -> TexImage {
        let mut image = TexImage::new();
        image.allocate(width, height);
        image.fill(rgba[0], rgba[1], rgba[2], rgba[3]);
        image
    }

    #[test]
    fn error_against_self_is_zero() {
        let image = solid(3, 3, [0.2, 0.4, 0.6, 0.8]);
        assert_eq!(image.root_mean_squared_error_rgb(&image), 0.0);
        assert_eq!(image.root_mean_squared_error_alpha(&image), 0.0);
    }

    #[test]
    fn rgb_error_sums_channels() {
        let a = solid(2, 2, [0.0, 0.0, 0.0, 1.0]);
        let b = solid(2, 2, [0.3, 0.4, 0.0, 0.0]);
        // sqrt(0.09 + 0.16)
        assert!((a.root_mean_squared_error_rgb(&b) - 0.5).abs() < 1e-6);
        assert!((a.root_mean_squared_error_alpha(&b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn transparent_reference_weights_by_alpha() {
        let a = solid(1, 1, [1.0, 0.0, 0.0, 1.0]);
        let mut b = solid(1, 1, [0.0, 0.0, 0.0, 0.5]);
        b.set_alpha_mode(AlphaMode::Transparency);
        let expected = (0.5f64 / 255.0).sqrt() as f32;
        assert!((a.root_mean_squared_error_rgb(&b) - expected).abs() < 1e-6);
    }

    #[test]
    fn incompatible_images_give_max() {
        let plane = solid(2, 2, [0.0; 4]);
        let other_size = solid(4, 2, [0.0; 4]);
        let mut cube = TexImage::new();
        cube.set_texture_type(TextureType::Cube);
        cube.allocate(2, 2);
        let mut partial = TexImage::new();
        partial.set_texture_type(TextureType::Cube);
        partial.allocate_face(0, 2, 2).unwrap();

        assert_eq!(plane.root_mean_squared_error_rgb(&cube), f32::MAX);
        assert_eq!(plane.root_mean_squared_error_alpha(&other_size), f32::MAX);
        assert_eq!(cube.root_mean_squared_error_rgb(&partial), f32::MAX);
    }

    #[test]
    fn coverage_of_filled_image() {
        let image = solid(4, 4, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(image.alpha_test_coverage(0.5), 1.0);
        assert_eq!(TexImage::new().alpha_test_coverage(0.5), 0.0);
    }

    #[test]
    fn coverage_averages_allocated_faces() {
        let mut image = TexImage::new();
        image.set_texture_type(TextureType::Cube);
        image.allocate_face(0, 2, 2).unwrap();
        image.allocate_face(3, 2, 2).unwrap();
        image
            .set_image_2d(InputData::Rgba32F(&[1.0; 16]), 2, 2, 0)
            .unwrap();
        assert_eq!(image.alpha_test_coverage(0.5), 0.5);
    }
}
