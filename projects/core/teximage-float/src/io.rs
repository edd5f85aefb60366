//! Loading and saving through the `image` crate.
//!
//! Any format `image` can decode loads as RGBA `f32`. Saving picks the pixel type from the
//! file extension: OpenEXR keeps RGBA floats, Radiance HDR keeps RGB floats, JPEG drops
//! alpha and everything else is written as RGBA8 clamped to `[0, 1]`.

use crate::float_image::{FloatImage, CHANNEL_COUNT};
use image::{DynamicImage, ImageFormat, ImageReader, Rgba32FImage};
use std::path::Path;
use thiserror::Error;

/// Errors from [`FloatImage::load`] and [`FloatImage::save`].
#[derive(Debug, Error)]
pub enum ImageIoError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image could not be decoded or encoded.
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// The image has no pixels.
    #[error("Image has no pixels")]
    Empty,
}

impl FloatImage {
    /// Loads the image at `path`, converting it to 4 channel `f32`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImageIoError> {
        let decoded = ImageReader::open(path.as_ref())?
            .with_guessed_format()?
            .decode()?;
        let rgba = decoded.to_rgba32f();

        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageIoError::Empty);
        }

        let mut image = FloatImage::new(width, height);
        let [r, g, b, a] = image.planes_mut();
        for (i, pixel) in rgba.pixels().enumerate() {
            r[i] = pixel.0[0];
            g[i] = pixel.0[1];
            b[i] = pixel.0[2];
            a[i] = pixel.0[3];
        }

        Ok(image)
    }

    /// Saves the image to `path` in the format implied by its extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ImageIoError> {
        let path = path.as_ref();
        if self.pixel_count() == 0 {
            return Err(ImageIoError::Empty);
        }

        let format = ImageFormat::from_path(path)?;

        let mut interleaved = Vec::with_capacity(self.pixel_count() * CHANNEL_COUNT);
        for y in 0..self.height() {
            for x in 0..self.width() {
                interleaved.extend_from_slice(&self.rgba(x, y));
            }
        }

        // Length always matches the dimensions.
        let rgba = Rgba32FImage::from_raw(self.width(), self.height(), interleaved)
            .ok_or(ImageIoError::Empty)?;
        let dynamic = DynamicImage::ImageRgba32F(rgba);

        let encoded = match format {
            ImageFormat::OpenExr => dynamic,
            ImageFormat::Hdr => DynamicImage::ImageRgb32F(dynamic.to_rgb32f()),
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(dynamic.to_rgb8()),
            _ => DynamicImage::ImageRgba8(dynamic.to_rgba8()),
        };

        encoded.save_with_format(path, format)?;
        Ok(())
    }
}
