//! Copying caller-supplied pixel data into existing faces.
//!
//! Every entry point validates the face slot, its extent and the buffer length before the
//! image is detached, so a rejected call leaves all handles untouched.

use crate::{TexImage, TexImageError};
use likely_stable::unlikely;
use teximage_bc::{BlockFormat, Decoder};
use teximage_float::CHANNEL_COUNT;

/// Interleaved pixel data accepted by [`TexImage::set_image_2d`].
#[derive(Debug, Clone, Copy)]
pub enum InputData<'a> {
    /// 8 bits per channel, stored B, G, R, A. Normalised to `[0, 1]` on copy.
    Bgra8(&'a [u8]),
    /// 32-bit floats, stored R, G, B, A. Copied as is.
    Rgba32F(&'a [f32]),
}

impl InputData<'_> {
    fn len(&self) -> usize {
        match self {
            InputData::Bgra8(data) => data.len(),
            InputData::Rgba32F(data) => data.len(),
        }
    }
}

/// One slice per channel, accepted by [`TexImage::set_image_2d_planar`].
#[derive(Debug, Clone, Copy)]
pub enum PlanarData<'a> {
    /// 8 bits per channel. Normalised to `[0, 1]` on copy.
    U8 {
        /// Red plane
        r: &'a [u8],
        /// Green plane
        g: &'a [u8],
        /// Blue plane
        b: &'a [u8],
        /// Alpha plane
        a: &'a [u8],
    },
    /// 32-bit floats. Copied as is.
    F32 {
        /// Red plane
        r: &'a [f32],
        /// Green plane
        g: &'a [f32],
        /// Blue plane
        b: &'a [f32],
        /// Alpha plane
        a: &'a [f32],
    },
}

impl PlanarData<'_> {
    fn shortest_plane(&self) -> usize {
        match self {
            PlanarData::U8 { r, g, b, a } => [r.len(), g.len(), b.len(), a.len()],
            PlanarData::F32 { r, g, b, a } => [r.len(), g.len(), b.len(), a.len()],
        }
        .into_iter()
        .min()
        .unwrap_or(0)
    }
}

#[inline]
fn unorm8(value: u8) -> f32 {
    value as f32 / 255.0
}

fn check_length(required: usize, actual: usize) -> Result<(), TexImageError> {
    if actual < required {
        log::debug!("Rejected input buffer of {actual} elements, need {required}");
        return Err(TexImageError::InputTooShort { required, actual });
    }
    Ok(())
}

impl TexImage {
    /// Overwrites face `face` with interleaved pixels.
    ///
    /// The face must already be allocated at `width x height`, and `data` must hold at least
    /// `width * height * 4` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use teximage_api::{InputData, TexImage};
    ///
    /// let mut image = TexImage::new();
    /// image.allocate(1, 1);
    /// image.set_image_2d(InputData::Bgra8(&[0, 0, 255, 255]), 1, 1, 0).unwrap();
    /// assert_eq!(image.face(0).unwrap().rgba(0, 0), [1.0, 0.0, 0.0, 1.0]);
    /// ```
    pub fn set_image_2d(
        &mut self,
        data: InputData<'_>,
        width: u32,
        height: u32,
        face: usize,
    ) -> Result<(), TexImageError> {
        self.check_face(face, width, height)?;
        let count = width as usize * height as usize;
        check_length(count * CHANNEL_COUNT, data.len())?;

        let image = self.face_mut(face)?;
        let [r, g, b, a] = image.planes_mut();
        match data {
            InputData::Bgra8(bytes) => {
                for (i, texel) in bytes.chunks_exact(CHANNEL_COUNT).take(count).enumerate() {
                    b[i] = unorm8(texel[0]);
                    g[i] = unorm8(texel[1]);
                    r[i] = unorm8(texel[2]);
                    a[i] = unorm8(texel[3]);
                }
            }
            InputData::Rgba32F(floats) => {
                for (i, texel) in floats.chunks_exact(CHANNEL_COUNT).take(count).enumerate() {
                    r[i] = texel[0];
                    g[i] = texel[1];
                    b[i] = texel[2];
                    a[i] = texel[3];
                }
            }
        }

        Ok(())
    }

    /// Overwrites face `face` from four separate channel planes of `width * height`
    /// elements each.
    pub fn set_image_2d_planar(
        &mut self,
        data: PlanarData<'_>,
        width: u32,
        height: u32,
        face: usize,
    ) -> Result<(), TexImageError> {
        self.check_face(face, width, height)?;
        let count = width as usize * height as usize;
        check_length(count, data.shortest_plane())?;

        let image = self.face_mut(face)?;
        let planes = image.planes_mut();
        match data {
            PlanarData::U8 { r, g, b, a } => {
                for (dst, src) in planes.into_iter().zip([r, g, b, a]) {
                    for (out, value) in dst.iter_mut().zip(&src[..count]) {
                        *out = unorm8(*value);
                    }
                }
            }
            PlanarData::F32 { r, g, b, a } => {
                for (dst, src) in planes.into_iter().zip([r, g, b, a]) {
                    dst.copy_from_slice(&src[..count]);
                }
            }
        }

        Ok(())
    }

    /// Decodes BC1, BC2 or BC3 blocks into face `face`.
    ///
    /// Blocks are read in row-major block order; `data` must hold
    /// `ceil(width / 4) * ceil(height / 4)` of them. Texels of edge blocks that fall
    /// outside `width x height` are discarded.
    pub fn set_image_2d_compressed(
        &mut self,
        format: BlockFormat,
        decoder: Decoder,
        width: u32,
        height: u32,
        face: usize,
        data: &[u8],
    ) -> Result<(), TexImageError> {
        self.check_face(face, width, height)?;
        check_length(format.data_size(width, height), data.len())?;

        let image = self.face_mut(face)?;
        let (w, h) = (width as usize, height as usize);
        let [r, g, b, a] = image.planes_mut();

        teximage_bc::decode_blocks(format, decoder, width, height, data, |bx, by, block| {
            for (x, y, texel) in block.iter_pixels() {
                let (px, py) = (bx * 4 + x, by * 4 + y);
                if unlikely(px >= w || py >= h) {
                    continue;
                }

                let [tr, tg, tb, ta] = texel.to_unorm();
                let i = py * w + px;
                r[i] = tr;
                g[i] = tg;
                b[i] = tb;
                a[i] = ta;
            }
        })?;

        Ok(())
    }
}
