//! Colour and channel operations applied to every allocated face.

use crate::{TexImage, TexImageError};
use teximage_float::{Channel, CHANNEL_COUNT};

/// Tolerance under which a parameter counts as the identity.
const EPSILON: f32 = 0.0001;

/// Alpha channel index.
const ALPHA: usize = 3;

#[inline]
fn equal(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

fn check_channel(channel: usize) -> Result<(), TexImageError> {
    if channel >= CHANNEL_COUNT {
        log::debug!("Rejected channel index {channel}");
        return Err(TexImageError::ChannelOutOfRange(channel));
    }
    Ok(())
}

impl TexImage {
    /// Converts RGB from gamma space to linear space by raising it to `gamma`.
    /// Negative values become 0. A gamma of 1 does nothing.
    pub fn to_linear(&mut self, gamma: f32) {
        if equal(gamma, 1.0) {
            return;
        }
        self.for_each_face(|image| image.to_linear(0, 3, gamma));
    }

    /// Converts RGB from linear space to gamma space by raising it to `1 / gamma`.
    /// Negative values become 0. A gamma of 1 does nothing.
    pub fn to_gamma(&mut self, gamma: f32) {
        if equal(gamma, 1.0) {
            return;
        }
        self.for_each_face(|image| image.to_gamma(0, 3, gamma));
    }

    /// Applies a 4x4 colour matrix given as columns, then adds `offset`.
    ///
    /// Output channel `k` is `r * columns[0][k] + g * columns[1][k] + b * columns[2][k] +
    /// a * columns[3][k] + offset[k]`.
    pub fn transform(&mut self, columns: [[f32; 4]; 4], offset: [f32; 4]) {
        self.for_each_face(|image| image.transform(columns, offset));
    }

    /// Rearranges channels. Each argument names where that output channel comes from.
    ///
    /// # Examples
    ///
    /// ```
    /// use teximage_api::{Channel, TexImage};
    ///
    /// let mut image = TexImage::new();
    /// image.allocate(1, 1);
    /// image.fill(0.1, 0.2, 0.3, 0.4);
    /// image.swizzle(Channel::Blue, Channel::Green, Channel::Red, Channel::One);
    /// assert_eq!(image.face(0).unwrap().rgba(0, 0), [0.3, 0.2, 0.1, 1.0]);
    /// ```
    pub fn swizzle(&mut self, r: Channel, g: Channel, b: Channel, a: Channel) {
        let sources = [r, g, b, a];
        if sources == [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha] {
            return;
        }
        self.for_each_face(|image| image.swizzle(sources));
    }

    /// `value * scale + bias` on one channel.
    pub fn scale_bias(&mut self, channel: usize, scale: f32, bias: f32) -> Result<(), TexImageError> {
        check_channel(channel)?;
        if equal(scale, 1.0) && equal(bias, 0.0) {
            return Ok(());
        }
        self.for_each_face(|image| image.scale_bias(channel, 1, scale, bias));
        Ok(())
    }

    /// Maps RGB from `[-1, 1]` to `[0, 1]`.
    pub fn pack_normal(&mut self) {
        self.for_each_face(|image| image.pack_normals(0));
    }

    /// Maps RGB from `[0, 1]` to `[-1, 1]`.
    pub fn expand_normal(&mut self) {
        self.for_each_face(|image| image.expand_normals(0));
    }

    /// Moves every texel towards `(red, green, blue, alpha)` by `t`.
    pub fn blend(&mut self, red: f32, green: f32, blue: f32, alpha: f32, t: f32) {
        self.for_each_face(|image| image.blend([red, green, blue, alpha], t));
    }

    /// Multiplies RGB by alpha.
    pub fn premultiply_alpha(&mut self) {
        self.for_each_face(|image| image.premultiply_alpha());
    }

    /// Writes the weighted sum of all four channels to all four channels.
    /// The weights are normalised by their sum first.
    pub fn to_grey_scale(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.for_each_face(|image| image.to_grey_scale([red, green, blue, alpha]));
    }

    /// Paints the outermost ring of texels.
    pub fn set_border(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.for_each_face(|image| image.set_border([r, g, b, a]));
    }

    /// Sets every texel to `(red, green, blue, alpha)`.
    pub fn fill(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.for_each_face(|image| image.fill([red, green, blue, alpha]));
    }

    /// Scales alpha so that testing it against `alpha_ref` passes for roughly `coverage` of
    /// the texels. Alpha is clamped to `[0, 1]` afterwards.
    pub fn scale_alpha_to_coverage(&mut self, coverage: f32, alpha_ref: f32) {
        self.for_each_face(|image| image.scale_alpha_to_coverage(coverage, alpha_ref, ALPHA));
    }

    /// Mirrors every face top to bottom.
    pub fn flip_vertically(&mut self) {
        self.for_each_face(|image| image.flip_vertically());
    }

    /// Copies `channel` of every face in `src` to the same channel here.
    pub fn copy_channel(&mut self, src: &TexImage, channel: usize) -> Result<(), TexImageError> {
        self.copy_channel_to(src, channel, channel)
    }

    /// Copies `src_channel` of every face in `src` to `dst_channel` here.
    ///
    /// Both images must have the same face count, and every face must be allocated on both
    /// sides with the same extent. Nothing is written unless all of that holds.
    pub fn copy_channel_to(
        &mut self,
        src: &TexImage,
        src_channel: usize,
        dst_channel: usize,
    ) -> Result<(), TexImageError> {
        check_channel(src_channel)?;
        check_channel(dst_channel)?;

        let count = self.face_count();
        if count != src.face_count() {
            log::debug!(
                "Rejected channel copy between {count} and {} faces",
                src.face_count()
            );
            return Err(TexImageError::FaceCountMismatch {
                expected: count,
                actual: src.face_count(),
            });
        }

        for i in 0..count {
            let source = src.checked_face(i)?;
            self.check_face(i, source.width(), source.height())?;
        }

        for (i, dst) in self.detach().faces.iter_mut().enumerate() {
            if let (Some(dst), Some(source)) = (dst.as_mut(), src.face(i)) {
                dst.copy_channel_from(source, src_channel, dst_channel);
            }
        }

        Ok(())
    }

    /// Replaces every face with a normal map derived from its luminance and marks the
    /// image as a normal map.
    ///
    /// The four weights blend derivative kernels of increasing width (3, 5, 7 and 9
    /// texels). Normals are packed into `[0, 1]` and alpha is kept.
    pub fn to_normal_map(&mut self, small: f32, medium: f32, big: f32, large: f32) {
        let wrap = self.wrap_mode();
        let weights = [small, medium, big, large];

        let m = self.detach();
        for image in m.faces.iter_mut().flatten() {
            *image = image.to_normal_map(wrap, weights);
        }
        m.is_normal_map = true;
    }

    /// Re-normalises packed normals, e.g. after filtering.
    pub fn normalize_normal_map(&mut self) {
        self.for_each_face(|image| image.normalize_normal_map());
    }
}
