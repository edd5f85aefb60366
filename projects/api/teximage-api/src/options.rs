//! Value types configuring a texture image and its operations.

use derive_enum_all_values::AllValues;

/// Shape of the texture.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, AllValues)]
pub enum TextureType {
    /// A single 2D face.
    #[default]
    Plane,
    /// Six square faces.
    Cube,
}

impl TextureType {
    /// Number of face slots for this type.
    #[inline]
    pub const fn face_count(self) -> usize {
        match self {
            TextureType::Plane => 1,
            TextureType::Cube => 6,
        }
    }
}

/// How the alpha channel is interpreted during resampling.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, AllValues)]
pub enum AlphaMode {
    /// Alpha is an independent channel.
    #[default]
    None,
    /// Alpha is coverage; colour is weighted by it when filtering.
    Transparency,
}

/// Filters available to [`TexImage::resize`](crate::TexImage::resize).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, AllValues)]
pub enum ResizeFilter {
    /// 1 texel box.
    #[default]
    Box,
    /// Linear tent.
    Triangle,
    /// Kaiser windowed sinc, 3 texels wide.
    Kaiser,
    /// Mitchell-Netravali cubic (B = C = 1/3).
    Mitchell,
}

/// Filters available to [`TexImage::build_next_mipmap`](crate::TexImage::build_next_mipmap).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, AllValues)]
pub enum MipmapFilter {
    /// 2x2 box, taking the fast path when alpha weighting is off.
    #[default]
    Box,
    /// Linear tent.
    Triangle,
    /// Kaiser windowed sinc, 3 texels wide.
    Kaiser,
}

/// Power of two rounding applied by [`TexImage::resize_to_extent`](crate::TexImage::resize_to_extent).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, AllValues)]
pub enum RoundMode {
    /// Keep the scaled extent as is.
    #[default]
    None,
    /// Round each extent up to a power of two.
    ToNextPowerOfTwo,
    /// Round each extent to the closest power of two, ties going up.
    ToNearestPowerOfTwo,
    /// Round each extent down to a power of two.
    ToPreviousPowerOfTwo,
}
