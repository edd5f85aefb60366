#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

mod color;
mod error;
mod input;
mod metrics;
mod options;
mod resample;
mod tex_image;

#[cfg(test)]
pub(crate) mod test_prelude;

pub use error::TexImageError;
pub use input::{InputData, PlanarData};
pub use options::{AlphaMode, MipmapFilter, ResizeFilter, RoundMode, TextureType};
pub use tex_image::TexImage;

pub use teximage_bc::{BlockFormat, Decoder};
pub use teximage_common::extent::{
    count_mipmaps, nearest_power_of_two, next_power_of_two, previous_power_of_two,
};
pub use teximage_float::{Channel, FloatImage, WrapMode};
