#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

mod coverage;
pub mod filter;
mod float_image;
mod normal_map;
mod ops;
mod resize;
mod wrap_mode;

#[cfg(feature = "image-io")]
pub mod io;

pub use float_image::{FloatImage, CHANNEL_COUNT};
pub use normal_map::{Kernel2, LUMINANCE_WEIGHTS};
pub use ops::Channel;
pub use resize::half_extent;
pub use wrap_mode::WrapMode;

#[cfg(feature = "image-io")]
pub use io::ImageIoError;
