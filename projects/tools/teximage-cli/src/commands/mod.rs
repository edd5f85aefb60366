pub mod compare;
pub mod decode;
pub mod mipmaps;
pub mod resize;
