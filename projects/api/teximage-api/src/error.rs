//! Error types for texture image operations.

use teximage_bc::BlockDecodeError;
use thiserror::Error;

/// Errors that can occur when mutating a [`TexImage`](crate::TexImage).
///
/// Every operation that returns one of these has left the image untouched.
#[derive(Debug, Error)]
pub enum TexImageError {
    /// The face index is not below the face count.
    #[error("Face {index} out of range: image has {count} faces")]
    FaceOutOfRange {
        /// The requested face
        index: usize,
        /// Number of face slots in the image
        count: usize,
    },

    /// The face slot exists but holds no pixel data.
    #[error("Face {0} is not allocated")]
    MissingFace(usize),

    /// The supplied extent does not match the face.
    #[error("Dimension mismatch: face is {expected_width}x{expected_height}, got {width}x{height}")]
    DimensionMismatch {
        /// Width of the face
        expected_width: u32,
        /// Height of the face
        expected_height: u32,
        /// Width supplied by the caller
        width: u32,
        /// Height supplied by the caller
        height: u32,
    },

    /// Two images that must have the same number of faces do not.
    #[error("Face count mismatch: expected {expected}, got {actual}")]
    FaceCountMismatch {
        /// Face count of the destination
        expected: usize,
        /// Face count of the source
        actual: usize,
    },

    /// The input buffer is too short for the requested extent.
    #[error("Input too short: need {required} elements, got {actual}")]
    InputTooShort {
        /// Elements (bytes or floats) required
        required: usize,
        /// Elements supplied
        actual: usize,
    },

    /// A channel index is not below 4.
    #[error("Channel {0} out of range: images have 4 channels")]
    ChannelOutOfRange(usize),

    /// The base level is already 1x1, no further mipmap can be built.
    #[error("Mipmap chain is complete: base level is 1x1")]
    MipmapChainComplete,

    /// The image has no allocated faces.
    #[error("Image has no faces")]
    NoFaces,

    /// Loading or saving failed.
    #[cfg(feature = "image-io")]
    #[error(transparent)]
    Io(#[from] teximage_float::ImageIoError),
}

impl From<BlockDecodeError> for TexImageError {
    fn from(error: BlockDecodeError) -> Self {
        match error {
            BlockDecodeError::InputTooShort { required, actual } => {
                TexImageError::InputTooShort { required, actual }
            }
        }
    }
}
