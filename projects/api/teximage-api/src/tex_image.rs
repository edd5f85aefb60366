//! The copy-on-write texture container.

use crate::{AlphaMode, TexImageError, TextureType};
use std::sync::Arc;
use teximage_common::extent;
use teximage_float::{FloatImage, WrapMode};

/// State shared between handles until one of them is mutated.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Private {
    pub(crate) texture_type: TextureType,
    pub(crate) wrap_mode: WrapMode,
    pub(crate) alpha_mode: AlphaMode,
    pub(crate) is_normal_map: bool,
    pub(crate) faces: Vec<Option<FloatImage>>,
}

impl Default for Private {
    fn default() -> Self {
        Self {
            texture_type: TextureType::Plane,
            wrap_mode: WrapMode::Mirror,
            alpha_mode: AlphaMode::None,
            is_normal_map: false,
            faces: Vec::new(),
        }
    }
}

/// A texture made of one (plane) or six (cube) faces of RGBA `f32` pixels.
///
/// Cloning is cheap: clones share storage until one of them is mutated, at which point
/// the mutated handle takes a private deep copy.
///
/// # Examples
///
/// ```
/// use teximage_api::TexImage;
///
/// let mut a = TexImage::new();
/// a.allocate(4, 4);
/// let b = a.clone();
/// assert!(a.shares_storage_with(&b));
///
/// a.fill(1.0, 0.0, 0.0, 1.0);
/// assert!(!a.shares_storage_with(&b));
/// assert_eq!(b.face(0).unwrap().pixel(0, 0, 0), 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TexImage {
    pub(crate) m: Arc<Private>,
}

impl TexImage {
    /// Creates an empty plane texture with no faces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a plane texture whose only face is `image`.
    pub fn from_image(image: FloatImage) -> Self {
        Self {
            m: Arc::new(Private {
                faces: vec![Some(image)],
                ..Private::default()
            }),
        }
    }

    /// Gives this handle exclusive ownership of its state, copying it if shared.
    pub(crate) fn detach(&mut self) -> &mut Private {
        if Arc::strong_count(&self.m) > 1 || Arc::weak_count(&self.m) > 0 {
            log::trace!(
                "Detaching shared texture image ({} faces, {}x{})",
                self.m.faces.len(),
                self.width(),
                self.height()
            );
        }
        Arc::make_mut(&mut self.m)
    }

    /// Validates a face slot against an expected extent without mutating anything.
    pub(crate) fn check_face(&self, index: usize, width: u32, height: u32) -> Result<(), TexImageError> {
        let image = self.checked_face(index)?;
        if image.width() != width || image.height() != height {
            log::debug!(
                "Rejected {width}x{height} input for face {index} of size {}x{}",
                image.width(),
                image.height()
            );
            return Err(TexImageError::DimensionMismatch {
                expected_width: image.width(),
                expected_height: image.height(),
                width,
                height,
            });
        }
        Ok(())
    }

    /// The allocated face at `index`, or the reason it is unavailable.
    pub(crate) fn checked_face(&self, index: usize) -> Result<&FloatImage, TexImageError> {
        let count = self.face_count();
        match self.m.faces.get(index) {
            None => {
                log::debug!("Rejected access to face {index} of {count}");
                Err(TexImageError::FaceOutOfRange { index, count })
            }
            Some(None) => Err(TexImageError::MissingFace(index)),
            Some(Some(image)) => Ok(image),
        }
    }

    /// Detaches, then returns the face at `index`.
    pub(crate) fn face_mut(&mut self, index: usize) -> Result<&mut FloatImage, TexImageError> {
        self.detach()
            .faces
            .get_mut(index)
            .and_then(Option::as_mut)
            .ok_or(TexImageError::MissingFace(index))
    }

    /// Detaches and runs `op` on every allocated face.
    pub(crate) fn for_each_face(&mut self, mut op: impl FnMut(&mut FloatImage)) {
        for image in self.detach().faces.iter_mut().flatten() {
            op(image);
        }
    }

    /// Changes between plane and cube. Face 0 is kept; other slots are dropped or added
    /// empty.
    pub fn set_texture_type(&mut self, texture_type: TextureType) {
        if self.m.texture_type == texture_type {
            return;
        }

        let m = self.detach();
        m.texture_type = texture_type;
        m.faces.resize(texture_type.face_count(), None);
    }

    /// Sets how filters address pixels outside the image.
    pub fn set_wrap_mode(&mut self, wrap_mode: WrapMode) {
        if self.m.wrap_mode != wrap_mode {
            self.detach().wrap_mode = wrap_mode;
        }
    }

    /// Sets whether alpha weights colour during resampling.
    pub fn set_alpha_mode(&mut self, alpha_mode: AlphaMode) {
        if self.m.alpha_mode != alpha_mode {
            self.detach().alpha_mode = alpha_mode;
        }
    }

    /// Marks the image as holding (or not holding) packed normals.
    pub fn set_normal_map(&mut self, is_normal_map: bool) {
        if self.m.is_normal_map != is_normal_map {
            self.detach().is_normal_map = is_normal_map;
        }
    }

    /// Replaces every face slot of the current texture type with a zero-filled
    /// `width x height` image.
    pub fn allocate(&mut self, width: u32, height: u32) {
        let m = self.detach();
        let count = m.texture_type.face_count();
        m.faces.clear();
        m.faces.resize_with(count, || Some(FloatImage::new(width, height)));
    }

    /// Replaces face slot `index` with a zero-filled `width x height` image.
    pub fn allocate_face(&mut self, index: usize, width: u32, height: u32) -> Result<(), TexImageError> {
        let count = self.face_count();
        if index >= count {
            log::debug!("Rejected allocation of face {index} of {count}");
            return Err(TexImageError::FaceOutOfRange { index, count });
        }

        self.detach().faces[index] = Some(FloatImage::new(width, height));
        Ok(())
    }

    /// Width of face 0, or 0 when it is absent.
    pub fn width(&self) -> u32 {
        self.face(0).map_or(0, FloatImage::width)
    }

    /// Height of face 0, or 0 when it is absent.
    pub fn height(&self) -> u32 {
        self.face(0).map_or(0, FloatImage::height)
    }

    /// Always 1; volume textures are not supported.
    pub fn depth(&self) -> u32 {
        1
    }

    /// Number of face slots, allocated or not.
    pub fn face_count(&self) -> usize {
        self.m.faces.len()
    }

    /// Plane or cube.
    pub fn texture_type(&self) -> TextureType {
        self.m.texture_type
    }

    /// Boundary addressing used by filters.
    pub fn wrap_mode(&self) -> WrapMode {
        self.m.wrap_mode
    }

    /// Alpha interpretation used by filters.
    pub fn alpha_mode(&self) -> AlphaMode {
        self.m.alpha_mode
    }

    /// Whether the image holds packed normals.
    pub fn is_normal_map(&self) -> bool {
        self.m.is_normal_map
    }

    /// Number of mip levels from face 0 down to 1x1, base level included.
    /// An image without face 0 has none.
    pub fn count_mipmaps(&self) -> u32 {
        extent::count_mipmaps(self.width(), self.height(), self.depth())
    }

    /// The face at `index`, if the slot exists and is allocated.
    pub fn face(&self, index: usize) -> Option<&FloatImage> {
        self.m.faces.get(index)?.as_ref()
    }

    /// Whether both handles currently point at the same storage.
    pub fn shares_storage_with(&self, other: &TexImage) -> bool {
        Arc::ptr_eq(&self.m, &other.m)
    }

    /// Loads `path` into face 0, turning this into a plane texture.
    #[cfg(feature = "image-io")]
    pub fn load(&mut self, path: impl AsRef<std::path::Path>) -> Result<(), TexImageError> {
        let image = FloatImage::load(path)?;

        let m = self.detach();
        m.texture_type = TextureType::Plane;
        m.faces = vec![Some(image)];
        Ok(())
    }

    /// Saves face 0 to `path`, in the format implied by its extension.
    #[cfg(feature = "image-io")]
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), TexImageError> {
        if self.face_count() == 0 {
            return Err(TexImageError::NoFaces);
        }
        self.checked_face(0)?.save(path)?;
        Ok(())
    }
}
