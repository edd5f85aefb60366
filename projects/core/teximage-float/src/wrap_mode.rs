//! Boundary addressing used when a filter reads outside the image.

use derive_enum_all_values::AllValues;

/// How out of range sample coordinates map back into the image.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, AllValues)]
pub enum WrapMode {
    /// Coordinates clamp to the nearest edge pixel.
    Clamp,
    /// Coordinates wrap around, tiling the image.
    Repeat,
    /// Coordinates reflect about the edges without repeating the edge pixel.
    #[default]
    Mirror,
}

impl WrapMode {
    /// Maps `x` into `0..extent`. `extent` must be non-zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use teximage_float::WrapMode;
    ///
    /// assert_eq!(WrapMode::Clamp.wrap(-3, 4), 0);
    /// assert_eq!(WrapMode::Repeat.wrap(-1, 4), 3);
    /// assert_eq!(WrapMode::Mirror.wrap(4, 4), 2);
    /// ```
    #[inline]
    pub fn wrap(self, x: i32, extent: u32) -> u32 {
        debug_assert!(extent > 0);
        let w = extent as i32;
        match self {
            WrapMode::Clamp => x.clamp(0, w - 1) as u32,
            WrapMode::Repeat => x.rem_euclid(w) as u32,
            WrapMode::Mirror => {
                if w == 1 {
                    return 0;
                }
                let mut x = x.abs();
                while x >= w {
                    x = (2 * w - x - 2).abs();
                }
                x as u32
            }
        }
    }
}
