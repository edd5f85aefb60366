//! Unpacked RGBA8 texel produced by the block decoders.

/// Represents a single RGBA8888 pixel color from a decoded block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color8888 {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255)
    pub a: u8,
}

impl Color8888 {
    /// Constructs a new [`Color8888`] from the specified red, green, blue, and alpha components.
    ///
    /// Each parameter represents the intensity of its corresponding colour channel (0–255).
    ///
    /// # Examples
    ///
    /// ```
    /// use teximage_common::color_8888::Color8888;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// assert_eq!(pixel.r, 255);
    /// assert_eq!(pixel.g, 0);
    /// assert_eq!(pixel.b, 0);
    /// assert_eq!(pixel.a, 255);
    /// ```
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black, used for the punch-through entry of 3-colour BC1 blocks.
    pub const TRANSPARENT_BLACK: Self = Self::new(0, 0, 0, 0);

    /// Returns the components normalised to `[0, 1]`, in RGBA order.
    ///
    /// # Examples
    ///
    /// ```
    /// use teximage_common::color_8888::Color8888;
    ///
    /// let rgba = Color8888::new(255, 0, 51, 255).to_unorm();
    /// assert_eq!(rgba, [1.0, 0.0, 0.2, 1.0]);
    /// ```
    #[inline]
    pub fn to_unorm(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}
