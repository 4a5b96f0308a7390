use crate::error::ConfigError;

/// Linear RGBA color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build an opaque color from a packed `0xRRGGBB` value.
    ///
    /// ```
    /// use phong_offset::Color;
    ///
    /// assert_eq!(Color::from_hex(0x00ff00), Color::rgb(0.0, 1.0, 0.0));
    /// ```
    pub const fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xff) as f32 / 255.0;
        let g = ((hex >> 8) & 0xff) as f32 / 255.0;
        let b = (hex & 0xff) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Parse `RRGGBB`, optionally prefixed by `#` or `0x`.
    pub fn parse_hex(text: &str) -> Result<Self, ConfigError> {
        let digits = text
            .strip_prefix('#')
            .or_else(|| text.strip_prefix("0x"))
            .unwrap_or(text);
        if digits.len() != 6 {
            return Err(ConfigError::InvalidColor(text.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| ConfigError::InvalidColor(text.to_string()))
    }

    pub fn to_rgb_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
}
