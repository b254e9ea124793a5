use tracing::warn;

use crate::GeomError;

/// Linear RGB in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub [f32; 3]);

impl Color {
    pub const WHITE: Color = Color([1.0, 1.0, 1.0]);

    /// Parses `#RRGGBB` or `#RGB`; the leading `#` is optional.
    pub fn from_hex(text: &str) -> Result<Self, GeomError> {
        let hex = text.trim().trim_start_matches('#');
        let invalid = || GeomError::InvalidColor(text.to_string());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channels: Vec<u8> = match hex.len() {
            6 => (0..3)
                .map(|i| u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16))
                .collect::<Result<_, _>>()
                .map_err(|_| invalid())?,
            3 => (0..3)
                .map(|i| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17))
                .collect::<Result<_, _>>()
                .map_err(|_| invalid())?,
            _ => return Err(invalid()),
        };
        Ok(Color([
            f32::from(channels[0]) / 255.0,
            f32::from(channels[1]) / 255.0,
            f32::from(channels[2]) / 255.0,
        ]))
    }

    pub fn from_hex_or_white(text: &str) -> Self {
        Self::from_hex(text).unwrap_or_else(|err| {
            warn!(%err, "falling back to white");
            Color::WHITE
        })
    }

    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: Option<String>,
    pub color: Color,
    pub opacity: f32,
    /// Draw edges only.
    pub wireframe: bool,
}

impl Material {
    pub fn solid(color: Color) -> Self {
        Self {
            name: None,
            color,
            opacity: 1.0,
            wireframe: false,
        }
    }

    pub fn wireframe(color: Color) -> Self {
        Self {
            wireframe: true,
            ..Self::solid(color)
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::solid(Color::WHITE)
    }
}
