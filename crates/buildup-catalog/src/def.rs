//! Catalog entry definitions.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// Image maps for a physically textured material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSet {
    /// Diffuse colour map (sampled as sRGB).
    pub color: String,
    /// Normal map (DirectX convention).
    pub normal: String,
    /// Roughness map.
    pub roughness: String,
    /// Ambient occlusion map.
    pub ao: String,
    /// UV repeat along `(u, v)`; all maps wrap.
    pub repeat: [f64; 2],
}

/// One catalog entry: a material that can become a layer of the wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLayerDef {
    /// Unique string key.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Nominal thickness in metres. `None` when it depends on context
    /// (insulation takes its thickness from the fill strategy).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    /// Display colour as `#rrggbb`.
    pub color: String,
    /// Optional texture set replacing the flat colour when rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<TextureSet>,
    /// Thermal conductivity in W/(m·K). Carried for a future U-value
    /// calculation; nothing reads it today.
    pub lambda: f64,
}

impl MaterialLayerDef {
    /// Nominal thickness, or [`CatalogError::MissingThickness`].
    pub fn nominal_thickness(&self) -> Result<f64> {
        self.thickness
            .ok_or_else(|| CatalogError::MissingThickness(self.id.clone()))
    }

    /// Display colour decoded to `[r, g, b]` in 0.0..1.0.
    pub fn rgb(&self) -> Result<[f64; 3]> {
        parse_hex_color(&self.color)
    }
}

/// Decode a `#rrggbb` colour.
pub fn parse_hex_color(hex: &str) -> Result<[f64; 3]> {
    let invalid = || CatalogError::InvalidColor(hex.to_string());
    let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }
    let mut rgb = [0.0; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        *channel = f64::from(byte) / 255.0;
    }
    Ok(rgb)
}
