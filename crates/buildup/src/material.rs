//! Surface appearance of a rendered layer.

use buildup_catalog::TextureSet;
use serde::Serialize;

use crate::compose::ResolvedLayer;

/// Roughness of flat-coloured layers.
pub const FLAT_ROUGHNESS: f64 = 0.7;

/// Roughness of textured layers; the roughness map modulates it.
pub const TEXTURED_ROUGHNESS: f64 = 1.0;

/// PBR-style surface description handed to the render adapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceMaterial {
    /// Base colour, `[r, g, b]` in 0.0..1.0.
    pub base_color: [f64; 3],
    /// Roughness factor.
    pub roughness: f64,
    /// Image maps, when textured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<TextureSet>,
}

impl SurfaceMaterial {
    /// Appearance of `layer`.
    pub fn for_layer(layer: &ResolvedLayer) -> Self {
        match &layer.texture {
            Some(texture) => Self {
                base_color: [1.0; 3],
                roughness: TEXTURED_ROUGHNESS,
                texture: Some(texture.clone()),
            },
            None => Self {
                base_color: layer.color,
                roughness: FLAT_ROUGHNESS,
                texture: None,
            },
        }
    }

    /// True if image maps replace the flat colour.
    pub fn is_textured(&self) -> bool {
        self.texture.is_some()
    }
}
