//! Layer composition: selection + catalog to an ordered wall stack.

use buildup_catalog::{Catalog, CatalogError, MaterialLayerDef, StandaloneKind, TextureSet};
use serde::Serialize;

use crate::selection::{MasonryType, SelectionState, WallType};

/// Total cavity width between the leaves (m).
pub const CAVITY_WIDTH: f64 = 0.1;

/// Insulation thickness of a partial-fill cavity (m).
pub const PARTIAL_FILL_THICKNESS: f64 = 0.05;

/// A catalog entry materialized into the wall with a concrete thickness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLayer {
    /// Catalog id.
    pub id: String,
    /// Display label, possibly suffixed with the fill strategy.
    pub name: String,
    /// Thickness in metres.
    pub thickness: f64,
    /// Decoded display colour, `[r, g, b]` in 0.0..1.0.
    pub color: [f64; 3],
    /// Texture set, when the material is textured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<TextureSet>,
    /// Thermal conductivity, carried unchanged from the catalog.
    pub lambda: f64,
}

impl ResolvedLayer {
    fn from_def(def: &MaterialLayerDef, thickness: f64) -> Result<Self, CatalogError> {
        Ok(Self {
            id: def.id.clone(),
            name: def.name.clone(),
            thickness,
            color: def.rgb()?,
            texture: def.texture.clone(),
            lambda: def.lambda,
        })
    }

    fn nominal(def: &MaterialLayerDef) -> Result<Self, CatalogError> {
        Self::from_def(def, def.nominal_thickness()?)
    }
}

/// Layers in physical order, front (room side) to back.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LayerSequence(Vec<ResolvedLayer>);

impl LayerSequence {
    /// Wrap an ordered list of layers.
    pub fn new(layers: Vec<ResolvedLayer>) -> Self {
        Self(layers)
    }

    /// The layers, front to back.
    pub fn layers(&self) -> &[ResolvedLayer] {
        &self.0
    }

    /// Layer at `index`.
    pub fn get(&self, index: usize) -> Option<&ResolvedLayer> {
        self.0.get(index)
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no layers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate front to back.
    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedLayer> {
        self.0.iter()
    }

    /// Sum of all thicknesses.
    pub fn total_depth(&self) -> f64 {
        self.0.iter().map(|l| l.thickness).sum()
    }
}

impl<'a> IntoIterator for &'a LayerSequence {
    type Item = &'a ResolvedLayer;
    type IntoIter = std::slice::Iter<'a, ResolvedLayer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Outcome of a composition.
#[derive(Debug, Clone, PartialEq)]
pub enum Composition {
    /// The wall type is unset or not a masonry cavity wall. This is an
    /// expected state, reported to the user rather than raised as an error.
    NoWallType,
    /// The composed stack.
    Layers(LayerSequence),
}

impl Composition {
    /// The stack, empty for [`Composition::NoWallType`].
    pub fn into_sequence(self) -> LayerSequence {
        match self {
            Composition::NoWallType => LayerSequence::default(),
            Composition::Layers(seq) => seq,
        }
    }
}

/// Build the wall stack for `selection`.
///
/// Order: plasterboard, inner leaf, cavity (insulation, then the air gap of
/// a partial fill), outer finish. Insulation is skipped while the fill
/// strategy is unset. The inner leaf does not wait for the fill strategy.
pub fn compose(selection: &SelectionState, catalog: &Catalog) -> Result<Composition, CatalogError> {
    if selection.wall_type != Some(WallType::Masonry) {
        return Ok(Composition::NoWallType);
    }

    let mut layers = vec![ResolvedLayer::nominal(
        catalog.standalone(StandaloneKind::Plasterboard)?,
    )?];

    if let Some(kind) = selection.inner_leaf {
        layers.push(ResolvedLayer::nominal(catalog.inner_leaf(kind)?)?);
    }

    if let (Some(kind), Some(fill)) = (selection.insulation, selection.masonry_type) {
        let insulation = catalog.insulation(kind)?;
        match fill {
            MasonryType::FullFill => {
                let mut layer = ResolvedLayer::from_def(insulation, CAVITY_WIDTH)?;
                layer.name = format!("{} (Full Fill)", insulation.name);
                layers.push(layer);
            }
            MasonryType::PartialFill => {
                let mut layer = ResolvedLayer::from_def(insulation, PARTIAL_FILL_THICKNESS)?;
                layer.name = format!("{} (Partial Fill)", insulation.name);
                layers.push(layer);
                let air_gap = catalog.standalone(StandaloneKind::AirGap)?;
                layers.push(ResolvedLayer::from_def(
                    air_gap,
                    CAVITY_WIDTH - PARTIAL_FILL_THICKNESS,
                )?);
            }
        }
    }

    if let Some(kind) = selection.outer_finish {
        layers.push(ResolvedLayer::nominal(catalog.outer_finish(kind)?)?);
    }

    Ok(Composition::Layers(LayerSequence::new(layers)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionField;
    use approx::assert_relative_eq;
    use buildup_catalog::{Family, InnerLeafKind, OuterFinishKind};

    fn select(pairs: &[(SelectionField, &str)]) -> SelectionState {
        let mut s = SelectionState::new();
        for &(field, value) in pairs {
            s.apply(field, value).unwrap();
        }
        s
    }

    fn layers(selection: &SelectionState) -> LayerSequence {
        match compose(selection, &Catalog::builtin()).unwrap() {
            Composition::Layers(seq) => seq,
            Composition::NoWallType => panic!("expected layers"),
        }
    }

    fn ids(seq: &LayerSequence) -> Vec<&str> {
        seq.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_no_wall_type_gives_empty_sequence() {
        let s = select(&[
            (SelectionField::InnerLeaf, "dense"),
            (SelectionField::OuterFinish, "brick"),
        ]);
        let c = compose(&s, &Catalog::builtin()).unwrap();
        assert_eq!(c, Composition::NoWallType);
        assert!(c.into_sequence().is_empty());
    }

    #[test]
    fn test_unrecognized_wall_type_gives_no_wall_type() {
        let s = select(&[(SelectionField::WallType, "timber-frame")]);
        assert_eq!(compose(&s, &Catalog::builtin()).unwrap(), Composition::NoWallType);
    }

    #[test]
    fn test_wall_type_alone_is_plasterboard() {
        let seq = layers(&select(&[(SelectionField::WallType, "masonry")]));
        assert_eq!(ids(&seq), ["plasterboard"]);
        assert_relative_eq!(seq.total_depth(), 0.0125);
    }

    #[test]
    fn test_full_fill_uses_whole_cavity() {
        let seq = layers(&select(&[
            (SelectionField::WallType, "masonry"),
            (SelectionField::MasonryType, "full-fill"),
            (SelectionField::Insulation, "cavity-slab-035"),
        ]));
        assert_eq!(ids(&seq), ["plasterboard", "cavity-slab-035"]);
        let insulation = &seq.layers()[1];
        assert_eq!(insulation.thickness, 0.1);
        assert_eq!(insulation.name, "Cavity Slab (035) (Full Fill)");
        assert!(seq.iter().all(|l| l.id != "air-gap"));
    }

    #[test]
    fn test_partial_fill_splits_cavity() {
        let seq = layers(&select(&[
            (SelectionField::WallType, "masonry"),
            (SelectionField::MasonryType, "partial-fill"),
            (SelectionField::Insulation, "nyrock-032"),
        ]));
        assert_eq!(ids(&seq), ["plasterboard", "nyrock-032", "air-gap"]);
        let (insulation, gap) = (&seq.layers()[1], &seq.layers()[2]);
        assert_eq!(insulation.thickness, 0.05);
        assert_eq!(insulation.name, "NyRock Cavity Slab (Partial Fill)");
        assert_eq!(insulation.thickness + gap.thickness, 0.1);
        assert_eq!(gap.name, "Unventilated Air Gap");
    }

    #[test]
    fn test_insulation_waits_for_fill_strategy() {
        let seq = layers(&select(&[
            (SelectionField::WallType, "masonry"),
            (SelectionField::Insulation, "nyrock-032"),
        ]));
        assert_eq!(ids(&seq), ["plasterboard"]);
    }

    #[test]
    fn test_inner_leaf_does_not_wait_for_fill_strategy() {
        let seq = layers(&select(&[
            (SelectionField::WallType, "masonry"),
            (SelectionField::InnerLeaf, "aircrete-std"),
        ]));
        assert_eq!(ids(&seq), ["plasterboard", "aircrete-std"]);
    }

    #[test]
    fn test_scenario_full_fill_brick() {
        let seq = layers(&select(&[
            (SelectionField::WallType, "masonry"),
            (SelectionField::InnerLeaf, "dense"),
            (SelectionField::Insulation, "nyrock-032"),
            (SelectionField::MasonryType, "full-fill"),
            (SelectionField::OuterFinish, "brick"),
        ]));
        assert_eq!(ids(&seq), ["plasterboard", "dense", "nyrock-032", "brick"]);
        let thicknesses: Vec<f64> = seq.iter().map(|l| l.thickness).collect();
        assert_eq!(thicknesses, [0.0125, 0.1, 0.1, 0.1025]);
        assert_relative_eq!(seq.total_depth(), 0.315, epsilon = 1e-12);
    }

    #[test]
    fn test_scenario_partial_fill_brick() {
        let seq = layers(&select(&[
            (SelectionField::WallType, "masonry"),
            (SelectionField::InnerLeaf, "dense"),
            (SelectionField::Insulation, "nyrock-032"),
            (SelectionField::MasonryType, "partial-fill"),
            (SelectionField::OuterFinish, "brick"),
        ]));
        assert_eq!(ids(&seq), ["plasterboard", "dense", "nyrock-032", "air-gap", "brick"]);
        assert_relative_eq!(seq.total_depth(), 0.315, epsilon = 1e-12);
    }

    #[test]
    fn test_lambda_and_texture_carried_through() {
        let seq = layers(&select(&[
            (SelectionField::WallType, "masonry"),
            (SelectionField::OuterFinish, "brick"),
        ]));
        let brick = &seq.layers()[1];
        assert_eq!(brick.lambda, 0.77);
        assert!(brick.texture.is_some());
        assert!(seq.layers()[0].texture.is_none());
    }

    #[test]
    fn test_catalog_missing_entry_is_unknown_key() {
        let mut catalog = Catalog::builtin();
        catalog.masonry.outer_finish.remove(&OuterFinishKind::Render);
        let mut s = select(&[(SelectionField::WallType, "masonry")]);
        s.outer_finish = Some(OuterFinishKind::Render);
        let err = compose(&s, &catalog).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownKey { family: Family::OuterFinish, .. }));
    }

    #[test]
    fn test_catalog_entry_without_thickness_is_rejected() {
        let mut catalog = Catalog::builtin();
        if let Some(def) = catalog.masonry.inner_leaf.get_mut(&InnerLeafKind::Dense) {
            def.thickness = None;
        }
        let s = select(&[
            (SelectionField::WallType, "masonry"),
            (SelectionField::InnerLeaf, "dense"),
        ]);
        assert!(matches!(
            compose(&s, &catalog),
            Err(CatalogError::MissingThickness(id)) if id == "dense"
        ));
    }
}
