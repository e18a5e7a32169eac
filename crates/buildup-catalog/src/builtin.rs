//! The built-in material table.

use std::collections::BTreeMap;

use crate::{
    Catalog, InnerLeafKind, InsulationKind, MasonrySystem, MaterialLayerDef, OuterFinishKind,
    StandaloneKind, TextureSet,
};

fn entry(id: &str, name: &str, thickness: Option<f64>, color: &str, lambda: f64) -> MaterialLayerDef {
    MaterialLayerDef {
        id: id.to_string(),
        name: name.to_string(),
        thickness,
        color: color.to_string(),
        texture: None,
        lambda,
    }
}

fn red_brick() -> TextureSet {
    let map = |suffix: &str| format!("textures/red_brick/red_brick_{suffix}_1k.jpg");
    TextureSet {
        color: map("diff"),
        normal: map("nor_dx"),
        roughness: map("rough"),
        ao: map("ao"),
        repeat: [0.7, 0.7],
    }
}

pub(crate) fn table() -> Catalog {
    let standalone = BTreeMap::from([
        (
            StandaloneKind::Plasterboard,
            entry("plasterboard", "Plasterboard", Some(0.0125), "#e5d3b3", 0.25),
        ),
        (
            StandaloneKind::AirGap,
            entry("air-gap", "Unventilated Air Gap", Some(0.05), "#cceeff", 0.16),
        ),
    ]);

    let inner_leaf = BTreeMap::from([
        (
            InnerLeafKind::AircreteHi,
            entry("aircrete-hi", "Aircrete Hi-Strength (100mm)", Some(0.1), "#d0d0d0", 0.15),
        ),
        (
            InnerLeafKind::AircreteStd,
            entry("aircrete-std", "Aircrete Standard (100mm)", Some(0.1), "#d9d9d9", 0.11),
        ),
        (
            InnerLeafKind::MediumDense,
            entry("medium-dense", "Medium Dense Block (100mm)", Some(0.1), "#b0b0b0", 0.51),
        ),
        (
            InnerLeafKind::Dense,
            entry("dense", "Dense Concrete Block (100mm)", Some(0.1), "#999999", 1.13),
        ),
    ]);

    let insulation = BTreeMap::from([
        (
            InsulationKind::Nyrock032,
            entry("nyrock-032", "NyRock Cavity Slab", None, "#d9e38f", 0.032),
        ),
        (
            InsulationKind::CavitySlab035,
            entry("cavity-slab-035", "Cavity Slab (035)", None, "#e3d68f", 0.035),
        ),
    ]);

    let mut brick = entry("brick", "Brick Outer Leaf (102.5mm)", Some(0.1025), "#b65a3a", 0.77);
    brick.texture = Some(red_brick());
    let outer_finish = BTreeMap::from([
        (OuterFinishKind::Brick, brick),
        (
            OuterFinishKind::Render,
            entry("render", "Block & Render (110mm)", Some(0.11), "#e0e0e0", 0.62),
        ),
    ]);

    Catalog {
        standalone,
        masonry: MasonrySystem {
            inner_leaf,
            insulation,
            outer_finish,
        },
    }
}
