//! The five cascading selection inputs.
//!
//! Fields are independent: clearing an early field leaves later fields
//! holding their old values. Ordering between steps is enforced by the
//! visibility gate and by the composer ignoring stale values, never here.

use std::fmt;

use buildup_catalog::{CatalogError, CatalogKey, InnerLeafKind, InsulationKind, OuterFinishKind};
use serde::{Deserialize, Serialize};

/// One of the five selection inputs, in UI order. Input `n` is shown by
/// step `n` of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionField {
    /// Step 1: wall construction type.
    WallType,
    /// Step 2: cavity fill strategy.
    MasonryType,
    /// Step 3: cavity insulation board.
    Insulation,
    /// Step 4: inner leaf block.
    InnerLeaf,
    /// Step 5: outer finish.
    OuterFinish,
}

impl SelectionField {
    /// All fields in step order.
    pub const ALL: [SelectionField; 5] = [
        SelectionField::WallType,
        SelectionField::MasonryType,
        SelectionField::Insulation,
        SelectionField::InnerLeaf,
        SelectionField::OuterFinish,
    ];

    /// 1-based step number.
    pub fn step(self) -> u8 {
        match self {
            SelectionField::WallType => 1,
            SelectionField::MasonryType => 2,
            SelectionField::Insulation => 3,
            SelectionField::InnerLeaf => 4,
            SelectionField::OuterFinish => 5,
        }
    }

    /// Kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionField::WallType => "wall-type",
            SelectionField::MasonryType => "masonry-type",
            SelectionField::Insulation => "insulation",
            SelectionField::InnerLeaf => "inner-leaf",
            SelectionField::OuterFinish => "outer-finish",
        }
    }
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SelectionField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SelectionField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown selection field: {s}"))
    }
}

/// Wall construction type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WallType {
    /// Masonry cavity wall, the only construction with a layer model.
    Masonry,
    /// A value the layer model does not recognize. It still counts as
    /// "selected" for step visibility.
    Other(String),
}

impl WallType {
    /// Interpret a raw control value.
    pub fn from_key(raw: &str) -> Self {
        match raw {
            "masonry" => WallType::Masonry,
            other => WallType::Other(other.to_string()),
        }
    }

    /// Raw control value.
    pub fn as_str(&self) -> &str {
        match self {
            WallType::Masonry => "masonry",
            WallType::Other(raw) => raw,
        }
    }
}

/// Cavity fill strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasonryType {
    /// Insulation fills the whole cavity.
    FullFill,
    /// Insulation fills part of the cavity, leaving an air gap.
    PartialFill,
}

impl MasonryType {
    /// Interpret a raw control value: `full-fill`, anything else is
    /// partial fill.
    pub fn from_key(raw: &str) -> Self {
        if raw == "full-fill" {
            MasonryType::FullFill
        } else {
            MasonryType::PartialFill
        }
    }

    /// Canonical control value.
    pub fn as_str(self) -> &'static str {
        match self {
            MasonryType::FullFill => "full-fill",
            MasonryType::PartialFill => "partial-fill",
        }
    }
}

/// Current values of the five inputs; `None` means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Step 1.
    pub wall_type: Option<WallType>,
    /// Step 2.
    pub masonry_type: Option<MasonryType>,
    /// Step 3.
    pub insulation: Option<InsulationKind>,
    /// Step 4.
    pub inner_leaf: Option<InnerLeafKind>,
    /// Step 5.
    pub outer_finish: Option<OuterFinishKind>,
}

fn parse_material<K: CatalogKey>(raw: &str) -> Result<Option<K>, CatalogError> {
    K::parse_key(raw).map(Some)
}

impl SelectionState {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a "changed" event from `field`'s control.
    ///
    /// An empty value clears the field. Material fields must name a catalog
    /// key; otherwise the state is left untouched and
    /// [`CatalogError::UnknownKey`] is returned.
    pub fn apply(&mut self, field: SelectionField, raw: &str) -> Result<(), CatalogError> {
        let raw = raw.trim();
        if raw.is_empty() {
            self.clear(field);
            return Ok(());
        }
        match field {
            SelectionField::WallType => self.wall_type = Some(WallType::from_key(raw)),
            SelectionField::MasonryType => self.masonry_type = Some(MasonryType::from_key(raw)),
            SelectionField::Insulation => self.insulation = parse_material(raw)?,
            SelectionField::InnerLeaf => self.inner_leaf = parse_material(raw)?,
            SelectionField::OuterFinish => self.outer_finish = parse_material(raw)?,
        }
        Ok(())
    }

    /// Unset `field`.
    pub fn clear(&mut self, field: SelectionField) {
        match field {
            SelectionField::WallType => self.wall_type = None,
            SelectionField::MasonryType => self.masonry_type = None,
            SelectionField::Insulation => self.insulation = None,
            SelectionField::InnerLeaf => self.inner_leaf = None,
            SelectionField::OuterFinish => self.outer_finish = None,
        }
    }

    /// Whether `field` holds a value.
    pub fn is_set(&self, field: SelectionField) -> bool {
        match field {
            SelectionField::WallType => self.wall_type.is_some(),
            SelectionField::MasonryType => self.masonry_type.is_some(),
            SelectionField::Insulation => self.insulation.is_some(),
            SelectionField::InnerLeaf => self.inner_leaf.is_some(),
            SelectionField::OuterFinish => self.outer_finish.is_some(),
        }
    }

    /// Raw control value of `field`, empty when unset.
    pub fn value(&self, field: SelectionField) -> String {
        match field {
            SelectionField::WallType => self.wall_type.as_ref().map(|w| w.as_str().to_string()),
            SelectionField::MasonryType => self.masonry_type.map(|m| m.as_str().to_string()),
            SelectionField::Insulation => self.insulation.map(|k| k.as_str().to_string()),
            SelectionField::InnerLeaf => self.inner_leaf.map(|k| k.as_str().to_string()),
            SelectionField::OuterFinish => self.outer_finish.map(|k| k.as_str().to_string()),
        }
        .unwrap_or_default()
    }
}
