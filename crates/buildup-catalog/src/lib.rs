#![warn(missing_docs)]

//! Material catalog for the buildup wall visualizer.
//!
//! The catalog is an immutable registry of wall materials, split into
//! standalone entries and a masonry system with three independent families
//! (inner leaf, insulation, outer finish). Every family is keyed by a closed
//! enumeration, so a lookup either finds the entry or fails with
//! [`CatalogError::UnknownKey`].
//!
//! # Example
//!
//! ```
//! use buildup_catalog::{Catalog, Family};
//!
//! let catalog = Catalog::builtin();
//! let brick = catalog.lookup(Family::OuterFinish, "brick").unwrap();
//! assert_eq!(brick.thickness, Some(0.1025));
//! ```

mod builtin;
pub mod def;
pub mod error;
pub mod key;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use def::{MaterialLayerDef, TextureSet};
pub use error::{CatalogError, Result};
pub use key::{CatalogKey, Family, InnerLeafKind, InsulationKind, OuterFinishKind, StandaloneKind};

/// The masonry-cavity sub-catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasonrySystem {
    /// Inner leaf blocks.
    #[serde(default)]
    pub inner_leaf: BTreeMap<InnerLeafKind, MaterialLayerDef>,
    /// Cavity insulation.
    #[serde(default)]
    pub insulation: BTreeMap<InsulationKind, MaterialLayerDef>,
    /// Outer finishes.
    #[serde(default)]
    pub outer_finish: BTreeMap<OuterFinishKind, MaterialLayerDef>,
}

/// Immutable registry of layer definitions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Entries outside the masonry system.
    #[serde(default)]
    pub standalone: BTreeMap<StandaloneKind, MaterialLayerDef>,
    /// The masonry system families.
    #[serde(default)]
    pub masonry: MasonrySystem,
}

fn get<'a, K: CatalogKey>(
    table: &'a BTreeMap<K, MaterialLayerDef>,
    key: K,
) -> Result<&'a MaterialLayerDef> {
    table.get(&key).ok_or_else(|| CatalogError::UnknownKey {
        family: K::FAMILY,
        key: key.as_str().to_string(),
    })
}

fn check_table<K: CatalogKey>(table: &BTreeMap<K, MaterialLayerDef>) -> Result<()> {
    for (&key, def) in table {
        if def.id != key.as_str() {
            return Err(CatalogError::KeyMismatch {
                family: K::FAMILY,
                key: key.as_str(),
                id: def.id.clone(),
            });
        }
        if let Some(thickness) = def.thickness {
            if !thickness.is_finite() || thickness < 0.0 {
                return Err(CatalogError::InvalidThickness {
                    id: def.id.clone(),
                    thickness,
                });
            }
        }
        def.rgb()?;
    }
    Ok(())
}

impl Catalog {
    /// The built-in material table.
    pub fn builtin() -> Self {
        builtin::table()
    }

    /// Deserialize a catalog from a JSON string and [validate](Self::validate) it.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check every entry: its id matches the key it is filed under, its
    /// thickness (when present) is finite and non-negative and its colour
    /// decodes.
    pub fn validate(&self) -> Result<()> {
        check_table(&self.standalone)?;
        check_table(&self.masonry.inner_leaf)?;
        check_table(&self.masonry.insulation)?;
        check_table(&self.masonry.outer_finish)
    }

    /// Serialize to a pretty JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a standalone entry.
    pub fn standalone(&self, key: StandaloneKind) -> Result<&MaterialLayerDef> {
        get(&self.standalone, key)
    }

    /// Look up an inner leaf.
    pub fn inner_leaf(&self, key: InnerLeafKind) -> Result<&MaterialLayerDef> {
        get(&self.masonry.inner_leaf, key)
    }

    /// Look up an insulation board.
    pub fn insulation(&self, key: InsulationKind) -> Result<&MaterialLayerDef> {
        get(&self.masonry.insulation, key)
    }

    /// Look up an outer finish.
    pub fn outer_finish(&self, key: OuterFinishKind) -> Result<&MaterialLayerDef> {
        get(&self.masonry.outer_finish, key)
    }

    /// Look up an entry by family and string key.
    pub fn lookup(&self, family: Family, key: &str) -> Result<&MaterialLayerDef> {
        match family {
            Family::Standalone => self.standalone(StandaloneKind::parse_key(key)?),
            Family::InnerLeaf => self.inner_leaf(InnerLeafKind::parse_key(key)?),
            Family::Insulation => self.insulation(InsulationKind::parse_key(key)?),
            Family::OuterFinish => self.outer_finish(OuterFinishKind::parse_key(key)?),
        }
    }

    /// All entries of a family, in key order.
    pub fn entries(&self, family: Family) -> Vec<&MaterialLayerDef> {
        match family {
            Family::Standalone => self.standalone.values().collect(),
            Family::InnerLeaf => self.masonry.inner_leaf.values().collect(),
            Family::Insulation => self.masonry.insulation.values().collect(),
            Family::OuterFinish => self.masonry.outer_finish.values().collect(),
        }
    }
}
