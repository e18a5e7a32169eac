//! Typed keys for every catalog family.
//!
//! Each family is a closed enumeration with a stable kebab-case string form,
//! which is what UI controls and JSON documents carry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// The four families a catalog entry can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    /// Entries outside the masonry system (plasterboard, air gap).
    Standalone,
    /// Inner masonry leaf blocks.
    InnerLeaf,
    /// Cavity insulation boards.
    Insulation,
    /// Outer leaf / finish.
    OuterFinish,
}

impl Family {
    /// Every family, in catalog order.
    pub const ALL: [Family; 4] = [
        Family::Standalone,
        Family::InnerLeaf,
        Family::Insulation,
        Family::OuterFinish,
    ];

    /// Kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Family::Standalone => "standalone",
            Family::InnerLeaf => "inner-leaf",
            Family::Insulation => "insulation",
            Family::OuterFinish => "outer-finish",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A key type belonging to one catalog family.
pub trait CatalogKey: Copy + Ord + Sized + 'static {
    /// Family this key indexes.
    const FAMILY: Family;

    /// Every key of the family, in display order.
    fn all() -> &'static [Self];

    /// Kebab-case string form.
    fn as_str(self) -> &'static str;

    /// Parse the string form, failing with [`CatalogError::UnknownKey`].
    fn parse_key(raw: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == raw)
            .ok_or_else(|| CatalogError::UnknownKey {
                family: Self::FAMILY,
                key: raw.to_string(),
            })
    }
}

/// Standalone entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StandaloneKind {
    /// Internal plasterboard lining.
    Plasterboard,
    /// Unventilated air gap left by partial-fill insulation.
    AirGap,
}

impl CatalogKey for StandaloneKind {
    const FAMILY: Family = Family::Standalone;

    fn all() -> &'static [Self] {
        &[StandaloneKind::Plasterboard, StandaloneKind::AirGap]
    }

    fn as_str(self) -> &'static str {
        match self {
            StandaloneKind::Plasterboard => "plasterboard",
            StandaloneKind::AirGap => "air-gap",
        }
    }
}

/// Inner leaf block options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InnerLeafKind {
    /// Aircrete, high strength.
    AircreteHi,
    /// Aircrete, standard grade.
    AircreteStd,
    /// Medium dense concrete block.
    MediumDense,
    /// Dense concrete block.
    Dense,
}

impl CatalogKey for InnerLeafKind {
    const FAMILY: Family = Family::InnerLeaf;

    fn all() -> &'static [Self] {
        &[
            InnerLeafKind::AircreteHi,
            InnerLeafKind::AircreteStd,
            InnerLeafKind::MediumDense,
            InnerLeafKind::Dense,
        ]
    }

    fn as_str(self) -> &'static str {
        match self {
            InnerLeafKind::AircreteHi => "aircrete-hi",
            InnerLeafKind::AircreteStd => "aircrete-std",
            InnerLeafKind::MediumDense => "medium-dense",
            InnerLeafKind::Dense => "dense",
        }
    }
}

/// Cavity insulation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsulationKind {
    /// NyRock cavity slab, lambda 0.032.
    #[serde(rename = "nyrock-032")]
    Nyrock032,
    /// Generic cavity slab, lambda 0.035.
    #[serde(rename = "cavity-slab-035")]
    CavitySlab035,
}

impl CatalogKey for InsulationKind {
    const FAMILY: Family = Family::Insulation;

    fn all() -> &'static [Self] {
        &[InsulationKind::Nyrock032, InsulationKind::CavitySlab035]
    }

    fn as_str(self) -> &'static str {
        match self {
            InsulationKind::Nyrock032 => "nyrock-032",
            InsulationKind::CavitySlab035 => "cavity-slab-035",
        }
    }
}

/// Outer finish options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OuterFinishKind {
    /// Facing brick outer leaf.
    Brick,
    /// Block outer leaf with render.
    Render,
}

impl CatalogKey for OuterFinishKind {
    const FAMILY: Family = Family::OuterFinish;

    fn all() -> &'static [Self] {
        &[OuterFinishKind::Brick, OuterFinishKind::Render]
    }

    fn as_str(self) -> &'static str {
        match self {
            OuterFinishKind::Brick => "brick",
            OuterFinishKind::Render => "render",
        }
    }
}

macro_rules! impl_display_from_str {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = CatalogError;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_key(s)
            }
        }
    )*};
}

impl_display_from_str!(StandaloneKind, InnerLeafKind, InsulationKind, OuterFinishKind);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_keys() {
        assert_eq!("dense".parse::<InnerLeafKind>().unwrap(), InnerLeafKind::Dense);
        assert_eq!(
            "nyrock-032".parse::<InsulationKind>().unwrap(),
            InsulationKind::Nyrock032
        );
        assert_eq!("air-gap".parse::<StandaloneKind>().unwrap(), StandaloneKind::AirGap);
    }

    #[test]
    fn test_parse_unknown_key_names_family() {
        let err = "granite".parse::<OuterFinishKind>().unwrap_err();
        match err {
            CatalogError::UnknownKey { family, key } => {
                assert_eq!(family, Family::OuterFinish);
                assert_eq!(key, "granite");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_serde_names_match_string_form() {
        for k in InsulationKind::all() {
            let json = serde_json::to_string(k).unwrap();
            assert_eq!(json, format!("\"{}\"", k.as_str()));
        }
        for k in InnerLeafKind::all() {
            let json = serde_json::to_string(k).unwrap();
            assert_eq!(json, format!("\"{}\"", k.as_str()));
        }
    }
}
