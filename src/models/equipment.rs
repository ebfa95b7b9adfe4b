//! Equipment catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Equipment category. Rows whose category marker is not one of these are
/// not catalog items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Camera,
    Grip,
    Lights,
    Sound,
    Location,
    Books,
}

impl Category {
    /// All categories, in catalog display order
    pub const ALL: [Category; 6] = [
        Category::Camera,
        Category::Grip,
        Category::Lights,
        Category::Sound,
        Category::Location,
        Category::Books,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Camera => "CAMERA",
            Category::Grip => "GRIP",
            Category::Lights => "LIGHTS",
            Category::Sound => "SOUND",
            Category::Location => "LOCATION",
            Category::Books => "BOOKS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    /// Parses an upper-cased, trimmed category marker
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CAMERA" => Ok(Category::Camera),
            "GRIP" => Ok(Category::Grip),
            "LIGHTS" => Ok(Category::Lights),
            "SOUND" => Ok(Category::Sound),
            "LOCATION" => Ok(Category::Location),
            "BOOKS" => Ok(Category::Books),
            _ => Err(()),
        }
    }
}

/// A catalog equipment record.
///
/// Records are value objects: the catalog is rebuilt wholesale on every
/// refresh and items are never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EquipmentItem {
    /// Unique within a catalog snapshot, reassigned on every rebuild
    pub id: u32,
    /// Display name (post-deduplication base name)
    pub name: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price to rent one unit for one day, excluding tax. 0 means free/TBD.
    pub day_rate: Decimal,
    /// Discounted price for a 5-day block
    pub weekly_rate: Decimal,
    /// Resolved image URL, `None` when unresolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Restricted to the advanced cohort
    #[serde(default)]
    pub restricted: bool,
    /// Number of physical units merged into this record
    pub available_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
