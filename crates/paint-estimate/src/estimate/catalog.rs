use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::domain::JobType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceCategory {
    Work,
    Material,
    Rental,
    Addon,
}

/// Billing unit. Serialized with the short Norwegian unit codes used on invoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceUnit {
    #[serde(rename = "m2")]
    SquareMetre,
    #[serde(rename = "stk")]
    Piece,
    #[serde(rename = "lm")]
    RunningMetre,
    #[serde(rename = "fixed")]
    Fixed,
}

impl PriceUnit {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SquareMetre => "m²",
            Self::Piece => "stk",
            Self::RunningMetre => "lm",
            Self::Fixed => "fast",
        }
    }
}

/// Closed set of catalog codes. Adding a variant without a catalog row fails to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PriceCode {
    SpacklingAndPainting,
    Spackling,
    FullSpackling,
    InteriorPainting,
    ExteriorPainting,
    WindowListFree,
    DoorListFree,
    ScaffoldRental,
    FullSpacklingAddon,
}

impl PriceCode {
    pub const ALL: [Self; 9] = [
        Self::SpacklingAndPainting,
        Self::Spackling,
        Self::FullSpackling,
        Self::InteriorPainting,
        Self::ExteriorPainting,
        Self::WindowListFree,
        Self::DoorListFree,
        Self::ScaffoldRental,
        Self::FullSpacklingAddon,
    ];

    pub fn as_str(self) -> &'static str {
        self.item().code
    }

    pub fn item(self) -> &'static PriceItem {
        match self {
            Self::SpacklingAndPainting => &SPACKLING_AND_PAINTING,
            Self::Spackling => &SPACKLING,
            Self::FullSpackling => &FULL_SPACKLING,
            Self::InteriorPainting => &INTERIOR_PAINTING,
            Self::ExteriorPainting => &EXTERIOR_PAINTING,
            Self::WindowListFree => &WINDOW_LIST_FREE,
            Self::DoorListFree => &DOOR_LIST_FREE,
            Self::ScaffoldRental => &SCAFFOLD_RENTAL,
            Self::FullSpacklingAddon => &FULL_SPACKLING_ADDON,
        }
    }
}

impl fmt::Display for PriceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceCode {
    type Err = CatalogError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == code)
            .ok_or_else(|| CatalogError::UnknownCode(code.to_string()))
    }
}

impl Serialize for PriceCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PriceCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Immutable catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceItem {
    pub code: &'static str,
    pub name: &'static str,
    pub category: PriceCategory,
    pub unit: PriceUnit,
    pub unit_price_nok: i64,
    #[serde(skip_serializing_if = "untagged")]
    pub tags: &'static [JobType],
}

/// Raised when a code from outside the process does not name a catalog row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown price item: {0}")]
    UnknownCode(String),
}

static SPACKLING_AND_PAINTING: PriceItem = PriceItem {
    code: "work.sparking_og_maling",
    name: "Sparkling + maling",
    category: PriceCategory::Work,
    unit: PriceUnit::SquareMetre,
    unit_price_nok: 290,
    tags: &[JobType::Interior],
};

static SPACKLING: PriceItem = PriceItem {
    code: "work.sparking",
    name: "Sparkling",
    category: PriceCategory::Work,
    unit: PriceUnit::SquareMetre,
    unit_price_nok: 240,
    tags: &[JobType::Interior],
};

static FULL_SPACKLING: PriceItem = PriceItem {
    code: "work.helsparkling",
    name: "Helsparkling",
    category: PriceCategory::Work,
    unit: PriceUnit::SquareMetre,
    unit_price_nok: 548,
    tags: &[JobType::Interior],
};

static INTERIOR_PAINTING: PriceItem = PriceItem {
    code: "work.innvendig_maling",
    name: "Innvendig maling",
    category: PriceCategory::Work,
    unit: PriceUnit::SquareMetre,
    unit_price_nok: 150,
    tags: &[JobType::Interior],
};

static EXTERIOR_PAINTING: PriceItem = PriceItem {
    code: "work.utvendig_maling",
    name: "Utvendig maling",
    category: PriceCategory::Work,
    unit: PriceUnit::SquareMetre,
    unit_price_nok: 350,
    tags: &[JobType::Exterior],
};

static WINDOW_LIST_FREE: PriceItem = PriceItem {
    code: "work.vindu_listefritt",
    name: "Vindu listefritt",
    category: PriceCategory::Work,
    unit: PriceUnit::Piece,
    unit_price_nok: 800,
    tags: &[],
};

static DOOR_LIST_FREE: PriceItem = PriceItem {
    code: "work.dor_listefritt",
    name: "Dør listefritt",
    category: PriceCategory::Work,
    unit: PriceUnit::Piece,
    unit_price_nok: 550,
    tags: &[],
};

static SCAFFOLD_RENTAL: PriceItem = PriceItem {
    code: "rental.stillas_m2_week",
    name: "Stillas leie (85 kr per m² vegg per uke)",
    category: PriceCategory::Rental,
    unit: PriceUnit::SquareMetre,
    unit_price_nok: 85,
    tags: &[JobType::Exterior],
};

static FULL_SPACKLING_ADDON: PriceItem = PriceItem {
    code: "addon.helsparkling",
    name: "Tilvalg helsparkling",
    category: PriceCategory::Addon,
    unit: PriceUnit::SquareMetre,
    unit_price_nok: 80,
    tags: &[],
};

fn untagged(tags: &&'static [JobType]) -> bool {
    tags.is_empty()
}

/// Every catalog row in declaration order.
pub fn price_catalog() -> Vec<&'static PriceItem> {
    PriceCode::ALL.into_iter().map(PriceCode::item).collect()
}

pub fn lookup(code: &str) -> Result<&'static PriceItem, CatalogError> {
    code.parse::<PriceCode>().map(PriceCode::item)
}
