use serde::{Deserialize, Deserializer, Serialize};

use super::catalog::{PriceCode, PriceUnit};

/// Which side of the building the job covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Interior,
    Exterior,
}

impl JobType {
    pub const fn ordered() -> [Self; 2] {
        [Self::Interior, Self::Exterior]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Interior => "Innvendig",
            Self::Exterior => "Utvendig",
        }
    }

    /// Operation the form falls back to when the job type changes.
    pub const fn default_operation(self) -> Operation {
        match self {
            Self::Interior => Operation::PaintInterior,
            Self::Exterior => Operation::PaintExterior,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    PaintInterior,
    SpackleOnly,
    SpackleAndPaint,
    FullSpackle,
    PaintExterior,
}

impl Operation {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::PaintInterior,
            Self::SpackleOnly,
            Self::SpackleAndPaint,
            Self::FullSpackle,
            Self::PaintExterior,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PaintInterior => "Innvendig maling",
            Self::SpackleOnly => "Sparkling",
            Self::SpackleAndPaint => "Sparkling + maling",
            Self::FullSpackle => "Helsparkling",
            Self::PaintExterior => "Utvendig maling",
        }
    }

    pub const fn job_type(self) -> JobType {
        match self {
            Self::PaintExterior => JobType::Exterior,
            _ => JobType::Interior,
        }
    }

    pub const fn is_valid_for(self, job_type: JobType) -> bool {
        matches!(
            (self.job_type(), job_type),
            (JobType::Interior, JobType::Interior) | (JobType::Exterior, JobType::Exterior)
        )
    }

    /// Catalog entry priced against the treated area for this operation.
    pub const fn main_work_code(self) -> PriceCode {
        match self {
            Self::PaintInterior => PriceCode::InteriorPainting,
            Self::SpackleOnly => PriceCode::Spackling,
            Self::SpackleAndPaint => PriceCode::SpacklingAndPainting,
            Self::FullSpackle => PriceCode::FullSpackling,
            Self::PaintExterior => PriceCode::ExteriorPainting,
        }
    }

    /// Spackling operations are the only ones where trim-free windows and doors apply.
    pub const fn supports_list_free(self) -> bool {
        matches!(
            self,
            Self::SpackleOnly | Self::SpackleAndPaint | Self::FullSpackle
        )
    }
}

/// Surface condition used as a proxy for preparation work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Good,
    Normal,
    Bad,
}

impl Condition {
    pub const fn ordered() -> [Self; 3] {
        [Self::Good, Self::Normal, Self::Bad]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "God",
            Self::Normal => "Normal",
            Self::Bad => "Dårlig",
        }
    }
}

/// Job description supplied by the caller.
///
/// Numeric fields are kept as `f64` and deserialize leniently: numbers, numeric strings, and
/// anything else (which reads as zero, as does a non-finite string like `"NaN"`) are all accepted. The engine clamps them, so a malformed
/// quantity degrades to an empty line instead of failing the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateInput {
    pub job_type: JobType,
    pub operation: Operation,
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub area_m2: f64,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub wall_area_m2: Option<f64>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub windows_count: Option<f64>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub doors_count: Option<f64>,
    pub condition: Condition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_materials: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_scaffold: Option<bool>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub scaffold_weeks: Option<f64>,
}

impl EstimateInput {
    pub fn new(job_type: JobType, operation: Operation, area_m2: f64, condition: Condition) -> Self {
        Self {
            job_type,
            operation,
            area_m2,
            wall_area_m2: None,
            windows_count: None,
            doors_count: None,
            condition,
            include_materials: None,
            needs_scaffold: None,
            scaffold_weeks: None,
        }
    }

    pub fn includes_materials(&self) -> bool {
        self.include_materials.unwrap_or(true)
    }

    pub fn scaffold_requested(&self) -> bool {
        self.job_type == JobType::Exterior && self.needs_scaffold.unwrap_or(false)
    }
}

/// One priced row of the breakdown. Rows sharing a code are kept apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub code: PriceCode,
    pub name: String,
    pub unit: PriceUnit,
    pub qty: f64,
    pub unit_price_nok: i64,
    pub subtotal_nok: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    pub items: Vec<LineItem>,
    pub base_subtotal_nok: i64,
    pub total_low_nok: i64,
    pub total_high_nok: i64,
    pub explanation: Vec<String>,
}

/// Clamp used for every caller-supplied quantity: negative and non-finite values become zero.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn lenient_number(value: serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(number) => number.as_f64().unwrap_or(0.0),
        serde_json::Value::String(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .unwrap_or(0.0),
        serde_json::Value::Bool(flag) => f64::from(u8::from(flag)),
        _ => 0.0,
    }
}

fn deserialize_lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(lenient_number(value))
}

fn deserialize_optional_lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.map(lenient_number))
}
