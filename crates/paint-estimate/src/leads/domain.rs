use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::estimate::{Condition, EstimateInput, EstimateResult, JobType, LineItem, Operation};

/// Identifier wrapper for stored leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeadId(pub String);

/// Identifier wrapper for stored estimates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EstimateId(pub String);

/// Contact details as typed into the form. Nothing here is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerContact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl CustomerContact {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("ukjent kunde")
    }
}

/// Body of a lead submission: the job description plus who to contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub input: EstimateInput,
    #[serde(default)]
    pub customer: CustomerContact,
}

/// Stored lead row. Job fields are flattened so they can be queried without the estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: LeadId,
    pub created_at: DateTime<Utc>,
    pub customer: CustomerContact,
    pub job_type: JobType,
    pub operation: Operation,
    pub condition: Condition,
    pub area_m2: f64,
    pub wall_area_m2: Option<f64>,
    pub windows_count: f64,
    pub doors_count: f64,
    pub needs_scaffold: bool,
    pub scaffold_weeks: Option<f64>,
    pub include_materials: bool,
}

impl LeadRecord {
    pub fn from_submission(
        id: LeadId,
        created_at: DateTime<Utc>,
        input: &EstimateInput,
        customer: CustomerContact,
    ) -> Self {
        Self {
            id,
            created_at,
            customer,
            job_type: input.job_type,
            operation: input.operation,
            condition: input.condition,
            area_m2: input.area_m2,
            wall_area_m2: input.wall_area_m2,
            windows_count: input.windows_count.unwrap_or(0.0),
            doors_count: input.doors_count.unwrap_or(0.0),
            needs_scaffold: input.needs_scaffold.unwrap_or(false),
            scaffold_weeks: input.scaffold_weeks,
            include_materials: input.includes_materials(),
        }
    }
}

/// Stored estimate row, linked to the lead that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRecord {
    pub id: EstimateId,
    pub lead_id: LeadId,
    pub created_at: DateTime<Utc>,
    pub base_subtotal_nok: i64,
    pub total_low_nok: i64,
    pub total_high_nok: i64,
    pub items: Vec<LineItem>,
    pub explanation: Vec<String>,
}

impl EstimateRecord {
    pub fn from_result(
        id: EstimateId,
        lead_id: LeadId,
        created_at: DateTime<Utc>,
        result: EstimateResult,
    ) -> Self {
        Self {
            id,
            lead_id,
            created_at,
            base_subtotal_nok: result.base_subtotal_nok,
            total_low_nok: result.total_low_nok,
            total_high_nok: result.total_high_nok,
            items: result.items,
            explanation: result.explanation,
        }
    }
}

/// Response returned once both rows are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadReceipt {
    pub lead_id: LeadId,
    pub estimate_id: EstimateId,
}

/// Lead with its estimate, as returned by lookups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadDetails {
    pub lead: LeadRecord,
    pub estimate: Option<EstimateRecord>,
}

/// Formats whole kroner the way Norwegian invoices do: `12 000 kr`.
pub fn format_nok(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped} kr")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_nok_groups_thousands() {
        assert_eq!(format_nok(0), "0 kr");
        assert_eq!(format_nok(950), "950 kr");
        assert_eq!(format_nok(4000), "4 000 kr");
        assert_eq!(format_nok(15870), "15 870 kr");
        assert_eq!(format_nok(1_234_567), "1 234 567 kr");
        assert_eq!(format_nok(-4000), "-4 000 kr");
    }

    #[test]
    fn customer_defaults_when_missing() {
        let submission: LeadSubmission = serde_json::from_value(serde_json::json!({
            "input": {
                "jobType": "exterior",
                "operation": "paint_exterior",
                "areaM2": 50,
                "condition": "good"
            }
        }))
        .expect("submission parses");
        assert_eq!(submission.customer, CustomerContact::default());
        assert_eq!(submission.customer.display_name(), "ukjent kunde");
    }

    #[test]
    fn non_finite_quantities_are_stored_as_zero_and_survive_a_round_trip() {
        let submission: LeadSubmission = serde_json::from_value(serde_json::json!({
            "input": {
                "jobType": "interior",
                "operation": "spackle_only",
                "areaM2": "NaN",
                "windowsCount": "inf",
                "condition": "normal"
            }
        }))
        .expect("submission parses");
        let created_at = "2026-05-04T09:30:00Z".parse().expect("timestamp parses");
        let record = LeadRecord::from_submission(
            LeadId("lead-000042".to_string()),
            created_at,
            &submission.input,
            submission.customer,
        );

        assert_eq!(record.area_m2, 0.0);
        assert_eq!(record.windows_count, 0.0);

        let json = serde_json::to_string(&record).expect("record serializes");
        let restored: LeadRecord = serde_json::from_str(&json).expect("record deserializes");
        assert_eq!(restored, record);
    }
}
