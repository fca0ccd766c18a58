//! Price-range estimation for painting and spackling jobs.
//!
//! [`calculate_estimate`] is a pure function over [`EstimateInput`]: it reads the static price
//! catalog, never performs I/O, and returns the same [`EstimateResult`] for the same input.

pub mod catalog;
pub mod domain;
pub mod form;
mod rules;

pub use catalog::{
    lookup, price_catalog, CatalogError, PriceCategory, PriceCode, PriceItem, PriceUnit,
};
pub use domain::{Condition, EstimateInput, EstimateResult, JobType, LineItem, Operation};
pub use form::{EstimateForm, FormAction};
pub use rules::{
    condition_multiplier, effective_wall_area, material_markup, round_nok, scaffold_weeks,
    RangeFactor, WeekRange, MIN_PRICE_NOK,
};

use domain::non_negative;

pub const DISCLAIMER: &str =
    "Pris er et estimat (intervall) basert på areal, valg og tilstand. Befaring kan gi fastpris.";

pub const SCAFFOLD_NOTE: &str = "Stillas beregnes som 85 kr per m² vegg per uke (vanligvis 1 uke, ved større jobb/tilstand kan det bli 2).";

/// Breakdown under construction. Rows with a non-positive quantity are dropped on insert.
#[derive(Debug, Default)]
struct LineItems {
    items: Vec<LineItem>,
}

impl LineItems {
    fn add(&mut self, code: PriceCode, qty: f64) {
        self.add_named(code, qty, None);
    }

    fn add_named(&mut self, code: PriceCode, qty: f64, name: Option<String>) {
        if !qty.is_finite() || qty <= 0.0 {
            return;
        }
        let item = code.item();
        self.items.push(LineItem {
            code,
            name: name.unwrap_or_else(|| item.name.to_string()),
            unit: item.unit,
            qty,
            unit_price_nok: item.unit_price_nok,
            subtotal_nok: round_nok(qty * item.unit_price_nok as f64),
        });
    }

    fn subtotal(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |sum, item| sum.saturating_add(item.subtotal_nok))
    }
}

pub fn calculate_estimate(input: &EstimateInput) -> EstimateResult {
    let area = non_negative(input.area_m2);
    let windows = non_negative(input.windows_count.unwrap_or(0.0));
    let doors = non_negative(input.doors_count.unwrap_or(0.0));

    let mut items = LineItems::default();
    items.add(input.operation.main_work_code(), area);
    items.add(PriceCode::WindowListFree, windows);
    items.add(PriceCode::DoorListFree, doors);

    if input.scaffold_requested() {
        let wall_area = effective_wall_area(input);
        let weeks = scaffold_weeks(input);

        items.add_named(
            PriceCode::ScaffoldRental,
            wall_area * f64::from(weeks.low),
            Some(format!("Stillas (85 kr/m²/uke) – {} uke", weeks.low)),
        );
        if weeks.high > weeks.low {
            items.add_named(
                PriceCode::ScaffoldRental,
                wall_area * f64::from(weeks.extra()),
                Some(format!("Stillas (85 kr/m²/uke) – ekstra {} uke", weeks.extra())),
            );
        }
    }

    let base_subtotal = items.subtotal();
    let (total_low, total_high) = rules::price_range(base_subtotal, input);

    let mut explanation = vec![DISCLAIMER.to_string()];
    if input.includes_materials() {
        let markup = material_markup(input.job_type);
        explanation.push(format!(
            "Materialer estimert som {}–{}% av sum.",
            rules::percent(markup.low),
            rules::percent(markup.high)
        ));
    }
    if input.scaffold_requested() {
        explanation.push(SCAFFOLD_NOTE.to_string());
    }

    EstimateResult {
        items: items.items,
        base_subtotal_nok: base_subtotal,
        total_low_nok: total_low,
        total_high_nok: total_high,
        explanation,
    }
}
