use serde::Serialize;

use super::domain::{non_negative, Condition, EstimateInput, JobType};

/// Lowest price ever quoted, applied to each bound independently.
pub const MIN_PRICE_NOK: i64 = 4000;

/// Wall area from which scaffolding is expected to stay up a second week.
pub(crate) const LARGE_WALL_AREA_M2: f64 = 200.0;

/// Paired low/high factor applied to a running total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeFactor {
    pub low: f64,
    pub high: f64,
}

pub const fn condition_multiplier(condition: Condition) -> RangeFactor {
    match condition {
        Condition::Good => RangeFactor {
            low: 0.95,
            high: 1.05,
        },
        Condition::Normal => RangeFactor {
            low: 1.00,
            high: 1.15,
        },
        Condition::Bad => RangeFactor {
            low: 1.10,
            high: 1.35,
        },
    }
}

/// Material cost as a fraction of the conditioned total.
pub const fn material_markup(job_type: JobType) -> RangeFactor {
    match job_type {
        JobType::Interior => RangeFactor {
            low: 0.10,
            high: 0.15,
        },
        JobType::Exterior => RangeFactor {
            low: 0.12,
            high: 0.20,
        },
    }
}

/// Scaffold rental duration in whole weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekRange {
    pub low: u32,
    pub high: u32,
}

impl WeekRange {
    pub fn extra(&self) -> u32 {
        self.high - self.low
    }
}

/// Half-up rounding to whole kroner, matching how every subtotal and total is rounded.
///
/// Out-of-range values saturate at the `i64` bounds; NaN reads as zero.
pub fn round_nok(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Wall area used for scaffold sizing; falls back to the treated area when absent or zero.
pub fn effective_wall_area(input: &EstimateInput) -> f64 {
    match input.wall_area_m2.map(non_negative) {
        Some(wall) if wall > 0.0 => wall,
        _ => non_negative(input.area_m2),
    }
}

pub fn scaffold_weeks(input: &EstimateInput) -> WeekRange {
    let base = match input.scaffold_weeks {
        Some(weeks) if weeks.is_finite() => weeks,
        _ => 1.0,
    };
    let low = base;
    let mut high = base;

    if input.condition == Condition::Bad {
        high = high.max(2.0);
    }
    if effective_wall_area(input) >= LARGE_WALL_AREA_M2 {
        high = high.max(2.0);
    }

    let low = whole_weeks(round_nok(low).max(1));
    let high = whole_weeks(round_nok(high)).max(low);
    WeekRange { low, high }
}

fn whole_weeks(weeks: i64) -> u32 {
    u32::try_from(weeks.max(0)).unwrap_or(u32::MAX)
}

/// Applies the condition multiplier, then the optional material markup on the multiplied totals.
pub(crate) fn price_range(base_subtotal: i64, input: &EstimateInput) -> (i64, i64) {
    let multiplier = condition_multiplier(input.condition);
    let mut low = round_nok(base_subtotal as f64 * multiplier.low);
    let mut high = round_nok(base_subtotal as f64 * multiplier.high);

    if input.includes_materials() {
        let markup = material_markup(input.job_type);
        low = low.saturating_add(round_nok(low as f64 * markup.low));
        high = high.saturating_add(round_nok(high as f64 * markup.high));
    }

    (low.max(MIN_PRICE_NOK), high.max(MIN_PRICE_NOK))
}

pub(crate) fn percent(fraction: f64) -> i64 {
    round_nok(fraction * 100.0)
}
