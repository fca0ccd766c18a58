use serde::{Deserialize, Serialize};

use super::domain::{non_negative, Condition, EstimateInput, JobType, Operation};

/// Editable estimate form. Every change goes through [`EstimateForm::apply`] so the
/// job type, operation, and trim-free counts can never drift out of step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateForm {
    pub job_type: JobType,
    pub operation: Operation,
    pub area_m2: f64,
    pub wall_area_m2: f64,
    pub condition: Condition,
    pub windows_count: f64,
    pub doors_count: f64,
    pub needs_scaffold: bool,
    pub include_materials: bool,
}

impl Default for EstimateForm {
    fn default() -> Self {
        Self {
            job_type: JobType::Interior,
            operation: Operation::PaintInterior,
            area_m2: 80.0,
            wall_area_m2: 80.0,
            condition: Condition::Normal,
            windows_count: 0.0,
            doors_count: 0.0,
            needs_scaffold: false,
            include_materials: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormAction {
    SetJobType(JobType),
    SetOperation(Operation),
    SetArea(f64),
    SetWallArea(f64),
    SetCondition(Condition),
    SetWindows(f64),
    SetDoors(f64),
    SetNeedsScaffold(bool),
    SetIncludeMaterials(bool),
}

impl EstimateForm {
    pub fn apply(mut self, action: FormAction) -> Self {
        match action {
            FormAction::SetJobType(job_type) => self.job_type = job_type,
            FormAction::SetOperation(operation) => self.operation = operation,
            FormAction::SetArea(area) => self.area_m2 = area,
            FormAction::SetWallArea(area) => self.wall_area_m2 = area,
            FormAction::SetCondition(condition) => self.condition = condition,
            FormAction::SetWindows(count) => self.windows_count = count,
            FormAction::SetDoors(count) => self.doors_count = count,
            FormAction::SetNeedsScaffold(flag) => self.needs_scaffold = flag,
            FormAction::SetIncludeMaterials(flag) => self.include_materials = flag,
        }
        self.reconcile()
    }

    pub fn apply_all<I>(self, actions: I) -> Self
    where
        I: IntoIterator<Item = FormAction>,
    {
        actions.into_iter().fold(self, Self::apply)
    }

    fn reconcile(mut self) -> Self {
        if !self.operation.is_valid_for(self.job_type) {
            self.operation = self.job_type.default_operation();
        }
        if !self.shows_list_free() {
            self.windows_count = 0.0;
            self.doors_count = 0.0;
        }
        self
    }

    pub fn is_exterior(&self) -> bool {
        self.job_type == JobType::Exterior
    }

    /// Trim-free windows and doors only apply to interior spackling work.
    pub fn shows_list_free(&self) -> bool {
        self.job_type == JobType::Interior && self.operation.supports_list_free()
    }

    pub fn to_input(&self) -> EstimateInput {
        let area = non_negative(self.area_m2);
        let wall_area = non_negative(self.wall_area_m2);
        let list_free = self.shows_list_free();

        EstimateInput {
            job_type: self.job_type,
            operation: self.operation,
            area_m2: area,
            wall_area_m2: self
                .is_exterior()
                .then(|| if wall_area > 0.0 { wall_area } else { area }),
            windows_count: Some(if list_free {
                non_negative(self.windows_count)
            } else {
                0.0
            }),
            doors_count: Some(if list_free {
                non_negative(self.doors_count)
            } else {
                0.0
            }),
            condition: self.condition,
            include_materials: Some(self.include_materials),
            needs_scaffold: Some(self.is_exterior() && self.needs_scaffold),
            scaffold_weeks: Some(1.0),
        }
    }
}
