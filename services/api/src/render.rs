use clap::{Args, ValueEnum};
use paint_estimate::error::AppError;
use paint_estimate::estimate::{
    calculate_estimate, price_catalog, scaffold_weeks, Condition, EstimateForm, EstimateInput,
    EstimateResult, FormAction, JobType, Operation, PriceItem,
};
use paint_estimate::leads::format_nok;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum JobTypeArg {
    Interior,
    Exterior,
}

impl From<JobTypeArg> for JobType {
    fn from(value: JobTypeArg) -> Self {
        match value {
            JobTypeArg::Interior => JobType::Interior,
            JobTypeArg::Exterior => JobType::Exterior,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OperationArg {
    PaintInterior,
    SpackleOnly,
    SpackleAndPaint,
    FullSpackle,
    PaintExterior,
}

impl From<OperationArg> for Operation {
    fn from(value: OperationArg) -> Self {
        match value {
            OperationArg::PaintInterior => Operation::PaintInterior,
            OperationArg::SpackleOnly => Operation::SpackleOnly,
            OperationArg::SpackleAndPaint => Operation::SpackleAndPaint,
            OperationArg::FullSpackle => Operation::FullSpackle,
            OperationArg::PaintExterior => Operation::PaintExterior,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ConditionArg {
    Good,
    Normal,
    Bad,
}

impl From<ConditionArg> for Condition {
    fn from(value: ConditionArg) -> Self {
        match value {
            ConditionArg::Good => Condition::Good,
            ConditionArg::Normal => Condition::Normal,
            ConditionArg::Bad => Condition::Bad,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Interior or exterior job
    #[arg(long, value_enum, default_value_t = JobTypeArg::Interior)]
    pub(crate) job_type: JobTypeArg,
    /// Work to price (defaults to painting for the chosen job type)
    #[arg(long, value_enum)]
    pub(crate) operation: Option<OperationArg>,
    /// Wall or facade area in m² (not floor area)
    #[arg(long, default_value_t = 80.0)]
    pub(crate) area: f64,
    /// Exterior wall area used for scaffold sizing (defaults to --area)
    #[arg(long)]
    pub(crate) wall_area: Option<f64>,
    /// Trim-free windows (interior spackling only)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) windows: f64,
    /// Trim-free doors (interior spackling only)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) doors: f64,
    /// Surface condition
    #[arg(long, value_enum, default_value_t = ConditionArg::Normal)]
    pub(crate) condition: ConditionArg,
    /// Leave material cost out of the range
    #[arg(long)]
    pub(crate) no_materials: bool,
    /// Include scaffold rental (exterior only)
    #[arg(long)]
    pub(crate) scaffold: bool,
    /// Print the estimate as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl EstimateArgs {
    pub(crate) fn to_form(&self) -> EstimateForm {
        let mut actions = vec![
            FormAction::SetJobType(self.job_type.into()),
            FormAction::SetArea(self.area),
            FormAction::SetWallArea(self.wall_area.unwrap_or(0.0)),
            FormAction::SetCondition(self.condition.into()),
            FormAction::SetNeedsScaffold(self.scaffold),
            FormAction::SetIncludeMaterials(!self.no_materials),
        ];
        if let Some(operation) = self.operation {
            actions.push(FormAction::SetOperation(operation.into()));
        }
        // Counts go last so the operation is settled before trim-free gating runs.
        actions.push(FormAction::SetWindows(self.windows));
        actions.push(FormAction::SetDoors(self.doors));

        EstimateForm::default().apply_all(actions)
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let input = args.to_form().to_input();
    let result = calculate_estimate(&input);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_estimate(&input, &result));
    }
    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let catalog = price_catalog();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        print!("{}", render_catalog(&catalog));
    }
    Ok(())
}

pub(crate) fn render_estimate(input: &EstimateInput, result: &EstimateResult) -> String {
    let mut lines = vec![format!(
        "{} – {} ({} m², tilstand {})",
        input.job_type.label(),
        input.operation.label(),
        input.area_m2,
        input.condition.label()
    )];
    if input.scaffold_requested() {
        let weeks = scaffold_weeks(input);
        lines.push(format!("Stillas: {}–{} uke(r)", weeks.low, weeks.high));
    }

    lines.push(String::new());
    lines.push("Linjer".to_string());
    if result.items.is_empty() {
        lines.push("- ingen".to_string());
    }
    lines.extend(result.items.iter().map(|item| {
        format!(
            "- {}: {} {} x {} = {}",
            item.name,
            item.qty,
            item.unit.label(),
            format_nok(item.unit_price_nok),
            format_nok(item.subtotal_nok)
        )
    }));

    lines.push(String::new());
    lines.push(format!(
        "Sum før påslag: {}",
        format_nok(result.base_subtotal_nok)
    ));
    lines.push(format!(
        "Prisintervall: {} – {}",
        format_nok(result.total_low_nok),
        format_nok(result.total_high_nok)
    ));

    lines.push(String::new());
    lines.extend(result.explanation.iter().map(|line| format!("* {line}")));
    terminated(lines)
}

pub(crate) fn render_catalog(catalog: &[&PriceItem]) -> String {
    terminated(catalog.iter().map(|item| {
        format!(
            "{:<26} {:<42} {:>9} / {}",
            item.code,
            item.name,
            format_nok(item.unit_price_nok),
            item.unit.label()
        )
    }))
}

fn terminated<I>(lines: I) -> String
where
    I: IntoIterator<Item = String>,
{
    lines.into_iter().map(|line| line + "\n").collect()
}
