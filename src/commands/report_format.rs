use roadcost::services::cost_per_km::CostPerKmSummary;
use roadcost::services::cost_sheet::CostSheetReport;
use roadcost::services::item_comparison::ItemComparison;
use roadcost::services::prediction_types::PredictionResult;
use roadcost::services::trend_projection::TrendProjection;

pub fn format_cost_sheet_report(report: &CostSheetReport) -> String {
    let mut lines = Vec::new();
    lines.push("Cost Sheet".to_string());
    lines.push(format!("Project: {} ({})", report.name, report.code));
    lines.push(format!("Length: {:.2} km", report.total_length_km));
    lines.push(format!("Total cost: {:.2}", report.total_cost));
    lines.push(format!("Cost per km: {:.2}", report.cost_per_km));
    lines.push(String::new());
    lines.push("Item | Value".to_string());
    lines.push("-----|------".to_string());
    for row in &report.items {
        let indent = if row.is_parent { "" } else { "  " };
        lines.push(format!("{indent}{} | {:.2}", row.description, row.value));
    }

    lines.join("\n")
}

pub fn format_prediction_result(result: &PredictionResult) -> String {
    let mut lines = Vec::new();
    lines.push("Prediction Report".to_string());
    lines.push(format!("Project: {}", result.project_name));
    lines.push(format!("Functional units: {}", result.functional_unit_count));
    lines.push(format!("Length: {:.2} km", result.total_length_km));
    lines.push(format!("Total cost: {:.2}", result.total_cost));
    lines.push(format!("Cost per km: {:.2}", result.cost_per_km));
    lines.push(format!(
        "Average confidence: {}",
        format_optional(result.average_confidence)
    ));
    lines.push(format!(
        "Predicted items: {} (failed: {})",
        result.metadata.predicted_items, result.metadata.failed_items
    ));
    lines.push(String::new());
    lines.push("Unit | Length km | Cost | Cost per km".to_string());
    lines.push("-----|-----------|------|------------".to_string());
    for unit in &result.units {
        lines.push(format!(
            "{} | {:.2} | {:.2} | {:.2}",
            unit.number, unit.length_km, unit.estimated_cost, unit.cost_per_km
        ));
    }

    lines.join("\n")
}

pub fn format_trend_projection(projection: &TrendProjection) -> String {
    let mut lines = Vec::new();
    lines.push("Present Value Trend".to_string());
    lines.push(format!("Present year: {}", projection.present_year));
    lines.push(format!("Projects: {}", projection.points.len()));
    lines.push(format!("Skipped: {}", projection.skipped));
    match &projection.trend_line {
        Some(line) => lines.push(format!(
            "Trend: cost = {:.4} * km + {:.4}",
            line.slope, line.intercept
        )),
        None => lines.push("Trend: n/a".to_string()),
    }
    lines.push(String::new());
    lines.push("Scope | Projects".to_string());
    lines.push("------|---------".to_string());
    for (scope, indices) in &projection.groups {
        lines.push(format!("{scope} | {}", indices.len()));
    }

    lines.join("\n")
}

pub fn format_cost_per_km_summary(summary: &CostPerKmSummary) -> String {
    let mut lines = Vec::new();
    lines.push("Cost per km (millions)".to_string());
    lines.push(format!("Present year: {}", summary.present_year));
    lines.push(format!("Skipped rows: {}", summary.skipped));
    lines.push(String::new());
    lines.push("Item | Scope | Mean | Median | Count".to_string());
    lines.push("-----|-------|------|--------|------".to_string());
    for stats in &summary.summary {
        lines.push(format!(
            "{} | {} | {:.3} | {:.3} | {}",
            stats.category, stats.scope, stats.mean_millions, stats.median_millions, stats.count
        ));
    }

    lines.join("\n")
}

pub fn format_item_comparison(comparison: &ItemComparison) -> String {
    let mut lines = Vec::new();
    lines.push("Item Comparison".to_string());
    lines.push(format!("Item type: {}", comparison.item_type_id));
    lines.push(format!("Present year: {}", comparison.present_year));
    lines.push(format!("Functional units: {}", comparison.units.len()));
    lines.push(format!("Skipped: {}", comparison.skipped));
    match &comparison.trend_line {
        Some(line) => lines.push(format!(
            "Trend: millions = {:.4} * km + {:.4}",
            line.slope, line.intercept
        )),
        None => lines.push("Trend: n/a".to_string()),
    }

    lines.join("\n")
}

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => "n/a".to_string(),
    }
}
