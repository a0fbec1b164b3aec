use std::process::ExitCode;

use tracing::info;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_cost_sheet_report;
use roadcost::services::cost_sheet::build_cost_sheet_report;
use roadcost::services::cost_sheet_yaml::load_cost_sheet_from_yaml_file;

pub async fn cost_sheet_command(cmd: Commands) -> ExitCode {
    let Commands::CostSheet { input, output } = cmd else {
        return ExitCode::FAILURE;
    };

    let sheet = match load_cost_sheet_from_yaml_file(&input).await {
        Ok(sheet) => sheet,
        Err(e) => {
            eprintln!("Failed to load cost sheet: {e:?}");
            return ExitCode::FAILURE;
        }
    };
    info!(code = %sheet.project.code, items = sheet.required_items.len(), "loaded cost sheet");

    let report = build_cost_sheet_report(&sheet);
    let yaml = match serde_yaml::to_string(&report) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Failed to serialize cost sheet report: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = tokio::fs::write(&output, yaml).await {
        eprintln!("Failed to write cost sheet report: {e:?}");
        return ExitCode::FAILURE;
    }

    println!("{}", format_cost_sheet_report(&report));
    println!("Cost sheet written to {output}");
    ExitCode::SUCCESS
}
