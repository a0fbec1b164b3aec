use std::process::ExitCode;

use tracing::info;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_cost_per_km_summary;
use roadcost::services::cost_per_km::{load_cost_rows_from_yaml_file, summarize_cost_per_km};
use roadcost::services::present_value::load_present_value_from_yaml_file;

pub async fn cost_per_km_command(cmd: Commands) -> ExitCode {
    let Commands::CostPerKm {
        input,
        rates,
        output,
        present_year,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let present_value = match load_present_value_from_yaml_file(&rates).await {
        Ok(pv) => pv,
        Err(e) => {
            eprintln!("Failed to load present value rates: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    let rows = match load_cost_rows_from_yaml_file(&input).await {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Failed to load cost rows: {e:?}");
            return ExitCode::FAILURE;
        }
    };
    info!(rows = rows.len(), present_year, "summarizing cost per km");

    let summary = summarize_cost_per_km(&rows, present_year, &present_value);
    let yaml = match serde_yaml::to_string(&summary) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Failed to serialize cost per km summary: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = tokio::fs::write(&output, yaml).await {
        eprintln!("Failed to write cost per km summary: {e:?}");
        return ExitCode::FAILURE;
    }

    println!("{}", format_cost_per_km_summary(&summary));
    println!("Cost per km summary written to {output}");
    ExitCode::SUCCESS
}
