use std::process::ExitCode;

use tracing::info;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_item_comparison;
use roadcost::services::item_comparison::{compare_item, load_item_cost_rows_from_yaml_file};
use roadcost::services::present_value::load_present_value_from_yaml_file;

pub async fn item_comparison_command(cmd: Commands) -> ExitCode {
    let Commands::ItemComparison {
        input,
        rates,
        item_type_id,
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

    let rows = match load_item_cost_rows_from_yaml_file(&input).await {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Failed to load item cost rows: {e:?}");
            return ExitCode::FAILURE;
        }
    };
    info!(rows = rows.len(), item_type_id, present_year, "comparing item history");

    let comparison = compare_item(&rows, item_type_id, present_year, &present_value);
    let yaml = match serde_yaml::to_string(&comparison) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Failed to serialize item comparison: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = tokio::fs::write(&output, yaml).await {
        eprintln!("Failed to write item comparison: {e:?}");
        return ExitCode::FAILURE;
    }

    println!("{}", format_item_comparison(&comparison));
    println!("Item comparison written to {output}");
    ExitCode::SUCCESS
}
