use std::process::ExitCode;

use tracing::info;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_trend_projection;
use roadcost::services::history_yaml::load_history_from_yaml_file;
use roadcost::services::present_value::load_present_value_from_yaml_file;
use roadcost::services::scope_palette::ScopePalette;
use roadcost::services::trend_plot::write_trend_png;
use roadcost::services::trend_projection::project_trend;

pub async fn present_value_command(cmd: Commands) -> ExitCode {
    let Commands::PresentValue {
        input,
        rates,
        output,
        present_year,
        plot,
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

    let samples = match load_history_from_yaml_file(&input).await {
        Ok(samples) => samples,
        Err(e) => {
            eprintln!("Failed to load historical samples: {e:?}");
            return ExitCode::FAILURE;
        }
    };
    info!(samples = samples.len(), present_year, "projecting historical costs");

    let projection = project_trend(&samples, present_year, &present_value);

    let yaml = match serde_yaml::to_string(&projection) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Failed to serialize trend projection: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = tokio::fs::write(&output, yaml).await {
        eprintln!("Failed to write trend projection: {e:?}");
        return ExitCode::FAILURE;
    }

    println!("{}", format_trend_projection(&projection));
    println!("Trend projection written to {output}");

    if let Some(plot_path) = plot {
        let mut palette = ScopePalette::new();
        if let Err(e) = write_trend_png(&plot_path, &projection, &mut palette).await {
            eprintln!("Failed to write trend chart: {e:?}");
            return ExitCode::FAILURE;
        }
        println!("Trend chart written to {plot_path}");
    }

    ExitCode::SUCCESS
}
