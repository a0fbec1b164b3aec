mod commands;

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::cost_per_km_cmd::cost_per_km_command;
use crate::commands::cost_sheet_cmd::cost_sheet_command;
use crate::commands::item_comparison_cmd::item_comparison_command;
use crate::commands::predict_cmd::predict_command;
use crate::commands::present_value_cmd::present_value_command;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::CostSheet { .. } => cost_sheet_command(cmd).await,
        cmd @ Commands::Predict { .. } => predict_command(cmd).await,
        cmd @ Commands::PresentValue { .. } => present_value_command(cmd).await,
        cmd @ Commands::CostPerKm { .. } => cost_per_km_command(cmd).await,
        cmd @ Commands::ItemComparison { .. } => item_comparison_command(cmd).await,
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            let name = command.get_name().to_string();
            generate(shell, &mut command, name, &mut io::stdout());
            ExitCode::SUCCESS
        }
    }
}
