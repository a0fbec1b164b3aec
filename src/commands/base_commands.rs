use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate the item costs of a project into a cost sheet
    CostSheet {
        /// Cost sheet YAML file
        #[arg(short, long)]
        input: String,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
    },
    /// Predict item costs of every functional unit through the predictor service
    Predict {
        /// Path to predictor config YAML
        #[arg(short, long)]
        config: String,
        /// Prediction request YAML file
        #[arg(short, long)]
        input: String,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
    },
    /// Bring historical project costs to present value and fit a trend line
    PresentValue {
        /// Historical samples YAML file
        #[arg(short, long)]
        input: String,
        /// Present value rates YAML file
        #[arg(short, long)]
        rates: String,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
        /// Year to bring costs to
        #[arg(short = 'y', long, default_value_t = default_present_year())]
        present_year: i32,
        /// Optional PNG chart of the projection
        #[arg(long)]
        plot: Option<String>,
    },
    /// Summarize present value cost per km by item and scope
    CostPerKm {
        /// Cost rows YAML file
        #[arg(short, long)]
        input: String,
        /// Present value rates YAML file
        #[arg(short, long)]
        rates: String,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
        /// Year to bring costs to
        #[arg(short = 'y', long, default_value_t = default_present_year())]
        present_year: i32,
    },
    /// Compare the present value history of one item type across functional units
    ItemComparison {
        /// Item cost rows YAML file
        #[arg(short, long)]
        input: String,
        /// Present value rates YAML file
        #[arg(short, long)]
        rates: String,
        /// Item type to compare
        #[arg(short = 't', long)]
        item_type_id: u32,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
        /// Year to bring costs to
        #[arg(short = 'y', long, default_value_t = default_present_year())]
        present_year: i32,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn default_present_year() -> i32 {
    Local::now().year()
}
