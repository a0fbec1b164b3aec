pub mod base_commands;
pub mod cost_per_km_cmd;
pub mod cost_sheet_cmd;
pub mod item_comparison_cmd;
pub mod predict_cmd;
pub mod present_value_cmd;
pub mod report_format;
