pub mod cost_per_km;
pub mod cost_sheet;
pub mod cost_sheet_yaml;
pub mod cost_tree;
pub mod history_yaml;
pub mod item_comparison;
pub mod prediction;
pub mod prediction_types;
pub mod predictor;
pub mod predictor_api;
pub mod present_value;
pub mod regression;
pub mod required_items_json;
pub mod scope_palette;
pub mod trend_plot;
pub mod trend_projection;
