pub mod coord;
pub mod functional_unit;
pub mod history;
pub mod item;
pub mod project;
pub mod scope;
pub mod trend;
