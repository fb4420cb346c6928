pub mod actions;
pub mod controller;

pub use actions::QuickAction;
pub use controller::{DashboardController, RunInfo};
