pub mod navigator;

pub use navigator::{ViewName, ViewNavigator};
