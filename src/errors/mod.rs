pub mod types;
pub mod classification;

pub use types::DashError;
pub use classification::ErrorClassification;
