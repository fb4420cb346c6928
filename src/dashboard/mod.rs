pub mod charts;
pub mod refresh;

pub use charts::{Chart, ChartKind, ChartSeries, RISK_DISTRIBUTION, VULNERABILITY_TRENDS};
pub use refresh::spawn_refresh;
