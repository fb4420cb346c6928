pub mod driver;
pub mod events;
pub mod metrics;
pub mod phase;
pub mod runner;
pub mod state;

pub use driver::{ProgressDriver, TickOutcome};
pub use events::ScanEvent;
pub use phase::{Phase, StepTable};
pub use runner::{RunOutcome, RunTiming, ScanRunner};
pub use state::{DerivedMetrics, MetricTargets, ProgressSnapshot, RunStatus, ScanKind};
