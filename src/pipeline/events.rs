use crate::pipeline::state::{ProgressSnapshot, ScanKind};
use crate::views::ViewName;

/// Messages sent from the scan engine to whatever is presenting it.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// A run was accepted and the surface should open
    Started {
        run_id: String,
        kind: ScanKind,
        snapshot: ProgressSnapshot,
    },
    /// One tick worth of progress
    Progress(ProgressSnapshot),
    /// The current phase moved forward
    PhaseChanged {
        index: usize,
        label: String,
    },
    /// The run finished; fired once per run
    Completed(ProgressSnapshot),
    /// Run state went back to initial values (cancel or dismissal)
    Reset(ProgressSnapshot),
    /// The post-completion delay elapsed and results are on screen
    ResultsReady {
        run_id: String,
    },
    ViewChanged {
        view: ViewName,
    },
}
