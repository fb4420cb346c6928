use tracing::{debug, info};

use crate::errors::DashError;
use super::metrics::derive_metrics;
use super::phase::StepTable;
use super::state::{DerivedMetrics, MetricTargets, ProgressSnapshot, RunStatus, ScanKind};

pub const DEFAULT_TICK_SIZE: f64 = 0.5;

/// Result of advancing the driver by one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The driver was not running; nothing changed.
    Idle,
    Progress {
        snapshot: ProgressSnapshot,
        phase_changed: bool,
    },
    /// The run just finished. Returned exactly once per run.
    Completed {
        snapshot: ProgressSnapshot,
        phase_changed: bool,
    },
}

/// Synchronous scan progression state machine.
///
/// Timing lives in [`crate::pipeline::runner`]; this type only counts ticks, so
/// every property of a run can be checked without a clock.
#[derive(Debug, Clone)]
pub struct ProgressDriver {
    table: StepTable,
    targets: MetricTargets,
    tick_size: f64,
    status: RunStatus,
    kind: Option<ScanKind>,
    ticks: u64,
    current_phase_index: usize,
}

impl ProgressDriver {
    pub fn new(table: StepTable, targets: MetricTargets, tick_size: f64) -> Result<Self, DashError> {
        if !(tick_size.is_finite() && tick_size > 0.0) {
            return Err(DashError::Config(format!("Tick size must be positive, got {}", tick_size)));
        }
        Ok(Self {
            table,
            targets,
            tick_size,
            status: RunStatus::Idle,
            kind: None,
            ticks: 0,
            current_phase_index: 1,
        })
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    pub fn kind(&self) -> Option<ScanKind> {
        self.kind
    }

    pub fn table(&self) -> &StepTable {
        &self.table
    }

    pub fn tick_size(&self) -> f64 {
        self.tick_size
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of ticks a full run takes: `ceil(total_weight / tick_size)`.
    pub fn ticks_to_complete(&self) -> u64 {
        (self.table.total_weight() / self.tick_size).ceil() as u64
    }

    /// Elapsed weight, clamped to the table's total.
    pub fn elapsed_weight(&self) -> f64 {
        self.raw_elapsed().min(self.table.total_weight())
    }

    pub fn completion_fraction(&self) -> f64 {
        (self.raw_elapsed() / self.table.total_weight()).min(1.0)
    }

    pub fn current_phase_index(&self) -> usize {
        self.current_phase_index
    }

    /// Phases shown as done: everything before the current one, or all of them
    /// once the run has completed.
    pub fn completed_phases(&self) -> usize {
        match self.status {
            RunStatus::Completed => self.table.len(),
            _ => self.current_phase_index - 1,
        }
    }

    pub fn start(&mut self, kind: ScanKind) -> Result<ProgressSnapshot, DashError> {
        if self.is_running() {
            return Err(DashError::AlreadyRunning);
        }
        self.reset();
        self.status = RunStatus::Running;
        self.kind = Some(kind);
        info!(kind = %kind, phases = self.table.len(), total_weight = self.table.total_weight(), "Scan started");
        Ok(self.snapshot())
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }

        self.ticks += 1;
        let elapsed = self.raw_elapsed();
        let new_index = self.table.phase_index_at(elapsed);
        let phase_changed = new_index != self.current_phase_index;
        if phase_changed {
            debug!(
                phase = new_index,
                label = self.table.label(new_index),
                "Entered phase"
            );
        }
        self.current_phase_index = new_index;

        if elapsed >= self.table.total_weight() {
            self.status = RunStatus::Completed;
            info!(ticks = self.ticks, "Scan completed");
            return TickOutcome::Completed {
                snapshot: self.snapshot(),
                phase_changed,
            };
        }

        TickOutcome::Progress {
            snapshot: self.snapshot(),
            phase_changed,
        }
    }

    /// Abort a running scan. Returns the reset snapshot, or `None` when there
    /// was nothing to cancel.
    pub fn cancel(&mut self) -> Option<ProgressSnapshot> {
        if !self.is_running() {
            return None;
        }
        info!(ticks = self.ticks, "Scan cancelled");
        self.reset();
        self.status = RunStatus::Cancelled;
        Some(self.snapshot())
    }

    /// Close the surface of a completed run, returning to idle.
    pub fn dismiss(&mut self) -> Option<ProgressSnapshot> {
        if self.status != RunStatus::Completed {
            return None;
        }
        self.reset();
        self.status = RunStatus::Idle;
        Some(self.snapshot())
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let completion_fraction = self.completion_fraction();
        let metrics = if self.ticks == 0 {
            DerivedMetrics::default()
        } else {
            derive_metrics(completion_fraction, &self.targets)
        };
        let current_phase_label = match self.status {
            RunStatus::Completed => "Scan completed successfully!".to_string(),
            _ => self.table.label(self.current_phase_index).to_string(),
        };
        ProgressSnapshot {
            status: self.status,
            completion_fraction,
            percent: (completion_fraction * 100.0).round() as u32,
            elapsed_weight: self.elapsed_weight(),
            current_phase_index: self.current_phase_index,
            current_phase_label,
            completed_phases: self.completed_phases(),
            metrics,
        }
    }

    fn raw_elapsed(&self) -> f64 {
        self.ticks as f64 * self.tick_size
    }

    fn reset(&mut self) {
        self.ticks = 0;
        self.current_phase_index = 1;
        self.kind = None;
    }
}

impl Default for ProgressDriver {
    fn default() -> Self {
        Self {
            table: StepTable::default(),
            targets: MetricTargets::default(),
            tick_size: DEFAULT_TICK_SIZE,
            status: RunStatus::Idle,
            kind: None,
            ticks: 0,
            current_phase_index: 1,
        }
    }
}
