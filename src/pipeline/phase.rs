use serde::{Deserialize, Serialize};

use crate::errors::DashError;

/// One named, weighted segment of a simulated scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub label: String,
    pub weight: f64,
}

impl Phase {
    pub fn new(label: impl Into<String>, weight: f64) -> Self {
        Self {
            label: label.into(),
            weight,
        }
    }
}

pub struct PhaseDefinition {
    pub label: &'static str,
    pub weight: f64,
}

pub static DEFAULT_PHASES: &[PhaseDefinition] = &[
    PhaseDefinition {
        label: "Initializing scan engine...",
        weight: 3.0,
    },
    PhaseDefinition {
        label: "Discovering targets...",
        weight: 8.0,
    },
    PhaseDefinition {
        label: "Port scanning...",
        weight: 12.0,
    },
    PhaseDefinition {
        label: "Service enumeration...",
        weight: 10.0,
    },
    PhaseDefinition {
        label: "Vulnerability detection...",
        weight: 20.0,
    },
    PhaseDefinition {
        label: "Analysis and reporting...",
        weight: 8.0,
    },
    PhaseDefinition {
        label: "Finalizing results...",
        weight: 4.0,
    },
];

/// Ordered, immutable phase sequence used for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct StepTable {
    phases: Vec<Phase>,
    total_weight: f64,
}

impl StepTable {
    pub fn new(phases: Vec<Phase>) -> Result<Self, DashError> {
        if phases.is_empty() {
            return Err(DashError::Config("Step table must contain at least one phase".into()));
        }
        for phase in &phases {
            if !(phase.weight.is_finite() && phase.weight > 0.0) {
                return Err(DashError::Config(format!(
                    "Phase '{}' has non-positive weight {}",
                    phase.label, phase.weight
                )));
            }
        }
        let total_weight = phases.iter().map(|p| p.weight).sum();
        Ok(Self {
            phases,
            total_weight,
        })
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Label of the phase at a 1-based index. Out-of-range indices clamp.
    pub fn label(&self, index: usize) -> &str {
        let i = index.clamp(1, self.phases.len()) - 1;
        &self.phases[i].label
    }

    /// 1-based index of the phase in progress after `elapsed` weight.
    ///
    /// A phase is entered only once strictly more than the cumulative weight of
    /// its predecessors has elapsed; past the end the last phase is reported.
    pub fn phase_index_at(&self, elapsed: f64) -> usize {
        let mut cumulative = 0.0;
        let mut index = 1;
        for phase in &self.phases {
            if elapsed > cumulative + phase.weight {
                cumulative += phase.weight;
                index += 1;
            } else {
                break;
            }
        }
        index.min(self.phases.len())
    }
}

impl Default for StepTable {
    fn default() -> Self {
        Self {
            phases: DEFAULT_PHASES
                .iter()
                .map(|d| Phase::new(d.label, d.weight))
                .collect(),
            total_weight: DEFAULT_PHASES.iter().map(|d| d.weight).sum(),
        }
    }
}
