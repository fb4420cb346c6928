use serde::{Deserialize, Serialize};

use crate::errors::DashError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What triggered a run. Informational only; every kind runs the same simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    #[default]
    Standard,
    Network,
    Web,
    Emergency,
    Query,
}

impl ScanKind {
    pub const ALL: [ScanKind; 5] = [
        Self::Standard,
        Self::Network,
        Self::Web,
        Self::Emergency,
        Self::Query,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Network => "network",
            Self::Web => "web",
            Self::Emergency => "emergency",
            Self::Query => "query",
        }
    }
}

impl std::fmt::Display for ScanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ScanKind {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == lower)
            .ok_or_else(|| {
                DashError::InvalidArgument(format!(
                    "Unknown scan kind: {}. Valid kinds: standard, network, web, emergency, query",
                    s
                ))
            })
    }
}

/// Upper bounds the synthetic counters grow towards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricTargets {
    pub max_hosts: u32,
    pub max_vulnerabilities: u32,
    pub max_ports: u32,
}

impl Default for MetricTargets {
    fn default() -> Self {
        Self {
            max_hosts: 45,
            max_vulnerabilities: 23,
            max_ports: 156,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DerivedMetrics {
    pub hosts: u32,
    pub vulnerabilities: u32,
    pub ports: u32,
}

/// Plain data handed to the presentation layer after every state change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressSnapshot {
    pub status: RunStatus,
    pub completion_fraction: f64,
    pub percent: u32,
    pub elapsed_weight: f64,
    pub current_phase_index: usize,
    pub current_phase_label: String,
    pub completed_phases: usize,
    pub metrics: DerivedMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_kind_parse() {
        assert_eq!("emergency".parse::<ScanKind>().unwrap(), ScanKind::Emergency);
        assert_eq!(" Query ".parse::<ScanKind>().unwrap(), ScanKind::Query);
        assert!(matches!(
            "deep".parse::<ScanKind>(),
            Err(DashError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_scan_kind_default() {
        assert_eq!(ScanKind::default(), ScanKind::Standard);
    }

    #[test]
    fn test_run_status_serialization() {
        let json = serde_json::to_string(&RunStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }

    #[test]
    fn test_metric_targets_defaults() {
        let t = MetricTargets::default();
        assert_eq!((t.max_hosts, t.max_vulnerabilities, t.max_ports), (45, 23, 156));
    }
}
