use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::DashError;
use crate::pipeline::driver::DEFAULT_TICK_SIZE;
use crate::pipeline::phase::{Phase, StepTable};
use crate::pipeline::runner::RunTiming;
use crate::pipeline::state::MetricTargets;
use crate::pipeline::ProgressDriver;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RiskdeckConfig {
    pub scan: Option<ScanConfig>,
    pub metrics: Option<MetricsConfig>,
    pub assistant: Option<AssistantConfig>,
    pub dashboard: Option<DashboardConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ScanConfig {
    pub tick_interval_ms: Option<u64>,
    pub tick_size: Option<f64>,
    pub completion_delay_ms: Option<u64>,
    pub phases: Option<Vec<Phase>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct MetricsConfig {
    pub max_hosts: Option<u32>,
    pub max_vulnerabilities: Option<u32>,
    pub max_ports: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AssistantConfig {
    pub reply_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DashboardConfig {
    pub refresh_interval_secs: Option<u64>,
}

/// Effective values after applying defaults to an optional config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub table: StepTable,
    pub targets: MetricTargets,
    pub tick_size: f64,
    pub timing: RunTiming,
    pub reply_delay: Duration,
    pub refresh_interval: Duration,
}

impl Settings {
    pub fn from_config(config: &RiskdeckConfig) -> Result<Self, DashError> {
        let scan = config.scan.clone().unwrap_or_default();
        let metrics = config.metrics.clone().unwrap_or_default();
        let defaults = Self::default();

        let table = match scan.phases {
            Some(phases) => StepTable::new(phases)?,
            None => defaults.table,
        };

        let targets = MetricTargets {
            max_hosts: metrics.max_hosts.unwrap_or(defaults.targets.max_hosts),
            max_vulnerabilities: metrics
                .max_vulnerabilities
                .unwrap_or(defaults.targets.max_vulnerabilities),
            max_ports: metrics.max_ports.unwrap_or(defaults.targets.max_ports),
        };

        let timing = RunTiming {
            tick_interval: scan
                .tick_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.timing.tick_interval),
            completion_delay: scan
                .completion_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.timing.completion_delay),
        };
        if timing.tick_interval.is_zero() {
            return Err(DashError::Config("scan.tick_interval_ms must be greater than 0".into()));
        }

        let refresh_interval = config
            .dashboard
            .as_ref()
            .and_then(|d| d.refresh_interval_secs)
            .map(Duration::from_secs)
            .unwrap_or(defaults.refresh_interval);
        if refresh_interval.is_zero() {
            return Err(DashError::Config(
                "dashboard.refresh_interval_secs must be greater than 0".into(),
            ));
        }

        Ok(Self {
            table,
            targets,
            tick_size: scan.tick_size.unwrap_or(defaults.tick_size),
            timing,
            reply_delay: config
                .assistant
                .as_ref()
                .and_then(|a| a.reply_delay_ms)
                .map(Duration::from_millis)
                .unwrap_or(defaults.reply_delay),
            refresh_interval,
        })
    }

    pub fn build_driver(&self) -> Result<ProgressDriver, DashError> {
        ProgressDriver::new(self.table.clone(), self.targets, self.tick_size)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            table: StepTable::default(),
            targets: MetricTargets::default(),
            tick_size: DEFAULT_TICK_SIZE,
            timing: RunTiming::default(),
            reply_delay: Duration::from_millis(1000),
            refresh_interval: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = Settings::from_config(&RiskdeckConfig::default()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.timing.tick_interval, Duration::from_millis(500));
        assert_eq!(settings.timing.completion_delay, Duration::from_millis(2000));
        assert_eq!(settings.table.total_weight(), 65.0);
    }

    #[test]
    fn test_partial_metrics_override() {
        let config = RiskdeckConfig {
            metrics: Some(MetricsConfig {
                max_hosts: Some(10),
                ..Default::default()
            }),
            ..Default::default()
        };
        let settings = Settings::from_config(&config).unwrap();
        assert_eq!(settings.targets.max_hosts, 10);
        assert_eq!(settings.targets.max_ports, 156);
    }

    #[test]
    fn test_custom_phases() {
        let config = RiskdeckConfig {
            scan: Some(ScanConfig {
                phases: Some(vec![Phase::new("one", 1.0), Phase::new("two", 2.0)]),
                tick_size: Some(1.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let settings = Settings::from_config(&config).unwrap();
        let driver = settings.build_driver().unwrap();
        assert_eq!(driver.ticks_to_complete(), 3);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = RiskdeckConfig {
            scan: Some(ScanConfig {
                tick_interval_ms: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches!(Settings::from_config(&config), Err(DashError::Config(_))));
    }

    #[test]
    fn test_negative_tick_size_rejected_by_driver() {
        let config = RiskdeckConfig {
            scan: Some(ScanConfig {
                tick_size: Some(-0.5),
                ..Default::default()
            }),
            ..Default::default()
        };
        let settings = Settings::from_config(&config).unwrap();
        assert!(settings.build_driver().is_err());
    }
}
