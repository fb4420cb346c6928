use super::state::{DerivedMetrics, MetricTargets};

/// Project a completion fraction onto each metric target, truncating toward zero.
///
/// A counter only reaches its maximum once the run is complete.
pub fn derive_metrics(completion_fraction: f64, targets: &MetricTargets) -> DerivedMetrics {
    let fraction = completion_fraction.clamp(0.0, 1.0);
    DerivedMetrics {
        hosts: project(fraction, targets.max_hosts),
        vulnerabilities: project(fraction, targets.max_vulnerabilities),
        ports: project(fraction, targets.max_ports),
    }
}

fn project(fraction: f64, max: u32) -> u32 {
    if fraction >= 1.0 {
        return max;
    }
    let value = (fraction * max as f64).floor() as u32;
    value.min(max.saturating_sub(1))
}
