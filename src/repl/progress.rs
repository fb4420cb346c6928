use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::pipeline::{DerivedMetrics, ProgressSnapshot, ScanEvent};

/// Renders a running scan: completion bar, current phase, live counters.
pub struct ScanProgress {
    multi: MultiProgress,
    progress_bar: ProgressBar,
    metrics_bar: ProgressBar,
    phase_labels: Vec<String>,
    completed_phases: usize,
    start_time: std::time::Instant,
}

impl ScanProgress {
    pub fn new(phase_labels: Vec<String>) -> Self {
        let multi = MultiProgress::new();

        let progress_bar = multi.add(ProgressBar::new(100));
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("  {bar:30.cyan/dark_gray} {pos:>3}% | {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );

        let metrics_bar = multi.add(ProgressBar::new_spinner());
        metrics_bar.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        metrics_bar.enable_steady_tick(std::time::Duration::from_millis(120));

        let progress = Self {
            multi,
            progress_bar,
            metrics_bar,
            phase_labels,
            completed_phases: 0,
            start_time: std::time::Instant::now(),
        };
        progress.set_metrics(&DerivedMetrics::default());
        progress
    }

    /// Update the display for one engine event.
    pub fn handle_event(&mut self, event: &ScanEvent) {
        match event {
            ScanEvent::Started { snapshot, .. } => self.apply(snapshot),
            ScanEvent::Progress(snapshot) => self.apply(snapshot),
            ScanEvent::PhaseChanged { index, .. } => self.mark_completed_through(index - 1),
            ScanEvent::Completed(snapshot) => {
                self.mark_completed_through(self.phase_labels.len());
                self.progress_bar.set_position(100);
                self.progress_bar.finish_with_message(snapshot.current_phase_label.clone());
                self.metrics_bar.finish_with_message(format!(
                    "{} | {}",
                    metrics_line(&snapshot.metrics),
                    crate::utils::formatting::format_duration(
                        self.start_time.elapsed().as_millis() as u64
                    ),
                ));
            }
            ScanEvent::Reset(_) => {
                self.progress_bar.abandon_with_message("Scan cancelled");
                self.metrics_bar.finish_and_clear();
            }
            _ => {}
        }
    }

    fn apply(&self, snapshot: &ProgressSnapshot) {
        self.progress_bar.set_position(snapshot.percent as u64);
        self.progress_bar.set_message(snapshot.current_phase_label.clone());
        self.set_metrics(&snapshot.metrics);
    }

    fn set_metrics(&self, metrics: &DerivedMetrics) {
        self.metrics_bar.set_message(metrics_line(metrics));
    }

    fn mark_completed_through(&mut self, count: usize) {
        while self.completed_phases < count.min(self.phase_labels.len()) {
            let label = &self.phase_labels[self.completed_phases];
            self.println(&format!("  {} {}", style("✓").green(), style(label).green()));
            self.completed_phases += 1;
        }
    }

    /// Print a line through the multi-progress (won't interfere with bars).
    pub fn println(&self, msg: &str) {
        let _ = self.multi.println(msg);
    }
}

pub fn metrics_line(metrics: &DerivedMetrics) -> String {
    format!(
        "Hosts scanned: {} | Vulnerabilities: {} | Open ports: {}",
        metrics.hosts, metrics.vulnerabilities, metrics.ports
    )
}
