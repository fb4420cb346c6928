use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::views::{ViewName, ViewNavigator};
use super::driver::{ProgressDriver, TickOutcome};
use super::events::ScanEvent;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_COMPLETION_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTiming {
    pub tick_interval: Duration,
    pub completion_delay: Duration,
}

impl Default for RunTiming {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            completion_delay: DEFAULT_COMPLETION_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Ran to completion and handed over to the results view
    Finished,
    /// Completed, but the auto-navigation was cancelled
    CompletedThenCancelled,
    Cancelled,
}

/// Drives one run of a shared [`ProgressDriver`] on a periodic ticker.
///
/// Every scheduled step (each tick and the post-completion delay) races the
/// run's cancel token, and the token is re-checked under the driver lock, so a
/// cancelled run can never touch driver state again.
pub struct ScanRunner {
    run_id: String,
    driver: Arc<Mutex<ProgressDriver>>,
    navigator: Arc<Mutex<ViewNavigator>>,
    timing: RunTiming,
    cancel_token: CancellationToken,
    event_tx: Option<mpsc::UnboundedSender<ScanEvent>>,
}

impl ScanRunner {
    pub fn new(
        run_id: impl Into<String>,
        driver: Arc<Mutex<ProgressDriver>>,
        navigator: Arc<Mutex<ViewNavigator>>,
        timing: RunTiming,
    ) -> Self {
        Self {
            run_id: run_id.into(),
            driver,
            navigator,
            timing,
            cancel_token: CancellationToken::new(),
            event_tx: None,
        }
    }

    /// Bind the runner to an externally owned token so the caller can stop it.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Attach an event channel for streaming progress to a presenter.
    pub fn with_event_channel(mut self, tx: mpsc::UnboundedSender<ScanEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    fn emit(&self, event: ScanEvent) {
        if let Some(ref tx) = self.event_tx {
            // A closed receiver just means nobody is watching.
            let _ = tx.send(event);
        }
    }

    pub fn spawn(self) -> JoinHandle<RunOutcome> {
        tokio::spawn(self.run())
    }

    pub async fn run(self) -> RunOutcome {
        let period = self.timing.tick_interval;
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.cancel_token.cancelled() => {
                    debug!(run_id = %self.run_id, "Ticker stopped");
                    return RunOutcome::Cancelled;
                }
                _ = interval.tick() => {}
            }

            let (outcome, phase_label) = {
                let mut driver = self.driver.lock().await;
                if self.cancel_token.is_cancelled() {
                    return RunOutcome::Cancelled;
                }
                let outcome = driver.tick();
                let label = driver.table().label(driver.current_phase_index()).to_string();
                (outcome, label)
            };

            match outcome {
                TickOutcome::Idle => {
                    debug!(run_id = %self.run_id, "Driver no longer running, stopping ticker");
                    return RunOutcome::Cancelled;
                }
                TickOutcome::Progress { snapshot, phase_changed } => {
                    if phase_changed {
                        self.emit(ScanEvent::PhaseChanged {
                            index: snapshot.current_phase_index,
                            label: phase_label,
                        });
                    }
                    self.emit(ScanEvent::Progress(snapshot));
                }
                TickOutcome::Completed { snapshot, phase_changed } => {
                    if phase_changed {
                        self.emit(ScanEvent::PhaseChanged {
                            index: snapshot.current_phase_index,
                            label: phase_label,
                        });
                    }
                    self.emit(ScanEvent::Completed(snapshot));
                    break;
                }
            }
        }

        tokio::select! {
            biased;
            _ = self.cancel_token.cancelled() => {
                debug!(run_id = %self.run_id, "Results hand-off cancelled");
                return RunOutcome::CompletedThenCancelled;
            }
            _ = tokio::time::sleep(self.timing.completion_delay) => {}
        }

        {
            let mut driver = self.driver.lock().await;
            if self.cancel_token.is_cancelled() {
                return RunOutcome::CompletedThenCancelled;
            }
            if let Some(reset) = driver.dismiss() {
                self.emit(ScanEvent::Reset(reset));
            }
        }

        let view = self.navigator.lock().await.activate_view(ViewName::Results);
        self.emit(ScanEvent::ViewChanged { view });
        self.emit(ScanEvent::ResultsReady {
            run_id: self.run_id.clone(),
        });
        info!(run_id = %self.run_id, "Scan results ready");
        RunOutcome::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::phase::{Phase, StepTable};
    use crate::pipeline::state::{MetricTargets, RunStatus, ScanKind};

    fn shared_parts() -> (Arc<Mutex<ProgressDriver>>, Arc<Mutex<ViewNavigator>>) {
        let mut driver = ProgressDriver::default();
        driver.start(ScanKind::Standard).unwrap();
        (
            Arc::new(Mutex::new(driver)),
            Arc::new(Mutex::new(ViewNavigator::new())),
        )
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ScanEvent>) -> Vec<ScanEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_run_hands_over_to_results() {
        let (driver, navigator) = shared_parts();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let outcome = ScanRunner::new("run-1", driver.clone(), navigator.clone(), RunTiming::default())
            .with_event_channel(tx)
            .run()
            .await;

        assert_eq!(outcome, RunOutcome::Finished);
        let events = drain(&mut rx);
        let progress = events.iter().filter(|e| matches!(e, ScanEvent::Progress(_))).count();
        let completed = events.iter().filter(|e| matches!(e, ScanEvent::Completed(_))).count();
        let phase_changes = events.iter().filter(|e| matches!(e, ScanEvent::PhaseChanged { .. })).count();
        assert_eq!(progress, 129);
        assert_eq!(completed, 1);
        assert_eq!(phase_changes, 6);
        assert_eq!(
            events.last(),
            Some(&ScanEvent::ResultsReady { run_id: "run-1".into() })
        );
        assert!(navigator.lock().await.is_active(ViewName::Results));
        assert_eq!(driver.lock().await.status(), RunStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_phase_change_on_final_tick_is_emitted() {
        let table = StepTable::new(vec![Phase::new("Probe", 1.0), Phase::new("Wrap up", 0.25)]).unwrap();
        let mut d = ProgressDriver::new(table, MetricTargets::default(), 0.5).unwrap();
        d.start(ScanKind::Web).unwrap();
        let driver = Arc::new(Mutex::new(d));
        let navigator = Arc::new(Mutex::new(ViewNavigator::new()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let outcome = ScanRunner::new("run-5", driver, navigator, RunTiming::default())
            .with_event_channel(tx)
            .run()
            .await;

        assert_eq!(outcome, RunOutcome::Finished);
        let events = drain(&mut rx);
        let changed_at = events
            .iter()
            .position(|e| matches!(e, ScanEvent::PhaseChanged { .. }))
            .expect("phase change emitted");
        let completed_at = events
            .iter()
            .position(|e| matches!(e, ScanEvent::Completed(_)))
            .expect("completion emitted");
        assert_eq!(changed_at + 1, completed_at);
        assert_eq!(
            events[changed_at],
            ScanEvent::PhaseChanged { index: 2, label: "Wrap up".into() }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_interval() {
        let (driver, navigator) = shared_parts();
        let token = CancellationToken::new();
        let handle = ScanRunner::new("run-2", driver.clone(), navigator, RunTiming::default())
            .with_cancel_token(token.clone())
            .spawn();

        tokio::time::sleep(Duration::from_millis(3_250)).await;
        assert_eq!(driver.lock().await.ticks(), 6);

        token.cancel();
        assert_eq!(handle.await.unwrap(), RunOutcome::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_further_ticks() {
        let (driver, navigator) = shared_parts();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let handle = ScanRunner::new("run-3", driver.clone(), navigator.clone(), RunTiming::default())
            .with_cancel_token(token.clone())
            .with_event_channel(tx)
            .spawn();

        tokio::time::sleep(Duration::from_millis(5_100)).await;
        {
            let mut d = driver.lock().await;
            assert!(d.cancel().is_some());
            token.cancel();
        }
        assert_eq!(handle.await.unwrap(), RunOutcome::Cancelled);
        drain(&mut rx);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(drain(&mut rx).is_empty());
        let d = driver.lock().await;
        assert_eq!(d.elapsed_weight(), 0.0);
        assert_eq!(d.current_phase_index(), 1);
        assert!(navigator.lock().await.is_active(ViewName::Dashboard));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_completion_delay_skips_navigation() {
        let (driver, navigator) = shared_parts();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let handle = ScanRunner::new("run-4", driver.clone(), navigator.clone(), RunTiming::default())
            .with_cancel_token(token.clone())
            .with_event_channel(tx)
            .spawn();

        // 130 ticks at 500ms finish at 65s; the hand-off would land at 67s.
        tokio::time::sleep(Duration::from_millis(66_000)).await;
        assert_eq!(driver.lock().await.status(), RunStatus::Completed);
        token.cancel();

        assert_eq!(handle.await.unwrap(), RunOutcome::CompletedThenCancelled);
        let events = drain(&mut rx);
        assert!(!events.iter().any(|e| matches!(e, ScanEvent::ResultsReady { .. })));
        assert!(navigator.lock().await.is_active(ViewName::Dashboard));
    }
}
