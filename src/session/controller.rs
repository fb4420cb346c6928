use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::assistant::Assistant;
use crate::config::Settings;
use crate::errors::DashError;
use crate::pipeline::{
    ProgressDriver, ProgressSnapshot, RunOutcome, RunStatus, ScanEvent, ScanKind, ScanRunner,
};
use crate::views::{ViewName, ViewNavigator};

/// Identity of the most recently started run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunInfo {
    pub run_id: String,
    pub kind: ScanKind,
    pub started_at: DateTime<Utc>,
}

struct ActiveRun {
    info: RunInfo,
    cancel_token: CancellationToken,
    handle: JoinHandle<RunOutcome>,
}

/// Owns all dashboard state and is the only entry point for user commands.
pub struct DashboardController {
    settings: Settings,
    driver: Arc<Mutex<ProgressDriver>>,
    navigator: Arc<Mutex<ViewNavigator>>,
    assistant: Assistant,
    event_tx: Option<mpsc::UnboundedSender<ScanEvent>>,
    active_run: Option<ActiveRun>,
    last_run: Option<RunInfo>,
}

impl DashboardController {
    pub fn new(settings: Settings) -> Result<Self, DashError> {
        let driver = settings.build_driver()?;
        Ok(Self {
            settings,
            driver: Arc::new(Mutex::new(driver)),
            navigator: Arc::new(Mutex::new(ViewNavigator::new())),
            assistant: Assistant::new(),
            event_tx: None,
            active_run: None,
            last_run: None,
        })
    }

    /// Attach an event channel for streaming run and view events to a presenter.
    pub fn with_event_channel(mut self, tx: mpsc::UnboundedSender<ScanEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    fn emit(&self, event: ScanEvent) {
        if let Some(ref tx) = self.event_tx {
            let _ = tx.send(event);
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn navigator(&self) -> Arc<Mutex<ViewNavigator>> {
        self.navigator.clone()
    }

    pub fn last_run(&self) -> Option<&RunInfo> {
        self.last_run.as_ref()
    }

    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    /// Start a simulated scan. Rejected while another run is active.
    pub async fn start_run(&mut self, kind: ScanKind) -> Result<RunInfo, DashError> {
        let mut driver = self.driver.lock().await;
        let snapshot = match driver.start(kind) {
            Ok(s) => s,
            Err(e) => {
                info!(kind = %kind, "Scan request rejected, a scan is already running");
                return Err(e);
            }
        };

        // A finished run may still be waiting to hand over to the results view.
        if let Some(previous) = self.active_run.take() {
            previous.cancel_token.cancel();
        }
        drop(driver);

        let run_id = format!("scan-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
        let info = RunInfo {
            run_id: run_id.clone(),
            kind,
            started_at: Utc::now(),
        };
        info!(run_id = %run_id, kind = %kind, "Starting scan");

        self.emit(ScanEvent::Started {
            run_id: run_id.clone(),
            kind,
            snapshot,
        });

        let token = CancellationToken::new();
        let mut runner = ScanRunner::new(
            run_id,
            self.driver.clone(),
            self.navigator.clone(),
            self.settings.timing,
        )
        .with_cancel_token(token.clone());
        if let Some(ref tx) = self.event_tx {
            runner = runner.with_event_channel(tx.clone());
        }

        self.active_run = Some(ActiveRun {
            info: info.clone(),
            cancel_token: token,
            handle: runner.spawn(),
        });
        self.last_run = Some(info.clone());
        Ok(info)
    }

    /// Submit a free-text security query, which launches a query scan.
    pub async fn submit_query(&mut self, text: &str) -> Result<RunInfo, DashError> {
        let query = text.trim();
        if query.is_empty() {
            return Err(DashError::EmptyInput("Please enter a security query".into()));
        }
        info!(query = %query, "Executing query");
        self.start_run(ScanKind::Query).await
    }

    /// Stop the current run, or drop a completed run's pending hand-off.
    /// Returns false when there was nothing to cancel.
    pub async fn cancel_run(&mut self) -> bool {
        let reset = {
            let mut driver = self.driver.lock().await;
            if let Some(ref run) = self.active_run {
                run.cancel_token.cancel();
            }
            driver.cancel().or_else(|| driver.dismiss())
        };

        if let Some(run) = self.active_run.take() {
            match run.handle.await {
                Ok(outcome) => debug!(run_id = %run.info.run_id, ?outcome, "Runner finished"),
                Err(e) => warn!(run_id = %run.info.run_id, error = %e, "Runner task failed"),
            }
        }

        match reset {
            Some(snapshot) => {
                self.emit(ScanEvent::Reset(snapshot));
                true
            }
            None => false,
        }
    }

    /// True while a run is ticking or waiting to hand over to the results view.
    pub fn is_busy(&self) -> bool {
        self.active_run
            .as_ref()
            .map(|r| !r.handle.is_finished())
            .unwrap_or(false)
    }

    pub async fn status(&self) -> RunStatus {
        self.driver.lock().await.status()
    }

    pub async fn snapshot(&self) -> ProgressSnapshot {
        self.driver.lock().await.snapshot()
    }

    pub async fn active_view(&self) -> ViewName {
        self.navigator.lock().await.active()
    }

    pub async fn activate_view(&mut self, name: &str) -> Result<ViewName, DashError> {
        let view = self.navigator.lock().await.activate(name)?;
        self.emit(ScanEvent::ViewChanged { view });
        Ok(view)
    }

    pub async fn activate_view_index(&mut self, index: usize) -> Result<ViewName, DashError> {
        let view = self.navigator.lock().await.activate_index(index)?;
        self.emit(ScanEvent::ViewChanged { view });
        Ok(view)
    }

    pub fn ask(&mut self, text: &str) -> Result<&'static str, DashError> {
        self.assistant.ask(text)
    }

    /// Cancel everything still scheduled. Used on exit.
    pub async fn shutdown(&mut self) {
        if self.cancel_run().await {
            debug!("Cancelled in-flight scan on shutdown");
        }
    }
}
