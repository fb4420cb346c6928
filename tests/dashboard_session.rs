use std::time::Duration;

use riskdeck::assistant::respond;
use riskdeck::config::Settings;
use riskdeck::errors::DashError;
use riskdeck::pipeline::{RunStatus, ScanEvent, ScanKind};
use riskdeck::session::DashboardController;
use riskdeck::views::ViewName;
use tokio::sync::mpsc;

fn controller() -> (DashboardController, mpsc::UnboundedReceiver<ScanEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let controller = DashboardController::new(Settings::default())
        .unwrap()
        .with_event_channel(tx);
    (controller, rx)
}

async fn next_results_ready(rx: &mut mpsc::UnboundedReceiver<ScanEvent>) -> Vec<ScanEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        let done = matches!(event, ScanEvent::ResultsReady { .. });
        events.push(event);
        if done {
            break;
        }
    }
    events
}

#[tokio::test(start_paused = true)]
async fn test_scan_runs_to_results_view() {
    let (mut c, mut rx) = controller();
    let run = c.start_run(ScanKind::Standard).await.unwrap();

    let events = next_results_ready(&mut rx).await;
    assert!(matches!(events.first(), Some(ScanEvent::Started { .. })));
    let completed: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, ScanEvent::Completed(_)))
        .collect();
    assert_eq!(completed.len(), 1);
    assert!(events.contains(&ScanEvent::ViewChanged { view: ViewName::Results }));
    assert_eq!(
        events.last(),
        Some(&ScanEvent::ResultsReady { run_id: run.run_id.clone() })
    );

    assert_eq!(c.active_view().await, ViewName::Results);
    assert_eq!(c.status().await, RunStatus::Idle);
    assert!(!c.is_busy());

    // A fresh run can start once the previous one has been handed over.
    c.start_run(ScanKind::Web).await.unwrap();
    assert_eq!(c.status().await, RunStatus::Running);
    c.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_results_arrive_two_seconds_after_completion() {
    let (mut c, mut rx) = controller();
    let started = tokio::time::Instant::now();
    c.start_run(ScanKind::Standard).await.unwrap();

    let mut completed_at = None;
    while let Some(event) = rx.recv().await {
        match event {
            ScanEvent::Completed(_) => completed_at = Some(started.elapsed()),
            ScanEvent::ResultsReady { .. } => {
                let completed_at = completed_at.expect("completion precedes results");
                assert_eq!(completed_at, Duration::from_millis(65_000));
                assert_eq!(started.elapsed(), Duration::from_millis(67_000));
                break;
            }
            _ => {}
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_hand_off_keeps_view() {
    let (mut c, _rx) = controller();
    c.activate_view("reports").await.unwrap();
    c.start_run(ScanKind::Standard).await.unwrap();

    tokio::time::sleep(Duration::from_millis(66_000)).await;
    assert_eq!(c.status().await, RunStatus::Completed);
    assert!(c.is_busy());

    assert!(c.cancel_run().await);
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(c.active_view().await, ViewName::Reports);
    assert_eq!(c.status().await, RunStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_restart_during_hand_off_drops_stale_results() {
    let (mut c, mut rx) = controller();
    let first = c.start_run(ScanKind::Standard).await.unwrap();

    // Finished at 65s; its results view would open at 67s.
    tokio::time::sleep(Duration::from_millis(66_000)).await;
    assert_eq!(c.status().await, RunStatus::Completed);

    let second = c.start_run(ScanKind::Network).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5_100)).await;

    let mut stale_results = 0;
    while let Ok(event) = rx.try_recv() {
        if event == (ScanEvent::ResultsReady { run_id: first.run_id.clone() }) {
            stale_results += 1;
        }
    }
    assert_eq!(stale_results, 0);
    assert_eq!(c.active_view().await, ViewName::Dashboard);
    assert_eq!(c.status().await, RunStatus::Running);
    assert_eq!(c.last_run().map(|r| r.run_id.clone()), Some(second.run_id));
    // Ten ticks in 5.1s: the first run's task is gone.
    assert_eq!(c.snapshot().await.elapsed_weight, 5.0);
    c.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_cancel_uses_single_ticker() {
    let (mut c, _rx) = controller();
    c.start_run(ScanKind::Standard).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10_100)).await;
    c.cancel_run().await;

    c.start_run(ScanKind::Standard).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1_100)).await;
    // Two ticks in 1.1s: a leftover ticker would have doubled this.
    assert_eq!(c.snapshot().await.elapsed_weight, 1.0);
    c.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_already_running_rejection() {
    let (mut c, _rx) = controller();
    c.start_run(ScanKind::Standard).await.unwrap();
    let err = c.submit_query("show exposed services").await.unwrap_err();
    assert!(matches!(err, DashError::AlreadyRunning));
    assert_eq!(err.classify().error_type, "AlreadyRunningError");
    c.shutdown().await;
}

#[tokio::test]
async fn test_view_switching_leaves_one_active() {
    let (mut c, _rx) = controller();
    c.activate_view("dashboard").await.unwrap();
    c.activate_view("reports").await.unwrap();
    let nav = c.navigator();
    let nav = nav.lock().await;
    assert!(nav.is_active(ViewName::Reports));
    assert!(!nav.is_active(ViewName::Dashboard));
}

#[test]
fn test_assistant_scenario() {
    let reply = respond("What are the critical vulnerabilities?");
    assert!(reply.contains("23 critical vulnerabilities"));
}
