use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::info;

use crate::cli::commands::ScanArgs;
use crate::config;
use crate::errors::DashError;
use crate::pipeline::{ScanEvent, ScanKind};
use crate::repl::progress::{metrics_line, ScanProgress};
use crate::repl::renderer;
use crate::session::DashboardController;

/// Run one scan to completion and report it, headless.
pub async fn handle_scan(args: ScanArgs, config_path: Option<&str>, quiet: bool) -> Result<(), DashError> {
    let path = config_path.map(PathBuf::from);
    let settings = config::load_settings(path.as_deref()).await?;
    let phase_labels: Vec<String> = settings.table.phases().iter().map(|p| p.label.clone()).collect();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut controller = DashboardController::new(settings)?.with_event_channel(tx);

    let run = match args.query.as_deref() {
        Some(text) => controller.submit_query(text).await?,
        None => controller.start_run(args.kind.parse::<ScanKind>()?).await?,
    };

    let mut progress = if args.json || quiet {
        None
    } else {
        Some(ScanProgress::new(phase_labels))
    };

    let mut completed = None;
    loop {
        let event = tokio::select! {
            event = rx.recv() => event,
            result = tokio::signal::ctrl_c() => {
                if result.is_ok() {
                    info!(run_id = %run.run_id, "Interrupted");
                    controller.cancel_run().await;
                }
                return Err(DashError::Internal("Scan interrupted".into()));
            }
        };
        let Some(event) = event else {
            break;
        };

        if args.json {
            if let Some(snapshot) = snapshot_of(&event) {
                println!("{}", serde_json::to_string(snapshot)?);
            }
        } else if let Some(ref mut prog) = progress {
            prog.handle_event(&event);
            if let Some(line) = renderer::render_event(&event) {
                prog.println(&line);
            }
        }

        if let ScanEvent::Completed(ref snapshot) = event {
            completed = Some(snapshot.clone());
        }
        if matches!(event, ScanEvent::ResultsReady { .. }) {
            break;
        }
    }

    if quiet && !args.json {
        if let Some(snapshot) = completed {
            println!("{} {} {}", run.run_id, snapshot.status, metrics_line(&snapshot.metrics));
        }
    }
    info!(run_id = %run.run_id, kind = %run.kind, "Scan finished");
    Ok(())
}

fn snapshot_of(event: &ScanEvent) -> Option<&crate::pipeline::ProgressSnapshot> {
    match event {
        ScanEvent::Started { snapshot, .. }
        | ScanEvent::Progress(snapshot)
        | ScanEvent::Completed(snapshot) => Some(snapshot),
        _ => None,
    }
}
