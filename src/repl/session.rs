use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor, ExternalPrinter as _};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::Settings;
use crate::dashboard::spawn_refresh;
use crate::errors::DashError;
use crate::pipeline::{ScanEvent, ScanKind};
use crate::repl::banner;
use crate::repl::commands::{self, SlashCommand};
use crate::repl::completer::ReplHelper;
use crate::repl::progress::ScanProgress;
use crate::repl::renderer;
use crate::session::{DashboardController, QuickAction, RunInfo};

pub struct ReplSession {
    settings: Settings,
}

impl ReplSession {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(self) -> Result<(), DashError> {
        banner::show_splash();

        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<ScanEvent>();
        let mut controller =
            DashboardController::new(self.settings.clone())?.with_event_channel(event_tx);

        let refresh_token = CancellationToken::new();
        let refresh_task = spawn_refresh(
            controller.navigator(),
            self.settings.refresh_interval,
            refresh_token.clone(),
        );

        let config = Config::builder().auto_add_history(true).build();
        let mut editor = Editor::with_config(config)
            .map_err(|e| DashError::Internal(format!("Failed to initialize REPL: {}", e)))?;
        editor.set_helper(Some(ReplHelper));

        // Prints events while readline owns the terminal
        let printer = editor
            .create_external_printer()
            .map_err(|e| DashError::Internal(format!("Failed to create printer: {}", e)))?;
        let printer = Arc::new(tokio::sync::Mutex::new(printer));

        let phase_labels: Vec<String> = self
            .settings
            .table
            .phases()
            .iter()
            .map(|p| p.label.clone())
            .collect();
        let printer_clone = printer.clone();
        let event_task = tokio::spawn(async move {
            let mut progress: Option<ScanProgress> = None;
            let mut last_run: Option<RunInfo> = None;

            while let Some(event) = event_rx.recv().await {
                if let ScanEvent::Started { run_id, kind, .. } = &event {
                    last_run = Some(RunInfo {
                        run_id: run_id.clone(),
                        kind: *kind,
                        started_at: Utc::now(),
                    });
                    progress = Some(ScanProgress::new(phase_labels.clone()));
                }

                let line = match &event {
                    ScanEvent::ViewChanged { view } => {
                        Some(renderer::render_view(*view, last_run.as_ref()))
                    }
                    other => renderer::render_event(other),
                };

                if let Some(ref mut prog) = progress {
                    prog.handle_event(&event);
                    if let Some(ref line) = line {
                        prog.println(line);
                    }
                    if matches!(event, ScanEvent::Completed(_) | ScanEvent::Reset(_)) {
                        progress = None;
                    }
                } else if let Some(line) = line {
                    let mut p = printer_clone.lock().await;
                    let _ = p.print(format!("{}\n", line));
                }
            }
        });

        loop {
            // While a scan owns the screen, hold the prompt back; Ctrl-C
            // closes the scan like dismissing a modal.
            if controller.is_busy() {
                loop {
                    tokio::select! {
                        _ = tokio::time::sleep(Duration::from_millis(200)) => {
                            if !controller.is_busy() {
                                break;
                            }
                        }
                        result = tokio::signal::ctrl_c() => {
                            if result.is_ok() {
                                controller.cancel_run().await;
                            }
                            break;
                        }
                    }
                }
                // Let the progress bars finish drawing
                tokio::time::sleep(Duration::from_millis(100)).await;
                continue;
            }

            let view = controller.active_view().await;
            let readline = {
                // rustyline is blocking, so use spawn_blocking
                let result = tokio::task::spawn_blocking(move || {
                    let prompt = format!(
                        "{}{}{} ",
                        style("riskdeck").cyan().bold(),
                        style(format!("[{}]", view)).dim(),
                        style(">").cyan().bold(),
                    );
                    let result = editor.readline(&prompt);
                    (editor, result)
                })
                .await
                .map_err(|e| DashError::Internal(format!("Readline task failed: {}", e)))?;

                editor = result.0;
                result.1
            };

            match readline {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    match commands::parse_command(trimmed) {
                        Ok(cmd) => {
                            if Self::handle_command(cmd, &mut controller, &self.settings).await {
                                break;
                            }
                        }
                        Err(msg) => println!("{}", renderer::render_error(&msg)),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    println!("{}", renderer::render_error(&format!("Input error: {}", err)));
                    break;
                }
            }
        }

        controller.shutdown().await;
        refresh_token.cancel();
        if let Ok(refreshes) = refresh_task.await {
            debug!(refreshes, "Dashboard refresh stopped");
        }
        drop(controller);
        let _ = event_task.await;

        println!("{}", renderer::render_info("Goodbye."));
        Ok(())
    }

    /// Execute one command. Returns true when the REPL should exit.
    async fn handle_command(
        cmd: SlashCommand,
        controller: &mut DashboardController,
        settings: &Settings,
    ) -> bool {
        if cmd == SlashCommand::Exit {
            return true;
        }

        let result = async {
            match cmd {
                SlashCommand::Exit => {}
                SlashCommand::Clear => print!("\x1B[2J\x1B[1;1H"),
                SlashCommand::Help { command } => {
                    println!("{}", renderer::render_help(command.as_deref()))
                }
                SlashCommand::Version => println!("{}", renderer::render_version()),
                SlashCommand::Scan { kind } => {
                    let kind = match kind {
                        Some(k) => k.parse::<ScanKind>()?,
                        None => ScanKind::default(),
                    };
                    controller.start_run(kind).await?;
                }
                SlashCommand::Query { text } => {
                    controller.submit_query(&text).await?;
                }
                SlashCommand::Stop => {
                    if controller.cancel_run().await {
                        println!("{}", renderer::render_success("Scan cancelled."));
                    } else {
                        println!("{}", renderer::render_info("No scan is currently running."));
                    }
                }
                SlashCommand::Status => {
                    let snapshot = controller.snapshot().await;
                    println!(
                        "{}",
                        renderer::render_status(&snapshot, &settings.table, controller.last_run())
                    );
                }
                SlashCommand::View { target: None } => {
                    let view = controller.active_view().await;
                    println!("{}", renderer::render_view(view, controller.last_run()));
                }
                SlashCommand::View { target: Some(t) } => {
                    match t.parse::<usize>() {
                        Ok(index) => controller.activate_view_index(index).await?,
                        Err(_) => controller.activate_view(&t).await?,
                    };
                }
                SlashCommand::Ask { text } => {
                    let reply = controller.ask(&text)?;
                    wait_for_reply(settings.reply_delay).await;
                    println!("{}", renderer::render_reply(reply));
                }
                SlashCommand::Charts => println!("{}", renderer::render_charts()),
                SlashCommand::Action { name, arg } => {
                    let action = QuickAction::parse(&name, arg.as_deref())?;
                    let notice = action.perform(controller).await?;
                    println!("{}", renderer::render_success(&notice));
                }
                SlashCommand::Transcript => {
                    println!("{}", renderer::render_transcript(controller.assistant().transcript()))
                }
            }
            Ok::<(), DashError>(())
        }
        .await;

        if let Err(e) = result {
            println!("{}", renderer::render_error(&e.to_string()));
        }
        false
    }
}

/// Show a typing indicator for the simulated reply latency.
async fn wait_for_reply(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Assistant is typing...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    tokio::time::sleep(delay).await;
    spinner.finish_and_clear();
}
