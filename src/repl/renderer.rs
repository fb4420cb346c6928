use console::style;

use crate::assistant::{Speaker, Transcript};
use crate::dashboard::charts::{Chart, ChartKind, RISK_DISTRIBUTION, VULNERABILITY_TRENDS};
use crate::pipeline::{ProgressSnapshot, RunStatus, ScanEvent, StepTable};
use crate::repl::commands::{CommandHelp, COMMAND_HELP};
use crate::repl::progress::metrics_line;
use crate::session::RunInfo;
use crate::utils::formatting::{bar, wrap};
use crate::views::ViewName;

const REPLY_WIDTH: usize = 76;

/// Render a scan event as a styled line, for events not drawn by progress bars.
pub fn render_event(event: &ScanEvent) -> Option<String> {
    match event {
        ScanEvent::Started { run_id, kind, .. } => Some(format!(
            "\n{} Starting {} scan {}",
            style("▶").green().bold(),
            style(kind).white().bold(),
            style(run_id).cyan(),
        )),
        ScanEvent::Completed(snapshot) => Some(format!(
            "\n{} {}\n  {}\n",
            style("✓").green().bold(),
            style(&snapshot.current_phase_label).green().bold(),
            style(metrics_line(&snapshot.metrics)).dim(),
        )),
        ScanEvent::Reset(snapshot) if snapshot.status == RunStatus::Cancelled => Some(format!(
            "  {} {}",
            style("■").yellow(),
            style("Scan cancelled, progress reset.").yellow(),
        )),
        ScanEvent::ResultsReady { run_id } => Some(format!(
            "  {} Results for {} are ready.",
            style("→").cyan(),
            style(run_id).cyan(),
        )),
        _ => None,
    }
}

pub fn render_error(msg: &str) -> String {
    format!("  {} {}", style("✗").red().bold(), style(msg).red())
}

pub fn render_success(msg: &str) -> String {
    format!("  {} {}", style("✓").green().bold(), msg)
}

pub fn render_info(msg: &str) -> String {
    format!("  {} {}", style("ℹ").cyan(), style(msg).dim())
}

/// Render the help listing for all commands.
pub fn render_help(specific_command: Option<&str>) -> String {
    if let Some(cmd_name) = specific_command {
        return match COMMAND_HELP.iter().find(|c| c.name == cmd_name) {
            Some(cmd) => format_command_detail(cmd),
            None => format!("{} Unknown command: /{}", style("✗").red(), cmd_name),
        };
    }

    let mut out = String::new();
    out.push_str(&format!("\n{}\n\n", style("Available commands:").white().bold()));
    for cmd in COMMAND_HELP {
        out.push_str(&format!(
            "  {:<16} {}\n",
            style(format!("/{}", cmd.name)).cyan().bold(),
            style(cmd.description).dim(),
        ));
    }
    out.push_str(&format!(
        "\n  {}\n",
        style("Anything that isn't a command is sent to the assistant.").dim()
    ));
    out
}

fn format_command_detail(cmd: &CommandHelp) -> String {
    format!(
        "\n{}\n  {}\n\n  {}\n",
        style(format!("/{}", cmd.name)).cyan().bold(),
        style(cmd.description).dim(),
        style(cmd.usage).white(),
    )
}

pub fn render_version() -> String {
    format!(
        "\n  {} {}\n",
        style("Version:").dim(),
        style(env!("CARGO_PKG_VERSION")).white().bold(),
    )
}

/// Render the scan status summary, including the step list.
pub fn render_status(snapshot: &ProgressSnapshot, table: &StepTable, run: Option<&RunInfo>) -> String {
    let status = match snapshot.status {
        RunStatus::Running => style(snapshot.status.as_str()).green().bold().to_string(),
        RunStatus::Completed => style(snapshot.status.as_str()).cyan().to_string(),
        RunStatus::Cancelled => style(snapshot.status.as_str()).yellow().to_string(),
        RunStatus::Idle => style(snapshot.status.as_str()).white().to_string(),
    };

    let mut out = format!(
        "\n  {} {}\n  {} {}%\n  {} {}\n",
        style("Status:").dim(),
        status,
        style("Progress:").dim(),
        snapshot.percent,
        style("Counters:").dim(),
        metrics_line(&snapshot.metrics),
    );
    if let Some(run) = run {
        out.push_str(&format!(
            "  {} {} ({}, started {})\n",
            style("Last scan:").dim(),
            style(&run.run_id).cyan(),
            run.kind,
            run.started_at.format("%H:%M:%S"),
        ));
    }
    out.push('\n');
    out.push_str(&render_steps(snapshot, table));
    out
}

/// Step list: done, active, pending.
pub fn render_steps(snapshot: &ProgressSnapshot, table: &StepTable) -> String {
    let mut out = String::new();
    for (i, phase) in table.phases().iter().enumerate() {
        let position = i + 1;
        let line = if position <= snapshot.completed_phases {
            format!("  {} {}", style("✓").green(), style(&phase.label).green())
        } else if position == snapshot.current_phase_index && snapshot.status == RunStatus::Running {
            format!("  {} {}", style("●").yellow(), style(&phase.label).yellow().bold())
        } else {
            format!("  {} {}", style("○").dim(), style(&phase.label).dim())
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn render_chart(chart: &Chart) -> String {
    let mut out = format!("\n  {}\n", style(chart.title).white().bold());
    match chart.kind {
        ChartKind::Line => {
            let max = chart.max_value();
            for s in chart.series {
                out.push_str(&format!(
                    "  {:<4} {} {}\n",
                    s.label,
                    style(bar(s.value, max, 30)).blue(),
                    s.value,
                ));
            }
        }
        ChartKind::Doughnut => {
            let max = chart.max_value();
            for s in chart.series {
                let bar_text = bar(s.value, max, 30);
                let colored = match s.color256() {
                    Some(c) => style(bar_text).color256(c).to_string(),
                    None => style(bar_text).green().to_string(),
                };
                out.push_str(&format!(
                    "  {:<9} {} {:>4} ({:.0}%)\n",
                    s.label,
                    colored,
                    s.value,
                    chart.share(s.value),
                ));
            }
        }
    }
    out
}

pub fn render_charts() -> String {
    format!(
        "{}{}",
        render_chart(&VULNERABILITY_TRENDS),
        render_chart(&RISK_DISTRIBUTION)
    )
}

/// Header plus body for a view that has just become active.
pub fn render_view(view: ViewName, last_run: Option<&RunInfo>) -> String {
    let mut out = format!(
        "\n{} {} {}\n",
        style("---").cyan().bold(),
        style(view.title()).cyan().bold(),
        style(format!("[{}]", view.shortcut())).dim(),
    );
    let body = match view {
        ViewName::Dashboard => render_charts(),
        ViewName::Query => render_info("Describe what to look for with /query <text>."),
        ViewName::Ragbot => render_info("Type a question, or use /ask <message>."),
        ViewName::Results => match last_run {
            Some(run) => format!(
                "  {} {} scan {} finished.\n",
                style("✓").green(),
                run.kind,
                style(&run.run_id).cyan(),
            ),
            None => render_info("No scan results yet. Start one with /scan."),
        },
        ViewName::Pipeline => render_info("Threat intelligence feeds are up to date."),
        ViewName::Reports => render_info("Use /action new-report or /action export-reports."),
    };
    out.push_str(&body);
    out
}

pub fn render_reply(reply: &str) -> String {
    let mut out = format!("\n  {}\n", style("Assistant").magenta().bold());
    for line in wrap(reply, REPLY_WIDTH) {
        out.push_str(&format!("  {}\n", line));
    }
    out
}

pub fn render_transcript(transcript: &Transcript) -> String {
    if transcript.is_empty() {
        return render_info("No messages yet.");
    }
    let mut out = String::new();
    for message in transcript.messages() {
        let who = match message.speaker {
            Speaker::User => style("You").cyan().bold(),
            Speaker::Assistant => style("Assistant").magenta().bold(),
        };
        out.push_str(&format!(
            "\n  {} {}\n",
            who,
            style(message.sent_at.format("%H:%M:%S")).dim()
        ));
        for line in wrap(&message.text, REPLY_WIDTH) {
            out.push_str(&format!("  {}\n", line));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ProgressDriver;

    #[test]
    fn test_steps_mark_progress() {
        console::set_colors_enabled(false);
        let mut driver = ProgressDriver::default();
        driver.start(crate::pipeline::ScanKind::Standard).unwrap();
        for _ in 0..7 {
            driver.tick();
        }
        let rendered = render_steps(&driver.snapshot(), driver.table());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].contains('✓'));
        assert!(lines[1].contains('●'));
        assert!(lines[2].contains('○'));
    }

    #[test]
    fn test_help_for_unknown_command() {
        console::set_colors_enabled(false);
        assert!(render_help(Some("nope")).contains("Unknown command"));
        assert!(render_help(Some("scan")).contains("/scan"));
    }

    #[test]
    fn test_progress_events_not_rendered_as_text() {
        let snapshot = ProgressDriver::default().snapshot();
        assert!(render_event(&ScanEvent::Progress(snapshot)).is_none());
    }
}
