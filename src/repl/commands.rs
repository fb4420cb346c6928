/// All slash commands supported by the REPL.
#[derive(Debug, Clone, PartialEq)]
pub enum SlashCommand {
    Scan {
        kind: Option<String>,
    },
    Query {
        text: String,
    },
    Stop,
    Status,
    View {
        target: Option<String>,
    },
    Ask {
        text: String,
    },
    Charts,
    Action {
        name: String,
        arg: Option<String>,
    },
    Transcript,
    Version,
    Clear,
    Help {
        command: Option<String>,
    },
    Exit,
}

/// Description of a command for help display.
pub struct CommandHelp {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub static COMMAND_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "scan",
        usage: "/scan [standard|network|web|emergency|query]",
        description: "Start a simulated scan. Ctrl-C cancels it.",
    },
    CommandHelp {
        name: "query",
        usage: "/query <security question>",
        description: "Submit a security query, which runs a query scan",
    },
    CommandHelp {
        name: "stop",
        usage: "/stop",
        description: "Cancel the current scan or its pending results hand-off",
    },
    CommandHelp {
        name: "status",
        usage: "/status",
        description: "Show scan progress, current phase and counters",
    },
    CommandHelp {
        name: "view",
        usage: "/view [dashboard|query|ragbot|results|pipeline|reports|1-6]",
        description: "Switch the active view, or show it when no argument is given",
    },
    CommandHelp {
        name: "ask",
        usage: "/ask <message>",
        description: "Ask the risk intelligence assistant",
    },
    CommandHelp {
        name: "charts",
        usage: "/charts",
        description: "Show the vulnerability trend and risk distribution charts",
    },
    CommandHelp {
        name: "action",
        usage: "/action <emergency-scan|threat-intel|generate-report|export-results|schedule-scan|scan-details <id>|new-report|export-reports>",
        description: "Trigger a dashboard quick action",
    },
    CommandHelp {
        name: "transcript",
        usage: "/transcript",
        description: "Show the conversation with the assistant",
    },
    CommandHelp {
        name: "version",
        usage: "/version",
        description: "Show version info",
    },
    CommandHelp {
        name: "clear",
        usage: "/clear",
        description: "Clear the terminal screen",
    },
    CommandHelp {
        name: "help",
        usage: "/help [command]",
        description: "Show help for all or a specific command",
    },
    CommandHelp {
        name: "exit",
        usage: "/exit",
        description: "Quit the REPL",
    },
];

/// All command names for tab completion.
pub static COMMAND_NAMES: &[&str] = &[
    "/scan",
    "/query",
    "/stop",
    "/status",
    "/view",
    "/ask",
    "/charts",
    "/action",
    "/transcript",
    "/version",
    "/clear",
    "/help",
    "/exit",
];

/// Parse a raw input line into a SlashCommand, or return an error message.
///
/// Text that is not a command is sent to the assistant, like typing into the
/// chat box.
pub fn parse_command(input: &str) -> Result<SlashCommand, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty command".into());
    }
    if !input.starts_with('/') {
        return Ok(SlashCommand::Ask {
            text: input.to_string(),
        });
    }

    let (cmd, rest) = match input.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (input, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match cmd {
        "/scan" => match args.as_slice() {
            [] => Ok(SlashCommand::Scan { kind: None }),
            [kind] => Ok(SlashCommand::Scan {
                kind: Some(kind.to_string()),
            }),
            _ => Err("Usage: /scan [kind]".into()),
        },
        "/query" => Ok(SlashCommand::Query {
            text: rest.to_string(),
        }),
        "/stop" => Ok(SlashCommand::Stop),
        "/status" => Ok(SlashCommand::Status),
        "/view" => Ok(SlashCommand::View {
            target: args.first().map(|s| s.to_string()),
        }),
        "/ask" => Ok(SlashCommand::Ask {
            text: rest.to_string(),
        }),
        "/charts" => Ok(SlashCommand::Charts),
        "/action" => match args.first() {
            Some(name) => Ok(SlashCommand::Action {
                name: name.to_string(),
                arg: args.get(1).map(|s| s.to_string()),
            }),
            None => Err("Usage: /action <name> [arg]. Type /help action for the list.".into()),
        },
        "/transcript" => Ok(SlashCommand::Transcript),
        "/version" => Ok(SlashCommand::Version),
        "/clear" => Ok(SlashCommand::Clear),
        "/help" => Ok(SlashCommand::Help {
            command: args.first().map(|s| s.trim_start_matches('/').to_string()),
        }),
        "/exit" | "/quit" | "/q" => Ok(SlashCommand::Exit),
        other => Err(format!("Unknown command: {}. Type /help for available commands.", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_goes_to_assistant() {
        assert_eq!(
            parse_command("what about cve-2024-1086?").unwrap(),
            SlashCommand::Ask {
                text: "what about cve-2024-1086?".into()
            }
        );
    }

    #[test]
    fn test_scan_kind() {
        assert_eq!(parse_command("/scan").unwrap(), SlashCommand::Scan { kind: None });
        assert_eq!(
            parse_command("/scan emergency").unwrap(),
            SlashCommand::Scan {
                kind: Some("emergency".into())
            }
        );
        assert!(parse_command("/scan web extra").is_err());
    }

    #[test]
    fn test_query_keeps_spacing() {
        assert_eq!(
            parse_command("/query  show   open ports ").unwrap(),
            SlashCommand::Query {
                text: "show   open ports".into()
            }
        );
        assert_eq!(parse_command("/query").unwrap(), SlashCommand::Query { text: String::new() });
    }

    #[test]
    fn test_view_and_action() {
        assert_eq!(
            parse_command("/view 4").unwrap(),
            SlashCommand::View {
                target: Some("4".into())
            }
        );
        assert_eq!(
            parse_command("/action scan-details SCN-7").unwrap(),
            SlashCommand::Action {
                name: "scan-details".into(),
                arg: Some("SCN-7".into())
            }
        );
        assert!(parse_command("/action").is_err());
    }

    #[test]
    fn test_exit_aliases_and_unknown() {
        assert_eq!(parse_command("/q").unwrap(), SlashCommand::Exit);
        assert_eq!(parse_command("/quit").unwrap(), SlashCommand::Exit);
        assert!(parse_command("/format").is_err());
    }

    #[test]
    fn test_every_command_has_help() {
        for name in COMMAND_NAMES {
            let bare = name.trim_start_matches('/');
            assert!(COMMAND_HELP.iter().any(|c| c.name == bare), "missing help for {}", name);
        }
    }
}
