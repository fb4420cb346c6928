use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::pipeline::ScanKind;
use crate::repl::commands::COMMAND_NAMES;
use crate::session::actions::ACTION_NAMES;
use crate::views::ViewName;

#[derive(Default)]
pub struct ReplHelper;

impl Helper for ReplHelper {}
impl Validator for ReplHelper {}
impl Highlighter for ReplHelper {}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let trimmed = line.trim();
        if !trimmed.starts_with('/') || trimmed.contains(' ') {
            return None;
        }
        COMMAND_NAMES
            .iter()
            .find(|name| name.starts_with(trimmed) && **name != trimmed)
            .map(|name| name[trimmed.len()..].to_string())
    }
}

/// Candidate words for the first argument of a command.
fn argument_candidates(cmd: &str) -> Vec<&'static str> {
    match cmd {
        "/scan" => ScanKind::ALL.iter().map(|k| k.as_str()).collect(),
        "/view" => ViewName::ALL.iter().map(|v| v.as_str()).collect(),
        "/action" => ACTION_NAMES.to_vec(),
        "/help" => COMMAND_NAMES.iter().map(|c| c.trim_start_matches('/')).collect(),
        _ => Vec::new(),
    }
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let trimmed = prefix.trim_start();

        if !trimmed.starts_with('/') {
            return Ok((0, vec![]));
        }

        // Past the command name: complete its first argument only.
        if let Some(space_idx) = trimmed.find(' ') {
            let cmd = &trimmed[..space_idx];
            let arg_prefix = trimmed[space_idx..].trim_start();
            if arg_prefix.contains(' ') {
                return Ok((pos, vec![]));
            }
            let arg_start = pos - arg_prefix.len();

            let matches: Vec<Pair> = argument_candidates(cmd)
                .into_iter()
                .filter(|c| c.starts_with(arg_prefix))
                .map(|c| Pair {
                    display: c.to_string(),
                    replacement: c.to_string(),
                })
                .collect();

            return Ok((arg_start, matches));
        }

        let start = pos - trimmed.len();
        let matches: Vec<Pair> = COMMAND_NAMES
            .iter()
            .filter(|name| name.starts_with(trimmed))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();

        Ok((start, matches))
    }
}
