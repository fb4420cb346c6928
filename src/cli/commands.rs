use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "riskdeck", version, about = "Terminal security dashboard with a simulated scan engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive dashboard
    Repl,
    /// Run one simulated scan without the interactive dashboard
    Scan(ScanArgs),
    /// Ask the risk intelligence assistant a single question
    Ask(AskArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ScanArgs {
    /// Scan kind: standard, network, web, emergency, query
    #[arg(short, long, default_value = "standard")]
    pub kind: String,

    /// Security query text; implies a query scan
    #[arg(long)]
    pub query: Option<String>,

    /// Print one JSON snapshot per line instead of a progress bar
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct AskArgs {
    /// Question text
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_defaults() {
        let cli = Cli::parse_from(["riskdeck", "scan"]);
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.kind, "standard");
                assert!(!args.json);
                assert!(args.query.is_none());
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_ask_collects_words() {
        let cli = Cli::parse_from(["riskdeck", "-vv", "ask", "attack", "path"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Ask(args) => assert_eq!(args.text.join(" "), "attack path"),
            _ => panic!("expected ask"),
        }
    }
}
