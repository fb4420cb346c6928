pub mod ask;
pub mod commands;
pub mod repl;
pub mod scan;

pub use commands::{Cli, Commands};
