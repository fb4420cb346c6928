pub mod assistant;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod pipeline;
pub mod repl;
pub mod session;
pub mod utils;
pub mod views;
