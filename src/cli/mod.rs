pub mod commands;
pub mod core;
pub mod forms;
mod help;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod ui;

pub use shell::{run_cli, SCRIPT_ENV};
