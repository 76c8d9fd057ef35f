//! Command line tools for CellML component hierarchies

use std::process::ExitCode;

use anstream::println;
use cellml_parser::Config;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::command::{CliCommand, Commands};

mod command;
mod document;
mod print_encapsulation;
mod print_error;
mod stylesheet;

/// Environment variable holding the log filter, such as `debug` or
/// `cellml_component=trace`
const LOG_ENV: &str = "CELLML_LOG";

fn main() -> ExitCode {
    init_logging();

    let cli = CliCommand::parse();

    match cli.command {
        Commands::PrintEncapsulation {
            file,
            no_check_references,
            no_colors,
        } => {
            let config = Config::new().with_check_references(!no_check_references);
            match document::load(&file, config) {
                Ok(document) => {
                    print_encapsulation::print(&document, !no_colors);
                    ExitCode::SUCCESS
                }
                Err(error) => {
                    print_error::print(&error);
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Normalize {
            file,
            no_check_references,
        } => {
            let config = Config::new().with_check_references(!no_check_references);
            match document::load(&file, config) {
                Ok(document) => {
                    println!("{}", document.serialise());
                    ExitCode::SUCCESS
                }
                Err(error) => {
                    print_error::print(&error);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

/// Sends log events to stderr, filtered by `CELLML_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
