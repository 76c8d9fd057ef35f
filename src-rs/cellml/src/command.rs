use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CellML encapsulation CLI
#[derive(Parser)]
#[command(name = "cellml")]
#[command(version, about = "CellML component hierarchy tooling", long_about = None)]
pub struct CliCommand {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the encapsulation hierarchy of a file
    PrintEncapsulation {
        /// Path to a model document or a list of components
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Accept `component_ref` names that differ from their component
        #[arg(long)]
        no_check_references: bool,

        /// Disable colors in the output
        #[arg(long)]
        no_colors: bool,
    },
    /// Parse a file and print it as the serialiser writes it
    Normalize {
        /// Path to a model document or a list of components
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Accept `component_ref` names that differ from their component
        #[arg(long)]
        no_check_references: bool,
    },
}
