//! CLI module for the Ustoz Top API

pub mod serve;

use clap::{Parser, Subcommand};

/// Ustoz Top - teacher discovery backend
#[derive(Parser)]
#[command(name = "ustoz-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
