//! CLI module for the roster API
//!
//! - `serve`: run the HTTP server

pub mod serve;

use clap::{Parser, Subcommand};

/// Roster API - users and teams over HTTP
#[derive(Parser)]
#[command(name = "roster-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve(serve::ServeArgs),
}
