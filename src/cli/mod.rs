pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "timeline")]
#[command(about = "Baseline timeline - web platform feature availability feeds", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch both availability feeds and print the timeline
    Show {
        /// Print the timeline as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch a single feed and print its normalized entries
    Inspect {
        /// Feed URL to inspect
        url: String,
    },
}
