use crate::command::add::AddArgs;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "loman", version, about = "Edit the local manifest used by the repo tool")]
pub struct LomanCli {
    #[command(subcommand)]
    pub command: LomanCommand,
}

#[derive(Subcommand)]
pub enum LomanCommand {
    /// Add a project to the local manifest.
    Add(AddArgs),
}
