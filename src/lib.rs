#![doc = include_str!("../README.md")]

pub mod cli;
pub mod command;
pub mod error;
pub mod fs;
pub mod manifest;
pub mod validation;

pub use error::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() -> Result<()> {
    use clap::Parser;
    use cli::LomanCommand;

    env_logger::init();

    let cli = cli::LomanCli::parse();
    match cli.command {
        LomanCommand::Add(args) => command::add::execute(args),
    }
}
