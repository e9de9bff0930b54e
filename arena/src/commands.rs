pub mod bots;
pub mod play;
pub mod solve;

use bots::Bots;
use play::Play;
use solve::Solve;

use clap::Subcommand;
use color_eyre::eyre::Result;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Play bots against each other and report the results
    Play(Play),
    /// Search a single position and show how the bot scored every option
    Solve(Solve),
    /// List the bots that are available
    Bots(Bots),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Play(p) => p.run()?,
            Command::Solve(s) => s.run()?,
            Command::Bots(b) => b.run()?,
        }

        Ok(())
    }
}
