use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "slotted", version, about = "Declare, build and inspect record classes")]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a record script
    Run {
        file: String,

        /// Print the parsed program instead of running it
        #[arg(long)]
        dump_ast: bool,
    },
    /// Start the interactive repl
    Repl,
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
