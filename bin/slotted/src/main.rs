mod cli;
mod slotted;

use clap::Parser;

use crate::{cli::Cli, slotted::Slotted};

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp_millis()
        .init();

    Slotted::new().run(cli);
}
