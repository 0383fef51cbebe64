use clap::Parser;

use starscroll_app::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    cli::run(Cli::parse())
}
