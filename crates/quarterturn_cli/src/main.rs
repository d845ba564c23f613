//! Headless command-line front end for the quarter-turn puzzle engine.

mod cli;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    color_eyre::install()?;
    // Initialize logging.
    env_logger::builder().init();

    cli::exec(args)
}
