//! Command line front end for an inilog configuration store.

use clap::Parser;
use inilogctl::{Args, run};

fn main() -> anyhow::Result<()> {
    inilog::logging::init();
    let args = Args::parse();
    let stdout = std::io::stdout();
    run(&args, &mut stdout.lock())?;
    Ok(())
}
