//! # xpick
//!
//! Command-line front end of the xpick picking engine.
//!
//! ## Usage
//!
//! ```bash
//! # Run the pipeline over the synthetic demo collection
//! xpick -v demo --space-decimation 4 --time-highpass 1.0
//!
//! # Place demo picks and save them
//! xpick demo --picks-out picks.csv
//!
//! # Inspect a pick file
//! xpick picks picks.csv --phases P,S
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::{dispatch, init_logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());
    dispatch(cli)
}
