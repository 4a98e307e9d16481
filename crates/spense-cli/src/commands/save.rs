//! Save command - persist one already-parsed receipt JSON.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;

use spense_core::Operations;

use super::load_config;

/// Arguments for the save command.
#[derive(Args)]
pub struct SaveArgs {
    /// File containing the receipt JSON, or "-" for stdin
    #[arg(required = true)]
    input: PathBuf,
}

pub async fn run(args: SaveArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let ops = Operations::initialize(config);

    let receipt_json = if args.input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(&args.input)?
    };

    println!("{}", ops.save_expense(&receipt_json));

    Ok(())
}
