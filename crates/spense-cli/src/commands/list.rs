//! List command - show the most recently saved receipts.

use clap::Args;

use spense_core::Operations;
use spense_core::ops::DEFAULT_LIST_LIMIT;

use super::load_config;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Maximum number of receipts to show
    #[arg(short, long, default_value_t = DEFAULT_LIST_LIMIT)]
    limit: usize,
}

pub async fn run(args: ListArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let ops = Operations::initialize(config);

    println!("{}", ops.list_saved_receipts(args.limit));

    Ok(())
}
