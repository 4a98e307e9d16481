//! Parse command - extract a single receipt image without saving it.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use spense_core::Operations;

use super::load_config;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input receipt image (.png, .jpg, .jpeg)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let ops = Operations::initialize(config);

    let result = ops.parse_receipt_image(&args.input).await;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &result)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", result);
    }

    Ok(())
}
