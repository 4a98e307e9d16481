//! Inbox command - batch process every receipt image in the inbox folder.

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use spense_core::Operations;

use super::load_config;

/// Arguments for the inbox command.
#[derive(Args)]
pub struct InboxArgs {}

pub async fn run(_args: InboxArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let inbox_dir = config.inbox.inbox_dir.clone();
    let ops = Operations::initialize(config);

    println!(
        "{} Processing receipts from {}",
        style("ℹ").blue(),
        inbox_dir.display()
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message("Running inbox pipeline...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let report = ops.process_inbox().await;

    spinner.finish_and_clear();
    println!("{}", report);

    Ok(())
}
