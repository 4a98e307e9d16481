//! String-boundary operations exposed to a calling agent.
//!
//! Typed errors stop here. Every operation renders its result as a
//! human-readable string with an `"Error"`/`"Setup error"` prefix on
//! failure, and a setup failure captured at construction short-circuits
//! all of them. One bad receipt never takes the host process down.

use std::path::Path;

use crate::context::PipelineContext;
use crate::inbox;
use crate::ledger;
use crate::models::config::SpenseConfig;
use crate::pipeline;
use crate::receipt;

/// Default row count for [`Operations::list_saved_receipts`].
pub const DEFAULT_LIST_LIMIT: usize = 20;

/// The operation surface over one pipeline context.
pub struct Operations {
    ctx: Result<PipelineContext, String>,
}

impl Operations {
    /// Initialize the context once, capturing any setup failure.
    pub fn initialize(config: SpenseConfig) -> Self {
        let ctx = PipelineContext::initialize(config).map_err(|e| e.to_string());
        Self { ctx }
    }

    /// Wrap an already-built context.
    pub fn from_context(ctx: PipelineContext) -> Self {
        Self { ctx: Ok(ctx) }
    }

    fn context(&self) -> Result<&PipelineContext, String> {
        self.ctx
            .as_ref()
            .map_err(|e| format!("Setup error: {e}"))
    }

    /// Parse a single receipt image into pretty-printed JSON, without
    /// saving anything.
    pub async fn parse_receipt_image(&self, path: &Path) -> String {
        let ctx = match self.context() {
            Ok(ctx) => ctx,
            Err(msg) => return msg,
        };

        match pipeline::extract_receipt(ctx, path).await {
            Ok(receipt) => serde_json::to_string_pretty(&receipt)
                .unwrap_or_else(|e| format!("Error rendering receipt: {e}")),
            Err(e) => format!("Error: {e}"),
        }
    }

    /// Persist one already-parsed receipt JSON into the ledger.
    pub fn save_expense(&self, receipt_json: &str) -> String {
        let ctx = match self.context() {
            Ok(ctx) => ctx,
            Err(msg) => return msg,
        };

        let value: serde_json::Value = match serde_json::from_str(receipt_json) {
            Ok(value) => value,
            Err(e) => return format!("Invalid JSON: {e}"),
        };
        let receipt = receipt::normalize(&value);

        match ledger::persist(ctx.ledger.as_ref(), &receipt) {
            Ok(saved) => format!(
                "Saved {} row(s) with Receipt ID {}.",
                saved.rows, saved.receipt_id
            ),
            Err(e) => format!("Error: {e}"),
        }
    }

    /// Run the full inbox batch lifecycle and return the per-file report.
    pub async fn process_inbox(&self) -> String {
        let ctx = match self.context() {
            Ok(ctx) => ctx,
            Err(msg) => return msg,
        };

        match inbox::process(ctx).await {
            Ok(report) if report.is_empty() => "No receipts found in inbox folder.".to_string(),
            Ok(report) => report.to_string(),
            Err(e) => format!("Error: {e}"),
        }
    }

    /// List the most recently saved receipts, one line each.
    pub fn list_saved_receipts(&self, limit: usize) -> String {
        let ctx = match self.context() {
            Ok(ctx) => ctx,
            Err(msg) => return msg,
        };

        match ledger::recent(ctx.ledger.as_ref(), limit) {
            Ok(Some(lines)) => lines.join("\n"),
            Ok(None) => "No receipts saved yet.".to_string(),
            Err(e) => format!("Error: {e}"),
        }
    }
}
