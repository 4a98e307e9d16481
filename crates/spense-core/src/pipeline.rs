//! Single-receipt extraction pipeline.

use std::path::Path;

use tracing::debug;

use crate::context::PipelineContext;
use crate::error::Result;
use crate::llm::repair;
use crate::models::receipt::Receipt;
use crate::receipt;

/// Run OCR on one image and join the fragments into a flat line of text.
pub fn extract_text(ctx: &PipelineContext, path: &Path) -> Result<String> {
    let fragments = ctx.ocr.extract(path)?;
    debug!(
        "OCR produced {} fragment(s) for {}",
        fragments.len(),
        path.display()
    );
    Ok(fragments.join(" "))
}

/// The model half of the pipeline: structured extraction, JSON repair,
/// and normalization of already-extracted receipt text.
pub async fn parse_text(ctx: &PipelineContext, text: &str) -> Result<Receipt> {
    let raw = ctx.llm.extract_structured(text).await?;
    let value = repair::repair(&raw)?;
    Ok(receipt::normalize(&value))
}

/// Extract and normalize one receipt image without persisting it.
pub async fn extract_receipt(ctx: &PipelineContext, path: &Path) -> Result<Receipt> {
    let text = extract_text(ctx, path)?;
    parse_text(ctx, &text).await
}
