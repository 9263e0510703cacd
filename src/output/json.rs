//! JSON emitter, structured page output for tooling integration.
//!
//! Serializes the [`Page`] directly, blocks included as markup strings.

use crate::engine::Page;
use crate::output::Emitter;
use anyhow::{Context, Result};

pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn emit(&self, page: &Page) -> Result<String> {
        let mut out = serde_json::to_string_pretty(page)
            .with_context(|| format!("failed to serialize page {}", page.id))?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
