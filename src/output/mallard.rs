//! Mallard page files.

use crate::engine::Page;
use crate::output::Emitter;
use anyhow::Result;

pub struct MallardEmitter;

impl Emitter for MallardEmitter {
    fn emit(&self, page: &Page) -> Result<String> {
        Ok(page.markup())
    }

    fn file_extension(&self) -> &str {
        "page"
    }
}
