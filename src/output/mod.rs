//! Output emitters, one per on-disk page format.

pub mod json;
pub mod mallard;

use crate::engine::Page;
use anyhow::{anyhow, Result};

/// Serializes a rendered [`Page`] into a file body.
pub trait Emitter: Sync {
    fn emit(&self, page: &Page) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create an emitter for the given format name.
pub fn create_emitter(format: &str) -> Result<Box<dyn Emitter>> {
    match format {
        "mallard" | "page" => Ok(Box::new(mallard::MallardEmitter)),
        "json" => Ok(Box::new(json::JsonEmitter)),
        _ => Err(anyhow!("unknown format: {}. Use mallard or json", format)),
    }
}
