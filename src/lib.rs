//! girdoc: reference pages for an introspected library.
//!
//! A [`model::Namespace`] is walked into per-page [`walker::Entry`] values,
//! each rendered by [`engine::render_page`] through a binding-specific
//! [`format::Formatter`] and written by an [`output::Emitter`].

pub mod engine;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod output;
pub mod walker;
pub mod xml;

pub use engine::{render_page, Page};
pub use error::{FormatError, ModelError, RenderError};
