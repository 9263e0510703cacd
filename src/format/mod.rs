//! Binding-specific rendering of types, names and references.
//!
//! The engine only talks to [`Formatter`]. Concrete bindings are
//! [`DocFormatter`] instances parameterized by a [`Language`].

mod base;
pub mod c;
mod docstring;
pub mod gjs;
mod hierarchy;
mod index;
pub mod python;

pub use base::{DocFormatter, Language};
pub use index::SymbolIndex;

use crate::error::FormatError;
use crate::model::{Class, Function, Interface, Namespace, Parameter, Property, TypeRef};
use crate::walker::Entry;
use crate::xml::Text;
use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// Options for rendering documentation text, shared by every binding.
#[derive(Debug, Clone, Default)]
pub struct DocOptions {
    /// Directories searched for `{{ file }}` includes after the current
    /// directory.
    pub include_paths: Vec<PathBuf>,
    /// Link bare type and function names found in running text.
    pub resolve_implicit_links: bool,
}

/// Capability set the page engine consumes.
///
/// Implementations must be pure: the same inputs always produce the same
/// output, and concurrent calls from several render threads are allowed.
pub trait Formatter: Sync {
    /// Binding name, e.g. `C`.
    fn language(&self) -> &str;

    /// MIME type of generated code samples.
    fn mime_type(&self) -> &str;

    /// Display form of a type reference. Returned text is escaped by the
    /// engine.
    fn format_type(&self, ty: &TypeRef) -> Result<String, FormatError>;

    fn format_parameter_name(&self, entry: &Entry<'_>, param: &Parameter) -> String;

    fn format_function_name(&self, entry: &Entry<'_>) -> String;

    /// Page title.
    fn format_page_name(&self, entry: &Entry<'_>) -> String;

    /// Documentation text rendered as page markup.
    fn format(&self, entry: &Entry<'_>, doc: Option<&str>) -> Result<Text, FormatError>;

    fn dump_class_hierarchy(&self, class: &Class) -> Result<Text, FormatError>;

    fn format_prerequisites(&self, iface: &Interface) -> String;

    fn format_known_implementations(&self, iface: &Interface) -> String;

    /// Source-code sample shown in the synopsis.
    fn code_sample(&self, sample: &CodeSample<'_>) -> Result<Text, FormatError>;

    /// Parameters visible in this binding's signature, in calling order.
    fn in_parameters<'f>(&self, _entry: &Entry<'_>, func: &'f Function) -> Vec<&'f Parameter> {
        func.all_parameters()
    }

    /// Access flags such as `Read / Write / Construct Only`.
    fn format_property_flags(&self, prop: &Property) -> String {
        let mut flags = Vec::new();
        if prop.readable {
            flags.push("Read");
        }
        if prop.writable {
            flags.push("Write");
        }
        if prop.construct {
            flags.push("Construct");
        }
        if prop.construct_only {
            flags.push("Construct Only");
        }
        flags.join(" / ")
    }

    /// Whether the entity gets a page in this binding.
    fn should_render(&self, entry: &Entry<'_>) -> bool {
        !entry.node.is_private()
    }
}

/// Ordered data for a synopsis code sample. The engine resolves every
/// string; the formatter only decides the target-language syntax.
#[derive(Debug, Clone)]
pub struct CodeSample<'a> {
    pub entry: Entry<'a>,
    pub kind: SampleKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleKind {
    Callable {
        returns: String,
        /// Return type is void-equivalent.
        void: bool,
        symbol: String,
        params: Vec<SampleParam>,
        varargs: bool,
    },
    Property {
        ty: String,
        flags: String,
    },
    Field {
        ty: String,
    },
    /// Type declaration; `bases` are parent type then interfaces.
    Type {
        bases: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleParam {
    pub name: String,
    pub ty: String,
}

/// Create the formatter for a binding name.
pub fn create_formatter<'a>(
    language: &str,
    ns: &'a Namespace,
    options: DocOptions,
) -> Result<Box<dyn Formatter + 'a>> {
    match language.to_ascii_lowercase().as_str() {
        "c" => Ok(Box::new(DocFormatter::new(ns, c::C).with_options(options))),
        "python" | "py" => Ok(Box::new(
            DocFormatter::new(ns, python::Python).with_options(options),
        )),
        "gjs" | "js" => Ok(Box::new(DocFormatter::new(ns, gjs::Gjs).with_options(options))),
        _ => Err(anyhow!(
            "unsupported language: {}. Use c, python or gjs",
            language
        )),
    }
}
