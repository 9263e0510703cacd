//! Shared formatter behaviour; bindings plug in through [`Language`].

use super::docstring::DocMarkup;
use super::hierarchy;
use super::index::SymbolIndex;
use super::{CodeSample, DocOptions, Formatter};
use crate::error::FormatError;
use crate::model::{Class, Function, Interface, Namespace, Parameter, TypeRef};
use crate::walker::{Entry, Node};
use crate::xml::Text;

/// Binding-specific parts of a formatter.
pub trait Language: Send + Sync {
    const NAME: &'static str;
    const MIME_TYPE: &'static str;

    /// Binding spellings of `TRUE`, `FALSE` and `NULL`.
    fn fundamentals(&self) -> &'static [(&'static str, &'static str)];

    fn format_type(&self, index: &SymbolIndex<'_>, ty: &TypeRef) -> Result<String, FormatError>;

    fn format_function_name(&self, entry: &Entry<'_>) -> String;

    /// Title for a property or field page given its owner's title, when the
    /// binding does not use the `Owner:prop` and `Owner->field` forms.
    fn member_page_name(&self, _entry: &Entry<'_>, _owner: &str) -> Option<String> {
        None
    }

    fn format_parameter_name(&self, _entry: &Entry<'_>, param: &Parameter) -> String {
        if param.is_varargs() {
            "...".to_string()
        } else {
            param.name.clone()
        }
    }

    fn in_parameters<'f>(&self, _entry: &Entry<'_>, func: &'f Function) -> Vec<&'f Parameter> {
        func.all_parameters()
    }

    /// Extra rendering filter on top of the privacy check.
    fn should_render(&self, _entry: &Entry<'_>) -> bool {
        true
    }

    fn code_sample(&self, sample: &CodeSample<'_>) -> String;
}

/// Visibility rules shared by bindings generated from introspection data:
/// class structures, shadowed functions and non-introspectable entities
/// get no page.
pub(super) fn introspectable_page(entry: &Entry<'_>) -> bool {
    match entry.node {
        Node::Record(r) if r.is_gtype_struct_for.is_some() => false,
        Node::Function(f, _) if f.shadowed_by.is_some() => false,
        node => node.is_introspectable(),
    }
}

/// Formatter for one namespace in one binding.
pub struct DocFormatter<'a, L> {
    index: SymbolIndex<'a>,
    lang: L,
    options: DocOptions,
}

impl<'a, L: Language> DocFormatter<'a, L> {
    pub fn new(ns: &'a Namespace, lang: L) -> Self {
        DocFormatter {
            index: SymbolIndex::new(ns),
            lang,
            options: DocOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DocOptions) -> Self {
        self.options = options;
        self
    }

    pub fn index(&self) -> &SymbolIndex<'a> {
        &self.index
    }
}

impl<L: Language> Formatter for DocFormatter<'_, L> {
    fn language(&self) -> &str {
        L::NAME
    }

    fn mime_type(&self) -> &str {
        L::MIME_TYPE
    }

    fn format_type(&self, ty: &TypeRef) -> Result<String, FormatError> {
        self.lang.format_type(&self.index, ty)
    }

    fn format_parameter_name(&self, entry: &Entry<'_>, param: &Parameter) -> String {
        self.lang.format_parameter_name(entry, param)
    }

    fn format_function_name(&self, entry: &Entry<'_>) -> String {
        self.lang.format_function_name(entry)
    }

    fn format_page_name(&self, entry: &Entry<'_>) -> String {
        let owner_name = || {
            entry
                .owner()
                .map(|owner| self.format_page_name(&owner))
                .unwrap_or_default()
        };
        if let (Node::Property(_) | Node::Field(_), Some(_)) = (entry.node, entry.parent) {
            if let Some(name) = self.lang.member_page_name(entry, &owner_name()) {
                return name;
            }
        }
        match entry.node {
            Node::Function(..) => self.format_function_name(entry),
            Node::Property(p) if entry.parent.is_some() => format!("{}:{}", owner_name(), p.name),
            Node::Signal(f) | Node::VFunc(f) if entry.parent.is_some() => {
                format!("{}::{}", owner_name(), f.name)
            }
            Node::Field(f) if entry.parent.is_some() => format!("{}->{}", owner_name(), f.name),
            _ => entry.page_id(),
        }
    }

    fn format(&self, entry: &Entry<'_>, doc: Option<&str>) -> Result<Text, FormatError> {
        let Some(doc) = doc else {
            return Ok(Text::raw(""));
        };
        let markup = DocMarkup {
            index: &self.index,
            formatter: self,
            fundamentals: self.lang.fundamentals(),
            options: &self.options,
        };
        Ok(Text::raw(markup.render(entry, doc)))
    }

    fn dump_class_hierarchy(&self, class: &Class) -> Result<Text, FormatError> {
        hierarchy::dump(&self.index, class).map(Text::raw)
    }

    fn format_prerequisites(&self, iface: &Interface) -> String {
        match iface.prerequisites.as_slice() {
            [] => "GObject.Object".to_string(),
            [only] => only.clone(),
            [init @ .., last] => format!("{} and {}", init.join(", "), last),
        }
    }

    fn format_known_implementations(&self, iface: &Interface) -> String {
        let ns = self.index.namespace();
        let qualified = ns.qualify(&iface.name);
        let implementors: Vec<&str> = ns
            .classes()
            .filter(|class| {
                class
                    .interfaces
                    .iter()
                    .any(|ty| ty.giname() == Some(qualified.as_str()))
            })
            .map(|class| class.name.as_str())
            .collect();

        let out = format!("{} is implemented by ", iface.name);
        match implementors.as_slice() {
            [] => "None".to_string(),
            [only] => format!("{}{}", out, only),
            [init @ .., last] => format!("{}{} and {}", out, init.join(", "), last),
        }
    }

    fn code_sample(&self, sample: &CodeSample<'_>) -> Result<Text, FormatError> {
        Ok(Text::plain(self.lang.code_sample(sample)))
    }

    fn in_parameters<'f>(&self, entry: &Entry<'_>, func: &'f Function) -> Vec<&'f Parameter> {
        self.lang.in_parameters(entry, func)
    }

    fn should_render(&self, entry: &Entry<'_>) -> bool {
        !entry.node.is_private() && self.lang.should_render(entry)
    }
}
