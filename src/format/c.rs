//! C binding.

use super::base::Language;
use super::index::SymbolIndex;
use super::{CodeSample, SampleKind};
use crate::error::FormatError;
use crate::model::TypeRef;
use crate::walker::{Entry, Node};

pub struct C;

const FUNDAMENTALS: &[(&str, &str)] = &[("TRUE", "TRUE"), ("FALSE", "FALSE"), ("NULL", "NULL")];

impl Language for C {
    const NAME: &'static str = "C";
    const MIME_TYPE: &'static str = "text/x-csrc";

    fn fundamentals(&self) -> &'static [(&'static str, &'static str)] {
        FUNDAMENTALS
    }

    fn format_type(&self, index: &SymbolIndex<'_>, ty: &TypeRef) -> Result<String, FormatError> {
        match ty {
            TypeRef::Array { element_type, .. } => {
                Ok(format!("{}*", self.format_type(index, element_type)?))
            }
            TypeRef::List { ctype, .. } => Ok(ctype.clone().unwrap_or_else(|| "GList*".into())),
            TypeRef::Map { ctype, .. } => {
                Ok(ctype.clone().unwrap_or_else(|| "GHashTable*".into()))
            }
            TypeRef::Varargs => Ok("...".into()),
            TypeRef::Type {
                ctype,
                target_fundamental,
                target_giname,
            } => {
                if let Some(ctype) = ctype.as_deref().or(target_fundamental.as_deref()) {
                    return Ok(ctype.to_string());
                }
                target_giname
                    .as_deref()
                    .and_then(|name| index.lookup_type(name))
                    .and_then(|entry| entry.node.ctype())
                    .map(str::to_string)
                    .ok_or_else(|| FormatError::UnresolvedType(ty.describe()))
            }
        }
    }

    fn format_function_name(&self, entry: &Entry<'_>) -> String {
        match entry.node {
            Node::Function(f, _) => f.c_symbol().to_string(),
            node => node.name().to_string(),
        }
    }

    fn code_sample(&self, sample: &CodeSample<'_>) -> String {
        let name = sample.entry.node.name();
        match &sample.kind {
            SampleKind::Callable {
                returns,
                symbol,
                params,
                varargs,
                ..
            } => {
                let mut args: Vec<String> = params
                    .iter()
                    .map(|p| format!("{} {}", p.ty, p.name))
                    .collect();
                match sample.entry.node {
                    // Signal handlers receive the emitter first and user data last.
                    Node::Signal(_) => {
                        let instance = match sample.entry.owner().and_then(|o| o.node.ctype()) {
                            Some(ctype) => format!("{}* self", ctype),
                            None => "gpointer self".to_string(),
                        };
                        args.insert(0, instance);
                        args.push("gpointer user_data".into());
                        format!("{} user_function ({});", returns, argument_list(args, *varargs))
                    }
                    Node::VFunc(_) => {
                        format!("{} (*{}) ({});", returns, name, argument_list(args, *varargs))
                    }
                    _ => format!("{} {} ({});", returns, symbol, argument_list(args, *varargs)),
                }
            }
            SampleKind::Property { ty, flags } => format!("\"{}\" {} : {}", name, ty, flags),
            SampleKind::Field { ty } => format!("{} {};", ty, name),
            SampleKind::Type { .. } => {
                let ctype = sample.entry.node.ctype().unwrap_or(name);
                format!("struct {};", ctype)
            }
        }
    }
}

fn argument_list(mut args: Vec<String>, varargs: bool) -> String {
    if varargs {
        args.push("...".into());
    }
    if args.is_empty() {
        "void".to_string()
    } else {
        args.join(",\n    ")
    }
}
