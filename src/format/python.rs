//! Python (PyGObject) binding.

use super::base::{introspectable_page, Language};
use super::index::SymbolIndex;
use super::{CodeSample, SampleKind};
use crate::error::FormatError;
use crate::model::{Parameter, TypeRef};
use crate::walker::{Entry, FunctionRole, Node};

pub struct Python;

const FUNDAMENTALS: &[(&str, &str)] = &[("TRUE", "True"), ("FALSE", "False"), ("NULL", "None")];

const FUNDAMENTAL_TYPES: &[(&str, &str)] = &[
    ("utf8", "unicode"),
    ("gunichar", "unicode"),
    ("gchar", "str"),
    ("guchar", "str"),
    ("gboolean", "bool"),
    ("gint", "int"),
    ("guint", "int"),
    ("glong", "int"),
    ("gulong", "int"),
    ("gint64", "int"),
    ("guint64", "int"),
    ("gfloat", "float"),
    ("gdouble", "float"),
    ("gchararray", "str"),
    ("GParam", "GLib.Param"),
    ("PyObject", "object"),
    ("GStrv", "[str]"),
    ("GVariant", "GLib.Variant"),
];

fn is_method(entry: &Entry<'_>) -> bool {
    matches!(
        entry.node,
        Node::Function(_, FunctionRole::Method) | Node::VFunc(_)
    )
}

/// `TestObj` to `test_obj`.
fn to_underscores(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

impl Language for Python {
    const NAME: &'static str = "Python";
    const MIME_TYPE: &'static str = "text/python";

    fn fundamentals(&self) -> &'static [(&'static str, &'static str)] {
        FUNDAMENTALS
    }

    fn format_type(&self, index: &SymbolIndex<'_>, ty: &TypeRef) -> Result<String, FormatError> {
        match ty {
            TypeRef::Array { element_type, .. } | TypeRef::List { element_type, .. } => {
                Ok(format!("[{}]", self.format_type(index, element_type)?))
            }
            TypeRef::Map {
                key_type,
                value_type,
                ..
            } => Ok(format!(
                "{{{}: {}}}",
                self.format_type(index, key_type)?,
                self.format_type(index, value_type)?
            )),
            TypeRef::Varargs => Ok("...".into()),
            TypeRef::Type {
                target_fundamental,
                target_giname,
                ..
            } => {
                if let Some(giname) = target_giname {
                    return Ok(giname.clone());
                }
                let name = target_fundamental
                    .as_deref()
                    .ok_or_else(|| FormatError::UnresolvedType(ty.describe()))?;
                Ok(FUNDAMENTAL_TYPES
                    .iter()
                    .find(|(k, _)| *k == name)
                    .map(|(_, v)| *v)
                    .unwrap_or(name)
                    .to_string())
            }
        }
    }

    fn format_parameter_name(&self, entry: &Entry<'_>, param: &Parameter) -> String {
        let is_instance = entry
            .node
            .callable()
            .and_then(|f| f.instance_parameter.as_ref())
            .is_some_and(|ip| std::ptr::eq(ip, param));
        if is_method(entry) && is_instance {
            "self".to_string()
        } else if param.is_varargs() {
            "...".to_string()
        } else {
            param.name.clone()
        }
    }

    fn format_function_name(&self, entry: &Entry<'_>) -> String {
        let name = entry.node.name();
        match entry.owner() {
            Some(owner) => format!("{}.{}", owner.page_id(), name),
            None => name.to_string(),
        }
    }

    fn should_render(&self, entry: &Entry<'_>) -> bool {
        !matches!(entry.node, Node::Function(_, FunctionRole::Constructor))
            && introspectable_page(entry)
    }

    fn code_sample(&self, sample: &CodeSample<'_>) -> String {
        let name = sample.entry.node.name();
        match &sample.kind {
            SampleKind::Callable {
                returns,
                void,
                symbol,
                params,
                varargs,
            } => {
                let mut types: Vec<&str> = params.iter().map(|p| p.ty.as_str()).collect();
                let mut names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
                if *varargs {
                    types.push("...");
                    names.push("...");
                }
                let returns = if *void { "None" } else { returns.as_str() };
                if let Node::Signal(_) = sample.entry.node {
                    let emitter = sample
                        .entry
                        .owner()
                        .map(|owner| to_underscores(owner.node.name()))
                        .unwrap_or_else(|| "obj".to_string());
                    return format!(
                        "def callback({}, {}user_param1, ...)",
                        emitter,
                        names.iter().map(|n| format!("{}, ", n)).collect::<String>()
                    );
                }
                format!(
                    "@accepts({})\n@returns({})\ndef {}({}):\n    # Python wrapper for {}()",
                    types.join(", "),
                    returns,
                    name,
                    names.join(", "),
                    symbol
                )
            }
            SampleKind::Property { ty, flags } => format!("\"{}\" {} : {}", name, ty, flags),
            SampleKind::Field { ty } => format!("{} : {}", name, ty),
            SampleKind::Type { bases } => format!("class {}({}):", name, bases.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SampleParam;
    use crate::model::*;

    fn method_ns() -> Namespace {
        Namespace {
            name: "Regress".into(),
            entities: vec![Entity::Class(Class {
                name: "TestObj".into(),
                members: vec![
                    Member::Constructor(Function {
                        name: "new".into(),
                        ..Default::default()
                    }),
                    Member::Method(Function {
                        name: "do_matrix".into(),
                        symbol: "regress_test_obj_do_matrix".into(),
                        instance_parameter: Some(Parameter {
                            name: "obj".into(),
                            type_: TypeRef::named("Regress.TestObj", "RegressTestObj*"),
                            doc: None,
                            direction: Direction::In,
                            ..Default::default()
                        }),
                        parameters: vec![Parameter {
                            name: "somestr".into(),
                            type_: TypeRef::fundamental("utf8"),
                            doc: None,
                            direction: Direction::In,
                            ..Default::default()
                        }],
                        ..Default::default()
                    }),
                    Member::Method(Function {
                        name: "hidden".into(),
                        shadowed_by: Some("visible".into()),
                        ..Default::default()
                    }),
                ],
                ..Default::default()
            })],
            ..Default::default()
        }
    }

    #[test]
    fn maps_fundamentals_and_containers() {
        let ns = Namespace::default();
        let index = SymbolIndex::new(&ns);
        let list = TypeRef::List {
            ctype: None,
            element_type: Box::new(TypeRef::fundamental("utf8")),
        };
        assert_eq!(Python.format_type(&index, &list).unwrap(), "[unicode]");
        let map = TypeRef::Map {
            ctype: None,
            key_type: Box::new(TypeRef::fundamental("gint")),
            value_type: Box::new(TypeRef::named("Regress.TestObj", "RegressTestObj*")),
        };
        assert_eq!(
            Python.format_type(&index, &map).unwrap(),
            "{int: Regress.TestObj}"
        );
        assert_eq!(
            Python
                .format_type(&index, &TypeRef::fundamental("gboolean"))
                .unwrap(),
            "bool"
        );
        assert_eq!(
            Python.format_type(&index, &TypeRef::fundamental("gpointer")).unwrap(),
            "gpointer"
        );
    }

    #[test]
    fn instance_parameter_is_self() {
        let ns = method_ns();
        let entries = crate::walker::walk(&ns, |_| true);
        let method = entries
            .iter()
            .find(|e| e.node.name() == "do_matrix")
            .unwrap();
        let func = method.node.callable().unwrap();
        let names: Vec<String> = func
            .all_parameters()
            .into_iter()
            .map(|p| Python.format_parameter_name(method, p))
            .collect();
        assert_eq!(names, vec!["self", "somestr"]);
        assert_eq!(Python.format_function_name(method), "Regress.TestObj.do_matrix");
    }

    #[test]
    fn skips_constructors_and_shadowed() {
        let ns = method_ns();
        let rendered: Vec<&str> = crate::walker::walk(&ns, |e| Python.should_render(e))
            .iter()
            .map(|e| e.node.name())
            .collect();
        assert_eq!(rendered, vec!["TestObj", "do_matrix"]);
    }

    #[test]
    fn signal_sample_is_a_callback() {
        let ns = Namespace {
            name: "Regress".into(),
            entities: vec![Entity::Class(Class {
                name: "TestObj".into(),
                members: vec![Member::Signal(Function {
                    name: "sig-with-obj".into(),
                    ..Default::default()
                })],
                ..Default::default()
            })],
            ..Default::default()
        };
        let entries = crate::walker::walk(&ns, |_| true);
        let sample = CodeSample {
            entry: entries[1],
            kind: SampleKind::Callable {
                returns: "none".into(),
                void: true,
                symbol: "sig-with-obj".into(),
                params: vec![SampleParam {
                    name: "obj".into(),
                    ty: "GObject.Object".into(),
                }],
                varargs: false,
            },
        };
        assert_eq!(
            Python.code_sample(&sample),
            "def callback(test_obj, obj, user_param1, ...)"
        );
    }

    #[test]
    fn decorator_sample() {
        let ns = method_ns();
        let entries = crate::walker::walk(&ns, |_| true);
        let method = *entries
            .iter()
            .find(|e| e.node.name() == "do_matrix")
            .unwrap();
        let sample = CodeSample {
            entry: method,
            kind: SampleKind::Callable {
                returns: "none".into(),
                void: true,
                symbol: "regress_test_obj_do_matrix".into(),
                params: vec![
                    SampleParam {
                        name: "self".into(),
                        ty: "Regress.TestObj".into(),
                    },
                    SampleParam {
                        name: "somestr".into(),
                        ty: "unicode".into(),
                    },
                ],
                varargs: false,
            },
        };
        assert_eq!(
            Python.code_sample(&sample),
            "@accepts(Regress.TestObj, unicode)\n@returns(None)\ndef do_matrix(self, somestr):\n    # Python wrapper for regress_test_obj_do_matrix()"
        );
    }
}
