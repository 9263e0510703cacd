//! JavaScript (Gjs) binding.

use super::base::{introspectable_page, Language};
use super::index::SymbolIndex;
use super::{CodeSample, SampleKind};
use crate::error::FormatError;
use crate::model::{Direction, Function, Member, Namespace, Parameter, TypeRef};
use crate::walker::{Container, Entry, FunctionRole, Node};

pub struct Gjs;

const FUNDAMENTALS: &[(&str, &str)] = &[("TRUE", "true"), ("FALSE", "false"), ("NULL", "null")];

const FUNDAMENTAL_TYPES: &[(&str, &str)] = &[
    ("none", "void"),
    ("gpointer", "void"),
    ("gboolean", "Boolean"),
    ("gint8", "Number(gint8)"),
    ("guint8", "Number(guint8)"),
    ("gint16", "Number(gint16)"),
    ("guint16", "Number(guint16)"),
    ("gint32", "Number(gint32)"),
    ("guint32", "Number(guint32)"),
    ("gchar", "Number(gchar)"),
    ("guchar", "Number(guchar)"),
    ("gshort", "Number(gshort)"),
    ("gint", "Number(gint)"),
    ("guint", "Number(guint)"),
    ("gfloat", "Number(gfloat)"),
    ("gdouble", "Number(gdouble)"),
    ("utf8", "String"),
    ("gunichar", "String"),
    ("filename", "String"),
    ("GType", "GObject.Type"),
    ("GVariant", "GLib.Variant"),
    // No exact JavaScript representation.
    ("gsize", "Number(gsize)"),
    ("gssize", "Number(gssize)"),
    ("gintptr", "Number(gintptr)"),
    ("guintptr", "Number(guintptr)"),
    ("glong", "Number(glong)"),
    ("gulong", "Number(gulong)"),
    ("gint64", "Number(gint64)"),
    ("guint64", "Number(guint64)"),
    ("long double", "Number(long double)"),
    ("long long", "Number(long long)"),
    ("unsigned long long", "Number(unsigned long long)"),
];

/// Named types Gjs maps onto JavaScript builtins.
const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("GLib.ByteArray", "ByteArray"),
    ("GLib.Bytes", "ByteArray"),
    ("GObject.Value", "Any"),
    ("GObject.Closure", "Function"),
];

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// `TestObj` to `testObj`.
fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// A record that is only a handle and has nothing callable.
fn is_opaque_handle(members: &[Member], disguised: bool) -> bool {
    disguised
        && !members.iter().any(|m| {
            matches!(
                m,
                Member::Method(_) | Member::Function(_) | Member::Constructor(_)
            )
        })
}

/// Whether a class derives, within this namespace's knowledge, from
/// `GObject.ParamSpec`.
fn is_param_spec(ns: &Namespace, parent: Option<&TypeRef>) -> bool {
    let mut current = parent.and_then(TypeRef::giname);
    // Bounded walk so a cyclic model cannot hang page selection.
    for _ in 0..=ns.entities.len() {
        let Some(giname) = current else {
            return false;
        };
        if giname == "GObject.ParamSpec" {
            return true;
        }
        current = ns
            .local_name(giname)
            .and_then(|name| ns.class(name))
            .and_then(|class| class.parent_type.as_ref())
            .and_then(TypeRef::giname);
    }
    false
}

impl Language for Gjs {
    const NAME: &'static str = "Gjs";
    const MIME_TYPE: &'static str = "text/x-gjs";

    fn fundamentals(&self) -> &'static [(&'static str, &'static str)] {
        FUNDAMENTALS
    }

    fn format_type(&self, index: &SymbolIndex<'_>, ty: &TypeRef) -> Result<String, FormatError> {
        match ty {
            TypeRef::Array { element_type, .. }
                if matches!(element_type.fundamental_name(), Some("gint8" | "guint8")) =>
            {
                Ok("ByteArray".into())
            }
            TypeRef::Array { element_type, .. } | TypeRef::List { element_type, .. } => {
                Ok(format!("Array({})", self.format_type(index, element_type)?))
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
                if ty.is_void() {
                    return Ok("void".into());
                }
                if let Some(giname) = target_giname {
                    return Ok(lookup(BUILTIN_TYPES, giname).unwrap_or(giname.as_str()).to_string());
                }
                let name = target_fundamental
                    .as_deref()
                    .ok_or_else(|| FormatError::UnresolvedType(ty.describe()))?;
                Ok(lookup(FUNDAMENTAL_TYPES, name).unwrap_or(name).to_string())
            }
        }
    }

    fn format_function_name(&self, entry: &Entry<'_>) -> String {
        let func = entry.node.callable();
        let name = func
            .and_then(|f| f.shadows.as_deref())
            .unwrap_or_else(|| entry.node.name());
        match (entry.node, entry.owner()) {
            (Node::Function(_, FunctionRole::Method), Some(owner)) => {
                format!("{}.prototype.{}", owner.page_id(), name)
            }
            (_, Some(owner)) => format!("{}.{}", owner.page_id(), name),
            (_, None) => name.to_string(),
        }
    }

    fn member_page_name(&self, entry: &Entry<'_>, owner: &str) -> Option<String> {
        Some(format!("{}.{}", owner, entry.node.name().replace('-', "_")))
    }

    /// Out parameters come back as return values. Parameters that only carry
    /// a callback's user data, its destroy notify or an array length are
    /// implied by the JavaScript value.
    fn in_parameters<'f>(&self, _entry: &Entry<'_>, func: &'f Function) -> Vec<&'f Parameter> {
        let mut implied: Vec<&str> = Vec::new();
        for param in &func.parameters {
            implied.extend(param.closure.as_deref());
            implied.extend(param.destroy.as_deref());
            implied.extend(param.length_param());
        }
        func.parameters
            .iter()
            .filter(|p| p.direction != Direction::Out && !implied.contains(&p.name.as_str()))
            .collect()
    }

    fn should_render(&self, entry: &Entry<'_>) -> bool {
        let visible = match entry.node {
            Node::Record(r) => !is_opaque_handle(&r.members, r.disguised),
            Node::Field(f) => f.type_.is_some() && !matches!(entry.parent, Some(Container::Class(_))),
            Node::Class(c) => !is_param_spec(entry.ns, c.parent_type.as_ref()),
            _ => true,
        };
        visible && introspectable_page(entry)
    }

    fn code_sample(&self, sample: &CodeSample<'_>) -> String {
        let entry = &sample.entry;
        let name = entry.node.name();
        match &sample.kind {
            SampleKind::Callable {
                returns,
                void,
                symbol,
                params,
                varargs,
            } => {
                let mut args: Vec<String> = params
                    .iter()
                    .map(|p| format!("{}: {}", p.name, p.ty))
                    .collect();
                if *varargs {
                    args.push("...".into());
                }
                let returns = if *void { "void" } else { returns.as_str() };
                if let Node::Signal(_) = entry.node {
                    if let Some(owner) = entry.owner() {
                        args.insert(
                            0,
                            format!("{}: {}", lower_camel(owner.node.name()), owner.page_id()),
                        );
                    }
                    return format!("function callback({}): {};", args.join(", "), returns);
                }
                let shown = entry
                    .node
                    .callable()
                    .and_then(|f| f.shadows.as_deref())
                    .unwrap_or(name);
                format!(
                    "function {}({}): {} {{\n    // Gjs wrapper for {}()\n}}",
                    shown,
                    args.join(", "),
                    returns,
                    symbol
                )
            }
            SampleKind::Property { ty, flags } => format!("\"{}\" {} : {}", name, ty, flags),
            SampleKind::Field { ty } => format!("{}: {}", name.replace('-', "_"), ty),
            SampleKind::Type { bases } => {
                let qualified = entry.page_id();
                match entry.node {
                    Node::Class(_) => {
                        let mut out = format!("const {} = new Lang.Class({{\n    Name: '{}',\n", name, qualified);
                        if let Some((parent, interfaces)) = bases.split_first() {
                            out.push_str(&format!("    Extends: {},\n", parent));
                            if !interfaces.is_empty() {
                                out.push_str(&format!("    Implements: [{}],\n", interfaces.join(", ")));
                            }
                        }
                        out.push_str("});");
                        out
                    }
                    Node::Interface(_) => format!(
                        "const {} = new Lang.Interface({{\n    Name: '{}',\n    Requires: [{}],\n}});",
                        name,
                        qualified,
                        bases.join(", ")
                    ),
                    _ => format!("const {} = new {}();", lower_camel(name), qualified),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SampleParam;
    use crate::model::*;

    fn param(name: &str, type_: TypeRef) -> Parameter {
        Parameter {
            name: name.into(),
            type_,
            ..Default::default()
        }
    }

    fn regress() -> Namespace {
        Namespace {
            name: "Regress".into(),
            entities: vec![
                Entity::Class(Class {
                    name: "TestObj".into(),
                    members: vec![
                        Member::Method(Function {
                            name: "do_matrix".into(),
                            symbol: "regress_test_obj_do_matrix".into(),
                            ..Default::default()
                        }),
                        Member::Function(Function {
                            name: "null_out".into(),
                            ..Default::default()
                        }),
                        Member::Method(Function {
                            name: "hello_full".into(),
                            shadows: Some("hello".into()),
                            ..Default::default()
                        }),
                        Member::Property(Property {
                            name: "string-name".into(),
                            type_: TypeRef::fundamental("utf8"),
                            doc: None,
                            readable: true,
                            writable: true,
                            construct: false,
                            construct_only: true,
                            introspectable: None,
                            private: false,
                        }),
                        Member::Field(Field {
                            name: "parent_instance".into(),
                            type_: Some(TypeRef::named("GObject.Object", "GObject")),
                            doc: None,
                            readable: true,
                            writable: false,
                            private: false,
                        }),
                        Member::Signal(Function {
                            name: "sig-with-obj".into(),
                            ..Default::default()
                        }),
                    ],
                    ..Default::default()
                }),
                Entity::Class(Class {
                    name: "TestParamSpec".into(),
                    parent_type: Some(TypeRef::named("GObject.ParamSpec", "GParamSpec")),
                    ..Default::default()
                }),
                Entity::Class(Class {
                    name: "TestSubParamSpec".into(),
                    parent_type: Some(TypeRef::named("Regress.TestParamSpec", "RegressTestParamSpec")),
                    ..Default::default()
                }),
                Entity::Record(Record {
                    name: "TestHandle".into(),
                    disguised: true,
                    ..Default::default()
                }),
                Entity::Record(Record {
                    name: "TestBoxed".into(),
                    members: vec![Member::Field(Field {
                        name: "some_int8".into(),
                        type_: Some(TypeRef::fundamental("gint8")),
                        doc: None,
                        readable: true,
                        writable: true,
                        private: false,
                    })],
                    ..Default::default()
                }),
            ],
            ..Default::default()
        }
    }

    fn find<'a>(entries: &[Entry<'a>], name: &str) -> Entry<'a> {
        *entries.iter().find(|e| e.node.name() == name).unwrap()
    }

    #[test]
    fn maps_types() {
        let ns = Namespace::default();
        let index = SymbolIndex::new(&ns);
        let array = |elem: &str| TypeRef::Array {
            ctype: None,
            element_type: Box::new(TypeRef::fundamental(elem)),
            length: None,
        };
        assert_eq!(Gjs.format_type(&index, &array("guint8")).unwrap(), "ByteArray");
        assert_eq!(Gjs.format_type(&index, &array("utf8")).unwrap(), "Array(String)");
        assert_eq!(Gjs.format_type(&index, &TypeRef::void()).unwrap(), "void");
        assert_eq!(
            Gjs.format_type(&index, &TypeRef::fundamental("gint")).unwrap(),
            "Number(gint)"
        );
        assert_eq!(
            Gjs.format_type(&index, &TypeRef::named("GObject.Value", "GValue*")).unwrap(),
            "Any"
        );
        assert_eq!(
            Gjs.format_type(&index, &TypeRef::named("Regress.TestObj", "RegressTestObj*")).unwrap(),
            "Regress.TestObj"
        );
        let map = TypeRef::Map {
            ctype: None,
            key_type: Box::new(TypeRef::fundamental("utf8")),
            value_type: Box::new(TypeRef::fundamental("gboolean")),
        };
        assert_eq!(Gjs.format_type(&index, &map).unwrap(), "{String: Boolean}");
    }

    #[test]
    fn function_names() {
        let ns = regress();
        let entries = crate::walker::walk(&ns, |_| true);
        assert_eq!(
            Gjs.format_function_name(&find(&entries, "do_matrix")),
            "Regress.TestObj.prototype.do_matrix"
        );
        assert_eq!(
            Gjs.format_function_name(&find(&entries, "null_out")),
            "Regress.TestObj.null_out"
        );
        assert_eq!(
            Gjs.format_function_name(&find(&entries, "hello_full")),
            "Regress.TestObj.prototype.hello"
        );
    }

    #[test]
    fn property_and_field_page_names() {
        use crate::format::{DocFormatter, Formatter};
        let ns = regress();
        let f = DocFormatter::new(&ns, Gjs);
        let entries = crate::walker::walk(&ns, |_| true);
        assert_eq!(
            f.format_page_name(&find(&entries, "string-name")),
            "Regress.TestObj.string_name"
        );
        assert_eq!(
            f.format_page_name(&find(&entries, "some_int8")),
            "Regress.TestBoxed.some_int8"
        );
        assert_eq!(
            f.format_page_name(&find(&entries, "sig-with-obj")),
            "Regress.TestObj::sig-with-obj"
        );
    }

    #[test]
    fn in_parameters_drop_implied_ones() {
        let ns = regress();
        let entries = crate::walker::walk(&ns, |_| true);
        let entry = find(&entries, "do_matrix");
        let func = Function {
            name: "call_me".into(),
            instance_parameter: Some(param("obj", TypeRef::named("Regress.TestObj", "RegressTestObj*"))),
            parameters: vec![
                Parameter {
                    closure: Some("user_data".into()),
                    destroy: Some("notify".into()),
                    ..param("callback", TypeRef::named("Regress.TestCallback", "RegressTestCallback"))
                },
                param("user_data", TypeRef::fundamental("gpointer")),
                param("notify", TypeRef::named("GLib.DestroyNotify", "GDestroyNotify")),
                param(
                    "items",
                    TypeRef::Array {
                        ctype: None,
                        element_type: Box::new(TypeRef::fundamental("utf8")),
                        length: Some("n_items".into()),
                    },
                ),
                param("n_items", TypeRef::fundamental("gint")),
                Parameter {
                    direction: Direction::Out,
                    ..param("result", TypeRef::fundamental("gint"))
                },
                Parameter {
                    direction: Direction::Inout,
                    ..param("counter", TypeRef::fundamental("gint"))
                },
            ],
            ..Default::default()
        };
        let names: Vec<&str> = Gjs
            .in_parameters(&entry, &func)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["callback", "items", "counter"]);
    }

    #[test]
    fn skips_param_specs_handles_and_class_fields() {
        let ns = regress();
        let rendered: Vec<&str> = crate::walker::walk(&ns, |e| Gjs.should_render(e))
            .iter()
            .map(|e| e.node.name())
            .collect();
        assert_eq!(
            rendered,
            vec![
                "TestObj",
                "do_matrix",
                "null_out",
                "hello_full",
                "string-name",
                "sig-with-obj",
                "TestBoxed",
                "some_int8",
            ]
        );
    }

    #[test]
    fn function_and_signal_samples() {
        let ns = regress();
        let entries = crate::walker::walk(&ns, |_| true);
        let obj = SampleParam {
            name: "obj".into(),
            ty: "GObject.Object".into(),
        };
        let method = CodeSample {
            entry: find(&entries, "do_matrix"),
            kind: SampleKind::Callable {
                returns: "Number(gint)".into(),
                void: false,
                symbol: "regress_test_obj_do_matrix".into(),
                params: vec![SampleParam {
                    name: "somestr".into(),
                    ty: "String".into(),
                }],
                varargs: false,
            },
        };
        assert_eq!(
            Gjs.code_sample(&method),
            "function do_matrix(somestr: String): Number(gint) {\n    // Gjs wrapper for regress_test_obj_do_matrix()\n}"
        );
        let signal = CodeSample {
            entry: find(&entries, "sig-with-obj"),
            kind: SampleKind::Callable {
                returns: "none".into(),
                void: true,
                symbol: "sig-with-obj".into(),
                params: vec![obj],
                varargs: false,
            },
        };
        assert_eq!(
            Gjs.code_sample(&signal),
            "function callback(testObj: Regress.TestObj, obj: GObject.Object): void;"
        );
    }

    #[test]
    fn class_sample() {
        let ns = regress();
        let entries = crate::walker::walk(&ns, |_| true);
        let sample = CodeSample {
            entry: find(&entries, "TestObj"),
            kind: SampleKind::Type {
                bases: vec!["GObject.Object".into(), "Regress.TestInterface".into()],
            },
        };
        assert_eq!(
            Gjs.code_sample(&sample),
            "const TestObj = new Lang.Class({\n    Name: 'Regress.TestObj',\n    Extends: GObject.Object,\n    Implements: [Regress.TestInterface],\n});"
        );
    }
}
