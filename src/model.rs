//! API model snapshot, the read-only input of the renderer.
//!
//! The model is produced by an introspection front-end and loaded here from
//! JSON. Member order inside every container is declaration order and is
//! preserved verbatim.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// One introspected namespace (library).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    #[serde(default)]
    pub version: String,
    /// C identifier prefixes, e.g. `["Regress"]`.
    #[serde(default)]
    pub identifier_prefixes: Vec<String>,
    /// Top-level entities in declaration order.
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl Namespace {
    /// Parse a JSON model snapshot.
    pub fn from_json(input: &str) -> Result<Self, ModelError> {
        let ns: Namespace = serde_json::from_str(input)?;
        if ns.name.is_empty() {
            return Err(ModelError::MissingName);
        }
        Ok(ns)
    }

    /// Find a top-level class by name.
    pub fn class(&self, name: &str) -> Option<&Class> {
        self.entities.iter().find_map(|e| match e {
            Entity::Class(c) if c.name == name => Some(c),
            _ => None,
        })
    }

    /// Iterate all top-level classes.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Class(c) => Some(c),
            _ => None,
        })
    }

    /// Qualified name (`Ns.Name`) for a local entity name.
    pub fn qualify(&self, name: &str) -> String {
        format!("{}.{}", self.name, name)
    }

    /// Strip this namespace's qualifier from a `Ns.Name` string.
    pub fn local_name<'n>(&self, giname: &'n str) -> Option<&'n str> {
        giname
            .strip_prefix(self.name.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
    }
}

/// A top-level entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Class(Class),
    Interface(Interface),
    Record(Record),
    Enum(Enumeration),
    Function(Function),
    Callback(Function),
    Constant(Constant),
    Alias(Alias),
}

/// A member of a class, interface or record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Member {
    Constructor(Function),
    Method(Function),
    /// Static function scoped to the owner.
    Function(Function),
    Property(Property),
    Signal(Function),
    VirtualMethod(Function),
    Field(Field),
    /// Callback type declared inside the owner.
    Callback(Function),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    #[serde(default)]
    pub ctype: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub parent_type: Option<TypeRef>,
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    #[serde(default)]
    pub is_abstract: bool,
    /// `Some(false)` when bindings cannot use the entity.
    #[serde(default)]
    pub introspectable: Option<bool>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    #[serde(default)]
    pub ctype: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    /// Qualified names of prerequisite types.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// `Some(false)` when bindings cannot use the entity.
    #[serde(default)]
    pub introspectable: Option<bool>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub members: Vec<Member>,
}

/// A plain or boxed structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    #[serde(default)]
    pub ctype: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    /// Set when this record is the class structure of another type.
    #[serde(default)]
    pub is_gtype_struct_for: Option<String>,
    #[serde(default)]
    pub disguised: bool,
    /// `Some(false)` when bindings cannot use the entity.
    #[serde(default)]
    pub introspectable: Option<bool>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Enumeration {
    pub name: String,
    #[serde(default)]
    pub ctype: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub bitfield: bool,
    /// `Some(false)` when bindings cannot use the entity.
    #[serde(default)]
    pub introspectable: Option<bool>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub doc: Option<String>,
}

/// Any callable: free function, method, constructor, callback, signal or
/// virtual method. The role comes from where it sits in the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    /// C symbol; empty for signals and virtual methods.
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub instance_parameter: Option<Parameter>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub retval: Option<ReturnValue>,
    /// Reports failures through a trailing error out-parameter.
    #[serde(default)]
    pub throws: bool,
    /// Name of the function this one replaces in bindings.
    #[serde(default)]
    pub shadows: Option<String>,
    #[serde(default)]
    pub shadowed_by: Option<String>,
    /// `Some(false)` when bindings cannot use the entity.
    #[serde(default)]
    pub introspectable: Option<bool>,
    #[serde(default)]
    pub private: bool,
}

impl Function {
    /// C symbol, falling back to the plain name.
    pub fn c_symbol(&self) -> &str {
        if self.symbol.is_empty() {
            &self.name
        } else {
            &self.symbol
        }
    }

    /// Instance parameter first, then the declared parameters.
    pub fn all_parameters(&self) -> Vec<&Parameter> {
        self.instance_parameter
            .iter()
            .chain(self.parameters.iter())
            .collect()
    }

    /// Look up a parameter (instance included) by name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.all_parameters().into_iter().find(|p| p.name == name)
    }

    /// Return type, void when absent.
    pub fn return_type(&self) -> TypeRef {
        self.retval
            .as_ref()
            .map(|r| r.type_.clone())
            .unwrap_or_else(TypeRef::void)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: TypeRef,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub direction: Direction,
    /// For callback parameters, the parameter carrying its user data.
    #[serde(default)]
    pub closure: Option<String>,
    /// For callback parameters, the parameter carrying its destroy notify.
    #[serde(default)]
    pub destroy: Option<String>,
}

impl Parameter {
    pub fn is_varargs(&self) -> bool {
        matches!(self.type_, TypeRef::Varargs)
    }

    /// Name of the parameter holding this array's length, if any.
    pub fn length_param(&self) -> Option<&str> {
        match &self.type_ {
            TypeRef::Array { length, .. } => length.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    In,
    Out,
    Inout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnValue {
    #[serde(rename = "type")]
    pub type_: TypeRef,
    #[serde(default)]
    pub doc: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: TypeRef,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default = "yes")]
    pub readable: bool,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub construct: bool,
    #[serde(default)]
    pub construct_only: bool,
    /// `Some(false)` when bindings cannot use the entity.
    #[serde(default)]
    pub introspectable: Option<bool>,
    #[serde(default)]
    pub private: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    /// Absent for anonymous unions and callbacks embedded in structures.
    #[serde(rename = "type", default)]
    pub type_: Option<TypeRef>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default = "yes")]
    pub readable: bool,
    #[serde(default = "yes")]
    pub writable: bool,
    #[serde(default)]
    pub private: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
    #[serde(default)]
    pub ctype: Option<String>,
    #[serde(rename = "type")]
    pub type_: TypeRef,
    pub value: String,
    #[serde(default)]
    pub doc: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Alias {
    pub name: String,
    #[serde(default)]
    pub ctype: Option<String>,
    pub target: TypeRef,
    #[serde(default)]
    pub doc: Option<String>,
}

/// Opaque type reference. Only formatters interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    Type {
        #[serde(default)]
        ctype: Option<String>,
        /// Fundamental name such as `gint`, `utf8` or `none`.
        #[serde(default)]
        target_fundamental: Option<String>,
        /// Qualified name such as `Regress.TestObj`.
        #[serde(default)]
        target_giname: Option<String>,
    },
    Array {
        #[serde(default)]
        ctype: Option<String>,
        element_type: Box<TypeRef>,
        /// Parameter carrying the element count.
        #[serde(default)]
        length: Option<String>,
    },
    List {
        #[serde(default)]
        ctype: Option<String>,
        element_type: Box<TypeRef>,
    },
    Map {
        #[serde(default)]
        ctype: Option<String>,
        key_type: Box<TypeRef>,
        value_type: Box<TypeRef>,
    },
    Varargs,
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::void()
    }
}

impl TypeRef {
    pub fn void() -> Self {
        TypeRef::Type {
            ctype: Some("void".into()),
            target_fundamental: Some("none".into()),
            target_giname: None,
        }
    }

    /// Shorthand for a fundamental whose C type has the same name.
    pub fn fundamental(name: &str) -> Self {
        TypeRef::Type {
            ctype: Some(name.into()),
            target_fundamental: Some(name.into()),
            target_giname: None,
        }
    }

    /// Shorthand for a named (non-fundamental) type.
    pub fn named(giname: &str, ctype: &str) -> Self {
        TypeRef::Type {
            ctype: Some(ctype.into()),
            target_fundamental: None,
            target_giname: Some(giname.into()),
        }
    }

    pub fn ctype(&self) -> Option<&str> {
        match self {
            TypeRef::Type { ctype, .. }
            | TypeRef::Array { ctype, .. }
            | TypeRef::List { ctype, .. }
            | TypeRef::Map { ctype, .. } => ctype.as_deref(),
            TypeRef::Varargs => None,
        }
    }

    pub fn fundamental_name(&self) -> Option<&str> {
        match self {
            TypeRef::Type {
                target_fundamental, ..
            } => target_fundamental.as_deref(),
            _ => None,
        }
    }

    pub fn giname(&self) -> Option<&str> {
        match self {
            TypeRef::Type { target_giname, .. } => target_giname.as_deref(),
            _ => None,
        }
    }

    /// Void-equivalent types suppress the "Returns" entry.
    pub fn is_void(&self) -> bool {
        match self {
            TypeRef::Type {
                ctype,
                target_fundamental,
                target_giname,
            } => {
                target_giname.is_none()
                    && (target_fundamental.as_deref() == Some("none")
                        || (target_fundamental.is_none() && ctype.as_deref() == Some("void")))
            }
            _ => false,
        }
    }

    /// Human-readable description for error messages.
    pub fn describe(&self) -> String {
        self.giname()
            .or_else(|| self.ctype())
            .or_else(|| self.fundamental_name())
            .unwrap_or("<anonymous>")
            .to_string()
    }
}

fn yes() -> bool {
    true
}
