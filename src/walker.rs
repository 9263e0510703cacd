//! Page model walker.
//!
//! Turns the API model into a flat list of [`Entry`] values, one per page,
//! and answers the per-page questions the engine needs: which template,
//! which parent link, and how a container's members are grouped.

use crate::error::{RenderError, Result};
use crate::model::*;
use serde::Serialize;

/// Page id of the synthetic root index that top-level pages hang under.
pub const ROOT_INDEX: &str = "index";

/// How a function participates in its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionRole {
    Function,
    Method,
    Constructor,
}

/// Borrowed view of one documentable entity.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Class(&'a Class),
    Interface(&'a Interface),
    Record(&'a Record),
    Enum(&'a Enumeration),
    Function(&'a Function, FunctionRole),
    Callback(&'a Function),
    Property(&'a Property),
    Signal(&'a Function),
    VFunc(&'a Function),
    Field(&'a Field),
    Constant(&'a Constant),
    Alias(&'a Alias),
}

impl<'a> Node<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            Node::Class(c) => &c.name,
            Node::Interface(i) => &i.name,
            Node::Record(r) => &r.name,
            Node::Enum(e) => &e.name,
            Node::Function(f, _) | Node::Callback(f) | Node::Signal(f) | Node::VFunc(f) => &f.name,
            Node::Property(p) => &p.name,
            Node::Field(f) => &f.name,
            Node::Constant(c) => &c.name,
            Node::Alias(a) => &a.name,
        }
    }

    pub fn doc(&self) -> Option<&'a str> {
        match *self {
            Node::Class(c) => c.doc.as_deref(),
            Node::Interface(i) => i.doc.as_deref(),
            Node::Record(r) => r.doc.as_deref(),
            Node::Enum(e) => e.doc.as_deref(),
            Node::Function(f, _) | Node::Callback(f) | Node::Signal(f) | Node::VFunc(f) => {
                f.doc.as_deref()
            }
            Node::Property(p) => p.doc.as_deref(),
            Node::Field(f) => f.doc.as_deref(),
            Node::Constant(c) => c.doc.as_deref(),
            Node::Alias(a) => a.doc.as_deref(),
        }
    }

    /// C type name of type-like nodes.
    pub fn ctype(&self) -> Option<&'a str> {
        match *self {
            Node::Class(c) => c.ctype.as_deref(),
            Node::Interface(i) => i.ctype.as_deref(),
            Node::Record(r) => r.ctype.as_deref(),
            Node::Enum(e) => e.ctype.as_deref(),
            Node::Constant(c) => c.ctype.as_deref(),
            Node::Alias(a) => a.ctype.as_deref(),
            _ => None,
        }
    }

    /// The callable behind function-like nodes.
    pub fn callable(&self) -> Option<&'a Function> {
        match *self {
            Node::Function(f, _) | Node::Callback(f) | Node::Signal(f) | Node::VFunc(f) => Some(f),
            _ => None,
        }
    }

    pub fn is_private(&self) -> bool {
        match *self {
            Node::Class(c) => c.private,
            Node::Interface(i) => i.private,
            Node::Record(r) => r.private,
            Node::Enum(e) => e.private,
            Node::Function(f, _) | Node::Callback(f) | Node::Signal(f) | Node::VFunc(f) => f.private,
            Node::Property(p) => p.private,
            Node::Field(f) => f.private,
            Node::Constant(_) | Node::Alias(_) => false,
        }
    }

    pub fn is_introspectable(&self) -> bool {
        let flag = match *self {
            Node::Class(c) => c.introspectable,
            Node::Interface(i) => i.introspectable,
            Node::Record(r) => r.introspectable,
            Node::Enum(e) => e.introspectable,
            Node::Function(f, _) | Node::Callback(f) | Node::Signal(f) | Node::VFunc(f) => {
                f.introspectable
            }
            Node::Property(p) => p.introspectable,
            Node::Field(_) | Node::Constant(_) | Node::Alias(_) => None,
        };
        flag != Some(false)
    }

    /// Variant name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Class(_) => "class",
            Node::Interface(_) => "interface",
            Node::Record(_) => "record",
            Node::Enum(_) => "enumeration",
            Node::Function(..) => "function",
            Node::Callback(_) => "callback",
            Node::Property(_) => "property",
            Node::Signal(_) => "signal",
            Node::VFunc(_) => "virtual method",
            Node::Field(_) => "field",
            Node::Constant(_) => "constant",
            Node::Alias(_) => "alias",
        }
    }
}

/// An entity that owns members.
#[derive(Debug, Clone, Copy)]
pub enum Container<'a> {
    Class(&'a Class),
    Interface(&'a Interface),
    Record(&'a Record),
}

impl<'a> Container<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            Container::Class(c) => &c.name,
            Container::Interface(i) => &i.name,
            Container::Record(r) => &r.name,
        }
    }

    pub fn members(&self) -> &'a [Member] {
        match *self {
            Container::Class(c) => &c.members,
            Container::Interface(i) => &i.members,
            Container::Record(r) => &r.members,
        }
    }

    pub fn node(&self) -> Node<'a> {
        match *self {
            Container::Class(c) => Node::Class(c),
            Container::Interface(i) => Node::Interface(i),
            Container::Record(r) => Node::Record(r),
        }
    }
}

/// One page-to-be: an entity plus its owner.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub ns: &'a Namespace,
    pub node: Node<'a>,
    pub parent: Option<Container<'a>>,
}

impl<'a> Entry<'a> {
    pub fn top_level(ns: &'a Namespace, entity: &'a Entity) -> Self {
        let node = match entity {
            Entity::Class(c) => Node::Class(c),
            Entity::Interface(i) => Node::Interface(i),
            Entity::Record(r) => Node::Record(r),
            Entity::Enum(e) => Node::Enum(e),
            Entity::Function(f) => Node::Function(f, FunctionRole::Function),
            Entity::Callback(f) => Node::Callback(f),
            Entity::Constant(c) => Node::Constant(c),
            Entity::Alias(a) => Node::Alias(a),
        };
        Entry {
            ns,
            node,
            parent: None,
        }
    }

    pub fn member(ns: &'a Namespace, owner: Container<'a>, member: &'a Member) -> Self {
        let node = match member {
            Member::Constructor(f) => Node::Function(f, FunctionRole::Constructor),
            Member::Method(f) => Node::Function(f, FunctionRole::Method),
            Member::Function(f) => Node::Function(f, FunctionRole::Function),
            Member::Property(p) => Node::Property(p),
            Member::Signal(f) => Node::Signal(f),
            Member::VirtualMethod(f) => Node::VFunc(f),
            Member::Field(f) => Node::Field(f),
            Member::Callback(f) => Node::Callback(f),
        };
        Entry {
            ns,
            node,
            parent: Some(owner),
        }
    }

    /// The entry as a member container, for class-like pages.
    pub fn as_container(&self) -> Option<Container<'a>> {
        match self.node {
            Node::Class(c) => Some(Container::Class(c)),
            Node::Interface(i) => Some(Container::Interface(i)),
            Node::Record(r) => Some(Container::Record(r)),
            _ => None,
        }
    }

    /// Entry for the owner of this entry.
    pub fn owner(&self) -> Option<Entry<'a>> {
        self.parent.map(|p| Entry {
            ns: self.ns,
            node: p.node(),
            parent: None,
        })
    }

    /// Stable page id, also the cross-reference key.
    pub fn page_id(&self) -> String {
        let shadowed_name = match self.node {
            Node::Function(f, _) => f.shadows.as_deref(),
            _ => None,
        };
        let name = shadowed_name.unwrap_or(self.node.name());
        match self.parent {
            None => self.ns.qualify(name),
            Some(owner) => {
                let owner_id = self.ns.qualify(owner.name());
                match self.node {
                    Node::Property(_) | Node::Signal(_) | Node::VFunc(_) | Node::Field(_) => {
                        format!("{}-{}", owner_id, name)
                    }
                    _ => format!("{}.{}", owner_id, name),
                }
            }
        }
    }

    /// Documentation group tag.
    pub fn group_tag(&self) -> &'static str {
        match self.node {
            Node::Class(_) => "class",
            Node::Interface(_) => "interface",
            Node::Record(_) => "record",
            Node::Enum(_) => "enum",
            Node::Function(_, FunctionRole::Function) => "function",
            Node::Function(_, FunctionRole::Method) => "method",
            Node::Function(_, FunctionRole::Constructor) => "constructor",
            Node::Callback(_) => "callback",
            Node::Property(_) => "property",
            Node::Signal(_) => "signal",
            Node::VFunc(_) => "vfunc",
            Node::Field(_) => "field",
            Node::Constant(_) => "constant",
            Node::Alias(_) => "alias",
        }
    }
}

/// Page template selected for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Class,
    Interface,
    Record,
    Enum,
    Function,
    Signal,
    VFunc,
    Property,
    Field,
}

impl TemplateKind {
    /// Class-style pages are guides that list their members.
    pub fn is_guide(&self) -> bool {
        matches!(
            self,
            TemplateKind::Class | TemplateKind::Interface | TemplateKind::Record
        )
    }
}

/// Pick the template for an entity.
pub fn select_template(entry: &Entry<'_>) -> Result<TemplateKind> {
    match entry.node {
        Node::Class(_) => Ok(TemplateKind::Class),
        Node::Interface(_) => Ok(TemplateKind::Interface),
        Node::Record(_) => Ok(TemplateKind::Record),
        Node::Enum(_) => Ok(TemplateKind::Enum),
        Node::Function(..) | Node::Callback(_) => Ok(TemplateKind::Function),
        Node::Signal(_) => Ok(TemplateKind::Signal),
        Node::VFunc(_) => Ok(TemplateKind::VFunc),
        Node::Property(_) => Ok(TemplateKind::Property),
        Node::Field(_) => Ok(TemplateKind::Field),
        Node::Constant(_) | Node::Alias(_) => Err(RenderError::TemplateSelection {
            entity: entry.page_id(),
            kind: entry.node.kind_name(),
        }),
    }
}

/// Member link sections of a class-style page, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkGroup {
    Constructor,
    Method,
    Function,
    Property,
    Signal,
    VFunc,
    Field,
    Other,
}

impl LinkGroup {
    pub const ALL: [LinkGroup; 8] = [
        LinkGroup::Constructor,
        LinkGroup::Method,
        LinkGroup::Function,
        LinkGroup::Property,
        LinkGroup::Signal,
        LinkGroup::VFunc,
        LinkGroup::Field,
        LinkGroup::Other,
    ];

    pub fn from_tag(tag: &str) -> LinkGroup {
        match tag {
            "constructor" => LinkGroup::Constructor,
            "method" => LinkGroup::Method,
            "function" => LinkGroup::Function,
            "property" => LinkGroup::Property,
            "signal" => LinkGroup::Signal,
            "vfunc" => LinkGroup::VFunc,
            "field" => LinkGroup::Field,
            _ => LinkGroup::Other,
        }
    }

    /// Key members use in their guide link to land in this section.
    pub fn key(&self) -> &'static str {
        match self {
            LinkGroup::Constructor => "constructor",
            LinkGroup::Method => "method",
            LinkGroup::Function => "function",
            LinkGroup::Property => "property",
            LinkGroup::Signal => "signal",
            LinkGroup::VFunc => "vfunc",
            LinkGroup::Field => "field",
            LinkGroup::Other => "default",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            LinkGroup::Constructor => "Constructors",
            LinkGroup::Method => "Methods",
            LinkGroup::Function => "Static Functions",
            LinkGroup::Property => "Properties",
            LinkGroup::Signal => "Signals",
            LinkGroup::VFunc => "Virtual functions",
            LinkGroup::Field => "Fields",
            LinkGroup::Other => "Other",
        }
    }

    /// Sections whose entries are callables carry the sample MIME type.
    pub fn lists_functions(&self) -> bool {
        matches!(
            self,
            LinkGroup::Constructor | LinkGroup::Method | LinkGroup::Function
        )
    }
}

/// Guide link from a page to where it is listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentLink {
    pub target: String,
    pub group: String,
}

impl ParentLink {
    pub const KIND: &'static str = "guide";
}

/// Where a page is listed: under its owner's section for members, under the
/// root index with its own tag for top-level entities.
pub fn parent_link(entry: &Entry<'_>) -> ParentLink {
    match entry.owner() {
        Some(owner) => ParentLink {
            target: owner.page_id(),
            group: LinkGroup::from_tag(entry.group_tag()).key().to_string(),
        },
        None => ParentLink {
            target: ROOT_INDEX.to_string(),
            group: entry.group_tag().to_string(),
        },
    }
}

/// Members of a container bucketed by link group.
#[derive(Debug, Clone)]
pub struct MemberGroups<'a> {
    groups: Vec<(LinkGroup, Vec<Entry<'a>>)>,
}

impl<'a> MemberGroups<'a> {
    /// Entries of one group, in declaration order.
    pub fn get(&self, group: LinkGroup) -> &[Entry<'a>] {
        self.groups
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or(&[])
    }

    /// All eight groups in canonical order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (LinkGroup, &[Entry<'a>])> {
        self.groups.iter().map(|(g, e)| (*g, e.as_slice()))
    }
}

/// Partition a container's direct members.
pub fn group_members<'a>(ns: &'a Namespace, container: Container<'a>) -> MemberGroups<'a> {
    let mut groups: Vec<(LinkGroup, Vec<Entry<'a>>)> =
        LinkGroup::ALL.iter().map(|g| (*g, Vec::new())).collect();

    for member in container.members() {
        let entry = Entry::member(ns, container, member);
        let group = LinkGroup::from_tag(entry.group_tag());
        if group == LinkGroup::Other {
            tracing::warn!(
                page = %entry.page_id(),
                tag = entry.group_tag(),
                "member listed under the catch-all group"
            );
        }
        if let Some((_, bucket)) = groups.iter_mut().find(|(g, _)| *g == group) {
            bucket.push(entry);
        }
    }

    MemberGroups { groups }
}

/// Enumerate pages in declaration order: each container is followed by its
/// members. Entries rejected by `keep` are skipped along with their members.
pub fn walk<'a>(ns: &'a Namespace, keep: impl Fn(&Entry<'a>) -> bool) -> Vec<Entry<'a>> {
    let mut entries = Vec::new();
    for entity in &ns.entities {
        let entry = Entry::top_level(ns, entity);
        if !keep(&entry) {
            continue;
        }
        entries.push(entry);
        if let Some(container) = entry.as_container() {
            for member in container.members() {
                let child = Entry::member(ns, container, member);
                if keep(&child) {
                    entries.push(child);
                }
            }
        }
    }
    entries
}
