//! Class hierarchy diagrams.

use super::index::SymbolIndex;
use crate::error::FormatError;
use crate::model::{Class, TypeRef};
use crate::walker::Node;
use crate::xml;
use std::collections::BTreeMap;

/// Interfaces hang under this synthetic root.
const INTERFACE_ROOT: &str = "GObject.GInterface";

#[derive(Debug, Default)]
struct HierarchyNode {
    /// Page id when the type is documented in this namespace.
    page: Option<String>,
    parents: Vec<String>,
    children: Vec<String>,
}

#[derive(Default)]
struct Hierarchy {
    nodes: BTreeMap<String, HierarchyNode>,
}

impl Hierarchy {
    fn link(&mut self, child: &str, parent: &str) {
        let node = self.nodes.entry(child.to_string()).or_default();
        if !node.parents.iter().any(|p| p == parent) {
            node.parents.push(parent.to_string());
        }
        let parent_node = self.nodes.entry(parent.to_string()).or_default();
        if !parent_node.children.iter().any(|c| c == child) {
            parent_node.children.push(child.to_string());
        }
    }

    fn set_page(&mut self, name: &str, page: Option<String>) {
        let node = self.nodes.entry(name.to_string()).or_default();
        if node.page.is_none() {
            node.page = page;
        }
    }
}

/// Render the ancestry of `class` as a `<tree>` of `<item>` links.
///
/// The parent chain is followed through local classes; the first type
/// outside the namespace becomes a root. Interfaces not already implemented
/// by the parent are attached under `GObject.GInterface`.
pub(crate) fn dump(index: &SymbolIndex<'_>, class: &Class) -> Result<String, FormatError> {
    let ns = index.namespace();
    let mut tree = Hierarchy::default();
    let mut chain = Vec::new();
    add_class(index, class, &mut tree, &mut chain)?;

    // Roots are emitted in reverse name order.
    let mut roots: Vec<&String> = tree
        .nodes
        .iter()
        .filter(|(_, node)| node.parents.is_empty())
        .map(|(name, _)| name)
        .collect();
    roots.sort();

    let mut out = String::from("<tree>\n");
    while let Some(root) = roots.pop() {
        write_item(&tree, root, 1, &mut out);
    }
    out.push_str("</tree>");
    tracing::trace!(class = %ns.qualify(&class.name), "dumped class hierarchy");
    Ok(out)
}

fn add_class(
    index: &SymbolIndex<'_>,
    class: &Class,
    tree: &mut Hierarchy,
    chain: &mut Vec<String>,
) -> Result<(), FormatError> {
    let ns = index.namespace();
    let name = ns.qualify(&class.name);
    if chain.contains(&name) {
        return Err(FormatError::HierarchyCycle(name));
    }
    chain.push(name.clone());
    tree.set_page(&name, Some(name.clone()));

    let mut parent_class = None;
    if let Some(parent_type) = &class.parent_type {
        let (parent_name, local) = resolve(index, parent_type)?;
        tree.link(&name, &parent_name);
        match local {
            Some(parent) => {
                parent_class = Some(parent);
                add_class(index, parent, tree, chain)?;
            }
            None => tree.set_page(&parent_name, None),
        }
    }

    for iface in &class.interfaces {
        let inherited = parent_class
            .map(|p| p.interfaces.contains(iface))
            .unwrap_or(false);
        if inherited {
            continue;
        }
        let (iface_name, _) = resolve(index, iface)?;
        let page = index
            .lookup_type(&iface_name)
            .map(|entry| entry.page_id());
        tree.set_page(&iface_name, page);
        tree.link(&name, &iface_name);
        tree.link(&iface_name, INTERFACE_ROOT);
    }

    chain.pop();
    Ok(())
}

/// Qualified name of a type and the local class behind it, if any.
fn resolve<'a>(
    index: &SymbolIndex<'a>,
    ty: &TypeRef,
) -> Result<(String, Option<&'a Class>), FormatError> {
    let ident = ty
        .giname()
        .or_else(|| ty.ctype())
        .ok_or_else(|| FormatError::UnresolvedType(ty.describe()))?;
    match index.lookup_type(ident) {
        Some(entry) => {
            let local = match entry.node {
                Node::Class(c) => Some(c),
                _ => None,
            };
            Ok((entry.page_id(), local))
        }
        None => Ok((ident.to_string(), None)),
    }
}

fn write_item(tree: &Hierarchy, name: &str, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let Some(node) = tree.nodes.get(name) else {
        return;
    };
    out.push_str(&indent);
    out.push_str("<item>\n");
    out.push_str(&indent);
    out.push_str("  ");
    match &node.page {
        Some(page) => out.push_str(&xml::xref(page, Some(name))),
        None => out.push_str(&xml::tag("code", &[], Some(&xml::escape(name)))),
    }
    out.push('\n');
    for child in &node.children {
        write_item(tree, child, depth + 1, out);
    }
    out.push_str(&indent);
    out.push_str("</item>\n");
}
