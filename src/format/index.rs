//! Lookup tables from C symbols and type names to pages.

use crate::model::{EnumMember, Entity, Namespace};
use crate::walker::{Container, Entry, Node};
use std::collections::HashMap;

/// Resolves identifiers found in types and documentation text.
#[derive(Debug)]
pub struct SymbolIndex<'a> {
    ns: &'a Namespace,
    symbols: HashMap<&'a str, Entry<'a>>,
    types: HashMap<String, Entry<'a>>,
    /// Enumeration value C symbol to its enumeration and value.
    values: HashMap<&'a str, (Entry<'a>, &'a EnumMember)>,
}

impl<'a> SymbolIndex<'a> {
    pub fn new(ns: &'a Namespace) -> Self {
        let mut symbols = HashMap::new();
        let mut types = HashMap::new();
        let mut values = HashMap::new();

        for entity in &ns.entities {
            let entry = Entry::top_level(ns, entity);
            match entity {
                Entity::Function(f) => {
                    symbols.entry(f.c_symbol()).or_insert(entry);
                }
                Entity::Constant(_) => {}
                _ => {
                    let name = entry.node.name();
                    types.entry(name.to_string()).or_insert(entry);
                    types.entry(ns.qualify(name)).or_insert(entry);
                    if let Some(ctype) = entry.node.ctype() {
                        types.entry(ctype.to_string()).or_insert(entry);
                    }
                }
            }

            if let Entity::Enum(e) = entity {
                for member in &e.members {
                    if let Some(symbol) = member.symbol.as_deref() {
                        values.entry(symbol).or_insert((entry, member));
                    }
                }
            }

            if let Some(container) = entry.as_container() {
                for member in container.members() {
                    let child = Entry::member(ns, container, member);
                    if let Node::Function(f, _) = child.node {
                        if !f.symbol.is_empty() {
                            symbols.entry(f.symbol.as_str()).or_insert(child);
                        }
                    }
                }
            }
        }

        SymbolIndex {
            ns,
            symbols,
            types,
            values,
        }
    }

    pub fn namespace(&self) -> &'a Namespace {
        self.ns
    }

    /// Function entry for a C symbol.
    pub fn lookup_symbol(&self, symbol: &str) -> Option<&Entry<'a>> {
        self.symbols.get(symbol)
    }

    /// Enumeration entry and value for a value's C symbol.
    pub fn lookup_enum_value(&self, symbol: &str) -> Option<(&Entry<'a>, &'a EnumMember)> {
        self.values.get(symbol).map(|(entry, member)| (entry, *member))
    }

    /// Type entry for a local name, qualified name or C type. Pointer stars
    /// and `const` qualifiers are ignored, and identifier prefixes are
    /// stripped as a last resort.
    pub fn lookup_type(&self, ident: &str) -> Option<&Entry<'a>> {
        let bare = ident
            .trim()
            .trim_start_matches("const ")
            .trim_end_matches('*')
            .trim();
        if let Some(entry) = self.types.get(bare) {
            return Some(entry);
        }
        self.ns
            .identifier_prefixes
            .iter()
            .filter_map(|prefix| bare.strip_prefix(prefix.as_str()))
            .find_map(|rest| self.types.get(rest))
    }

    /// Member of a container type by kind and name.
    pub fn lookup_member(
        &self,
        owner: &Entry<'a>,
        name: &str,
        accept: impl Fn(&Node<'a>) -> bool,
    ) -> Option<Entry<'a>> {
        let container: Container<'a> = owner.as_container()?;
        container
            .members()
            .iter()
            .map(|m| Entry::member(self.ns, container, m))
            .find(|e| accept(&e.node) && e.node.name() == name)
    }
}
