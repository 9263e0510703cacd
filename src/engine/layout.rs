//! The shared base layout every page kind inherits.

use crate::walker::{LinkGroup, ParentLink, TemplateKind};
use crate::xml;
use serde::Serialize;

const NS_MALLARD: &str = "http://projectmallard.org/1.0/";
const NS_API: &str = "http://projectmallard.org/experimental/api/";
const NS_UI: &str = "http://projectmallard.org/1.0/ui/";

/// One rendered page. Blocks hold finished markup and are emitted in field
/// order; an empty block is left out of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub id: String,
    pub kind: TemplateKind,
    pub style: &'static str,
    pub parent: ParentLink,
    pub title: String,
    pub info: String,
    pub synopsis: String,
    /// The entity's own documentation.
    pub doc: String,
    pub details: String,
    pub links: String,
    /// Member listing behind the `links` block, empty for non-guide pages.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<LinkSection>,
}

/// Resolved contents of one member link section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSection {
    pub group: LinkGroup,
    pub title: &'static str,
    pub members: Vec<String>,
}

impl Page {
    /// Mallard page type: class-like pages are guides, the rest topics.
    pub fn page_type(&self) -> &'static str {
        if self.kind.is_guide() {
            "guide"
        } else {
            "topic"
        }
    }

    /// The page wrapped in the document envelope.
    pub fn markup(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\"?>\n");
        out.push_str(&format!(
            "<page id=\"{}\"\n      type=\"{}\"\n      style=\"{}\"\n      xmlns=\"{}\"\n      xmlns:api=\"{}\"\n      xmlns:ui=\"{}\">\n",
            xml::escape(&self.id),
            self.page_type(),
            self.style,
            NS_MALLARD,
            NS_API,
            NS_UI,
        ));
        out.push_str("  <info>\n");
        out.push_str(&self.info);
        out.push_str("\n  </info>\n");
        out.push_str(&format!("  <title>{}</title>\n", xml::escape(&self.title)));
        for block in [&self.synopsis, &self.doc, &self.details, &self.links] {
            if !block.is_empty() {
                out.push_str(block);
                out.push('\n');
            }
        }
        out.push_str("</page>\n");
        out
    }
}

/// Default `info` block: the guide link alone.
pub(crate) fn guide_link(parent: &ParentLink) -> String {
    format!(
        "    {}",
        xml::tag(
            "link",
            &[
                ("type", ParentLink::KIND),
                ("xref", parent.target.as_str()),
                ("group", parent.group.as_str()),
            ],
            None,
        )
    )
}
