//! Page composition.
//!
//! Every page kind shares the envelope in [`layout`] and supplies its own
//! `info`, `synopsis`, `details` and `links` blocks from a fixed table. A
//! block a kind does not define renders empty. Rendering is all-or-nothing:
//! the first failing block aborts the page.

mod callable;
mod container;
pub mod layout;
mod member;

pub use layout::{LinkSection, Page};

use crate::error::{RenderError, Result};
use crate::format::Formatter;
use crate::model::TypeRef;
use crate::walker::{parent_link, select_template, Entry, ParentLink, TemplateKind};
use crate::xml::Text;

/// Inputs shared by the block functions of one page.
pub struct PageContext<'a> {
    pub entry: Entry<'a>,
    pub id: String,
    pub parent: ParentLink,
    pub formatter: &'a dyn Formatter,
}

impl PageContext<'_> {
    /// Formatted type, with the page and `field` attached on failure.
    pub fn format_type(&self, ty: &TypeRef, field: impl Into<String>) -> Result<String> {
        self.formatter
            .format_type(ty)
            .map_err(|e| RenderError::from_format(&self.id, field, e))
    }

    /// Documentation text as embeddable markup; empty when absent.
    pub fn format_doc(&self, doc: Option<&str>, field: impl Into<String>) -> Result<String> {
        self.formatter
            .format(&self.entry, doc)
            .map(|text| text.embed().into_owned())
            .map_err(|e| RenderError::from_format(&self.id, field, e))
    }

    pub fn embed(&self, text: &Text) -> String {
        text.embed().into_owned()
    }

    pub(crate) fn structural(&self, detail: impl Into<String>) -> RenderError {
        RenderError::StructuralInvariant {
            entity: self.id.clone(),
            detail: detail.into(),
        }
    }
}

/// Producer of one block.
pub type BlockFn = fn(&PageContext<'_>) -> Result<String>;

/// Block overrides of one page kind.
#[derive(Clone, Copy)]
pub struct Template {
    pub kind: TemplateKind,
    pub info: Option<BlockFn>,
    pub synopsis: Option<BlockFn>,
    pub details: Option<BlockFn>,
    pub links: Option<BlockFn>,
}

impl Template {
    const fn base(kind: TemplateKind) -> Self {
        Template {
            kind,
            info: None,
            synopsis: None,
            details: None,
            links: None,
        }
    }

    pub fn for_kind(kind: TemplateKind) -> Self {
        let base = Template::base(kind);
        match kind {
            TemplateKind::Class => Template {
                synopsis: Some(container::synopsis),
                details: Some(container::class_details),
                links: Some(container::links),
                ..base
            },
            TemplateKind::Interface => Template {
                synopsis: Some(container::synopsis),
                details: Some(container::interface_details),
                links: Some(container::links),
                ..base
            },
            TemplateKind::Record => Template {
                synopsis: Some(container::synopsis),
                links: Some(container::links),
                ..base
            },
            TemplateKind::Enum => Template {
                details: Some(member::enum_details),
                ..base
            },
            TemplateKind::Function | TemplateKind::Signal | TemplateKind::VFunc => Template {
                info: Some(callable::info),
                synopsis: Some(callable::synopsis),
                details: Some(callable::details),
                ..base
            },
            TemplateKind::Property => Template {
                synopsis: Some(member::property_synopsis),
                details: Some(member::property_details),
                ..base
            },
            TemplateKind::Field => Template {
                synopsis: Some(member::field_synopsis),
                ..base
            },
        }
    }
}

/// Render the page for one entity.
pub fn render_page(entry: &Entry<'_>, formatter: &dyn Formatter) -> Result<Page> {
    let kind = select_template(entry)?;
    render_with(entry, Template::for_kind(kind), formatter)
}

/// Render `entry` through an explicit template.
pub fn render_with(entry: &Entry<'_>, template: Template, formatter: &dyn Formatter) -> Result<Page> {
    let ctx = PageContext {
        entry: *entry,
        id: entry.page_id(),
        parent: parent_link(entry),
        formatter,
    };
    let block = |f: Option<BlockFn>| f.map(|f| f(&ctx)).transpose().map(Option::unwrap_or_default);

    let info = match template.info {
        Some(f) => f(&ctx)?,
        None => layout::guide_link(&ctx.parent),
    };
    let synopsis = block(template.synopsis)?;
    let doc = ctx.format_doc(entry.node.doc(), "documentation")?;
    let details = block(template.details)?;
    let links = block(template.links)?;
    let sections = if template.links.is_some() {
        container::link_sections(&ctx)
    } else {
        Vec::new()
    };

    tracing::debug!(page = %ctx.id, kind = ?template.kind, "rendered page");
    Ok(Page {
        title: formatter.format_page_name(entry),
        id: ctx.id,
        kind: template.kind,
        style: entry.group_tag(),
        parent: ctx.parent,
        info,
        synopsis,
        doc,
        details,
        links,
        sections,
    })
}

/// `<synopsis>` wrapper around a code sample.
pub(crate) fn synopsis_block(ctx: &PageContext<'_>, sample: &Text) -> String {
    format!(
        "  <synopsis><code mime=\"{}\">{}</code></synopsis>",
        crate::xml::escape(ctx.formatter.mime_type()),
        ctx.embed(sample)
    )
}
