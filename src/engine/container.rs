//! Blocks for class, interface and record pages.

use super::layout::LinkSection;
use super::{synopsis_block, PageContext};
use crate::error::{RenderError, Result};
use crate::format::{CodeSample, SampleKind};
use crate::walker::{group_members, Node};
use crate::xml;

/// Declaration sample listing the parent type and implemented interfaces.
pub(super) fn synopsis(ctx: &PageContext<'_>) -> Result<String> {
    let bases = match ctx.entry.node {
        Node::Class(class) => {
            let mut bases = Vec::new();
            if let Some(parent) = &class.parent_type {
                bases.push(ctx.format_type(parent, "parent type")?);
            }
            for iface in &class.interfaces {
                bases.push(ctx.format_type(iface, "implemented interface")?);
            }
            bases
        }
        Node::Interface(iface) => iface.prerequisites.clone(),
        _ => Vec::new(),
    };
    let sample = CodeSample {
        entry: ctx.entry,
        kind: SampleKind::Type { bases },
    };
    let text = ctx
        .formatter
        .code_sample(&sample)
        .map_err(|e| RenderError::from_format(&ctx.id, "synopsis", e))?;
    Ok(synopsis_block(ctx, &text))
}

/// Hierarchy diagram, embedded exactly as the formatter produced it.
pub(super) fn class_details(ctx: &PageContext<'_>) -> Result<String> {
    let Node::Class(class) = ctx.entry.node else {
        return Err(ctx.structural("hierarchy requested for a non-class"));
    };
    let tree = ctx
        .formatter
        .dump_class_hierarchy(class)
        .map_err(|e| RenderError::from_format(&ctx.id, "class hierarchy", e))?;
    Ok(format!(
        "  <synopsis>\n    <title>Hierarchy</title>\n{}\n  </synopsis>",
        ctx.embed(&tree)
    ))
}

pub(super) fn interface_details(ctx: &PageContext<'_>) -> Result<String> {
    let Node::Interface(iface) = ctx.entry.node else {
        return Err(ctx.structural("prerequisites requested for a non-interface"));
    };
    let prerequisites = ctx.formatter.format_prerequisites(iface);
    let implementations = ctx.formatter.format_known_implementations(iface);
    Ok(format!(
        "  <p>{} requires {}</p>\n  <p>{}</p>",
        xml::escape(&iface.name),
        xml::escape(&prerequisites),
        xml::escape(&implementations)
    ))
}

/// The eight member sections in canonical order, empty ones included.
/// Members the formatter does not render are left out.
pub(super) fn link_sections(ctx: &PageContext<'_>) -> Vec<LinkSection> {
    let Some(owner) = ctx.entry.as_container() else {
        return Vec::new();
    };
    group_members(ctx.entry.ns, owner)
        .iter()
        .map(|(group, entries)| LinkSection {
            group,
            title: group.title(),
            members: entries
                .iter()
                .filter(|e| ctx.formatter.should_render(e))
                .map(|e| e.page_id())
                .collect(),
        })
        .collect()
}

/// Link-list sections collecting member pages by their guide-link group.
pub(super) fn links(ctx: &PageContext<'_>) -> Result<String> {
    if ctx.entry.as_container().is_none() {
        return Err(ctx.structural(format!(
            "{} cannot own members",
            ctx.entry.node.kind_name()
        )));
    }
    let sections: Vec<String> = link_sections(ctx)
        .iter()
        .map(|section| {
            let mut attrs = vec![
                ("type", "topic"),
                ("ui:expanded", "true"),
                ("groups", section.group.key()),
                ("style", "linklist"),
            ];
            if section.group.lists_functions() {
                attrs.push(("api:mime", ctx.formatter.mime_type()));
            }
            let title = xml::tag("title", &[], Some(section.title));
            xml::tag("links", &attrs, Some(&format!("\n    {}\n  ", title)))
        })
        .map(|markup| format!("  {}", markup))
        .collect();
    Ok(sections.join("\n"))
}
