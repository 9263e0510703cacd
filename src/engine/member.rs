//! Blocks for property, field and enumeration pages.

use super::{synopsis_block, PageContext};
use crate::error::{RenderError, Result};
use crate::format::{CodeSample, SampleKind};
use crate::walker::Node;
use crate::xml;

fn sample(ctx: &PageContext<'_>, kind: SampleKind) -> Result<String> {
    let sample = CodeSample {
        entry: ctx.entry,
        kind,
    };
    let text = ctx
        .formatter
        .code_sample(&sample)
        .map_err(|e| RenderError::from_format(&ctx.id, "synopsis", e))?;
    Ok(synopsis_block(ctx, &text))
}

pub(super) fn property_synopsis(ctx: &PageContext<'_>) -> Result<String> {
    let Node::Property(prop) = ctx.entry.node else {
        return Err(ctx.structural("property block on a non-property"));
    };
    let ty = ctx.format_type(&prop.type_, "property type")?;
    let flags = ctx.formatter.format_property_flags(prop);
    sample(ctx, SampleKind::Property { ty, flags })
}

pub(super) fn property_details(ctx: &PageContext<'_>) -> Result<String> {
    let Node::Property(prop) = ctx.entry.node else {
        return Err(ctx.structural("property block on a non-property"));
    };
    let flags = ctx.formatter.format_property_flags(prop);
    if flags.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("  <p>Flags: {}</p>", xml::escape(&flags)))
}

pub(super) fn field_synopsis(ctx: &PageContext<'_>) -> Result<String> {
    let Node::Field(field) = ctx.entry.node else {
        return Err(ctx.structural("field block on a non-field"));
    };
    // Anonymous unions and embedded callbacks have no declaration to show.
    let Some(ty) = &field.type_ else {
        return Ok(String::new());
    };
    let ty = ctx.format_type(ty, "field type")?;
    sample(ctx, SampleKind::Field { ty })
}

/// One entry per enumeration value, in declaration order.
pub(super) fn enum_details(ctx: &PageContext<'_>) -> Result<String> {
    let Node::Enum(enumeration) = ctx.entry.node else {
        return Err(ctx.structural("enumeration block on a non-enumeration"));
    };
    if enumeration.members.is_empty() {
        return Ok(String::new());
    }

    let mut out = String::from("  <terms>\n");
    for member in &enumeration.members {
        let shown = member.symbol.as_deref().unwrap_or(&member.name);
        let doc = ctx.format_doc(
            member.doc.as_deref(),
            format!("documentation of value `{}`", member.name),
        )?;
        out.push_str(&format!(
            "    <item>\n      <title><code>{}</code> = {}</title>\n      {}\n    </item>\n",
            xml::escape(shown),
            member.value,
            doc
        ));
    }
    out.push_str("  </terms>");
    Ok(out)
}
