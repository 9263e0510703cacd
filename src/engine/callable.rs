//! Blocks for functions, methods, constructors, callbacks, signals and
//! virtual methods.

use super::{layout, synopsis_block, PageContext};
use crate::error::{RenderError, Result};
use crate::format::{CodeSample, SampleKind, SampleParam};
use crate::model::{Function, Parameter};
use crate::xml;

/// A visible parameter with its resolved strings.
struct Arg<'f> {
    param: &'f Parameter,
    name: String,
    ty: String,
}

/// Everything the three callable blocks share, resolved once so they agree
/// on parameter order.
struct Signature<'f> {
    func: &'f Function,
    name: String,
    returns: String,
    void: bool,
    args: Vec<Arg<'f>>,
    varargs: bool,
}

fn signature<'f>(ctx: &PageContext<'f>) -> Result<Signature<'f>> {
    let Some(func) = ctx.entry.node.callable() else {
        return Err(ctx.structural(format!(
            "{} has no call signature",
            ctx.entry.node.kind_name()
        )));
    };
    let params = ctx.formatter.in_parameters(&ctx.entry, func);

    let mut args = Vec::with_capacity(params.len());
    let mut varargs = false;
    for (i, &param) in params.iter().enumerate() {
        if param.is_varargs() {
            if i + 1 != params.len() {
                return Err(ctx.structural(format!(
                    "varargs parameter `{}` is not last",
                    param.name
                )));
            }
            varargs = true;
            continue;
        }
        args.push(Arg {
            param,
            name: ctx.formatter.format_parameter_name(&ctx.entry, param),
            ty: ctx.format_type(&param.type_, format!("type of parameter `{}`", param.name))?,
        });
    }

    let return_type = func.return_type();
    Ok(Signature {
        func,
        name: ctx.formatter.format_function_name(&ctx.entry),
        returns: ctx.format_type(&return_type, "return type")?,
        void: return_type.is_void(),
        args,
        varargs,
    })
}

/// Guide link plus the machine-readable signature.
pub(super) fn info(ctx: &PageContext<'_>) -> Result<String> {
    let sig = signature(ctx)?;
    let mut out = layout::guide_link(&ctx.parent);
    out.push_str("\n    <api:function>\n");
    out.push_str(&format!(
        "      <api:returns>\n        <api:type>{}</api:type>\n      </api:returns>\n",
        xml::escape(&sig.returns)
    ));
    out.push_str(&format!("      <api:name>{}</api:name>\n", xml::escape(&sig.name)));
    for arg in &sig.args {
        out.push_str(&format!(
            "      <api:arg>\n        <api:type>{}</api:type>\n        <api:name>{}</api:name>\n      </api:arg>\n",
            xml::escape(&arg.ty),
            xml::escape(&arg.name)
        ));
    }
    if sig.varargs {
        out.push_str("      <api:varargs/>\n");
    }
    out.push_str("    </api:function>");
    Ok(out)
}

pub(super) fn synopsis(ctx: &PageContext<'_>) -> Result<String> {
    let sig = signature(ctx)?;
    let sample = CodeSample {
        entry: ctx.entry,
        kind: SampleKind::Callable {
            returns: sig.returns,
            void: sig.void,
            symbol: sig.func.c_symbol().to_string(),
            params: sig
                .args
                .into_iter()
                .map(|arg| SampleParam {
                    name: arg.name,
                    ty: arg.ty,
                })
                .collect(),
            varargs: sig.varargs,
        },
    };
    let text = ctx
        .formatter
        .code_sample(&sample)
        .map_err(|e| RenderError::from_format(&ctx.id, "synopsis", e))?;
    Ok(synopsis_block(ctx, &text))
}

/// One entry per visible parameter, then the return value.
pub(super) fn details(ctx: &PageContext<'_>) -> Result<String> {
    let sig = signature(ctx)?;
    if sig.args.is_empty() && sig.void {
        return Ok(String::new());
    }

    let mut out = String::from("  <terms>\n");
    for arg in &sig.args {
        let doc = ctx.format_doc(
            arg.param.doc.as_deref(),
            format!("documentation of parameter `{}`", arg.param.name),
        )?;
        out.push_str(&term(&xml::tag("code", &[], Some(&xml::escape(&arg.name))), &doc));
    }
    if !sig.void {
        let doc = ctx.format_doc(
            sig.func.retval.as_ref().and_then(|r| r.doc.as_deref()),
            "return value documentation",
        )?;
        out.push_str(&term("<em>Returns:</em>", &doc));
    }
    out.push_str("  </terms>");
    Ok(out)
}

fn term(title: &str, body: &str) -> String {
    format!(
        "    <item>\n      <title>{}</title>\n      {}\n    </item>\n",
        title, body
    )
}
