//! Markup helpers shared by the page layout and the formatters.

use std::borrow::Cow;

/// Escape text for element content and double-quoted attribute values.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;"),
    )
}

/// Build a single element. `content` is already-escaped markup; `None`
/// produces a self-closing tag.
pub fn tag(name: &str, attrs: &[(&str, &str)], content: Option<&str>) -> String {
    let mut out = String::new();
    out.push('<');
    out.push_str(name);
    for (key, value) in attrs {
        out.push_str(&format!(" {}=\"{}\"", key, escape(value)));
    }
    match content {
        Some(body) => {
            out.push('>');
            out.push_str(body);
            out.push_str(&format!("</{}>", name));
        }
        None => out.push_str("/>"),
    }
    out
}

/// Link to another page of the same document set.
pub fn xref(page_id: &str, label: Option<&str>) -> String {
    let label = label.map(escape);
    tag("link", &[("xref", page_id)], label.as_deref())
}

/// Text that may or may not already be markup.
///
/// Formatters return [`Text::Raw`] for generated markup that must pass
/// through untouched; everything else is escaped when embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    Plain(String),
    Raw(String),
}

impl Text {
    pub fn plain(s: impl Into<String>) -> Self {
        Text::Plain(s.into())
    }

    pub fn raw(s: impl Into<String>) -> Self {
        Text::Raw(s.into())
    }

    /// Markup ready to be embedded in a page.
    pub fn embed(&self) -> Cow<'_, str> {
        match self {
            Text::Plain(s) => escape(s),
            Text::Raw(s) => Cow::Borrowed(s),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Text::Plain(s) | Text::Raw(s) => s.is_empty(),
        }
    }
}
