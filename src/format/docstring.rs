//! gtk-doc style documentation text to page markup.

use super::index::SymbolIndex;
use super::{DocOptions, Formatter};
use crate::walker::{Entry, Node};
use crate::xml;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

// Alternatives are tried in order at each position.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<note>\n+>[ \t]*(?P<note_text>.*)\n)",
        r"|(?P<paragraph>\n\n)",
        r"|(?P<newline>\n)",
        r#"|(?P<code_lang>\|\[<!--\s*language\s*=\s*"(?P<language>[a-zA-Z0-9_+-]+)"\s*-->)"#,
        r"|(?P<code_start>\|\[)",
        r"|(?P<code_end>\]\|)",
        r"|(?P<property>#(?P<prop_type>[a-zA-Z0-9_]+):(?P<prop_name>[a-zA-Z0-9_-]+))",
        r"|(?P<signal>#(?P<sig_type>[a-zA-Z0-9_]+)::(?P<sig_name>[a-zA-Z0-9_-]+))",
        r"|(?P<type_ref>#(?P<type_name>[a-zA-Z0-9_]+))",
        r"|(?P<constant>%(?P<const_name>[a-zA-Z0-9_]+))",
        r"|(?P<param>@(?P<param_name>[a-zA-Z0-9_]+))",
        r"|(?P<call>(?P<call_name>[a-zA-Z0-9_]+)\(\))",
        r"|(?P<include>\{\{\s*(?P<include_name>[^}\n]+?)\s*\}\})",
        r"|(?P<heading>(?m:^)(?P<hashes>#+)[ \t]+(?P<heading_text>.*))",
    ))
    .unwrap()
});

// Candidate words for implicit links.
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\s()]+").unwrap());

/// Nested `{{ file }}` includes beyond this depth stay literal.
const MAX_INCLUDE_DEPTH: usize = 8;

/// MIME types for `|[<!-- language="..." -->` code blocks.
const LANGUAGE_MIMES: &[(&str, &str)] = &[
    ("bash-script", "application/x-shellscript"),
    ("shell", "application/x-shellscript"),
    ("csharp", "text/x-csharp"),
    ("css", "text/css"),
    ("diff", "text/xpatch"),
    ("html", "text/html"),
    ("java", "text/x-java"),
    ("javascript", "application/javascript"),
    ("lisp", "text/x-scheme"),
    ("lua", "text-x-lua"),
    ("c", "text/x-csrc"),
    ("c++", "text/x-c++src"),
    ("pascal", "text/x-pascal"),
    ("perl", "application/x-perl"),
    ("php", "application/x-php"),
    ("python", "text/x-python"),
    ("ruby", "application/x-ruby"),
    ("sql", "text/x-sql"),
    ("yaml", "application/x-yaml"),
    ("xml", "application/xml"),
];

/// Resolution context for one documentation string.
pub(crate) struct DocMarkup<'f, 'a> {
    pub index: &'f SymbolIndex<'a>,
    pub formatter: &'f dyn Formatter,
    /// Binding spellings of `%TRUE`, `%FALSE` and `%NULL`.
    pub fundamentals: &'static [(&'static str, &'static str)],
    pub options: &'f DocOptions,
}

#[derive(Default)]
struct State {
    in_code: bool,
    open_sections: usize,
    include_depth: usize,
}

impl DocMarkup<'_, '_> {
    /// Render `doc` as a paragraph sequence. Unresolvable references are kept
    /// as literal text.
    pub fn render(&self, entry: &Entry<'_>, doc: &str) -> String {
        let mut state = State::default();
        let mut out = String::from("<p>");
        out.push_str(&self.inline(entry, doc, &mut state));

        if state.in_code {
            out.push_str("</code>");
        } else {
            out.push_str("</p>");
        }
        for _ in 0..state.open_sections {
            out.push_str("</section>");
        }
        out
    }

    fn inline(&self, entry: &Entry<'_>, text: &str, state: &mut State) -> String {
        let mut out = String::new();
        let mut pos = 0;
        for caps in TOKEN.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > pos {
                out.push_str(&self.plain(&text[pos..whole.start()]));
            }
            out.push_str(&self.token(entry, &caps, state));
            pos = whole.end();
        }
        if pos < text.len() {
            out.push_str(&self.plain(&text[pos..]));
        }
        out
    }

    /// Escape text between tokens, linking bare type and function names when
    /// implicit links are enabled.
    fn plain(&self, text: &str) -> String {
        if !self.options.resolve_implicit_links {
            return xml::escape(text).into_owned();
        }
        let mut out = String::new();
        let mut pos = 0;
        for word in WORD.find_iter(text) {
            out.push_str(&xml::escape(&text[pos..word.start()]));
            let target = self
                .index
                .lookup_type(word.as_str())
                .or_else(|| self.index.lookup_symbol(word.as_str()));
            match target {
                Some(target) => out.push_str(&xml::xref(&target.page_id(), Some(word.as_str()))),
                None => out.push_str(&xml::escape(word.as_str())),
            }
            pos = word.end();
        }
        out.push_str(&xml::escape(&text[pos..]));
        out
    }

    fn token(&self, entry: &Entry<'_>, caps: &Captures<'_>, state: &mut State) -> String {
        let literal = || xml::escape(&caps[0]).into_owned();

        if caps.name("note").is_some() {
            if state.in_code {
                return literal();
            }
            return format!(
                "</p><note><p>{}</p></note><p>",
                xml::escape(&caps["note_text"])
            );
        }
        if caps.name("paragraph").is_some() {
            return if state.in_code {
                "\n\n".to_string()
            } else {
                "</p><p>".to_string()
            };
        }
        if caps.name("newline").is_some() {
            return "\n".to_string();
        }
        if caps.name("code_lang").is_some() {
            state.in_code = true;
            let language = caps["language"].to_ascii_lowercase();
            return match LANGUAGE_MIMES.iter().find(|(name, _)| *name == language) {
                Some((_, mime)) => format!("</p><code mime=\"{}\">", mime),
                None => "</p><code>".to_string(),
            };
        }
        if caps.name("code_start").is_some() {
            state.in_code = true;
            return "</p><code>".to_string();
        }
        if caps.name("code_end").is_some() {
            state.in_code = false;
            return "</code><p>".to_string();
        }
        if caps.name("property").is_some() {
            return self
                .member_link(&caps["prop_type"], &caps["prop_name"], true)
                .unwrap_or_else(literal);
        }
        if caps.name("signal").is_some() {
            return self
                .member_link(&caps["sig_type"], &caps["sig_name"], false)
                .unwrap_or_else(literal);
        }
        if caps.name("type_ref").is_some() {
            return self.type_link(&caps["type_name"]).unwrap_or_else(literal);
        }
        if caps.name("constant").is_some() {
            let name = &caps["const_name"];
            if let Some((_, shown)) = self.fundamentals.iter().find(|(k, _)| *k == name) {
                return xml::tag("code", &[], Some(&xml::escape(shown)));
            }
            return match self.index.lookup_enum_value(name) {
                Some((owner, value)) => {
                    format!("{}.{}", xml::xref(&owner.page_id(), None), xml::escape(&value.name))
                }
                None => {
                    tracing::debug!(symbol = name, "unresolved value reference");
                    literal()
                }
            };
        }
        if caps.name("param").is_some() {
            let name = &caps["param_name"];
            return entry
                .node
                .callable()
                .and_then(|f| f.parameter(name))
                .map(|p| {
                    let shown = self.formatter.format_parameter_name(entry, p);
                    xml::tag("code", &[], Some(&xml::escape(&shown)))
                })
                .unwrap_or_else(literal);
        }
        if caps.name("call").is_some() {
            return match self.index.lookup_symbol(&caps["call_name"]) {
                Some(target) => xml::xref(&target.page_id(), None),
                None => {
                    tracing::debug!(symbol = &caps["call_name"], "unresolved function reference");
                    literal()
                }
            };
        }
        if caps.name("include").is_some() {
            return self
                .include(entry, &caps["include_name"], state)
                .unwrap_or_else(literal);
        }
        if caps.name("heading").is_some() {
            if state.in_code {
                return literal();
            }
            let level = caps["hashes"].len();
            let mut out = String::from("</p>");
            while state.open_sections >= level {
                out.push_str("</section>");
                state.open_sections -= 1;
            }
            while state.open_sections < level {
                out.push_str("<section>");
                state.open_sections += 1;
            }
            out.push_str(&format!(
                "<title>{}</title><p>",
                xml::escape(caps["heading_text"].trim())
            ));
            return out;
        }
        literal()
    }

    fn type_link(&self, ident: &str) -> Option<String> {
        if let Some(target) = self.index.lookup_type(ident) {
            return Some(xml::xref(&target.page_id(), None));
        }
        // Plural mentions such as "#TestObjs".
        let singular = ident.trim_end_matches('s');
        if singular.is_empty() || singular.len() == ident.len() {
            return None;
        }
        let target = self.index.lookup_type(singular)?;
        let id = target.page_id();
        Some(xml::xref(&id, Some(&format!("{}s", id))))
    }

    /// Contents of an included file, searched as given and then under each
    /// include directory.
    fn include(&self, entry: &Entry<'_>, name: &str, state: &mut State) -> Option<String> {
        if state.include_depth >= MAX_INCLUDE_DEPTH {
            tracing::warn!(file = name, "include nested too deeply");
            return None;
        }
        let mut candidates = std::iter::once(Path::new(name).to_path_buf())
            .chain(self.options.include_paths.iter().map(|dir| dir.join(name)));
        let Some(contents) = candidates.find_map(|path| fs::read_to_string(path).ok()) else {
            tracing::warn!(file = name, "could not find included file");
            return None;
        };

        if state.in_code {
            return Some(self.plain(&contents));
        }
        state.include_depth += 1;
        let out = self.inline(entry, &contents, state);
        state.include_depth -= 1;
        Some(out)
    }

    fn member_link(&self, type_name: &str, member: &str, property: bool) -> Option<String> {
        let owner = self.index.lookup_type(type_name)?;
        let found = self.index.lookup_member(owner, member, |node| {
            if property {
                matches!(node, Node::Property(_))
            } else {
                matches!(node, Node::Signal(_))
            }
        })?;
        let label = property.then_some(member);
        Some(xml::xref(&found.page_id(), label))
    }
}
