//! Pattern extractors: structural facts pulled out of raw JavaScript text.
//!
//! None of these parse the language. Each one is a tolerant regex scan that
//! returns an empty result when nothing matches.

use once_cell::sync::Lazy;
use regex::Regex;

static GLOBALS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*\s*globals\s*(.*?)\*/").unwrap());

static EXPORTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)[Aa]ssign\(exports, \{(.*?)\}\);").unwrap());

static FUNCTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)/\*\*(.*?)\*/\r?\n(?:async )?function\s*(\w+)\s*\((.*?)\)\s*\{(.*?)\r?\n\}")
        .unwrap()
});

static REQUIRE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{?(\w[\w,.= \r\n]+)\}? = require\(.*\n").unwrap());

static PARAM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)(\w+)\s*(?:=\s*(?:-?[\w.]+|\[.*?\]|\{.*?\}|'.*?'|".*?"|`.*?`))?\s*(?:[,}]|$)"#,
    )
    .unwrap()
});

static DOC_PARAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@param \{(.*?)\}\s?([^\n\r]*)").unwrap());

/// Symbols listed in the first `/* globals ... */` comment of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Globals<'a> {
    /// Tokens in source order, possibly of the form `name:hint`.
    pub symbols: Vec<&'a str>,
    /// Byte offset just past the closing `*/`.
    pub end: usize,
}

impl<'a> Globals<'a> {
    /// Name portion of each symbol (text before the first colon).
    ///
    /// Symbols with nothing before the colon (`:hint`, a stray `:`) name nothing
    /// and are left out.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.symbols
            .iter()
            .copied()
            .map(name_portion)
            .filter(|name| !name.is_empty())
    }
}

/// A key of the `Assign(exports, {...})` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry<'a> {
    pub key: &'a str,
    /// 1-based line in the file.
    pub line: usize,
}

/// A documented top-level function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRecord<'a> {
    pub doc: &'a str,
    pub name: &'a str,
    pub params: &'a str,
    pub body: &'a str,
}

/// Names bound by one `... = require(...)` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequireBinding<'a> {
    pub names: Vec<&'a str>,
}

/// A `@param {Type} rest` tag of a doc comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocParam<'a> {
    pub kind: &'a str,
    pub rest: &'a str,
}

impl DocParam<'_> {
    /// `@param {Object} obj`: an options object, not counted against the signature.
    pub fn is_options_object(&self) -> bool {
        self.kind == "Object" && self.rest == "obj"
    }
}

/// Text before the first colon, or the whole string.
pub fn name_portion(symbol: &str) -> &str {
    symbol.split(':').next().unwrap_or(symbol)
}

/// Find the globals comment. `None` when absent or when its list is blank.
pub fn extract_globals(text: &str) -> Option<Globals<'_>> {
    let caps = GLOBALS_RE.captures(text)?;
    let list = caps.get(1)?.as_str().trim();
    if list.is_empty() {
        return None;
    }
    let symbols = list
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    Some(Globals {
        symbols,
        end: caps.get(0)?.end(),
    })
}

/// Keys of the first exports block, in source order.
pub fn extract_exports(text: &str) -> Vec<ExportEntry<'_>> {
    let Some(block) = EXPORTS_RE.captures(text).and_then(|c| c.get(1)) else {
        return vec![];
    };
    let first_line = text[..block.start()].matches('\n').count() + 1;
    block
        .as_str()
        .split('\n')
        .enumerate()
        .filter(|(_, line)| line.contains(':'))
        .map(|(i, line)| ExportEntry {
            key: name_portion(line.trim()),
            line: first_line + i,
        })
        .collect()
}

/// Every doc comment directly followed by an unindented function definition.
pub fn extract_functions(text: &str) -> Vec<FunctionRecord<'_>> {
    FUNCTION_RE
        .captures_iter(text)
        .filter_map(|caps| {
            Some(FunctionRecord {
                doc: caps.get(1)?.as_str(),
                name: caps.get(2)?.as_str(),
                params: caps.get(3)?.as_str(),
                body: caps.get(4)?.as_str(),
            })
        })
        .collect()
}

/// Every `name = require(...)` or `{ a, b } = require(...)` statement.
///
/// The usable name of a binding is the last space-separated token before ` = `,
/// so `const uWS = path.x` yields `uWS`.
pub fn extract_requires(text: &str) -> Vec<RequireBinding<'_>> {
    REQUIRE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|group| RequireBinding {
            names: group
                .as_str()
                .split(',')
                .filter_map(|item| {
                    let head = item.split(" = ").next().unwrap_or("").trim();
                    head.rsplit(' ').next().filter(|name| !name.is_empty())
                })
                .collect(),
        })
        .collect()
}

/// Number of parameters in a raw parameter list; default values are skipped.
pub fn count_params(params: &str) -> usize {
    PARAM_RE.find_iter(params).count()
}

/// All `@param` tags of a doc comment.
pub fn doc_params(doc: &str) -> Vec<DocParam<'_>> {
    DOC_PARAM_RE
        .captures_iter(doc)
        .filter_map(|caps| {
            Some(DocParam {
                kind: caps.get(1)?.as_str(),
                rest: caps.get(2)?.as_str(),
            })
        })
        .collect()
}
