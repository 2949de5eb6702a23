//! Convention checks over the facts pulled out by [`crate::extract`].

use crate::extract::{
    count_params, doc_params, extract_exports, extract_functions, extract_globals,
    extract_requires, name_portion, FunctionRecord, Globals,
};
use crate::types::{Category, Issue};
use regex::Regex;
use std::collections::HashSet;

/// Check that `texts` are in case-insensitive alphabetical order.
///
/// Only the text before the first colon is compared. Reports the first
/// position where the sequence diverges from its stably sorted form, then stops.
pub fn check_order(file: &str, category: Category, texts: &[&str]) -> Option<Issue> {
    let mut sorted = texts.to_vec();
    sorted.sort_by_cached_key(|t| name_portion(t).to_lowercase());
    texts
        .iter()
        .zip(&sorted)
        .find(|(text, alpha)| text != alpha)
        .map(|(text, alpha)| Issue::new(file, category, format!("{} vs {}", text, alpha)))
}

/// Whole-word pattern for `symbol`; `None` (logged) if it cannot be built.
fn word_regex(symbol: &str) -> Option<Regex> {
    match Regex::new(&format!(r"\b{}\b", regex::escape(symbol))) {
        Ok(re) => Some(re),
        Err(error) => {
            tracing::warn!(symbol, %error, "cannot build word pattern, counting 0 uses");
            None
        }
    }
}

/// Count whole-word occurrences of `symbol` in `region`.
pub fn count_word(symbol: &str, region: &str) -> usize {
    if symbol.is_empty() {
        return 0;
    }
    word_regex(symbol).map_or(0, |re| re.find_iter(region).count())
}

/// Globals order and globals never used after their declaration.
pub fn check_globals(file: &str, globals: &Globals<'_>, region: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    issues.extend(check_order(file, Category::GlobalOrder, &globals.symbols));

    let unused: Vec<&str> = globals
        .names()
        .filter(|name| count_word(name, region) == 0)
        .collect();
    if !unused.is_empty() {
        issues.push(Issue::new(file, Category::Unused, unused.join(", ")));
    }
    issues
}

/// Exports order and globals that are exported again.
pub fn check_exports(file: &str, globals: &Globals<'_>, text: &str) -> Vec<Issue> {
    let exports = extract_exports(text);
    if exports.is_empty() {
        return vec![];
    }
    let keys: Vec<&str> = exports.iter().map(|e| e.key).collect();

    let mut issues = Vec::new();
    issues.extend(check_order(file, Category::ExportOrder, &keys));

    let names: HashSet<&str> = globals.names().collect();
    let leaked: Vec<&str> = keys.into_iter().filter(|k| names.contains(k)).collect();
    if !leaked.is_empty() {
        issues.push(Issue::new(file, Category::Exported, leaked.join(", ")));
    }
    issues
}

/// Whether the body returns at the first indentation level.
fn has_return(body: &str) -> bool {
    body.contains("\n    return ")
}

/// Doc comment consistency of a single function: `@returns` and `@param` count.
pub fn check_function(file: &str, func: &FunctionRecord<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();

    if has_return(func.body) != func.doc.contains("@returns") {
        issues.push(Issue::new(file, Category::Return, func.name));
    }

    let num_doc = doc_params(func.doc)
        .iter()
        .filter(|p| !p.is_options_object())
        .count();
    let num_param = count_params(func.params);
    if num_doc != num_param {
        issues.push(Issue::new(
            file,
            Category::Args,
            format!("{}: {} vs {}", func.name, num_doc, num_param),
        ));
    }
    issues
}

/// Doc checks for every documented function in `region`, in source order.
pub fn check_functions(file: &str, region: &str) -> Vec<Issue> {
    extract_functions(region)
        .iter()
        .flat_map(|func| check_function(file, func))
        .collect()
}

/// Required names that are not used beyond their own binding.
pub fn check_requires(file: &str, region: &str) -> Option<Issue> {
    let unused: Vec<&str> = extract_requires(region)
        .into_iter()
        .flat_map(|binding| binding.names)
        .filter(|name| count_word(name, region) < 2)
        .collect();
    if unused.is_empty() {
        None
    } else {
        Some(Issue::new(file, Category::Unrequired, unused.join(", ")))
    }
}

/// Run every check over one file's text.
///
/// Files without a non-empty globals comment are not inspected at all.
/// Functions and requires are only searched after the globals comment.
pub fn inspect_text(file: &str, text: &str) -> Vec<Issue> {
    let Some(globals) = extract_globals(text) else {
        return vec![];
    };
    let region = &text[globals.end..];

    let mut issues = check_globals(file, &globals, region);
    issues.extend(check_exports(file, &globals, text));
    issues.extend(check_functions(file, region));
    issues.extend(check_requires(file, region));
    issues
}
