//! Convention checks for JavaScript source trees.
//!
//! Reports unsorted or unused `/* globals */` declarations, unsorted or leaked
//! exports, doc comments that disagree with their function, and unused
//! `require` bindings. One line per issue, nothing is fixed.

mod discovery;
mod extract;
mod inspect;
mod types;

pub use discovery::{inspect_file, inspect_folder, inspect_tree, read_text_safe};
pub use extract::{
    count_params, doc_params, extract_exports, extract_functions, extract_globals,
    extract_requires, DocParam, ExportEntry, FunctionRecord, Globals, RequireBinding,
};
pub use inspect::{
    check_exports, check_function, check_functions, check_globals, check_order, check_requires,
    count_word, inspect_text,
};
pub use types::{is_source_name, Category, InspectConfig, Issue};

use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Run the full inspection with the given configuration, printing to stdout.
pub fn run(config: &InspectConfig, root: &Path) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    inspect_tree(root, config, &mut out)?;
    out.flush()?;
    Ok(())
}
