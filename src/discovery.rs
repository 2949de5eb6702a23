//! Source discovery: read files safely and walk the configured folders.

use crate::inspect::inspect_text;
use crate::types::{is_source_name, InspectConfig};
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Read a whole file as UTF-8, dropping a leading byte order mark.
///
/// Returns `None` when the path is not a regular file, cannot be read,
/// or is not valid UTF-8. Failures are logged, never raised.
pub fn read_text_safe(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!(path = %path.display(), %error, "read_text_safe: cannot read");
            return None;
        }
    };
    match String::from_utf8(bytes) {
        Ok(text) => Some(match text.strip_prefix('\u{feff}') {
            Some(rest) => rest.to_string(),
            None => text,
        }),
        Err(error) => {
            tracing::error!(path = %path.display(), %error, "read_text_safe: not utf-8");
            None
        }
    }
}

/// Inspect every source file under `folder`, writing one line per issue.
///
/// Entries are visited in file name order. The name filter applies to
/// directories as well as files.
pub fn inspect_folder(folder: &Path, config: &InspectConfig, out: &mut dyn Write) -> Result<()> {
    if !folder.is_dir() {
        return Ok(());
    }
    let entries = match std::fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!(folder = %folder.display(), %error, "cannot list folder");
            return Ok(());
        }
    };
    let mut names: Vec<String> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.file_name()),
            Err(error) => {
                tracing::warn!(folder = %folder.display(), %error, "cannot read folder entry");
                None
            }
        })
        .filter_map(|name| match name.into_string() {
            Ok(name) => Some(name),
            Err(name) => {
                tracing::warn!(
                    folder = %folder.display(),
                    name = %name.to_string_lossy(),
                    "skipping entry with non-utf-8 name"
                );
                None
            }
        })
        .collect();
    names.sort();

    for name in names {
        if !is_source_name(&name, config) {
            continue;
        }
        let path = folder.join(&name);
        if path.is_dir() {
            inspect_folder(&path, config, out)?;
        } else if path.is_file() {
            inspect_file(&path, out)?;
        }
    }
    Ok(())
}

/// Inspect one file and write its issues as soon as they are known.
pub fn inspect_file(path: &Path, out: &mut dyn Write) -> Result<()> {
    let Some(text) = read_text_safe(path) else {
        return Ok(());
    };
    let file = path.display().to_string();
    tracing::debug!(file = %file, "inspecting");
    for issue in inspect_text(&file, &text) {
        writeln!(out, "{}", issue)?;
    }
    Ok(())
}

/// Inspect `root`, then each configured folder under it.
pub fn inspect_tree(root: &Path, config: &InspectConfig, out: &mut dyn Write) -> Result<()> {
    inspect_folder(root, config, out)?;
    for folder in &config.folders {
        inspect_folder(&root.join(folder), config, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const NOISY: &str = "\
/* globals b, a */
'use strict';
let fs = require('lib');
";

    fn run_tree(root: &Path, config: &InspectConfig) -> String {
        let mut out = Vec::new();
        inspect_tree(root, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    // --- read_text_safe ---

    #[test]
    fn read_text_safe_strips_bom() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.js");
        fs::write(&path, "\u{feff}let a;\n").unwrap();
        assert_eq!(read_text_safe(&path).as_deref(), Some("let a;\n"));
    }

    #[test]
    fn read_text_safe_missing_and_dir() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_text_safe(&tmp.path().join("missing.js")), None);
        assert_eq!(read_text_safe(tmp.path()), None);
    }

    #[test]
    fn read_text_safe_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bin.js");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();
        assert_eq!(read_text_safe(&path), None);
    }

    // --- inspect_folder ---

    #[test]
    fn inspect_folder_filters_names() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        for name in ["keep.js", "_hidden.js", "draft_.js", "all.js", "notes.txt", "chart.js"] {
            fs::write(root.join(name), NOISY).unwrap();
        }

        let mut out = Vec::new();
        inspect_folder(root, &InspectConfig::tcec(), &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        let keep = root.join("keep.js").display().to_string();
        assert_eq!(
            output,
            format!(
                "{keep}: global_order: b vs a\n{keep}: unused: b, a\n{keep}: unrequired: fs\n"
            )
        );
    }

    #[test]
    fn inspect_folder_only_enters_source_named_dirs() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("plain")).unwrap();
        fs::write(root.join("plain/inner.js"), NOISY).unwrap();
        fs::create_dir_all(root.join("bundle.js")).unwrap();
        fs::write(root.join("bundle.js/inner.js"), NOISY).unwrap();

        let mut out = Vec::new();
        inspect_folder(root, &InspectConfig::tcec(), &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("bundle.js"));
        assert!(!output.contains("plain"));
        assert_eq!(output.lines().count(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn inspect_folder_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join(OsStr::from_bytes(b"bad\xff.js")), NOISY).unwrap();
        fs::write(root.join("good.js"), NOISY).unwrap();

        let mut out = Vec::new();
        inspect_folder(root, &InspectConfig::tcec(), &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.lines().count(), 3);
        assert!(output.lines().all(|l| l.contains("good.js")));
    }

    #[test]
    fn inspect_folder_missing_is_noop() {
        let tmp = TempDir::new().unwrap();
        let mut out = Vec::new();
        inspect_folder(&tmp.path().join("nope"), &InspectConfig::tcec(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn inspect_folder_skips_clean_and_undeclared_files() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("clean.js"), "/* globals A */\nA();\n").unwrap();
        fs::write(root.join("plain.js"), "let x = require('x');\n").unwrap();
        fs::write(root.join("bin.js"), [0xff, 0xfe]).unwrap();

        let mut out = Vec::new();
        inspect_folder(root, &InspectConfig::tcec(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    // --- inspect_tree ---

    #[test]
    fn inspect_tree_root_then_folders() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("js")).unwrap();
        fs::create_dir_all(root.join("server")).unwrap();
        fs::write(root.join("z.js"), "/* globals Z */\n").unwrap();
        fs::write(root.join("js/a.js"), "/* globals A */\n").unwrap();
        fs::write(root.join("server/m.js"), "/* globals M */\n").unwrap();

        let output = run_tree(root, &InspectConfig::tcec());
        let files: Vec<_> = output.lines().map(|l| l.rsplit(": ").next().unwrap()).collect();
        assert_eq!(files, vec!["Z", "A", "M"]);
    }

    #[test]
    fn inspect_tree_root_only() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("js")).unwrap();
        fs::write(root.join("js/a.js"), "/* globals A */\n").unwrap();

        let output = run_tree(root, &InspectConfig::root_only("js"));
        assert!(output.is_empty());
    }

    #[test]
    fn inspect_tree_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("server")).unwrap();
        for name in ["delta.js", "alpha.js", "charlie.js", "bravo.js"] {
            fs::write(root.join(name), NOISY).unwrap();
            fs::write(root.join("server").join(name), NOISY).unwrap();
        }

        let config = InspectConfig::tcec();
        let first = run_tree(root, &config);
        let second = run_tree(root, &config);
        assert_eq!(first, second);
        assert_eq!(first.lines().count(), 24);
        assert!(first.lines().next().unwrap().contains("alpha.js"));
    }
}
