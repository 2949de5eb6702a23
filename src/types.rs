//! Core types for source tree inspection.

use std::fmt;
use std::path::Path;

/// Configuration for source file discovery.
///
/// Different projects can customize behavior by providing different configs.
#[derive(Debug, Clone)]
pub struct InspectConfig {
    /// Source file extension, without the leading dot.
    pub extension: String,

    /// File stems never inspected on their own (bundles and aggregators).
    pub skip_sources: Vec<String>,

    /// Folders under the root that are walked after the root itself.
    pub folders: Vec<String>,
}

impl InspectConfig {
    /// Config matching the tcec layout: `.js` sources, the `all`/`chart`/`tcec`
    /// bundles skipped, `js/` and `server/` walked after the root.
    pub fn tcec() -> Self {
        Self {
            extension: "js".to_string(),
            skip_sources: ["all", "chart", "tcec"].iter().map(|s| s.to_string()).collect(),
            folders: vec!["js".to_string(), "server".to_string()],
        }
    }

    /// Only the root, no bundle names skipped.
    pub fn root_only(extension: &str) -> Self {
        Self {
            extension: extension.to_string(),
            skip_sources: Vec::new(),
            folders: Vec::new(),
        }
    }
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self::tcec()
    }
}

/// Kind of convention violation, printed as the second field of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    GlobalOrder,
    ExportOrder,
    Unused,
    Exported,
    Return,
    Args,
    Unrequired,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::GlobalOrder => "global_order",
            Category::ExportOrder => "export_order",
            Category::Unused => "unused",
            Category::Exported => "exported",
            Category::Return => "return",
            Category::Args => "args",
            Category::Unrequired => "unrequired",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issue found during inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub file: String,
    pub category: Category,
    pub message: String,
}

impl Issue {
    pub fn new(file: &str, category: Category, message: impl Into<String>) -> Self {
        Self {
            file: file.to_string(),
            category,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.file, self.category, self.message)
    }
}

/// Check if a directory entry name passes the source filter.
///
/// The extension must match, the stem must not start or end with `_`,
/// and the stem must not be one of the skipped bundle names.
pub fn is_source_name(name: &str, config: &InspectConfig) -> bool {
    let path = Path::new(name);
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if ext != config.extension {
        return false;
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    if stem.starts_with('_') || stem.ends_with('_') {
        return false;
    }
    !config.skip_sources.iter().any(|s| s == stem)
}
