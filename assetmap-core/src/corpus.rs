// Source corpus collection: which files under the root get scanned, and how
// they are identified in the inventory

use assetmap_scanner::ScanError;
use assetmap_scanner::error::Result;
use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

pub const BACKEND_EXTENSIONS: &[&str] = &["java"];
pub const FRONTEND_EXTENSIONS: &[&str] = &["vue", "js", "jsx", "ts", "tsx", "html", "htm"];
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules", "target", "dist", "build", ".git"];

/// Which extractor a file is handed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// Annotated server-side sources, scanned for endpoints
    Backend,
    /// Markup and script files, scanned for menus and call sites
    Frontend,
}

impl SourceKind {
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim_start_matches('.').to_lowercase();
        if BACKEND_EXTENSIONS.contains(&extension.as_str()) {
            Some(SourceKind::Backend)
        } else if FRONTEND_EXTENSIONS.contains(&extension.as_str()) {
            Some(SourceKind::Frontend)
        } else {
            None
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Options controlling the directory walk
#[derive(Debug, Clone)]
pub struct CorpusOptions {
    /// Maximum directory depth below the root (None = unlimited)
    pub max_depth: Option<usize>,
    /// Restrict scanning to these extensions; empty means every recognized one
    pub extensions: Vec<String>,
    pub excluded_dirs: Vec<String>,
    pub respect_gitignore: bool,
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            extensions: Vec::new(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            respect_gitignore: true,
        }
    }
}

impl CorpusOptions {
    fn accepts(&self, path: &Path) -> Option<SourceKind> {
        let kind = SourceKind::from_path(path)?;
        if self.extensions.is_empty() {
            return Some(kind);
        }

        let extension = path.extension()?.to_str()?.to_lowercase();
        self.extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(&extension))
            .then_some(kind)
    }
}

/// A candidate file and its stable identifier relative to the scan root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub relative_path: String,
    pub absolute_path: PathBuf,
    pub kind: SourceKind,
}

impl SourceFile {
    /// Read the file as UTF-8 text. Unreadable or binary files yield `None`.
    pub fn read_text(&self) -> Option<String> {
        match fs::read_to_string(&self.absolute_path) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(file = %self.relative_path, error = %e, "Skipping unreadable file");
                None
            }
        }
    }
}

/// Walk `root` and return every recognized source file, sorted by relative path.
pub fn collect_sources(root: &Path, options: &CorpusOptions) -> Result<Vec<SourceFile>> {
    if !root.exists() {
        return Err(ScanError::InvalidRoot {
            path: root.to_path_buf(),
            reason: "path does not exist".to_string(),
        });
    }
    if !root.is_dir() {
        return Err(ScanError::InvalidRoot {
            path: root.to_path_buf(),
            reason: "path is not a directory".to_string(),
        });
    }

    let root = root.canonicalize()?;
    info!(root = %root.display(), "Collecting source files");

    let mut override_builder = OverrideBuilder::new(&root);
    for excluded in &options.excluded_dirs {
        override_builder.add(&format!("!{}/", excluded))?;
    }
    let overrides = override_builder.build()?;

    let mut sources = Vec::new();
    for result in WalkBuilder::new(&root)
        .max_depth(options.max_depth)
        .hidden(false)
        .git_ignore(options.respect_gitignore)
        .require_git(false)
        .overrides(overrides)
        .build()
    {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "Failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let Some(kind) = options.accepts(path) else {
            continue;
        };
        let Some(relative_path) = relative_identifier(&root, path) else {
            debug!(path = %path.display(), "Path escapes the scan root, skipping");
            continue;
        };

        sources.push(SourceFile {
            relative_path,
            absolute_path: path.to_path_buf(),
            kind,
        });
    }

    sources.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    info!(count = sources.len(), "Source collection complete");

    Ok(sources)
}

/// `/`-separated path of `path` below `root`; `None` if it is not strictly inside.
pub fn relative_identifier(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut segments = Vec::new();

    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_str()?.to_string()),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}
