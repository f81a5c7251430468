// Tests for source corpus collection

use assetmap_core::corpus::{
    CorpusOptions, SourceKind, collect_sources, relative_identifier,
};
use assetmap_scanner::ScanError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn relative_paths(root: &Path, options: &CorpusOptions) -> Vec<String> {
    collect_sources(root, options)
        .unwrap()
        .into_iter()
        .map(|s| s.relative_path)
        .collect()
}

// ============================================================================
// SourceKind Tests
// ============================================================================

#[test]
fn test_source_kind_from_extension() {
    assert_eq!(SourceKind::from_extension("java"), Some(SourceKind::Backend));
    assert_eq!(SourceKind::from_extension(".JAVA"), Some(SourceKind::Backend));
    assert_eq!(SourceKind::from_extension("vue"), Some(SourceKind::Frontend));
    assert_eq!(SourceKind::from_extension("tsx"), Some(SourceKind::Frontend));
    assert_eq!(SourceKind::from_extension("html"), Some(SourceKind::Frontend));
    assert_eq!(SourceKind::from_extension("md"), None);
    assert_eq!(SourceKind::from_extension("class"), None);
}

#[test]
fn test_source_kind_from_path() {
    assert_eq!(
        SourceKind::from_path(Path::new("src/main/java/DemoController.java")),
        Some(SourceKind::Backend)
    );
    assert_eq!(SourceKind::from_path(Path::new("Makefile")), None);
}

// ============================================================================
// Collection Tests
// ============================================================================

#[test]
fn test_collects_recognized_files_sorted() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "web/src/menu.vue", "<template></template>");
    write(dir.path(), "api/DemoController.java", "class A {}");
    write(dir.path(), "README.md", "# readme");
    write(dir.path(), "web/public/index.html", "<html></html>");

    let paths = relative_paths(dir.path(), &CorpusOptions::default());

    assert_eq!(
        paths,
        vec!["api/DemoController.java", "web/public/index.html", "web/src/menu.vue"]
    );
}

#[test]
fn test_source_kinds_are_assigned() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "A.java", "");
    write(dir.path(), "b.js", "");

    let sources = collect_sources(dir.path(), &CorpusOptions::default()).unwrap();

    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].kind, SourceKind::Backend);
    assert_eq!(sources[1].kind, SourceKind::Frontend);
    assert!(sources[0].absolute_path.is_absolute());
}

#[test]
fn test_excluded_directories_are_skipped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/app.js", "");
    write(dir.path(), "node_modules/axios/index.js", "");
    write(dir.path(), "target/classes/Gen.java", "");
    write(dir.path(), "dist/bundle.js", "");

    let paths = relative_paths(dir.path(), &CorpusOptions::default());

    assert_eq!(paths, vec!["src/app.js"]);
}

#[test]
fn test_gitignore_is_respected_without_repository() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".gitignore", "generated/\n");
    write(dir.path(), "generated/api.js", "");
    write(dir.path(), "src/app.js", "");

    let paths = relative_paths(dir.path(), &CorpusOptions::default());
    assert_eq!(paths, vec!["src/app.js"]);

    let options = CorpusOptions {
        respect_gitignore: false,
        ..CorpusOptions::default()
    };
    let paths = relative_paths(dir.path(), &options);
    assert_eq!(paths, vec!["generated/api.js", "src/app.js"]);
}

#[test]
fn test_extension_filter() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "A.java", "");
    write(dir.path(), "menu.vue", "");
    write(dir.path(), "nav.html", "");

    let options = CorpusOptions {
        extensions: vec![".vue".to_string(), "JAVA".to_string()],
        ..CorpusOptions::default()
    };

    assert_eq!(relative_paths(dir.path(), &options), vec!["A.java", "menu.vue"]);
}

#[test]
fn test_extension_filter_cannot_add_unknown_kinds() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "notes.txt", "");

    let options = CorpusOptions {
        extensions: vec!["txt".to_string()],
        ..CorpusOptions::default()
    };

    assert!(relative_paths(dir.path(), &options).is_empty());
}

#[test]
fn test_max_depth_limits_walk() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "top.js", "");
    write(dir.path(), "a/b/deep.js", "");

    let options = CorpusOptions {
        max_depth: Some(1),
        ..CorpusOptions::default()
    };

    assert_eq!(relative_paths(dir.path(), &options), vec!["top.js"]);
}

#[test]
fn test_missing_root_is_invalid() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let result = collect_sources(&missing, &CorpusOptions::default());

    assert!(matches!(result, Err(ScanError::InvalidRoot { .. })));
}

#[test]
fn test_file_root_is_invalid() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "A.java", "");

    let result = collect_sources(&dir.path().join("A.java"), &CorpusOptions::default());

    match result {
        Err(ScanError::InvalidRoot { reason, .. }) => assert!(reason.contains("not a directory")),
        other => panic!("expected InvalidRoot, got {:?}", other),
    }
}

#[test]
fn test_empty_root_yields_no_sources() {
    let dir = TempDir::new().unwrap();
    assert!(relative_paths(dir.path(), &CorpusOptions::default()).is_empty());
}

// ============================================================================
// Relative Identifier Tests
// ============================================================================

#[test]
fn test_relative_identifier() {
    let root = Path::new("/srv/project");

    assert_eq!(
        relative_identifier(root, Path::new("/srv/project/web/src/menu.vue")),
        Some("web/src/menu.vue".to_string())
    );
    assert_eq!(relative_identifier(root, Path::new("/srv/other/a.js")), None);
    assert_eq!(relative_identifier(root, root), None);
}
