//! Hygiene — scans production sources for panics and swallowed errors.
//!
//! Each pattern has a budget of zero. Test files (`*_test.rs`) and the
//! shared test doubles are exempt.

use std::fs;
use std::path::Path;

const BANNED: &[(&str, &str)] = &[
    (".unwrap()", "unwrap"),
    (".expect(", "expect"),
    ("panic!(", "panic"),
    ("unreachable!(", "unreachable"),
    ("todo!(", "todo"),
    ("unimplemented!(", "unimplemented"),
    ("let _ =", "silent discard"),
    (".ok()", "dot ok"),
    ("#[allow(dead_code)]", "allow dead code"),
];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") || path_str.ends_with("test_helpers.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|file| file.path.ends_with("store.rs")));
}

#[test]
fn banned_patterns_have_zero_budget() {
    let files = source_files();
    let mut failures = Vec::new();
    for (pattern, label) in BANNED {
        for (path, count) in count_in_source(&files, pattern) {
            failures.push(format!("  {label} ({pattern}) in {path}: {count}"));
        }
    }
    assert!(failures.is_empty(), "hygiene budget exceeded:\n{}", failures.join("\n"));
}
