//! Hygiene: source budgets for the library crate.
//!
//! The engine runs inside a browser tab, where a panic kills the editor and
//! loses unsaved work. These tests scan `src/` (skipping `_test.rs` files)
//! for patterns that panic, swallow errors, or bypass `tracing`. Budgets only
//! ever go down.

use std::fs;
use std::path::Path;

/// `(pattern, budget, why)`.
const BUDGETS: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "panics on None/Err"),
    (".expect(", 0, "panics on None/Err"),
    ("panic!(", 0, "aborts the session"),
    ("unreachable!(", 0, "aborts the session"),
    ("todo!(", 0, "unfinished code"),
    ("unimplemented!(", 0, "unfinished code"),
    ("let _ =", 0, "discards a result unseen"),
    (".ok()", 0, "discards an error unseen"),
    ("#[allow(dead_code)]", 0, "hides unused code"),
    ("println!(", 0, "library output goes through tracing"),
    ("dbg!(", 0, "debug leftovers"),
];

fn library_sources(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            library_sources(&path, out);
            continue;
        }
        let name = path.to_string_lossy().to_string();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push((name, content));
        }
    }
}

fn hits(files: &[(String, String)], pattern: &str) -> Vec<String> {
    files
        .iter()
        .flat_map(|(path, content)| {
            content
                .lines()
                .enumerate()
                .filter(move |(_, line)| line.contains(pattern))
                .map(move |(n, line)| format!("  {path}:{}: {}", n + 1, line.trim()))
        })
        .collect()
}

#[test]
fn scans_library_sources() {
    let mut files = Vec::new();
    library_sources(Path::new("src"), &mut files);
    assert!(files.iter().any(|(path, _)| path.ends_with("engine.rs")), "src/ not found from test cwd");
}

#[test]
fn budgets_hold() {
    let mut files = Vec::new();
    library_sources(Path::new("src"), &mut files);

    let mut failures = Vec::new();
    for (pattern, budget, why) in BUDGETS {
        let found = hits(&files, pattern);
        if found.len() > *budget {
            failures.push(format!(
                "`{pattern}` ({why}): found {}, max {budget}\n{}",
                found.len(),
                found.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}
