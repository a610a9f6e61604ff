//! Hygiene: enforces coding standards at test time.
//!
//! Scans the production sources of both crates for panics, silently
//! discarded errors and concerns leaking out of the module that owns them.
//! Each rule has a budget outside its home files. The budget never grows; a
//! new occurrence has to pay for itself by removing an existing one.

use std::fs;
use std::path::Path;

const SOURCE_ROOTS: [&str; 2] = ["src", "cli/src"];

struct Rule {
    pattern: &'static str,
    /// Occurrences allowed outside `home`.
    max: usize,
    /// Files where the pattern is unrestricted.
    home: &'static [&'static str],
}

const RULES: &[Rule] = &[
    // Panics: these crash the process.
    Rule { pattern: ".unwrap()", max: 0, home: &[] },
    Rule { pattern: ".expect(", max: 0, home: &[] },
    Rule { pattern: "panic!(", max: 0, home: &[] },
    Rule { pattern: "unreachable!(", max: 0, home: &[] },
    Rule { pattern: "todo!(", max: 0, home: &[] },
    Rule { pattern: "unimplemented!(", max: 0, home: &[] },
    // Silent loss: discards errors without inspecting.
    Rule { pattern: "let _ =", max: 0, home: &[] },
    // `http.rs`: a non-ASCII Content-Type header is treated as absent.
    Rule { pattern: ".ok()", max: 1, home: &[] },
    Rule { pattern: "#[allow(dead_code)]", max: 0, home: &[] },
    // Ownership: one module per concern.
    Rule { pattern: "reqwest::Client", max: 0, home: &["src/net/http.rs"] },
    Rule { pattern: "gloo_net::", max: 0, home: &["src/net/browser.rs"] },
    Rule { pattern: "web_sys::", max: 0, home: &["src/util/storage.rs"] },
    Rule { pattern: "\"agc_user\"", max: 0, home: &["src/state/session.rs"] },
    Rule { pattern: "\"agc_token\"", max: 0, home: &["src/state/session.rs"] },
    // Output goes through tracing; only the binary writes to stdout.
    Rule { pattern: "println!", max: 0, home: &["cli/src/main.rs"] },
    Rule { pattern: "print!(", max: 0, home: &["cli/src/main.rs"] },
];

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files, excluding unit tests and their shared fixtures.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    for root in SOURCE_ROOTS {
        collect_rs_files(Path::new(root), &mut files);
    }
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
            let path_str = path.to_string_lossy().replace('\\', "/");
            if path_str.ends_with("_test.rs") || path_str.ends_with("test_support.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn hits(files: &[SourceFile], rule: &Rule) -> Vec<(String, usize)> {
    files
        .iter()
        .filter(|file| !rule.home.contains(&file.path.as_str()))
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(rule.pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

#[test]
fn source_budgets() {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found under {SOURCE_ROOTS:?}");

    let mut failures = Vec::new();
    for rule in RULES {
        let hits = hits(&files, rule);
        let count: usize = hits.iter().map(|(_, c)| c).sum();
        if count > rule.max {
            let detail: Vec<String> = hits.iter().map(|(path, c)| format!("    {path}: {c}")).collect();
            failures.push(format!(
                "`{}` budget exceeded: found {count}, max {}\n{}",
                rule.pattern,
                rule.max,
                detail.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}
