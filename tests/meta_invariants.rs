use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn collect_rs_files(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_rs_files(&path, out)?;
            continue;
        }
        if file_type.is_file() && path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
    Ok(())
}

/// Lines of `content` before its `#[cfg(test)]` module.
fn non_test_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != "#[cfg(test)]")
}

#[test]
fn no_panicking_unwraps_in_library_code() {
    let src_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");

    let mut rs_files = Vec::new();
    collect_rs_files(&src_dir, &mut rs_files).expect("should list src/**/*.rs");
    rs_files.sort();
    assert!(!rs_files.is_empty(), "expected rust files under {src_dir:?}");

    let needles = [".unwrap()", ".expect("];
    let mut hits = Vec::new();

    for path in rs_files {
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));

        for (idx, line) in non_test_lines(&content) {
            let code = line.split("//").next().unwrap_or("");
            if needles.iter().any(|needle| code.contains(needle)) {
                hits.push(format!("{}:{}: {}", path.display(), idx + 1, line.trim()));
            }
        }
    }

    assert!(
        hits.is_empty(),
        "library code should propagate errors instead of panicking:\n{}",
        hits.join("\n")
    );
}

#[test]
fn rules_report_through_the_level_aware_context() {
    let rules_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("rules");

    let mut rs_files = Vec::new();
    collect_rs_files(&rules_dir, &mut rs_files).expect("should list src/rules/**/*.rs");

    let mut hits = Vec::new();
    for path in rs_files {
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
        for (idx, line) in non_test_lines(&content) {
            if line.contains("Diagnostic {") {
                hits.push(format!("{}:{}: {}", path.display(), idx + 1, line.trim()));
            }
        }
    }

    assert!(
        hits.is_empty(),
        "rules should report via LintContext instead of building diagnostics:\n{}",
        hits.join("\n")
    );
}
