//! Dead Code Enforcement
//!
//! Production sources must not silence the dead code lint. Inline test
//! modules and the fakes behind the `test-utils` feature are exempt.

use std::fs;
use std::path::{Path, PathBuf};

/// Crates whose `src/` trees are checked, relative to the workspace root.
const WORKSPACE_CRATES: &[&str] = &[
    "marquee-core",
    "marquee-search",
    "marquee-web",
    "marquee-cli",
];

#[derive(Debug)]
struct DeadCodeViolation {
    file_path: String,
    line_number: usize,
    context: String,
}

#[derive(Default)]
struct DeadCodeChecker {
    violations: Vec<DeadCodeViolation>,
    files_checked: usize,
}

fn collect_rust_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_rust_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
    Ok(())
}

fn is_dead_code_allowance(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("#[allow(") && trimmed.contains("dead_code")
}

impl DeadCodeChecker {
    /// Test-only files compiled out of release builds.
    fn is_test_file(path: &Path) -> bool {
        let name = path.file_name().map(|n| n.to_string_lossy().to_lowercase());
        matches!(name.as_deref(), Some("testing.rs" | "mock.rs"))
            || path.components().any(|c| c.as_os_str() == "tests")
    }

    /// Checks `content`, ignoring everything after the first `#[cfg(test)]`.
    fn check_source(&mut self, file_path: &str, content: &str) {
        self.files_checked += 1;

        for (index, line) in content.lines().enumerate() {
            if line.trim() == "#[cfg(test)]" {
                break;
            }
            if is_dead_code_allowance(line) {
                self.violations.push(DeadCodeViolation {
                    file_path: file_path.to_string(),
                    line_number: index + 1,
                    context: line.trim().to_string(),
                });
            }
        }
    }

    fn check_workspace(&mut self, root: &Path) -> std::io::Result<()> {
        for krate in WORKSPACE_CRATES {
            let mut files = Vec::new();
            collect_rust_files(&root.join(krate).join("src"), &mut files)?;

            for file in files.iter().filter(|f| !Self::is_test_file(f)) {
                let content = fs::read_to_string(file)?;
                self.check_source(&file.to_string_lossy(), &content);
            }
        }
        Ok(())
    }

    fn report(&self) -> bool {
        if self.violations.is_empty() {
            println!(
                "Dead code enforcement: {} files checked, no violations found",
                self.files_checked
            );
            return true;
        }

        for violation in &self.violations {
            println!("{}:{}", violation.file_path, violation.line_number);
            println!("  {}", violation.context);
        }
        println!(
            "Found {} violation(s) in {} file(s) checked. Remove the unused code or use it.",
            self.violations.len(),
            self.files_checked
        );
        false
    }
}

#[test]
fn test_detects_allowance_outside_test_module() {
    let mut checker = DeadCodeChecker::default();
    let source = r#"
#[allow(dead_code)]
struct Unused;

#[allow(clippy::too_many_lines, dead_code)]
fn unused() {}

#[cfg(test)]
mod tests {
    #[allow(dead_code)]
    fn helper() {}
}
"#;

    checker.check_source("lib.rs", source);

    let lines: Vec<_> = checker.violations.iter().map(|v| v.line_number).collect();
    assert_eq!(lines, [2, 5]);
}

#[test]
fn test_is_test_file() {
    assert!(DeadCodeChecker::is_test_file(Path::new(
        "marquee-search/src/testing.rs"
    )));
    assert!(DeadCodeChecker::is_test_file(Path::new(
        "marquee-search/src/providers/mock.rs"
    )));
    assert!(!DeadCodeChecker::is_test_file(Path::new(
        "marquee-search/src/service.rs"
    )));
}

#[test]
fn dead_code_enforcement() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");
    let mut checker = DeadCodeChecker::default();

    checker
        .check_workspace(&root)
        .expect("Failed to check workspace");

    assert!(
        checker.report(),
        "Dead code allowance violations found in production code - see output above"
    );
}
