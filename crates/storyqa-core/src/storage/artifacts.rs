//! Generated test artifacts on disk (Markdown + Gherkin feature)

use crate::{models::TestCase, Error, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "tests/generated";

pub struct ArtifactStorage {
    root: PathBuf,
}

impl ArtifactStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn issue_dir(&self, issue_key: &str) -> PathBuf {
        self.root.join(issue_key)
    }

    /// Write one Markdown file per test case and one combined feature file.
    ///
    /// Existing files are overwritten; Markdown files left over from a run
    /// with more test cases are removed. Keys that are not a single path
    /// component are rejected before anything is written.
    pub fn write(&self, issue_key: &str, tests: &[TestCase]) -> Result<Vec<PathBuf>> {
        check_dir_name(issue_key)?;
        let dir = self.issue_dir(issue_key);
        std::fs::create_dir_all(&dir)?;

        let mut written = Vec::with_capacity(tests.len() + 1);

        for (i, test) in tests.iter().enumerate() {
            let path = dir.join(markdown_file_name(i + 1));
            std::fs::write(&path, render_markdown(test))?;
            written.push(path);
        }

        let feature_path = dir.join(format!("{}.feature", issue_key));
        std::fs::write(&feature_path, render_feature(issue_key, tests))?;
        written.push(feature_path);

        self.prune_stale(&dir, tests.len())?;

        tracing::debug!("Wrote {} artifact(s) to {}", written.len(), dir.display());
        Ok(written)
    }

    fn prune_stale(&self, dir: &Path, keep: usize) -> Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(index) = parse_markdown_index(name) {
                if index == 0 || index > keep {
                    tracing::debug!("Removing stale artifact {}", path.display());
                    std::fs::remove_file(&path)?;
                }
            }
        }
        Ok(())
    }
}

fn check_dir_name(issue_key: &str) -> Result<()> {
    if issue_key.is_empty() || issue_key.contains(['/', '\\']) || issue_key.contains("..") {
        return Err(Error::Validation(format!(
            "Issue key '{}' cannot be used as an output directory",
            issue_key
        )));
    }
    Ok(())
}

fn markdown_file_name(index: usize) -> String {
    format!("TC_{:02}.md", index)
}

fn parse_markdown_index(name: &str) -> Option<usize> {
    let digits = name.strip_prefix("TC_")?.strip_suffix(".md")?;
    if digits.len() < 2 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub fn render_markdown(test: &TestCase) -> String {
    let steps = test
        .steps
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n");

    let expected = test
        .expected
        .iter()
        .map(|e| format!("- {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# {}\n\n**Preconditions**\n\n{}\n\n## Steps\n\n{}\n\n## Expected\n\n{}\n",
        test.title, test.preconditions, steps, expected
    )
}

pub fn render_feature(issue_key: &str, tests: &[TestCase]) -> String {
    let mut out = format!("Feature: Generated tests for {}\n", issue_key);

    for test in tests {
        out.push('\n');
        out.push_str(&format!("  Scenario: {}\n", test.title));
        out.push_str(&format!("    Given {}\n", test.preconditions));
        for (i, step) in test.steps.iter().enumerate() {
            let keyword = if i == 0 { "When" } else { "And" };
            out.push_str(&format!("    {} {}\n", keyword, step));
        }
        for expected in &test.expected {
            out.push_str(&format!("    Then {}\n", expected));
        }
    }

    out
}
