//! Run modes and traceability fingerprint

use crate::{Error, Result};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

const FINGERPRINT_LEN: usize = 12;

/// What a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Local Markdown and feature files only
    #[default]
    Repo,
    /// One tracker issue per test case
    Jira,
    Both,
    /// One aggregate test issue per story
    Single,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Repo => "repo",
            RunMode::Jira => "jira",
            RunMode::Both => "both",
            RunMode::Single => "single",
        }
    }

    pub fn writes_files(&self) -> bool {
        matches!(self, RunMode::Repo | RunMode::Both)
    }

    pub fn creates_issues(&self) -> bool {
        matches!(self, RunMode::Jira | RunMode::Both)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "repo" => Ok(RunMode::Repo),
            "jira" => Ok(RunMode::Jira),
            "both" => Ok(RunMode::Both),
            "single" => Ok(RunMode::Single),
            other => Err(Error::Validation(format!(
                "Invalid mode '{}'. Must be one of: repo, jira, both, single",
                other
            ))),
        }
    }
}

/// Short SHA-256 fingerprint of a story's inputs.
///
/// Written into the summary comment for traceability; nothing rejects a
/// repeated run with the same fingerprint.
pub fn fingerprint(summary: &str, ac_text: &str, project_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(summary.as_bytes());
    hasher.update(ac_text.as_bytes());
    hasher.update(project_key.as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(FINGERPRINT_LEN);
    digest
}
