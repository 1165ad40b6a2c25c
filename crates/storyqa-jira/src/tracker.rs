//! Issue tracker abstraction

use crate::{Issue, IssueLink, NewIssue, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Operations the test generator needs from an issue tracker.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetch an issue restricted to the given field ids.
    async fn get_issue(&self, key: &str, fields: &[String]) -> Result<Issue>;

    /// Create an issue and return its key.
    async fn create_issue(&self, issue: &NewIssue) -> Result<String>;

    async fn link_issues(&self, link: &IssueLink) -> Result<()>;

    /// Add a comment whose body is an ADF document.
    async fn add_comment(&self, issue_key: &str, body: &Value) -> Result<()>;
}
