//! Creates test issues in the tracker and links them to their story

use serde_json::Value;
use std::fmt;
use storyqa_core::models::{Config, RunMode, TestCase};
use storyqa_jira::{adf, Issue, IssueLink, IssueTracker, NewIssue};

pub const SINGLE_TEST_PREFIX: &str = "[Auto-Test]";

/// Story attributes inherited by created test issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub key: String,
    pub summary: String,
    pub project_key: String,
    pub labels: Vec<String>,
    pub priority: Option<String>,
}

impl Story {
    /// Falls back to the configured project when the issue does not carry one.
    pub fn from_issue(key: &str, issue: &Issue, config: &Config) -> Self {
        Self {
            key: key.to_string(),
            summary: issue.summary().to_string(),
            project_key: issue
                .project_key()
                .unwrap_or(config.project_key.as_str())
                .to_string(),
            labels: issue.labels(),
            priority: issue.priority_name().map(str::to_string),
        }
    }
}

/// Issue creation or linking failed part way through.
///
/// Issues created before the failure stay in the tracker.
#[derive(Debug, thiserror::Error)]
#[error("{source} (issues created before the failure: {})", created_list(.created))]
pub struct PublishError {
    pub created: Vec<String>,
    pub source: storyqa_jira::Error,
}

fn created_list(created: &[String]) -> String {
    if created.is_empty() {
        "none".to_string()
    } else {
        created.join(", ")
    }
}

/// Result of the trailing summary comment, which never fails a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentOutcome {
    Posted,
    Failed(String),
}

pub struct Publisher<'a> {
    tracker: &'a dyn IssueTracker,
    config: &'a Config,
}

impl<'a> Publisher<'a> {
    pub fn new(tracker: &'a dyn IssueTracker, config: &'a Config) -> Self {
        Self { tracker, config }
    }

    /// Create and link one test issue per test case, stopping at the first
    /// failure.
    pub async fn publish(
        &self,
        story: &Story,
        tests: &[TestCase],
    ) -> Result<Vec<String>, PublishError> {
        let mut keys = Vec::with_capacity(tests.len());

        for test in tests {
            let description = adf::test_case_doc(test);
            let new_issue = self.new_issue(story, &test.title, description);
            let key = self.create_and_link(story, &new_issue, &mut keys).await?;
            tracing::info!("Created {} and linked to {}", key, story.key);
        }

        Ok(keys)
    }

    /// Create a single aggregate test issue describing the whole story.
    pub async fn publish_single(
        &self,
        story: &Story,
        ac_text: &str,
    ) -> Result<String, PublishError> {
        let description = story_test_description(&story.key, &story.summary, ac_text);
        let new_issue = self.new_issue(
            story,
            &format!("{} Tests for {}", SINGLE_TEST_PREFIX, story.key),
            adf::doc_from_text(&description),
        );

        let mut keys = Vec::with_capacity(1);
        let key = self.create_and_link(story, &new_issue, &mut keys).await?;
        tracing::info!("Created {} and linked to {}", key, story.key);
        Ok(key)
    }

    /// Best-effort comment on the story; failures are only logged.
    pub async fn post_summary(&self, story_key: &str, summary: &RunSummary<'_>) -> CommentOutcome {
        let body = adf::doc_from_text(&summary.to_string());
        match self.tracker.add_comment(story_key, &body).await {
            Ok(()) => CommentOutcome::Posted,
            Err(e) => {
                tracing::warn!("Comment on {} failed: {}", story_key, e);
                CommentOutcome::Failed(e.to_string())
            }
        }
    }

    async fn create_and_link(
        &self,
        story: &Story,
        new_issue: &NewIssue,
        keys: &mut Vec<String>,
    ) -> Result<String, PublishError> {
        let key = self
            .tracker
            .create_issue(new_issue)
            .await
            .map_err(|source| PublishError {
                created: keys.clone(),
                source,
            })?;
        keys.push(key.clone());

        let (inward, outward) = self.config.link_direction.endpoints(&story.key, &key);
        let link = IssueLink::new(&self.config.link_type, inward, outward);
        if let Err(source) = self.tracker.link_issues(&link).await {
            return Err(PublishError {
                created: keys.clone(),
                source,
            });
        }

        Ok(key)
    }

    fn new_issue(&self, story: &Story, summary: &str, description: Value) -> NewIssue {
        NewIssue::new(
            &story.project_key,
            &self.config.test_issue_type,
            summary,
            description,
        )
        .with_labels(merge_labels(&story.labels, &self.config.labels))
        .with_priority(story.priority.clone())
    }
}

fn merge_labels(inherited: &[String], extra: &[String]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::with_capacity(inherited.len() + extra.len());
    for label in inherited.iter().chain(extra) {
        if !labels.contains(label) {
            labels.push(label.clone());
        }
    }
    labels
}

/// Plain-text description for the aggregate test issue
pub fn story_test_description(story_key: &str, summary: &str, ac_text: &str) -> String {
    format!(
        "Generated from story: {} — {}\n\n\
         Acceptance Criteria:\n{}\n\n\
         Suggested Test Steps:\n\
         1. Review AC and define preconditions\n\
         2. Execute steps per AC (Given/When/Then)\n\
         3. Capture actual result & evidence\n\
         4. Mark pass/fail and link defects",
        story_key, summary, ac_text
    )
}

/// What a run produced, as reported in the comment on the story
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary<'a> {
    pub count: usize,
    pub mode: RunMode,
    pub fingerprint: &'a str,
    pub created: &'a [String],
}

impl fmt::Display for RunSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "storyqa: generated {} test(s) (mode={}, hash={}).",
            self.count, self.mode, self.fingerprint
        )?;
        if !self.created.is_empty() {
            write!(f, " Created Jira Tests: {}", self.created.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_labels_dedupes_in_order() {
        let merged = merge_labels(
            &["web".to_string(), "autogen".to_string()],
            &["autogen".to_string(), "storyqa".to_string()],
        );
        assert_eq!(merged, vec!["web", "autogen", "storyqa"]);
    }

    #[test]
    fn test_run_summary_text() {
        let summary = RunSummary {
            count: 2,
            mode: RunMode::Repo,
            fingerprint: "abc123def456",
            created: &[],
        };
        assert_eq!(
            summary.to_string(),
            "storyqa: generated 2 test(s) (mode=repo, hash=abc123def456)."
        );

        let created = vec!["S-2".to_string(), "S-3".to_string()];
        let summary = RunSummary {
            mode: RunMode::Both,
            fingerprint: "h",
            created: &created,
            ..summary
        };
        assert_eq!(
            summary.to_string(),
            "storyqa: generated 2 test(s) (mode=both, hash=h). Created Jira Tests: S-2, S-3"
        );
    }

    #[test]
    fn test_story_test_description() {
        let description = story_test_description("SCRUM-1", "Login", "- works");
        let header = "Generated from story: SCRUM-1 — Login\n\n";
        assert!(description.starts_with(header));
        assert!(description.contains("Acceptance Criteria:\n- works\n\n"));
        assert!(description.ends_with("4. Mark pass/fail and link defects"));
    }

    #[test]
    fn test_publish_error_message() {
        let err = PublishError {
            created: vec!["SCRUM-2".to_string()],
            source: storyqa_jira::Error::NotFound("POST /issueLink".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Not found: POST /issueLink (issues created before the failure: SCRUM-2)"
        );
    }
}
