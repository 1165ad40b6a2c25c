//! End-to-end run for one story

use std::path::PathBuf;

use storyqa_core::{
    models::{fingerprint, AcField, Config, RunMode, TestCase},
    storage::ArtifactStorage,
};
use storyqa_jira::IssueTracker;

use crate::generator::{SynthesisSource, Synthesizer};
use crate::publish::{CommentOutcome, PublishError, Publisher, RunSummary, Story};

/// Story fields requested besides the acceptance-criteria field
const STORY_FIELDS: &[&str] = &[
    "summary",
    "description",
    "labels",
    "priority",
    "project",
    "status",
];

/// Run error
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Failed to fetch story {key}: {source}")]
    Fetch {
        key: String,
        source: storyqa_jira::Error,
    },

    #[error("Failed to write test files: {0}")]
    Write(#[source] storyqa_core::Error),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

pub type Result<T> = std::result::Result<T, RunError>;

/// What a run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub story_key: String,
    pub summary: String,
    pub mode: RunMode,
    pub tests: Vec<TestCase>,
    /// `None` in single mode, where no test cases are synthesized
    pub source: Option<SynthesisSource>,
    pub fingerprint: String,
    pub written: Vec<PathBuf>,
    pub created: Vec<String>,
    /// Outcome of the trailing comment; never turns a run into a failure
    pub comment: Option<CommentOutcome>,
}

pub struct Pipeline<'a> {
    config: &'a Config,
    tracker: &'a dyn IssueTracker,
    synthesizer: &'a Synthesizer,
    storage: ArtifactStorage,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        tracker: &'a dyn IssueTracker,
        synthesizer: &'a Synthesizer,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            config,
            tracker,
            synthesizer,
            storage: ArtifactStorage::new(output_dir),
        }
    }

    pub async fn run(&self, mode: RunMode) -> Result<RunReport> {
        let story_key = self.config.story_key.as_str();
        let ac_field_id = self.config.ac_field_id.as_str();

        let fields: Vec<String> = STORY_FIELDS
            .iter()
            .copied()
            .chain(std::iter::once(ac_field_id))
            .map(str::to_string)
            .collect();

        tracing::info!("Fetching story {}", story_key);
        let issue = self
            .tracker
            .get_issue(story_key, &fields)
            .await
            .map_err(|source| RunError::Fetch {
                key: story_key.to_string(),
                source,
            })?;

        let story = Story::from_issue(story_key, &issue, self.config);
        let ac_field = AcField::from_value(issue.field(ac_field_id));
        let mut ac_text = ac_field.text();

        if ac_text.is_empty() {
            tracing::warn!(
                "No acceptance criteria in {} for {}",
                ac_field_id,
                story_key
            );
            ac_text = AcField::from_value(issue.description()).text();
            if !ac_text.is_empty() {
                tracing::info!("Using story description as acceptance criteria");
            }
        }

        let hash = fingerprint(&story.summary, &ac_text, &story.project_key);
        let publisher = Publisher::new(self.tracker, self.config);

        if mode == RunMode::Single {
            let text = if ac_text.is_empty() {
                ac_field.normalize(ac_field_id)
            } else {
                ac_text
            };
            let key = publisher.publish_single(&story, &text).await?;
            return Ok(RunReport {
                story_key: story.key,
                summary: story.summary,
                mode,
                tests: Vec::new(),
                source: None,
                fingerprint: hash,
                written: Vec::new(),
                created: vec![key],
                comment: None,
            });
        }

        let synthesis = self.synthesizer.synthesize(&story.summary, &ac_text).await;
        tracing::info!(
            "Synthesized {} test case(s) ({})",
            synthesis.tests.len(),
            synthesis.source.as_str()
        );

        let written = if mode.writes_files() {
            let written = self
                .storage
                .write(story_key, &synthesis.tests)
                .map_err(RunError::Write)?;
            tracing::info!(
                "Wrote {} file(s) to {}",
                written.len(),
                self.storage.issue_dir(story_key).display()
            );
            written
        } else {
            Vec::new()
        };

        let created = if mode.creates_issues() {
            publisher.publish(&story, &synthesis.tests).await?
        } else {
            Vec::new()
        };

        let summary = RunSummary {
            count: synthesis.tests.len(),
            mode,
            fingerprint: &hash,
            created: &created,
        };
        let comment = publisher.post_summary(story_key, &summary).await;

        Ok(RunReport {
            story_key: story.key,
            summary: story.summary,
            mode,
            tests: synthesis.tests,
            source: Some(synthesis.source),
            fingerprint: hash,
            written,
            created,
            comment: Some(comment),
        })
    }
}
