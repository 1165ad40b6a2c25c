//! Remote artifacts: test issues, links and the summary comment

pub mod publisher;

pub use publisher::{
    story_test_description, CommentOutcome, PublishError, Publisher, RunSummary, Story,
};
