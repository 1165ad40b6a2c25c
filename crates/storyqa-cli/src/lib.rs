//! storyqa
//!
//! Turns a story's acceptance criteria into QA test cases, written as local
//! Markdown/feature files and/or created as linked test issues.

pub mod config;
pub mod generator;
pub mod logging;
pub mod pipeline;
pub mod publish;

pub use generator::{Synthesis, SynthesisSource, Synthesizer, TestGenerator};
pub use pipeline::{Pipeline, RunError, RunReport};
pub use publish::{CommentOutcome, PublishError, Publisher, RunSummary, Story};
