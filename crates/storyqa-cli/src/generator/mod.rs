//! Test case synthesis: external generation service with local fallback

pub mod client;
pub mod synthesizer;

pub use client::{build_prompt, parse_generated, GenerationClient, GenerationError, TestGenerator};
pub use synthesizer::{Synthesis, SynthesisSource, Synthesizer};
