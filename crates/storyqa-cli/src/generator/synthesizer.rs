//! Strategy chain for producing test cases

use super::client::{GenerationClient, TestGenerator};
use storyqa_core::{
    models::{Config, TestCase},
    synth::fallback_generate,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisSource {
    Delegated,
    Fallback,
}

impl SynthesisSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SynthesisSource::Delegated => "delegated",
            SynthesisSource::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    pub tests: Vec<TestCase>,
    pub source: SynthesisSource,
}

pub struct Synthesizer {
    generator: Option<Box<dyn TestGenerator>>,
}

impl Synthesizer {
    pub fn new(generator: Option<Box<dyn TestGenerator>>) -> Self {
        Self { generator }
    }

    /// Local fallback only
    pub fn local() -> Self {
        Self::new(None)
    }

    /// Use the generation service when one is configured.
    pub fn from_config(config: &Config) -> Self {
        let Some(ref generator_config) = config.generator else {
            return Self::local();
        };

        match GenerationClient::new(generator_config) {
            Ok(client) => Self::new(Some(Box::new(client))),
            Err(e) => {
                tracing::warn!("Could not build generation client, using fallback: {}", e);
                Self::local()
            }
        }
    }

    /// Produce at least one test case. Generation failures are logged and
    /// fall through to the deterministic local generator.
    pub async fn synthesize(&self, summary: &str, ac_text: &str) -> Synthesis {
        if let Some(ref generator) = self.generator {
            match generator.generate(summary, ac_text).await {
                Ok(tests) if !tests.is_empty() => {
                    tracing::info!("Generation service returned {} test case(s)", tests.len());
                    return Synthesis {
                        tests,
                        source: SynthesisSource::Delegated,
                    };
                }
                Ok(_) => tracing::warn!("Generation service returned nothing; using fallback"),
                Err(e) => tracing::warn!("Test generation failed, using fallback: {}", e),
            }
        }

        let tests = fallback_generate(summary, ac_text);
        tracing::info!("Fallback generated {} test case(s)", tests.len());
        Synthesis {
            tests,
            source: SynthesisSource::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::client::GenerationError;
    use async_trait::async_trait;

    struct Canned(Vec<TestCase>);

    #[async_trait]
    impl TestGenerator for Canned {
        async fn generate(&self, _: &str, _: &str) -> Result<Vec<TestCase>, GenerationError> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    #[async_trait]
    impl TestGenerator for Failing {
        async fn generate(&self, _: &str, _: &str) -> Result<Vec<TestCase>, GenerationError> {
            Err(GenerationError::Malformed("not json".to_string()))
        }
    }

    #[tokio::test]
    async fn test_delegated_result_used() {
        let generated = vec![TestCase::new("Generated", None, Vec::new(), Vec::new())];
        let synthesizer = Synthesizer::new(Some(Box::new(Canned(generated.clone()))));

        let synthesis = synthesizer.synthesize("Login", "- a\n- b").await;
        assert_eq!(synthesis.source, SynthesisSource::Delegated);
        assert_eq!(synthesis.tests, generated);
    }

    #[tokio::test]
    async fn test_failure_falls_back() {
        let synthesizer = Synthesizer::new(Some(Box::new(Failing)));

        let synthesis = synthesizer.synthesize("Login", "- a\n- b").await;
        assert_eq!(synthesis.source, SynthesisSource::Fallback);
        assert_eq!(synthesis.tests.len(), 2);
        assert_eq!(synthesis.tests[1].title, "Login – AC2");
    }

    #[tokio::test]
    async fn test_empty_delegated_result_falls_back() {
        let synthesizer = Synthesizer::new(Some(Box::new(Canned(Vec::new()))));
        let synthesis = synthesizer.synthesize("Login", "").await;
        assert_eq!(synthesis.source, SynthesisSource::Fallback);
        assert_eq!(synthesis.tests[0].title, "Login – Happy path");
    }

    #[tokio::test]
    async fn test_local_only() {
        let synthesis = Synthesizer::local().synthesize("Login", "one").await;
        assert_eq!(synthesis.source, SynthesisSource::Fallback);
        assert_eq!(synthesis.tests[0].steps, vec!["one"]);
    }
}
