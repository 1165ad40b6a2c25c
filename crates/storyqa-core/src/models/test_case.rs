//! Test case data model

pub const MAX_TITLE_CHARS: usize = 255;
pub const DEFAULT_PRECONDITIONS: &str = "As per story";
pub const DEFAULT_STEP: &str = "Execute main flow";
pub const DEFAULT_EXPECTED: &str = "Meets acceptance criteria";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub title: String,
    pub preconditions: String,
    pub steps: Vec<String>,
    pub expected: Vec<String>,
}

impl TestCase {
    /// Create a test case, filling in defaults for anything left empty.
    ///
    /// The title is cut to 255 characters and `steps`/`expected` always hold
    /// at least one entry.
    pub fn new(
        title: impl Into<String>,
        preconditions: Option<String>,
        steps: Vec<String>,
        expected: Vec<String>,
    ) -> Self {
        let title: String = title.into().chars().take(MAX_TITLE_CHARS).collect();

        let preconditions = preconditions
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PRECONDITIONS.to_string());

        let steps = if steps.is_empty() {
            vec![DEFAULT_STEP.to_string()]
        } else {
            steps
        };

        let expected = if expected.is_empty() {
            vec![DEFAULT_EXPECTED.to_string()]
        } else {
            expected
        };

        Self {
            title,
            preconditions,
            steps,
            expected,
        }
    }

    /// Baseline case used when a story has no usable acceptance criteria
    pub fn happy_path(summary: &str) -> Self {
        Self::new(
            format!("{} – Happy path", summary),
            None,
            Vec::new(),
            Vec::new(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_filled() {
        let tc = TestCase::new("Login", None, Vec::new(), Vec::new());
        assert_eq!(tc.preconditions, "As per story");
        assert_eq!(tc.steps, vec!["Execute main flow"]);
        assert_eq!(tc.expected, vec!["Meets acceptance criteria"]);
    }

    #[test]
    fn test_blank_preconditions_defaulted() {
        let blank = Some("  ".to_string());
        let tc = TestCase::new("Login", blank, vec!["a".into()], vec!["b".into()]);
        assert_eq!(tc.preconditions, "As per story");
        assert_eq!(tc.steps, vec!["a"]);
        assert_eq!(tc.expected, vec!["b"]);
    }

    #[test]
    fn test_title_truncated_on_char_boundary() {
        let long = "é".repeat(300);
        let tc = TestCase::new(long, None, Vec::new(), Vec::new());
        assert_eq!(tc.title.chars().count(), 255);

        let short = TestCase::new("short", None, Vec::new(), Vec::new());
        assert_eq!(short.title, "short");
    }

    #[test]
    fn test_happy_path() {
        let tc = TestCase::happy_path("Checkout");
        assert_eq!(tc.title, "Checkout – Happy path");
        assert_eq!(tc.steps, vec!["Execute main flow"]);
        assert_eq!(tc.expected, vec!["Meets acceptance criteria"]);
    }
}
