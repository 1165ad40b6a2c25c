//! Deterministic test-case synthesis from acceptance-criteria lines

use crate::models::TestCase;

pub const AC_EXPECTATION: &str = "Acceptance criterion satisfied";

const BULLET_CHARS: &[char] = &['-', '•', '*', ' '];

/// Split acceptance-criteria text into criteria, one per non-empty line.
///
/// Bullet markers and surrounding whitespace are stripped.
pub fn criteria_lines(ac_text: &str) -> Vec<String> {
    ac_text
        .lines()
        .map(|line| line.trim().trim_matches(BULLET_CHARS).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// One test case per criterion line, or a single happy-path case when no
/// criteria are present. Output order follows the input lines.
pub fn fallback_generate(summary: &str, ac_text: &str) -> Vec<TestCase> {
    let lines = criteria_lines(ac_text);
    if lines.is_empty() {
        return vec![TestCase::happy_path(summary)];
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            TestCase::new(
                format!("{} – AC{}", summary, i + 1),
                None,
                vec![line],
                vec![AC_EXPECTATION.to_string()],
            )
        })
        .collect()
}
