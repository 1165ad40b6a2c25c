//! Atlassian Document Format builders
//!
//! JIRA Cloud v3 expects descriptions and comment bodies as ADF documents.

use serde_json::{json, Value};
use storyqa_core::models::TestCase;

pub fn text(t: &str) -> Value {
    json!({"type": "text", "text": t})
}

pub fn paragraph(t: &str) -> Value {
    json!({"type": "paragraph", "content": [text(t)]})
}

pub fn heading(level: u8, t: &str) -> Value {
    json!({"type": "heading", "attrs": {"level": level}, "content": [text(t)]})
}

fn list(kind: &str, items: &[String]) -> Value {
    let items: Vec<Value> = items
        .iter()
        .map(|item| json!({"type": "listItem", "content": [paragraph(item)]}))
        .collect();
    json!({"type": kind, "content": items})
}

pub fn ordered_list(items: &[String]) -> Value {
    list("orderedList", items)
}

pub fn bullet_list(items: &[String]) -> Value {
    list("bulletList", items)
}

pub fn doc(content: Vec<Value>) -> Value {
    json!({"type": "doc", "version": 1, "content": content})
}

/// One paragraph per non-empty line
pub fn doc_from_text(t: &str) -> Value {
    let content = t
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(paragraph)
        .collect();
    doc(content)
}

/// Test issue description: preconditions, numbered steps, expected results.
pub fn test_case_doc(test: &TestCase) -> Value {
    doc(vec![
        paragraph(&format!("Preconditions: {}", test.preconditions)),
        heading(3, "Steps"),
        ordered_list(&test.steps),
        heading(3, "Expected"),
        bullet_list(&test.expected),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyqa_core::models::acceptance::flatten_document;

    #[test]
    fn test_case_doc_shape() {
        let test = TestCase::new(
            "Login",
            Some("User exists".to_string()),
            vec!["open".to_string(), "submit".to_string()],
            vec!["welcome".to_string()],
        );
        let d = test_case_doc(&test);

        assert_eq!(d["type"], "doc");
        assert_eq!(d["version"], 1);
        let content = d["content"].as_array().unwrap();
        assert_eq!(content.len(), 5);
        assert_eq!(
            content[0]["content"][0]["text"],
            "Preconditions: User exists"
        );
        assert_eq!(content[1]["attrs"]["level"], 3);
        assert_eq!(content[2]["type"], "orderedList");
        assert_eq!(content[2]["content"].as_array().unwrap().len(), 2);
        assert_eq!(content[4]["type"], "bulletList");
        assert_eq!(
            content[4]["content"][0]["content"][0]["content"][0]["text"],
            "welcome"
        );
    }

    #[test]
    fn test_doc_flattens_back_to_text() {
        let test = TestCase::new("t", None, vec!["open".into()], vec!["done".into()]);
        assert_eq!(
            flatten_document(&test_case_doc(&test)).unwrap(),
            "Preconditions: As per story Steps open Expected done"
        );
    }

    #[test]
    fn test_doc_from_text_skips_blank_lines() {
        let d = doc_from_text("first\n\n  \nsecond");
        let content = d["content"].as_array().unwrap();
        assert_eq!(content.len(), 2);
        assert_eq!(content[1]["content"][0]["text"], "second");
    }
}
