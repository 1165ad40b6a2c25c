//! Run configuration

use crate::{Error, Result};
use std::fmt;

pub const DEFAULT_PROJECT_KEY: &str = "SCRUM";
pub const DEFAULT_STORY_KEY: &str = "SCRUM-1";
pub const DEFAULT_TEST_ISSUE_TYPE: &str = "Test";
pub const DEFAULT_LINK_TYPE: &str = "Relates";
pub const DEFAULT_AC_FIELD: &str = "customfield_10059";
pub const DEFAULT_LABELS: &[&str] = &["autogen", "storyqa"];

// Canonical name first, then names used by older scripts.
const BASE_URL_VARS: &[&str] = &["JIRA_BASE_URL", "JIRA_BASE"];
pub const EMAIL_VARS: &[&str] = &["JIRA_EMAIL"];
pub const TOKEN_VARS: &[&str] = &["JIRA_API_TOKEN", "JIRA_TOKEN"];
const PROJECT_VARS: &[&str] = &["JIRA_PROJECT_KEY"];
const STORY_VARS: &[&str] = &["STORY_KEY"];
const TEST_TYPE_VARS: &[&str] = &["TEST_ISSUE_TYPE", "TEST_ISSUETYPE_NAME"];
const LINK_TYPE_VARS: &[&str] = &["ISSUE_LINK_TYPE", "LINK_TYPE_NAME"];
const LINK_DIRECTION_VARS: &[&str] = &["ISSUE_LINK_DIRECTION"];
const AC_FIELD_VARS: &[&str] = &["AC_FIELD_ID", "AC_FIELD"];
const LABEL_VARS: &[&str] = &["TEST_LABELS"];
const GENERATOR_URL_VARS: &[&str] = &["TESTGEN_BASE_URL", "CODEX_BASE"];
const GENERATOR_KEY_VARS: &[&str] = &["TESTGEN_API_KEY", "CODEX_API_KEY"];

/// Tracker account identity and API token
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub api_token: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            api_token: api_token.into(),
        }
    }

    /// Token shortened for log output
    pub fn masked_token(&self) -> String {
        mask(&self.api_token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_token", &self.masked_token())
            .finish()
    }
}

/// External test-generation service
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub api_key: String,
}

impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &mask(&self.api_key))
            .finish()
    }
}

/// Which side of the link the story sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkDirection {
    #[default]
    Inward,
    Outward,
}

impl LinkDirection {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inward" => Ok(LinkDirection::Inward),
            "outward" => Ok(LinkDirection::Outward),
            other => Err(Error::Validation(format!(
                "Invalid link direction '{}'. Must be one of: inward, outward",
                other
            ))),
        }
    }

    /// Returns `(inward, outward)` issue keys for a story/test pair.
    pub fn endpoints<'a>(&self, story_key: &'a str, test_key: &'a str) -> (&'a str, &'a str) {
        match self {
            LinkDirection::Inward => (story_key, test_key),
            LinkDirection::Outward => (test_key, story_key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub credentials: Credentials,
    pub project_key: String,
    pub story_key: String,
    pub test_issue_type: String,
    pub link_type: String,
    pub link_direction: LinkDirection,
    pub ac_field_id: String,
    pub labels: Vec<String>,
    pub generator: Option<GeneratorConfig>,
}

impl Config {
    /// Build a configuration from a variable lookup such as `std::env::var`.
    ///
    /// Every missing required variable is reported in a single error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = first_set(&lookup, BASE_URL_VARS);
        let email = first_set(&lookup, EMAIL_VARS);
        let api_token = first_set(&lookup, TOKEN_VARS);

        let missing: Vec<String> = [
            (BASE_URL_VARS[0], base_url.is_none()),
            (EMAIL_VARS[0], email.is_none()),
            (TOKEN_VARS[0], api_token.is_none()),
        ]
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| name.to_string())
        .collect();

        let (Some(base_url), Some(email), Some(api_token)) = (base_url, email, api_token) else {
            return Err(Error::MissingConfig(missing));
        };

        let link_direction = match first_set(&lookup, LINK_DIRECTION_VARS) {
            Some(value) => LinkDirection::parse(&value)?,
            None => LinkDirection::default(),
        };

        let labels = match first_set(&lookup, LABEL_VARS) {
            Some(value) => parse_labels(&value),
            None => DEFAULT_LABELS.iter().map(|l| l.to_string()).collect(),
        };

        let generator = match (
            first_set(&lookup, GENERATOR_URL_VARS),
            first_set(&lookup, GENERATOR_KEY_VARS),
        ) {
            (Some(url), Some(key)) => Some(GeneratorConfig {
                base_url: url.trim_end_matches('/').to_string(),
                api_key: key,
            }),
            (Some(_), None) | (None, Some(_)) => {
                tracing::warn!(
                    "Test generation service needs both {} and {}; using local fallback only",
                    GENERATOR_URL_VARS[0],
                    GENERATOR_KEY_VARS[0]
                );
                None
            }
            (None, None) => None,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: Credentials::new(email, api_token),
            project_key: first_set(&lookup, PROJECT_VARS)
                .unwrap_or_else(|| DEFAULT_PROJECT_KEY.to_string()),
            story_key: first_set(&lookup, STORY_VARS)
                .unwrap_or_else(|| DEFAULT_STORY_KEY.to_string()),
            test_issue_type: first_set(&lookup, TEST_TYPE_VARS)
                .unwrap_or_else(|| DEFAULT_TEST_ISSUE_TYPE.to_string()),
            link_type: first_set(&lookup, LINK_TYPE_VARS)
                .unwrap_or_else(|| DEFAULT_LINK_TYPE.to_string()),
            link_direction,
            ac_field_id: first_set(&lookup, AC_FIELD_VARS)
                .unwrap_or_else(|| DEFAULT_AC_FIELD.to_string()),
            labels,
            generator,
        })
    }

    /// Replace the story key, e.g. from a command-line flag
    pub fn with_story_key(mut self, story_key: impl Into<String>) -> Self {
        self.story_key = story_key.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !is_http_url(&self.base_url) {
            return Err(Error::Validation(format!(
                "Base URL must start with http:// or https:// (got '{}')",
                self.base_url
            )));
        }

        if self.project_key.trim().is_empty() {
            return Err(Error::Validation("Project key must be set".to_string()));
        }

        if !is_issue_key(&self.story_key) {
            return Err(Error::Validation(format!(
                "Invalid story key '{}'. Expected something like SCRUM-1",
                self.story_key
            )));
        }

        if self.test_issue_type.trim().is_empty() {
            return Err(Error::Validation(
                "Test issue type cannot be empty".to_string(),
            ));
        }

        if self.link_type.trim().is_empty() {
            return Err(Error::Validation("Link type cannot be empty".to_string()));
        }

        if self.ac_field_id.trim().is_empty() {
            return Err(Error::Validation(
                "Acceptance criteria field id cannot be empty".to_string(),
            ));
        }

        if let Some(ref generator) = self.generator {
            if !is_http_url(&generator.base_url) {
                return Err(Error::Validation(
                    "Test generation URL must start with http:// or https://".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn first_set<F>(lookup: &F, names: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn parse_labels(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn mask(secret: &str) -> String {
    if secret.chars().count() > 4 {
        let head: String = secret.chars().take(4).collect();
        format!("{}…", head)
    } else {
        "***".to_string()
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// `PROJECT-123` shaped issue keys
pub fn is_issue_key(key: &str) -> bool {
    let Some((project, number)) = key.rsplit_once('-') else {
        return false;
    };

    let mut chars = project.chars();
    let starts_upper = chars.next().is_some_and(|c| c.is_ascii_uppercase());

    starts_upper
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("JIRA_BASE_URL", "https://example.atlassian.net/"),
            ("JIRA_EMAIL", "qa@example.com"),
            ("JIRA_API_TOKEN", "secret-token"),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&required())).unwrap();
        assert_eq!(config.base_url, "https://example.atlassian.net");
        assert_eq!(config.project_key, "SCRUM");
        assert_eq!(config.story_key, "SCRUM-1");
        assert_eq!(config.test_issue_type, "Test");
        assert_eq!(config.link_type, "Relates");
        assert_eq!(config.link_direction, LinkDirection::Inward);
        assert_eq!(config.ac_field_id, "customfield_10059");
        assert_eq!(config.labels, vec!["autogen", "storyqa"]);
        assert!(config.generator.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_required_reported_together() {
        let lookup = lookup_from(&[("JIRA_EMAIL", "qa@example.com")]);
        let err = Config::from_lookup(lookup).unwrap_err();
        match err {
            Error::MissingConfig(names) => {
                assert_eq!(names, vec!["JIRA_BASE_URL", "JIRA_API_TOKEN"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let mut vars = required();
        vars[2] = ("JIRA_API_TOKEN", "   ");
        match Config::from_lookup(lookup_from(&vars)).unwrap_err() {
            Error::MissingConfig(names) => assert_eq!(names, vec!["JIRA_API_TOKEN"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_legacy_aliases() {
        let lookup = lookup_from(&[
            ("JIRA_BASE", "https://legacy.example.com"),
            ("JIRA_EMAIL", "qa@example.com"),
            ("JIRA_TOKEN", "tok"),
            ("AC_FIELD", "customfield_20000"),
            ("TEST_ISSUETYPE_NAME", "Xray Test"),
            ("LINK_TYPE_NAME", "Tests"),
            ("CODEX_BASE", "https://gen.example.com/"),
            ("CODEX_API_KEY", "gen-key"),
        ]);
        let config = Config::from_lookup(lookup).unwrap();

        assert_eq!(config.base_url, "https://legacy.example.com");
        assert_eq!(config.ac_field_id, "customfield_20000");
        assert_eq!(config.test_issue_type, "Xray Test");
        assert_eq!(config.link_type, "Tests");
        let generator = config.generator.unwrap();
        assert_eq!(generator.base_url, "https://gen.example.com");
        assert_eq!(generator.api_key, "gen-key");
    }

    #[test]
    fn test_canonical_name_wins_over_alias() {
        let mut vars = required();
        vars.push(("ISSUE_LINK_TYPE", "Relates"));
        vars.push(("LINK_TYPE_NAME", "Tests"));
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.link_type, "Relates");
    }

    #[test]
    fn test_generator_needs_both_values() {
        let mut vars = required();
        vars.push(("TESTGEN_BASE_URL", "https://gen.example.com"));
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert!(config.generator.is_none());
    }

    #[test]
    fn test_labels_and_direction() {
        let mut vars = required();
        vars.push(("TEST_LABELS", "qa, , regression "));
        vars.push(("ISSUE_LINK_DIRECTION", "Outward"));
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.labels, vec!["qa", "regression"]);
        assert_eq!(config.link_direction, LinkDirection::Outward);

        let mut vars = required();
        vars.push(("ISSUE_LINK_DIRECTION", "sideways"));
        assert!(Config::from_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn test_validation() {
        let mut config = Config::from_lookup(lookup_from(&required())).unwrap();

        config.base_url = "example.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://example.com".to_string();
        config.story_key = "scrum1".to_string();
        assert!(config.validate().is_err());

        config = config.with_story_key("QA_TEAM-42");
        assert!(config.validate().is_ok());

        config.link_type = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_issue_key_shape() {
        assert!(is_issue_key("SCRUM-1"));
        assert!(is_issue_key("AB2-1234"));
        assert!(!is_issue_key("SCRUM-"));
        assert!(!is_issue_key("-12"));
        assert!(!is_issue_key("scrum-1"));
        assert!(!is_issue_key("SCRUM-1a"));
    }

    #[test]
    fn test_debug_masks_secrets() {
        let credentials = Credentials::new("qa@example.com", "abcdefgh");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("abcd…"));
        assert!(!debug.contains("abcdefgh"));
        assert_eq!(Credentials::new("a", "abc").masked_token(), "***");
    }

    #[test]
    fn test_link_endpoints() {
        assert_eq!(
            LinkDirection::Inward.endpoints("SCRUM-1", "SCRUM-9"),
            ("SCRUM-1", "SCRUM-9")
        );
        assert_eq!(
            LinkDirection::Outward.endpoints("SCRUM-1", "SCRUM-9"),
            ("SCRUM-9", "SCRUM-1")
        );
    }
}
