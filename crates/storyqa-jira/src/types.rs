//! JIRA API types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const NO_SUMMARY: &str = "(no summary)";

/// An issue as returned by `GET /rest/api/3/issue/{key}`.
///
/// Fields are kept as raw JSON because the acceptance-criteria field is a
/// site-specific custom field whose shape varies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub key: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Issue {
    pub fn field(&self, id: &str) -> Option<&Value> {
        self.fields.get(id).filter(|v| !v.is_null())
    }

    pub fn summary(&self) -> &str {
        self.field("summary")
            .and_then(Value::as_str)
            .unwrap_or(NO_SUMMARY)
    }

    pub fn project_key(&self) -> Option<&str> {
        self.field("project")?.get("key")?.as_str()
    }

    pub fn priority_name(&self) -> Option<&str> {
        self.field("priority")?.get("name")?.as_str()
    }

    pub fn labels(&self) -> Vec<String> {
        self.field("labels")
            .and_then(Value::as_array)
            .map(|labels| {
                labels
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn description(&self) -> Option<&Value> {
        self.field("description")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRef {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRef {
    pub name: String,
}

/// Fields for `POST /rest/api/3/issue`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewIssue {
    pub project: KeyRef,
    #[serde(rename = "issuetype")]
    pub issue_type: NameRef,
    pub summary: String,
    pub description: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<NameRef>,
}

impl NewIssue {
    pub fn new(
        project_key: impl Into<String>,
        issue_type: impl Into<String>,
        summary: impl Into<String>,
        description: Value,
    ) -> Self {
        Self {
            project: KeyRef {
                key: project_key.into(),
            },
            issue_type: NameRef {
                name: issue_type.into(),
            },
            summary: summary.into(),
            description,
            labels: Vec::new(),
            priority: None,
        }
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_priority(mut self, priority: Option<String>) -> Self {
        self.priority = priority.map(|name| NameRef { name });
        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateIssueRequest<'a> {
    pub fields: &'a NewIssue,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedIssue {
    pub key: Option<String>,
}

/// Body for `POST /rest/api/3/issueLink`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueLink {
    #[serde(rename = "type")]
    pub link_type: NameRef,
    #[serde(rename = "inwardIssue")]
    pub inward_issue: KeyRef,
    #[serde(rename = "outwardIssue")]
    pub outward_issue: KeyRef,
}

impl IssueLink {
    pub fn new(
        link_type: impl Into<String>,
        inward_key: impl Into<String>,
        outward_key: impl Into<String>,
    ) -> Self {
        Self {
            link_type: NameRef {
                name: link_type.into(),
            },
            inward_issue: KeyRef {
                key: inward_key.into(),
            },
            outward_issue: KeyRef {
                key: outward_key.into(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CommentRequest<'a> {
    pub body: &'a Value,
}
