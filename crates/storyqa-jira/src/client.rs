//! JIRA REST client

use crate::{
    auth::JiraAuth,
    tracker::IssueTracker,
    types::{CommentRequest, CreateIssueRequest, CreatedIssue},
    Error, Issue, IssueLink, NewIssue, Result,
};
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde_json::Value;
use std::time::Duration;

const API_PREFIX: &str = "/rest/api/3";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct JiraClient {
    http: Client,
    base_url: String,
    auth_header: String,
}

impl JiraClient {
    pub fn new(base_url: impl Into<String>, auth: JiraAuth) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_header: auth.to_basic_auth(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .header(header::AUTHORIZATION, &self.auth_header)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;
        ensure_success(response, &format!("POST {}", url)).await
    }
}

async fn ensure_success(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(Error::NotFound(format!("{} ({})", context, body)));
    }
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        let message = format!("HTTP {} for {}", status.as_u16(), context);
        return Err(Error::Auth(message));
    }

    Err(Error::Api {
        status: status.as_u16(),
        context: context.to_string(),
        body,
    })
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn get_issue(&self, key: &str, fields: &[String]) -> Result<Issue> {
        let url = self.url(&format!("/issue/{}", key));
        tracing::debug!("GET {} fields={}", url, fields.join(","));

        let mut request = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, &self.auth_header)
            .header(header::ACCEPT, "application/json");
        if !fields.is_empty() {
            request = request.query(&[("fields", fields.join(","))]);
        }

        let context = format!("GET {}", url);
        let response = ensure_success(request.send().await?, &context).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<String> {
        let response = self
            .post_json("/issue", &CreateIssueRequest { fields: issue })
            .await?;
        let created: CreatedIssue = serde_json::from_str(&response.text().await?)?;
        let key = created
            .key
            .ok_or_else(|| Error::MissingField("key".to_string()))?;
        tracing::debug!("Created issue {}", key);
        Ok(key)
    }

    async fn link_issues(&self, link: &IssueLink) -> Result<()> {
        self.post_json("/issueLink", link).await?;
        Ok(())
    }

    async fn add_comment(&self, issue_key: &str, body: &Value) -> Result<()> {
        self.post_json(
            &format!("/issue/{}/comment", issue_key),
            &CommentRequest { body },
        )
        .await?;
        Ok(())
    }
}
