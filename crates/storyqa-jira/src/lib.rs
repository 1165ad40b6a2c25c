//! storyqa JIRA Integration
//!
//! Client library for reading stories and creating, linking and commenting
//! on test issues through the JIRA REST API (v3).

pub mod adf;
pub mod auth;
pub mod client;
pub mod error;
pub mod tracker;
pub mod types;

pub use auth::JiraAuth;
pub use client::JiraClient;
pub use error::{Error, Result};
pub use tracker::IssueTracker;
pub use types::*;
