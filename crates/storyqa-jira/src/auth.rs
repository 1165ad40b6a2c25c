//! JIRA authentication

use crate::{Error, Result};

pub const KEYRING_SERVICE: &str = "storyqa";

pub struct JiraAuth {
    email: String,
    api_token: String,
}

impl JiraAuth {
    pub fn new(email: String, api_token: String) -> Self {
        Self { email, api_token }
    }

    pub fn to_basic_auth(&self) -> String {
        use base64::Engine;
        let credentials = format!("{}:{}", self.email, self.api_token);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }
}

impl From<&storyqa_core::models::Credentials> for JiraAuth {
    fn from(credentials: &storyqa_core::models::Credentials) -> Self {
        Self::new(credentials.email.clone(), credentials.api_token.clone())
    }
}

/// Look up an API token stored in the OS keyring for `email`.
pub fn token_from_keyring(email: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, email)?;
    let token = entry.get_password()?;
    if token.trim().is_empty() {
        return Err(Error::Auth(format!(
            "Empty token stored in keyring for {}",
            email
        )));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_header() {
        let auth = JiraAuth::new("qa@example.com".to_string(), "token".to_string());
        // base64("qa@example.com:token")
        assert_eq!(auth.to_basic_auth(), "Basic cWFAZXhhbXBsZS5jb206dG9rZW4=");
    }

    #[test]
    fn test_from_credentials() {
        let credentials = storyqa_core::models::Credentials::new("a@b.c", "t");
        let auth = JiraAuth::from(&credentials);
        assert_eq!(
            auth.to_basic_auth(),
            JiraAuth::new("a@b.c".into(), "t".into()).to_basic_auth()
        );
    }

    #[test]
    fn test_token_from_keyring_reads_stored_secret() {
        let email = "keyring-read@example.com";
        let entry = keyring::Entry::new(KEYRING_SERVICE, email).unwrap();
        if let Err(e) = entry.set_password("stored-token") {
            // No platform credential store in this environment.
            eprintln!("skipping keyring test: {}", e);
            return;
        }

        let token = token_from_keyring(email);
        let _ = entry.delete_credential();
        assert_eq!(token.unwrap(), "stored-token");
    }

    #[test]
    fn test_token_from_keyring_missing_entry() {
        let result = token_from_keyring("keyring-missing@example.com");
        assert!(matches!(result, Err(Error::Keyring(_))));
    }
}
