//! Configuration loading
//!
//! Reads the process environment once at startup. A missing API token may
//! be supplied from the OS keyring instead.

use storyqa_core::{
    models::{
        config::{EMAIL_VARS, TOKEN_VARS},
        Config,
    },
    Error as CoreError, Result as CoreResult,
};

/// Load and validate the configuration from the process environment.
pub fn load(story_key: Option<&str>) -> CoreResult<Config> {
    load_with(|name| std::env::var(name).ok(), keyring_token, story_key)
}

/// Load from arbitrary variable and keyring lookups.
///
/// `story_key`, when given, replaces the configured story.
pub fn load_with<F, K>(lookup: F, keyring: K, story_key: Option<&str>) -> CoreResult<Config>
where
    F: Fn(&str) -> Option<String>,
    K: Fn(&str) -> Option<String>,
{
    let config = match Config::from_lookup(&lookup) {
        Ok(config) => config,
        Err(CoreError::MissingConfig(missing)) if missing.iter().any(|n| n == TOKEN_VARS[0]) => {
            let token = EMAIL_VARS
                .iter()
                .find_map(|name| lookup(name))
                .and_then(|email| keyring(email.trim()));

            let Some(token) = token else {
                return Err(CoreError::MissingConfig(missing));
            };

            tracing::debug!("Using API token from keyring");
            Config::from_lookup(|name| {
                if name == TOKEN_VARS[0] {
                    Some(token.clone())
                } else {
                    lookup(name)
                }
            })?
        }
        Err(e) => return Err(e),
    };

    let config = match story_key {
        Some(key) => config.with_story_key(key.trim()),
        None => config,
    };

    config.validate()?;
    Ok(config)
}

fn keyring_token(email: &str) -> Option<String> {
    match storyqa_jira::auth::token_from_keyring(email) {
        Ok(token) => Some(token),
        Err(e) => {
            tracing::debug!("No keyring token for {}: {}", email, e);
            None
        }
    }
}
