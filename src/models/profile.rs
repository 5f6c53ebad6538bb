use serde::{Deserialize, Serialize};

/// A GitHub user as returned by `/users/{handle}`.
///
/// Fields are deserialized permissively: anything the service omits stays `None`
/// and unknown fields are ignored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct UserProfile {
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub public_repos: Option<u64>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
}

impl UserProfile {
    /// Handle prefixed with `@`, empty when the service sent no login.
    pub fn handle(&self) -> String {
        self.login
            .as_deref()
            .map(|login| format!("@{}", login))
            .unwrap_or_default()
    }
}
