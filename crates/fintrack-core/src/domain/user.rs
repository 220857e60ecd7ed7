use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - a profile mirrored from the external identity provider.
///
/// Authentication itself is delegated: the provider issues the bearer token
/// and this record is created lazily on the first `/users/initialize` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Stable subject (`sub`) claim from the identity provider.
    pub subject: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(subject: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            subject,
            email,
            display_name: None,
            photo_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}
