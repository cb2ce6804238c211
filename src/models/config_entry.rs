use std::fmt;

use serde::{Deserialize, Serialize};

/// One key/value row of application settings stored server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigEntry {
    /// Server-assigned id; `None` until the record has been created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub key: String,
    pub value: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id: None,
            key: key.into(),
            value: value.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the value and bumps the update time.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.updated_at = chrono::Utc::now().timestamp();
    }
}

impl fmt::Display for ConfigEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
