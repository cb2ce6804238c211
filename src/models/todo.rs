use std::fmt;

use serde::{Deserialize, Serialize};

/// One todo row.
///
/// Timestamps are unix seconds, matching the server's column types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    /// Server-assigned id; `None` until the record has been created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Todo {
    pub fn new(text: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id: None,
            text: text.into(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Marks the todo as done and bumps the update time.
    pub fn complete(&mut self) {
        self.completed = true;
        self.updated_at = chrono::Utc::now().timestamp();
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { "x" } else { " " };
        write!(f, "[{}] {}", mark, self.text)
    }
}
