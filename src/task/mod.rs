//! Task records and their storage backends.
//!
//! # Invariants
//! - `name` and `description` are non-blank and at most 255 characters
//!   (enforced by [`NewTask::validate`])
//! - `id` is assigned by the store and never changes

pub mod store;

use serde::{Deserialize, Serialize};

use crate::validation::{self, TextInput, Violations, MAX_TEXT_LEN};

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// A validated task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    name: String,
    description: String,
}

impl NewTask {
    /// Check both fields and build a task ready for insertion.
    ///
    /// All violations are reported together.
    pub fn validate(name: Option<&str>, description: Option<&str>) -> Result<Self, Violations> {
        Self::from_input(name.into(), description.into())
    }

    /// Like [`validate`](Self::validate), but also reports fields that were
    /// present with a non-string type.
    pub fn from_input(name: TextInput<'_>, description: TextInput<'_>) -> Result<Self, Violations> {
        let mut violations = Violations::new();
        let name = validation::required_text(&mut violations, "name", name, MAX_TEXT_LEN);
        let description =
            validation::required_text(&mut violations, "description", description, MAX_TEXT_LEN);

        match (name, description) {
            (Some(name), Some(description)) if violations.is_empty() => Ok(Self {
                name: name.to_string(),
                description: description.to_string(),
            }),
            _ => Err(violations),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Attach the store-assigned id.
    pub fn into_task(self, id: i64) -> Task {
        Task {
            id,
            name: self.name,
            description: self.description,
        }
    }
}
