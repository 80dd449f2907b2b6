use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Category a project can be filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProjectType {
    pub id: Uuid,
    /// Display name, e.g. `Front-end`
    pub label: String,
}

impl ProjectType {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            label: label.into(),
        }
    }
}
