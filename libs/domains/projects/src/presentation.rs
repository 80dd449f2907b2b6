//! Display helpers for project responses. All functions are pure.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Lifecycle, Project};

/// Date format shown in admin listings
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Font Awesome style and size classes shared by both badges
pub const BADGE_CLASSES: &str = "fa-solid fa-xl";

/// Icon and colour shown for the completion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CompletionBadge {
    /// Font Awesome icon class
    pub icon: &'static str,
    /// Extra classes rendered alongside `icon`
    pub classes: &'static str,
    /// CSS hex colour
    pub color: &'static str,
}

pub fn completion_badge(is_completed: bool) -> CompletionBadge {
    if is_completed {
        CompletionBadge {
            icon: "fa-circle-check",
            classes: BADGE_CLASSES,
            color: "#2b9b1c",
        }
    } else {
        CompletionBadge {
            icon: "fa-circle-xmark",
            classes: BADGE_CLASSES,
            color: "#da1616",
        }
    }
}

pub fn format_date(at: &DateTime<Utc>, format: &str) -> String {
    at.format(format).to_string()
}

/// Public URL of a stored image, or `None` when the project has no image.
pub fn image_url(public_base: &str, reference: Option<&str>) -> Option<String> {
    reference.map(|r| format!("{}/{}", public_base.trim_end_matches('/'), r))
}

/// A project as rendered in every response: the stored fields plus display fields.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub lifecycle: Lifecycle,
    pub image_url: Option<String>,
    /// `created_at` as `dd-mm-YYYY`
    pub created: String,
    /// `updated_at` as `dd-mm-YYYY`
    pub updated: String,
    pub completion: CompletionBadge,
}

impl ProjectView {
    pub fn new(project: Project, public_base: &str) -> Self {
        Self {
            lifecycle: project.lifecycle(),
            image_url: image_url(public_base, project.image.as_deref()),
            created: format_date(&project.created_at, DATE_FORMAT),
            updated: format_date(&project.updated_at, DATE_FORMAT),
            completion: completion_badge(project.is_completed),
            project,
        }
    }
}
