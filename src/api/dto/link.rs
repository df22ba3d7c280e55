//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// Body of `POST /api/links`, accepted as JSON or form-encoded.
///
/// Both fields are optional at the wire level so that a missing `url`
/// surfaces as "URL is required" rather than a deserialization failure.
///
/// ```json
/// { "url": "example.com/page", "code": "my-link" }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub code: Option<String>,
}

/// Stored link as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub total_clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            code: link.code,
            target_url: link.target_url,
            total_clicks: link.total_clicks,
            last_clicked_at: link.last_clicked_at,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

/// Body of a successful `DELETE /api/links/{code}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteLinkResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteLinkResponse {
    pub fn deleted() -> Self {
        Self {
            success: true,
            message: "Link deleted successfully".to_string(),
        }
    }
}
