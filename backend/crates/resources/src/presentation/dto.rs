//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::ResourceId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{NewResource, Resource, ResourcePatch};
use crate::error::{ResourceError, ResourceResult};

// ============================================================================
// Create
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateResourceRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub file_name: String,
    pub content_type: Option<String>,
    /// File bytes, standard base64
    pub content: String,
}

impl CreateResourceRequest {
    pub fn into_new_resource(self) -> ResourceResult<NewResource> {
        let content = platform::crypto::from_base64(self.content.trim())
            .map_err(|_| ResourceError::Validation("content must be base64".into()))?;

        Ok(NewResource {
            title: self.title,
            description: self.description,
            category: self.category,
            file_name: self.file_name,
            content_type: self.content_type,
            content,
        })
    }
}

// ============================================================================
// Update
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl From<UpdateResourceRequest> for ResourcePatch {
    fn from(req: UpdateResourceRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            category: req.category,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: ResourceId,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Resource> for ResourceResponse {
    fn from(r: Resource) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            category: r.category,
            file_name: r.file_name,
            content_type: r.content_type,
            size_bytes: r.size_bytes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_decodes_content() {
        let req: CreateResourceRequest = serde_json::from_value(serde_json::json!({
            "title": "Algebra",
            "category": "math",
            "fileName": "algebra.pdf",
            "content": "JVBERi0xLjc="
        }))
        .unwrap();

        let new = req.into_new_resource().unwrap();
        assert_eq!(new.content, b"%PDF-1.7");
        assert_eq!(new.file_name, "algebra.pdf");
        assert!(new.content_type.is_none());
    }

    #[test]
    fn test_create_request_rejects_bad_base64() {
        let req = CreateResourceRequest {
            content: "not base64!".into(),
            ..Default::default()
        };
        assert!(matches!(
            req.into_new_resource(),
            Err(ResourceError::Validation(_))
        ));
    }
}
