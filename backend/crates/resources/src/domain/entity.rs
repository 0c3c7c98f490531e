//! Domain Entities
//!
//! Resource metadata plus the rules a title, category, file name and
//! content type must satisfy before anything is stored.

use chrono::{DateTime, Utc};
use kernel::id::ResourceId;

use crate::error::{ResourceError, ResourceResult};

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_CATEGORY_CHARS: usize = 64;
pub const MAX_DESCRIPTION_CHARS: usize = 2000;
pub const MAX_FILE_NAME_CHARS: usize = 255;
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Stored resource metadata; the file bytes live beside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    /// `sub` claim of the admin who uploaded it
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upload request after transport decoding
#[derive(Debug, Clone, Default)]
pub struct NewResource {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

/// Metadata update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ResourcePatch {
    pub title: Option<String>,
    /// An empty string clears the description
    pub description: Option<String>,
    pub category: Option<String>,
}

impl ResourcePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.category.is_none()
    }
}

/// Downloadable file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Resource {
    /// Validate an upload and build its metadata.
    pub fn create(new: &NewResource, uploaded_by: &str, now: DateTime<Utc>) -> ResourceResult<Self> {
        if new.content.is_empty() {
            return Err(ResourceError::Validation("file content is empty".into()));
        }

        Ok(Self {
            id: ResourceId::new(),
            title: required_text("title", &new.title, MAX_TITLE_CHARS)?,
            description: optional_text("description", new.description.as_deref())?,
            category: required_text("category", &new.category, MAX_CATEGORY_CHARS)?,
            file_name: sanitize_file_name(&new.file_name)?,
            content_type: content_type(new.content_type.as_deref())?,
            size_bytes: new.content.len() as i64,
            uploaded_by: uploaded_by.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a metadata patch. Nothing changes if any field is invalid.
    pub fn apply(&mut self, patch: &ResourcePatch, now: DateTime<Utc>) -> ResourceResult<()> {
        if patch.is_empty() {
            return Err(ResourceError::Validation("no fields to update".into()));
        }

        let title = patch
            .title
            .as_deref()
            .map(|t| required_text("title", t, MAX_TITLE_CHARS))
            .transpose()?;
        let category = patch
            .category
            .as_deref()
            .map(|c| required_text("category", c, MAX_CATEGORY_CHARS))
            .transpose()?;
        let description = patch
            .description
            .as_deref()
            .map(|d| optional_text("description", Some(d)))
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(description) = description {
            self.description = description;
        }
        self.updated_at = now;
        Ok(())
    }
}

fn required_text(field: &str, value: &str, max_chars: usize) -> ResourceResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ResourceError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > max_chars {
        return Err(ResourceError::Validation(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(value.to_string())
}

fn optional_text(field: &str, value: Option<&str>) -> ResourceResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.chars().count() > MAX_DESCRIPTION_CHARS => Err(ResourceError::Validation(
            format!("{field} must be at most {MAX_DESCRIPTION_CHARS} characters"),
        )),
        Some(v) => Ok(Some(v.to_string())),
    }
}

/// Keep only the last path component and reject anything that could
/// break out of a quoted `Content-Disposition` filename.
pub fn sanitize_file_name(raw: &str) -> ResourceResult<String> {
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(ResourceError::Validation("file name is required".into()));
    }
    if name.chars().any(|c| c.is_control() || c == '"') {
        return Err(ResourceError::Validation(
            "file name contains invalid characters".into(),
        ));
    }
    if name.chars().count() > MAX_FILE_NAME_CHARS {
        return Err(ResourceError::Validation(format!(
            "file name must be at most {MAX_FILE_NAME_CHARS} characters"
        )));
    }
    Ok(name.to_string())
}

fn content_type(raw: Option<&str>) -> ResourceResult<String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_CONTENT_TYPE.to_string()),
        Some(ct) if ct.contains('/') && ct.is_ascii() && !ct.chars().any(|c| c.is_control()) => {
            Ok(ct.to_ascii_lowercase())
        }
        Some(_) => Err(ResourceError::Validation("content type is invalid".into())),
    }
}
