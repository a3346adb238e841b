//! Complaint submission form.
//!
//! A [`ComplaintDraft`] holds raw form input. [`ComplaintDraft::validate`]
//! checks every field at once and produces a typed [`NewComplaint`] ready to
//! send, or a [`FormError`] listing everything that needs fixing.

use crate::error::{CoreError, Result};
use crate::types::{Category, Priority};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Field is empty or whitespace
    Required(&'static str),
    /// Category outside the known set
    InvalidCategory(String),
    /// Priority outside the known set
    InvalidPriority(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(field) => write!(f, "{} is required", field),
            Self::InvalidCategory(value) => write!(f, "unknown category '{}'", value),
            Self::InvalidPriority(value) => {
                write!(f, "priority must be LOW, MEDIUM or HIGH (got '{}')", value)
            }
        }
    }
}

/// Validation failure for a whole draft
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid complaint: {}", join_errors(.errors))]
pub struct FormError {
    pub errors: Vec<FieldError>,
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// An image held in memory for preview and upload
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Attachment {
    /// Build an attachment from bytes already in memory.
    ///
    /// The content type is guessed from the file name; only images are
    /// accepted, and the payload must not be empty.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name).first_or_octet_stream();

        if mime.type_() != mime_guess::mime::IMAGE {
            return Err(CoreError::invalid_input(format!(
                "{} is not an image ({})",
                file_name, mime
            )));
        }

        if bytes.is_empty() {
            return Err(CoreError::invalid_input(format!("{} is empty", file_name)));
        }

        Ok(Self {
            file_name,
            content_type: mime.essence_str().to_string(),
            bytes,
        })
    }

    /// Read an image from disk into memory.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("photo")
            .to_string();

        let bytes = tokio::fs::read(path).await?;
        debug!(file = %path.display(), size = bytes.len(), "Read attachment");

        Self::from_bytes(file_name, bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `data:` URL for showing the image before it is submitted
    pub fn preview_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

/// Raw form input, as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub priority: String,
    pub photo: Option<Attachment>,
}

impl Default for ComplaintDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: String::new(),
            location: String::new(),
            priority: Priority::default().as_str().to_string(),
            photo: None,
        }
    }
}

impl ComplaintDraft {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    #[must_use]
    pub fn photo(mut self, photo: Attachment) -> Self {
        self.photo = Some(photo);
        self
    }

    /// Drop the attached photo, if any
    pub fn remove_photo(&mut self) {
        self.photo = None;
    }

    /// Check every field and produce a submittable complaint.
    pub fn validate(&self) -> std::result::Result<NewComplaint, FormError> {
        let mut errors = Vec::new();

        // Errors are reported in form order
        let title = required(&self.title, "title", &mut errors);

        let category = if self.category.trim().is_empty() {
            errors.push(FieldError::Required("category"));
            None
        } else {
            match self.category.parse::<Category>() {
                Ok(category) => Some(category),
                Err(_) => {
                    errors.push(FieldError::InvalidCategory(self.category.clone()));
                    None
                }
            }
        };

        let priority = match self.priority.parse::<Priority>() {
            Ok(priority) => Some(priority),
            Err(_) => {
                errors.push(FieldError::InvalidPriority(self.priority.clone()));
                None
            }
        };

        let location = required(&self.location, "location", &mut errors);
        let description = required(&self.description, "description", &mut errors);

        match (title, description, category, location, priority) {
            (Some(title), Some(description), Some(category), Some(location), Some(priority))
                if errors.is_empty() =>
            {
                Ok(NewComplaint {
                    title,
                    description,
                    category,
                    location,
                    priority,
                    photo: self.photo.clone(),
                })
            }
            _ => Err(FormError { errors }),
        }
    }
}

fn required(value: &str, field: &'static str, errors: &mut Vec<FieldError>) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::Required(field));
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A validated complaint, ready to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: String,
    pub priority: Priority,
    pub photo: Option<Attachment>,
}

impl NewComplaint {
    /// The photo, when one is attached and non-empty
    pub fn attachment(&self) -> Option<&Attachment> {
        self.photo.as_ref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn filled_draft() -> ComplaintDraft {
        ComplaintDraft::new()
            .title("Water Leak")
            .description("Water main leak flooding the sidewalk")
            .category("water")
            .location("Pine Street")
    }

    #[test]
    fn test_valid_draft() {
        let complaint = filled_draft().priority("high").validate().unwrap();
        assert_eq!(complaint.category, Category::Water);
        assert_eq!(complaint.priority, Priority::High);
        assert!(complaint.attachment().is_none());
    }

    #[test]
    fn test_default_priority_is_medium() {
        let complaint = filled_draft().validate().unwrap();
        assert_eq!(complaint.priority, Priority::Medium);
    }

    #[test]
    fn test_values_are_trimmed() {
        let complaint = filled_draft().title("  Water Leak \n").validate().unwrap();
        assert_eq!(complaint.title, "Water Leak");
    }

    #[test]
    fn test_reports_every_missing_field() {
        let err = ComplaintDraft::new().validate().unwrap_err();
        assert_eq!(
            err.errors,
            vec![
                FieldError::Required("title"),
                FieldError::Required("category"),
                FieldError::Required("location"),
                FieldError::Required("description"),
            ]
        );
        assert!(err.to_string().contains("title is required"));
    }

    #[test]
    fn test_rejects_unknown_priority_and_category() {
        let err = filled_draft()
            .category("noise")
            .priority("urgent")
            .validate()
            .unwrap_err();

        assert_eq!(
            err.errors,
            vec![
                FieldError::InvalidCategory("noise".to_string()),
                FieldError::InvalidPriority("urgent".to_string()),
            ]
        );
        assert!(err
            .to_string()
            .starts_with("Invalid complaint: unknown category 'noise'"));
    }

    #[test]
    fn test_attachment_from_bytes() {
        let photo = Attachment::from_bytes("pothole.png", vec![0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(photo.content_type, "image/png");
        assert_eq!(photo.preview_data_url(), "data:image/png;base64,iVBORw==");

        let complaint = filled_draft().photo(photo).validate().unwrap();
        assert!(complaint.attachment().is_some());
    }

    #[test]
    fn test_attachment_rejects_non_images_and_empty_files() {
        assert!(Attachment::from_bytes("notes.txt", b"hello".to_vec()).is_err());
        assert!(Attachment::from_bytes("empty.jpg", Vec::new()).is_err());
    }

    #[test]
    fn test_remove_photo() {
        let photo = Attachment::from_bytes("a.jpg", vec![1, 2, 3]).unwrap();
        let mut draft = filled_draft().photo(photo);
        draft.remove_photo();
        assert!(draft.photo.is_none());
    }

    #[tokio::test]
    async fn test_attachment_from_path() {
        let mut file = tempfile::Builder::new()
            .suffix(".jpg")
            .tempfile()
            .unwrap();
        file.write_all(b"fake jpeg content").unwrap();

        let photo = Attachment::from_path(file.path()).await.unwrap();
        assert_eq!(photo.content_type, "image/jpeg");
        assert_eq!(photo.len(), 17);
        assert!(photo.file_name.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_attachment_from_missing_path() {
        let result = Attachment::from_path(Path::new("/definitely/not/here.png")).await;
        assert!(matches!(result, Err(CoreError::Io(_))));
    }
}
