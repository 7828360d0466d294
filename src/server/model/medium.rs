//! Event-scoped media items.

use chrono::{DateTime, Utc};

const EXTERNAL_PREFIX: &str = "application/x-";

/// Where the bytes of a medium live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediumSource {
    /// Stored by the application; holds the MIME type.
    Stored(String),
    /// Hosted by an external service such as `youtube`.
    External(String),
}

impl MediumSource {
    /// Classifies a content type.
    ///
    /// `application/x-<service>` marks an external reference. Anything else, including a
    /// bare `application/x-`, is a stored MIME type.
    pub fn from_content_type(content_type: &str) -> Self {
        match content_type.strip_prefix(EXTERNAL_PREFIX) {
            Some(service) if !service.is_empty() => Self::External(service.to_string()),
            _ => Self::Stored(content_type.to_string()),
        }
    }

    pub fn content_type(&self) -> String {
        match self {
            Self::Stored(mime) => mime.clone(),
            Self::External(service) => format!("{}{}", EXTERNAL_PREFIX, service),
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Medium {
    pub id: i32,
    pub event_id: i32,
    pub user_id: Option<i32>,
    pub title: String,
    pub filename: Option<String>,
    pub source: MediumSource,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Medium {
    pub fn from_entity(entity: entity::medium::Model) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            user_id: entity.user_id,
            title: entity.title,
            filename: entity.filename,
            source: MediumSource::from_content_type(&entity.content_type),
            url: entity.url,
            thumbnail_url: entity.thumbnail_url,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMediumParams {
    pub event_id: i32,
    pub user_id: Option<i32>,
    pub title: String,
    pub filename: Option<String>,
    pub source: MediumSource,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
}
