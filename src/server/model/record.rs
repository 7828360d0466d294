//! Per-user keyed records.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use std::fmt;
use std::str::FromStr;

use crate::model::record::{RecordDto, RecordValueDto};

/// Record visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordAcl {
    #[default]
    Private,
    /// Readable by anyone who knows the owner's email and the descriptor.
    Public,
}

impl RecordAcl {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }
}

impl fmt::Display for RecordAcl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordAcl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Self::Private),
            "public" => Ok(Self::Public),
            other => Err(format!("Invalid ACL '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i32,
    pub convention_id: i32,
    pub user_id: i32,
    pub descriptor: String,
    pub content_type: String,
    pub data: String,
    pub acl: RecordAcl,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(UserRecord)` - Converted model
    /// - `Err(DbErr::Custom)` - Stored ACL is not a known value
    pub fn from_entity(entity: entity::user_record::Model) -> Result<Self, DbErr> {
        let acl = entity.acl.parse().map_err(DbErr::Custom)?;

        Ok(Self {
            id: entity.id,
            convention_id: entity.convention_id,
            user_id: entity.user_id,
            descriptor: entity.descriptor,
            content_type: entity.content_type,
            data: entity.data,
            acl,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn is_public_readable(&self) -> bool {
        self.acl == RecordAcl::Public
    }

    pub fn into_dto(self) -> RecordDto {
        RecordDto {
            descriptor: self.descriptor,
            content_type: self.content_type,
            data: self.data,
            acl: self.acl.to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateRecordParams {
    pub convention_id: i32,
    pub user_id: i32,
    pub descriptor: String,
    pub content_type: String,
    pub data: String,
    pub acl: RecordAcl,
}

#[derive(Debug, Clone)]
pub struct UpdateRecordParams {
    pub content_type: String,
    pub data: String,
    /// Keeps the current ACL when `None`.
    pub acl: Option<RecordAcl>,
}

/// One user's record in a value catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    pub user_email: String,
    pub record: UserRecord,
}

impl RecordValue {
    /// Converts to a DTO, including the record metadata only when `with_metadata` is set.
    pub fn into_dto(self, with_metadata: bool) -> RecordValueDto {
        let data = self.record.data.clone();
        RecordValueDto {
            user: self.user_email,
            data,
            record: with_metadata.then(|| self.record.into_dto()),
        }
    }
}
