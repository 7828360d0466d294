use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct CreateRecordDto {
    pub descriptor: String,
    #[serde(alias = "content_type")]
    pub content_type: String,
    pub data: String,
    /// `private` (default) or `public`
    pub acl: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateRecordDto {
    #[serde(alias = "content_type")]
    pub content_type: String,
    pub data: String,
    /// Left unchanged when omitted.
    pub acl: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RecordDto {
    pub descriptor: String,
    pub content_type: String,
    pub data: String,
    pub acl: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Single record lookup result; `data` is null when the record does not exist.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct RecordDataDto {
    pub data: Option<RecordDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct DescriptorCatalogDto {
    pub data: Vec<String>,
}

/// One user's value for a descriptor in a value catalog.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RecordValueDto {
    pub user: String,
    pub data: String,
    /// Only present when the catalog was requested with `all`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordDto>,
}

/// Query parameters of the record endpoints.
#[derive(Serialize, Deserialize, IntoParams, Debug, Clone, Default)]
#[into_params(parameter_in = Query)]
pub struct RecordQueryDto {
    /// Email of the record owner, for public reads and convention access.
    pub user: Option<String>,
    /// Request the value catalog of the descriptor.
    pub list: Option<String>,
    /// Include record metadata in the value catalog.
    pub all: Option<String>,
}

impl RecordQueryDto {
    /// `?list` and `?list=1` enable listing; `?list=0` and `?list=false` do not.
    pub fn wants_list(&self) -> bool {
        is_flag_set(self.list.as_deref())
    }

    pub fn wants_all(&self) -> bool {
        is_flag_set(self.all.as_deref())
    }
}

fn is_flag_set(value: Option<&str>) -> bool {
    matches!(value, Some(v) if v != "0" && !v.eq_ignore_ascii_case("false"))
}
