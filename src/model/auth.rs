use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::UserDto;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct AuthProviderDto {
    pub name: String,
    pub display_name: String,
    pub button: Option<String>,
    /// `OpenIDConnect` or `OAuth2`
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct StartAuthDto {
    /// Defaults to `google` when omitted.
    pub provider: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct AuthUrlDto {
    #[serde(rename = "auth-url")]
    pub auth_url: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct VerifyTokenDto {
    pub token: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct AuthTokenDto {
    pub status: bool,
    pub token: String,
    pub user: UserDto,
}
