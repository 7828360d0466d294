//! Environment-based application configuration.
//!
//! Authentication providers are declared with `AUTH_PROVIDERS=google,facebook` followed by
//! one group of `AUTH_<NAME>_*` variables per provider:
//!
//! | variable | meaning |
//! |---|---|
//! | `AUTH_<NAME>_TYPE` | `OpenIDConnect` or `OAuth2` |
//! | `AUTH_<NAME>_CLIENT` | `<client id>:<client secret>` |
//! | `AUTH_<NAME>_ENDPOINT` | issuer base URL (OpenIDConnect only) |
//! | `AUTH_<NAME>_AUTH_URL`, `_TOKEN_URL`, `_USERINFO_URL` | explicit URLs (OAuth2 only) |
//! | `AUTH_<NAME>_SCOPES` | optional, comma or space separated |
//! | `AUTH_<NAME>_DISPLAY_NAME`, `AUTH_<NAME>_BUTTON` | optional presentation hints |

use std::fmt;

use crate::server::error::config::ConfigError;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_PELEPAY_URL: &str = "https://www.pelepay.co.il/Pay/paypage.aspx";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    /// Public base URL, used to build callback URLs.
    pub app_url: String,
    pub bind_address: String,

    pub pelepay_business: String,
    pub pelepay_url: String,

    pub auth_providers: Vec<ProviderConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenIdConnect,
    OAuth2,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenIdConnect => "OpenIDConnect",
            Self::OAuth2 => "OAuth2",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configured authentication provider with its endpoint URLs resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    /// Lowercase identifier used in requests and the session.
    pub name: String,
    pub kind: ProviderKind,
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub scopes: Vec<String>,
    pub display_name: String,
    pub button: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset or empty
    /// - `Err(ConfigError::InvalidEnvVar)` - A variable has an unusable value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let auth_providers = match env.optional("AUTH_PROVIDERS") {
            Some(list) => split_list(&list)
                .into_iter()
                .map(|name| env.provider(&name.to_lowercase()))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            database_url: env.required("DATABASE_URL")?,
            app_url: env.required("APP_URL")?.trim_end_matches('/').to_string(),
            bind_address: env
                .optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            pelepay_business: env.required("PELEPAY_BUSINESS")?,
            pelepay_url: env
                .optional("PELEPAY_URL")
                .unwrap_or_else(|| DEFAULT_PELEPAY_URL.to_string()),
            auth_providers,
        })
    }
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn provider(&self, name: &str) -> Result<ProviderConfig, ConfigError> {
        let prefix = format!("AUTH_{}", name.to_uppercase());
        let var = |suffix: &str| format!("{}_{}", prefix, suffix);

        let type_var = var("TYPE");
        let kind_value = self.required(&type_var)?;
        let kind = match kind_value.as_str() {
            "OpenIDConnect" => ProviderKind::OpenIdConnect,
            "OAuth2" => ProviderKind::OAuth2,
            _ => {
                return Err(ConfigError::InvalidEnvVar {
                    name: type_var,
                    value: kind_value,
                })
            }
        };

        let client_var = var("CLIENT");
        let client = self.required(&client_var)?;
        let Some((client_id, client_secret)) = client.split_once(':') else {
            return Err(ConfigError::InvalidEnvVar {
                name: client_var,
                value: client,
            });
        };

        let (auth_url, token_url, userinfo_url, default_scopes) = match kind {
            ProviderKind::OpenIdConnect => {
                let endpoint = self.required(&var("ENDPOINT"))?;
                let endpoint = endpoint.trim_end_matches('/');
                (
                    format!("{}/authorize", endpoint),
                    format!("{}/token", endpoint),
                    format!("{}/userinfo", endpoint),
                    "openid email profile",
                )
            }
            ProviderKind::OAuth2 => (
                self.required(&var("AUTH_URL"))?,
                self.required(&var("TOKEN_URL"))?,
                self.required(&var("USERINFO_URL"))?,
                "email",
            ),
        };

        let scopes = self
            .optional(&var("SCOPES"))
            .map(|s| split_list(&s))
            .unwrap_or_else(|| split_list(default_scopes));

        Ok(ProviderConfig {
            name: name.to_string(),
            kind,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            auth_url,
            token_url,
            userinfo_url,
            scopes,
            display_name: self
                .optional(&var("DISPLAY_NAME"))
                .unwrap_or_else(|| name.to_string()),
            button: self.optional(&var("BUTTON")),
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
