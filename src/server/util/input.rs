//! Request input that may arrive as a JSON body or as query/form fields.
//!
//! Payment gateways post back in whatever shape they like, so `Input` accepts both and
//! lets callers look fields up without caring whether the sender used `first-name` or
//! `first_name`.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::server::error::AppError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Input {
    data: Map<String, Value>,
}

impl Input {
    /// Builds input from the raw request parts.
    ///
    /// A non-empty body that is a JSON object is decoded as JSON, whether or not the
    /// sender declared a JSON content type. A body declared form-encoded is never tried as
    /// JSON. Otherwise the query string and a form-encoded body are merged, body fields
    /// winning.
    ///
    /// # Returns
    /// - `Ok(Input)` - Parsed fields
    /// - `Err(AppError::BadRequest)` - Body declared as JSON that is not a valid JSON object
    pub fn parse(
        content_type: Option<&str>,
        query: Option<&str>,
        body: &[u8],
    ) -> Result<Self, AppError> {
        let declared = |mime: &str| {
            content_type
                .map(|ct| ct.trim_start().starts_with(mime))
                .unwrap_or(false)
        };
        let is_json = declared("application/json");
        let is_form = declared("application/x-www-form-urlencoded");

        if !body.is_empty() && !is_form {
            match serde_json::from_slice::<Value>(body) {
                Ok(Value::Object(data)) => return Ok(Self { data }),
                _ if is_json => {
                    return Err(AppError::BadRequest(format!(
                        "Invalid JSON input '{}'",
                        String::from_utf8_lossy(body)
                    )))
                }
                _ => {}
            }
        }

        let mut data = Map::new();
        if let Some(query) = query {
            extend_form(&mut data, query.as_bytes());
        }
        if !body.is_empty() {
            extend_form(&mut data, body);
        }

        Ok(Self { data })
    }

    /// Wraps an already decoded JSON object.
    pub fn from_map(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Looks up a field by exact name, then ignoring dash vs underscore.
    ///
    /// Scalars are returned in their string form; nulls count as absent.
    pub fn get(&self, field: &str) -> Option<String> {
        self.find(field).and_then(value_to_string)
    }

    pub fn has(&self, field: &str) -> bool {
        self.find(field).is_some()
    }

    /// Decodes the whole input into a typed body.
    ///
    /// # Returns
    /// - `Ok(T)` - Decoded body
    /// - `Err(AppError::BadRequest)` - Fields missing or of the wrong type
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        serde_json::from_value(Value::Object(self.data.clone()))
            .map_err(|e| AppError::BadRequest(format!("Invalid input: {}", e)))
    }

    fn find(&self, field: &str) -> Option<&Value> {
        if let Some(value) = self.data.get(field) {
            return Some(value);
        }

        let wanted = normalize(field);
        self.data
            .iter()
            .find(|(key, _)| normalize(key) == wanted)
            .map(|(_, value)| value)
    }
}

impl<S> FromRequest<S> for Input
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let query = req.uri().query().map(str::to_owned);

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {}", e)))?;

        Self::parse(content_type.as_deref(), query.as_deref(), &body)
    }
}

fn normalize(field: &str) -> String {
    field.replace('-', "_")
}

fn extend_form(data: &mut Map<String, Value>, raw: &[u8]) {
    for (key, value) in url::form_urlencoded::parse(raw) {
        data.insert(key.into_owned(), Value::String(value.into_owned()));
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
