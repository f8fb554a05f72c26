//! Request dispatcher over the user record service.
//!
//! # Responsibility
//! - Route an inbound method/query/body to one service operation.
//! - Wrap the outcome into a status code plus JSON body envelope.
//!
//! # Invariants
//! - Every service error is rendered as `{"error": "<code/message>"}`.
//! - Dispatch never panics; encoding failures degrade to a fixed 500 body.

use crate::error::UserError;
use crate::service::user_service::UserService;
use crate::store::RecordStore;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_NO_CONTENT: u16 = 204;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_METHOD_NOT_ALLOWED: u16 = 405;
pub const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

const EMAIL_QUERY_KEY: &str = "email";
const NO_CONTENT_BODY: &str = "null";
const FALLBACK_ERROR_BODY: &str = r#"{"error":"failed to encode response"}"#;

/// Inbound request method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    /// Anything else; always answered with 405.
    Other(String),
}

impl FromStr for Method {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.trim().to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            _ => Self::Other(value.trim().to_string()),
        })
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
            Self::Put => f.write_str("PUT"),
            Self::Delete => f.write_str("DELETE"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// Decoded inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub query: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl Request {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            query: BTreeMap::new(),
            body: None,
        }
    }

    /// Sets the `email` query value.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.query.insert(EMAIL_QUERY_KEY.to_string(), email.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the `email` query value, or `""` when absent.
    pub fn email(&self) -> &str {
        self.query
            .get(EMAIL_QUERY_KEY)
            .map_or("", String::as_str)
    }
}

/// Outbound response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl Response {
    fn json(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }

    /// Returns whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<UserError> for ErrorBody {
    fn from(value: UserError) -> Self {
        Self {
            error: Some(value.to_string()),
        }
    }
}

/// Dispatches one request against `service`.
pub fn handle_request<S: RecordStore>(request: &Request, service: &UserService<S>) -> Response {
    let response = match &request.method {
        Method::Get => get_user(request, service),
        Method::Post => create_user(request, service),
        Method::Put => update_user(request, service),
        Method::Delete => delete_user(request, service),
        Method::Other(_) => unhandled_method(),
    };
    info!(
        "event=request module=handlers method={} status_code={}",
        request.method, response.status_code
    );
    response
}

fn get_user<S: RecordStore>(request: &Request, service: &UserService<S>) -> Response {
    let email = request.email();
    if !email.is_empty() {
        return match service.fetch_user(email) {
            Ok(user) if !user.exists() => {
                error_response(STATUS_NOT_FOUND, UserError::UserNotFound)
            }
            Ok(user) => api_response(STATUS_OK, &user),
            Err(err) => error_response(STATUS_INTERNAL_SERVER_ERROR, err),
        };
    }

    match service.fetch_users() {
        Ok(users) => api_response(STATUS_OK, &users),
        Err(err) => error_response(STATUS_INTERNAL_SERVER_ERROR, err),
    }
}

fn create_user<S: RecordStore>(request: &Request, service: &UserService<S>) -> Response {
    match service.create_user(request.body.as_deref().unwrap_or_default()) {
        Ok(user) => api_response(STATUS_CREATED, &user),
        Err(err) => error_response(STATUS_INTERNAL_SERVER_ERROR, err),
    }
}

fn update_user<S: RecordStore>(request: &Request, service: &UserService<S>) -> Response {
    match service.update_user(request.body.as_deref().unwrap_or_default()) {
        Ok(user) => api_response(STATUS_CREATED, &user),
        Err(err) => error_response(STATUS_INTERNAL_SERVER_ERROR, err),
    }
}

fn delete_user<S: RecordStore>(request: &Request, service: &UserService<S>) -> Response {
    match service.delete_user(request.email()) {
        Ok(()) => Response::json(STATUS_NO_CONTENT, NO_CONTENT_BODY.to_string()),
        Err(err) => error_response(STATUS_INTERNAL_SERVER_ERROR, err),
    }
}

fn unhandled_method() -> Response {
    error_response(STATUS_METHOD_NOT_ALLOWED, UserError::MethodNotAllowed)
}

fn error_response(status_code: u16, err: UserError) -> Response {
    api_response(status_code, &ErrorBody::from(err))
}

fn api_response<T: Serialize + ?Sized>(status_code: u16, body: &T) -> Response {
    match serde_json::to_string(body) {
        Ok(text) => Response::json(status_code, text),
        Err(err) => {
            error!(
                "event=response_encode module=handlers status=error error_code=encode_failed error={err}"
            );
            Response::json(
                STATUS_INTERNAL_SERVER_ERROR,
                FALLBACK_ERROR_BODY.to_string(),
            )
        }
    }
}
