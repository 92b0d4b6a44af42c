//! JSON:API error objects.
//!
//! Every failure surfaced by the HTTP API is rendered as a JSON:API error
//! object (<https://jsonapi.org/format/#error-objects>):
//!
//! ```json
//! {"status": "422", "title": "Invalid Attribute", "detail": "...",
//!  "source": {"pointer": "/data/attributes/type"}}
//! ```
//!
//! Storage errors are translated in two steps: [`classify`] picks a
//! [`Category`] following a fixed precedence, then [`Error`] formats it.
//! Translation is total: an unrecognized error becomes a 500 carrying its
//! original message.

use std::error::Error as StdError;
use std::fmt;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Serialize, Serializer};

use docstack_service::CouchError;
use docstack_service::vfs::{self, VfsError};

/// Media type of JSON:API documents.
pub const CONTENT_TYPE: &str = "application/vnd.api+json";

const ATTRIBUTES_POINTER: &str = "/data/attributes/";

/// Reference to the part of the request that caused an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceError {
    /// JSON pointer into the request document, e.g. `/data/attributes/type`.
    Pointer(String),
    /// Name of a query-string parameter or header.
    Parameter(String),
}

/// A JSON:API error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Error {
    /// HTTP status code, serialized as a string.
    #[serde(serialize_with = "status_as_string")]
    pub status: u16,
    /// Short summary, fixed for a given status.
    pub title: String,
    /// Message of the underlying error.
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceError>,
}

fn status_as_string<S: Serializer>(status: &u16, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(status)
}

/// Top-level JSON:API document holding one or more errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDocument {
    pub errors: Vec<Error>,
}

impl From<Error> for ErrorDocument {
    fn from(err: Error) -> Self {
        Self { errors: vec![err] }
    }
}

/// Outcome of [`classify`]: which kind of error object to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category<'a> {
    /// A CouchDB error, forwarded as-is.
    Couch(&'a CouchError),
    /// 409, the target already exists.
    Conflict,
    /// 404.
    NotFound,
    /// 422 on the named attribute.
    InvalidAttribute(&'static str),
    /// 422 on the named parameter.
    InvalidParameter(&'static str),
    /// 412 on the named header.
    PreconditionFailed(&'static str),
    /// 500, anything else.
    Internal,
}

/// Decides how a storage error is reported.
///
/// Rules are tried in order and the first match wins:
/// 1. a [`CouchError`] anywhere in the cause chain
/// 2. an "already exists" filesystem error
/// 3. a "not found" filesystem error
/// 4. a [`VfsError`] sentinel
/// 5. anything else, including a missing error, is internal
pub fn classify<'a>(err: Option<&'a (dyn StdError + 'static)>) -> Category<'a> {
    let Some(err) = err else {
        return Category::Internal;
    };

    if let Some(couch) = vfs::causes(err).find_map(|cause| cause.downcast_ref::<CouchError>()) {
        return Category::Couch(couch);
    }
    if vfs::is_exist(err) {
        return Category::Conflict;
    }
    if vfs::is_not_exist(err) {
        return Category::NotFound;
    }

    vfs::causes(err)
        .find_map(|cause| cause.downcast_ref::<VfsError>().and_then(sentinel_category))
        .unwrap_or(Category::Internal)
}

fn sentinel_category(err: &VfsError) -> Option<Category<'static>> {
    match err {
        VfsError::ParentDoesNotExist => Some(Category::NotFound),
        VfsError::DocTypeInvalid => Some(Category::InvalidAttribute("type")),
        VfsError::IllegalFilename => Some(Category::InvalidParameter("folder-id")),
        VfsError::InvalidHash => Some(Category::PreconditionFailed("Content-MD5")),
        VfsError::ContentLengthMismatch => Some(Category::PreconditionFailed("Content-Length")),
        VfsError::Io(_) | VfsError::Couch(_) => None,
    }
}

impl Error {
    fn new(status: StatusCode, title: &str, detail: impl fmt::Display) -> Self {
        Self {
            status: status.as_u16(),
            title: title.to_string(),
            detail: detail.to_string(),
            source: None,
        }
    }

    fn with_source(mut self, source: SourceError) -> Self {
        self.source = Some(source);
        self
    }

    /// 404 Not Found.
    pub fn not_found(err: impl fmt::Display) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", err)
    }

    /// 409 Conflict, the resource already exists.
    pub fn conflict(err: impl fmt::Display) -> Self {
        Self::new(StatusCode::CONFLICT, "Conflict", err)
    }

    /// 500 Internal Server Error.
    pub fn internal_server_error(err: impl fmt::Display) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", err)
    }

    /// 412 Precondition Failed, when an expectation carried by an HTTP
    /// header is not met.
    pub fn precondition_failed(parameter: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::new(StatusCode::PRECONDITION_FAILED, "Precondition Failed", err)
            .with_source(SourceError::Parameter(parameter.into()))
    }

    /// 422 for an invalid header or query-string parameter.
    pub fn invalid_parameter(parameter: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "Invalid Parameter", err)
            .with_source(SourceError::Parameter(parameter.into()))
    }

    /// 422 for an invalid attribute of the request document.
    pub fn invalid_attribute(attribute: &str, err: impl fmt::Display) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "Invalid Attribute", err)
            .with_source(SourceError::Pointer(format!("{ATTRIBUTES_POINTER}{attribute}")))
    }

    /// Forwards a CouchDB error without remapping its status.
    pub fn wrap_couch_error(err: &CouchError) -> Self {
        Self {
            status: err.status_code,
            title: err.name.clone(),
            detail: err.reason.clone(),
            source: None,
        }
    }

    /// Translates an error emitted by the VFS or anything beneath it.
    pub fn wrap_vfs_error(err: &(dyn StdError + 'static)) -> Self {
        Self::wrap_optional_error(Some(err))
    }

    /// Like [`Error::wrap_vfs_error`], but a missing error becomes a 500
    /// with an empty detail.
    pub fn wrap_optional_error(err: Option<&(dyn StdError + 'static)>) -> Self {
        let detail = err.map(|e| e.to_string()).unwrap_or_default();
        match classify(err) {
            Category::Couch(couch) => Self::wrap_couch_error(couch),
            Category::Conflict => Self::conflict(detail),
            Category::NotFound => Self::not_found(detail),
            Category::InvalidAttribute(attribute) => Self::invalid_attribute(attribute, detail),
            Category::InvalidParameter(parameter) => Self::invalid_parameter(parameter, detail),
            Category::PreconditionFailed(parameter) => Self::precondition_failed(parameter, detail),
            Category::Internal => Self::internal_server_error(detail),
        }
    }

    /// HTTP status of the response carrying this error.
    ///
    /// A status forwarded from CouchDB that is not a valid HTTP code falls
    /// back to 500.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}): {}", self.title, self.status, self.detail)
    }
}

impl StdError for Error {}

impl From<CouchError> for Error {
    fn from(err: CouchError) -> Self {
        Self::wrap_couch_error(&err)
    }
}

impl From<VfsError> for Error {
    fn from(err: VfsError) -> Self {
        Self::wrap_vfs_error(&err)
    }
}

// ---------------------------------------------------------------------------
// HTTP response conversion
// ---------------------------------------------------------------------------

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = self.status, title = %self.title, detail = %self.detail, "request failed");
        } else {
            tracing::debug!(status = self.status, title = %self.title, detail = %self.detail, "request rejected");
        }

        (
            status,
            [(header::CONTENT_TYPE, CONTENT_TYPE)],
            axum::Json(ErrorDocument::from(self)),
        )
            .into_response()
    }
}
