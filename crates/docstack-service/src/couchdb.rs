//! CouchDB error shape.
//!
//! CouchDB reports failures as an HTTP status plus a JSON body of the form
//! `{"error": "not_found", "reason": "missing"}`. `CouchError` carries all
//! three so the transport layer can forward them without remapping.

use serde::{Deserialize, Serialize};

/// Name used when a CouchDB error body cannot be decoded.
const UNKNOWN_ERROR: &str = "unknown_error";

/// Structured error returned by the CouchDB document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("CouchDB({name}): {reason}")]
pub struct CouchError {
    /// HTTP status code of the CouchDB response.
    #[serde(default)]
    pub status_code: u16,
    /// Short error name (e.g. "not_found", "conflict").
    #[serde(rename = "error")]
    pub name: String,
    /// Human-readable reason.
    #[serde(default)]
    pub reason: String,
}

impl CouchError {
    pub fn new(status_code: u16, name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            status_code,
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Builds an error from a failed CouchDB response.
    ///
    /// The body is expected to hold `error` and `reason` keys. Anything that
    /// does not decode is kept verbatim as the reason.
    pub fn from_response(status_code: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<CouchError>(body) {
            Ok(mut err) => {
                err.status_code = status_code;
                err
            }
            Err(_) => Self::new(
                status_code,
                UNKNOWN_ERROR,
                String::from_utf8_lossy(body).into_owned(),
            ),
        }
    }

    /// Whether CouchDB reported a missing document or database.
    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }

    /// Whether CouchDB rejected a write because of a revision conflict.
    pub fn is_conflict(&self) -> bool {
        self.status_code == 409
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_response_decodes_body() {
        let err = CouchError::from_response(404, br#"{"error":"not_found","reason":"missing"}"#);
        assert_eq!(err, CouchError::new(404, "not_found", "missing"));
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
    }

    #[test]
    fn from_response_keeps_transport_status() {
        let body = br#"{"status_code":200,"error":"conflict","reason":"Document update conflict."}"#;
        let err = CouchError::from_response(409, body);
        assert_eq!(err.status_code, 409);
        assert!(err.is_conflict());
    }

    #[test]
    fn from_response_falls_back_on_garbage() {
        let err = CouchError::from_response(502, b"<html>bad gateway</html>");
        assert_eq!(err.status_code, 502);
        assert_eq!(err.name, "unknown_error");
        assert_eq!(err.reason, "<html>bad gateway</html>");
    }

    #[test]
    fn display_names_the_store() {
        let err = CouchError::new(412, "file_exists", "The database could not be created");
        assert_eq!(
            err.to_string(),
            "CouchDB(file_exists): The database could not be created"
        );
    }
}
