//! `RequestError` - error taxonomy for every API operation.
//!
//! Transport errors come from the HTTP status code (or the lack of a
//! response). Decode errors are classified from `serde_json` so callers can
//! tell which field of which document broke when the upstream API changes.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::error::Category;

/// Result alias for API operations.
pub type Result<T, E = RequestError> = std::result::Result<T, E>;

/// Position inside the decoded document where decoding stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeContext {
    /// 1-based line number (0 when unknown).
    pub line: usize,
    /// 1-based column number (0 when unknown).
    pub column: usize,
}

impl fmt::Display for DecodeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// Errors returned by API operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RequestError {
    /// No HTTP response was received (connection, TLS or client timeout).
    #[error("no response from {url}")]
    NoResponse {
        /// Request URL.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The request URL could not be built.
    #[error("unknown endpoint {0}")]
    InvalidUrl(String),

    /// HTTP 400.
    #[error("bad request")]
    BadRequest,

    /// HTTP 403: the token is invalid or disabled.
    #[error("not authenticated: token is invalid or disabled")]
    NotAuthenticated,

    /// HTTP 404.
    #[error("{0} not found")]
    NotFound(String),

    /// HTTP 408.
    #[error("request timeout")]
    RequestTimeout,

    /// HTTP 429: the token quota is exhausted.
    #[error("too many requests: token quota exceeded")]
    TooManyRequests,

    /// HTTP 5xx.
    #[error("server issue (HTTP {0})")]
    ServerIssue(u16),

    /// Any other non-2xx status.
    #[error("server returned an unexpected status code of {0}")]
    UnexpectedStatusCode(u16),

    /// The response body of a successful request could not be read.
    #[error("failed to read {source_name}: {reason}")]
    Decode {
        /// Document identifier.
        source_name: String,
        /// Failure description.
        reason: String,
    },

    /// A required key is missing.
    #[error("failed to decode {source_name} at {path}: missing key '{key}' ({context})")]
    KeyNotFound {
        /// Document identifier.
        source_name: String,
        /// Path of the object missing the key (e.g. `areas[0]`).
        path: String,
        /// Missing key.
        key: String,
        /// Position in the document.
        context: DecodeContext,
    },

    /// A value has the wrong JSON type.
    #[error("failed to decode {source_name} at {path}: type mismatch, {detail} ({context})")]
    TypeMismatch {
        /// Document identifier.
        source_name: String,
        /// Path of the offending value (e.g. `status.capetown.name`).
        path: String,
        /// `serde_json` description of the mismatch.
        detail: String,
        /// Position in the document.
        context: DecodeContext,
    },

    /// A required value is `null`.
    #[error("failed to decode {source_name} at {path}: missing {expected} value ({context})")]
    ValueNotFound {
        /// Document identifier.
        source_name: String,
        /// Path of the `null` value.
        path: String,
        /// Expected value description.
        expected: String,
        /// Position in the document.
        context: DecodeContext,
    },

    /// The document is not valid JSON (or not valid UTF-8).
    #[error("failed to decode {source_name} at {path}: invalid JSON ({context})")]
    DataCorrupted {
        /// Document identifier.
        source_name: String,
        /// Path reached before the syntax error.
        path: String,
        /// Position in the document.
        context: DecodeContext,
    },

    /// Any other decoding failure (e.g. an unparseable timestamp).
    #[error("failed to decode {source_name} at {path}: {description}")]
    DecodingError {
        /// Document identifier.
        source_name: String,
        /// Path of the offending value.
        path: String,
        /// Failure description.
        description: String,
    },

    /// An offline fixture document could not be located.
    #[error("failed to locate {0} in bundle")]
    BundleNotFound(String),
}

impl RequestError {
    /// Maps a non-success HTTP status to its error. Returns `None` for 2xx.
    #[must_use]
    pub fn from_status(status: u16, url: &str) -> Option<Self> {
        match status {
            200..=299 => None,
            400 => Some(Self::BadRequest),
            403 => Some(Self::NotAuthenticated),
            404 => Some(Self::NotFound(String::from(url))),
            408 => Some(Self::RequestTimeout),
            429 => Some(Self::TooManyRequests),
            500..=599 => Some(Self::ServerIssue(status)),
            other => Some(Self::UnexpectedStatusCode(other)),
        }
    }

    /// Classifies a `serde_json` error raised at `path` while decoding
    /// `source_name`.
    #[must_use]
    pub fn from_json(source_name: &str, path: &str, err: &serde_json::Error) -> Self {
        let source_name = String::from(source_name);
        let path = String::from(path);
        let context = DecodeContext {
            line: err.line(),
            column: err.column(),
        };

        match err.classify() {
            Category::Syntax | Category::Eof => Self::DataCorrupted {
                source_name,
                path,
                context,
            },
            Category::Io => Self::DecodingError {
                source_name,
                path,
                description: err.to_string(),
            },
            Category::Data => Self::classify_data(source_name, path, message_of(err), context),
        }
    }

    /// Splits `Category::Data` errors by their serde message.
    fn classify_data(
        source_name: String,
        path: String,
        message: String,
        context: DecodeContext,
    ) -> Self {
        if let Some(key) = message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.strip_suffix('`'))
        {
            return Self::KeyNotFound {
                source_name,
                path,
                key: String::from(key),
                context,
            };
        }

        if let Some(expected) = message.strip_prefix("invalid type: null, expected ") {
            return Self::ValueNotFound {
                source_name,
                path,
                expected: String::from(expected),
                context,
            };
        }

        if message.starts_with("invalid type: ") {
            return Self::TypeMismatch {
                source_name,
                path,
                detail: message,
                context,
            };
        }

        Self::DecodingError {
            source_name,
            path,
            description: message,
        }
    }
}

/// Returns the serde message without the trailing `at line N column M`.
fn message_of(err: &serde_json::Error) -> String {
    let full = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    full.strip_suffix(&suffix)
        .map_or_else(|| full.clone(), String::from)
}

/// Decodes a JSON document, classifying any failure and recording the path
/// of the value that broke (`.` for the document root).
///
/// Bytes are decoded as-is, so invalid UTF-8 is reported as
/// [`RequestError::DataCorrupted`].
///
/// # Errors
///
/// Returns one of the decode variants of [`RequestError`].
pub fn decode<T: DeserializeOwned>(source_name: &str, body: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        RequestError::from_json(source_name, &e.path().to_string(), e.inner())
    })?;
    deserializer
        .end()
        .map_err(|e| RequestError::from_json(source_name, ".", &e))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde::Deserialize;

    use super::*;
    use crate::types::{AreasSearch, Status};

    #[derive(Debug, Deserialize)]
    struct Counter {
        #[allow(dead_code)]
        name: String,
        #[allow(dead_code)]
        count: u32,
    }

    const STATUS_WITH_NUMERIC_NAME: &str = r#"{"status":{
        "capetown":{"name":5,"next_stages":[],"stage":"0","stage_updated":"2023-06-01T08:00:00+02:00"},
        "eskom":{"name":"Eskom","next_stages":[],"stage":"0","stage_updated":"2023-06-01T08:00:00+02:00"}
    }}"#;

    #[test]
    fn test_status_mapping() {
        assert!(RequestError::from_status(200, "u").is_none());
        assert!(RequestError::from_status(204, "u").is_none());
        assert!(matches!(
            RequestError::from_status(400, "u"),
            Some(RequestError::BadRequest)
        ));
        assert!(matches!(
            RequestError::from_status(403, "u"),
            Some(RequestError::NotAuthenticated)
        ));
        assert!(matches!(
            RequestError::from_status(404, "https://x/area"),
            Some(RequestError::NotFound(url)) if url == "https://x/area"
        ));
        assert!(matches!(
            RequestError::from_status(408, "u"),
            Some(RequestError::RequestTimeout)
        ));
        assert!(matches!(
            RequestError::from_status(429, "u"),
            Some(RequestError::TooManyRequests)
        ));
        assert!(matches!(
            RequestError::from_status(503, "u"),
            Some(RequestError::ServerIssue(503))
        ));
        assert!(matches!(
            RequestError::from_status(401, "u"),
            Some(RequestError::UnexpectedStatusCode(401))
        ));
        assert!(matches!(
            RequestError::from_status(302, "u"),
            Some(RequestError::UnexpectedStatusCode(302))
        ));
    }

    #[test]
    fn test_missing_key_is_key_not_found() {
        // Act
        let err = decode::<Counter>("counter.json", br#"{"name":"a"}"#).unwrap_err();

        // Assert
        match err {
            RequestError::KeyNotFound {
                source_name,
                path,
                key,
                ..
            } => {
                assert_eq!(source_name, "counter.json");
                assert_eq!(path, ".");
                assert_eq!(key, "count");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_key_names_the_enclosing_object() {
        // Act
        let err = decode::<AreasSearch>(
            "areas_search",
            br#"{"areas":[{"id":"a","name":"A","region":"R"},{"id":"b","name":"B"}]}"#,
        )
        .unwrap_err();

        // Assert
        match err {
            RequestError::KeyNotFound { path, key, .. } => {
                assert_eq!(path, "areas[1]");
                assert_eq!(key, "region");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_type_is_type_mismatch() {
        // Act
        let err = decode::<Counter>("counter.json", br#"{"name":"a","count":"ten"}"#).unwrap_err();

        // Assert
        match err {
            RequestError::TypeMismatch {
                path,
                detail,
                context,
                ..
            } => {
                assert_eq!(path, "count");
                assert!(detail.contains("expected u32"));
                assert_eq!(context.line, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_type_mismatch_names_the_nested_field() {
        // Act
        let err = decode::<Status>("status", STATUS_WITH_NUMERIC_NAME.as_bytes()).unwrap_err();

        // Assert
        match err {
            RequestError::TypeMismatch {
                source_name,
                path,
                detail,
                ..
            } => {
                assert_eq!(source_name, "status");
                assert_eq!(path, "status.capetown.name");
                assert!(detail.contains("expected a string"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_null_is_value_not_found() {
        // Act
        let err = decode::<AreasSearch>(
            "areas_search",
            br#"{"areas":[{"id":"a","name":"A","region":"R"},{"id":"b","name":null,"region":"R"}]}"#,
        )
        .unwrap_err();

        // Assert
        match err {
            RequestError::ValueNotFound { path, expected, .. } => {
                assert_eq!(path, "areas[1].name");
                assert_eq!(expected, "a string");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_json_is_data_corrupted() {
        // Act
        let syntax = decode::<Counter>("counter.json", b"{not json").unwrap_err();
        let truncated = decode::<Counter>("counter.json", br#"{"name":"a""#).unwrap_err();
        let trailing =
            decode::<Counter>("counter.json", br#"{"name":"a","count":1} x"#).unwrap_err();

        // Assert
        assert!(matches!(syntax, RequestError::DataCorrupted { .. }));
        assert!(matches!(truncated, RequestError::DataCorrupted { .. }));
        assert!(matches!(trailing, RequestError::DataCorrupted { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_data_corrupted() {
        // Arrange
        let mut body = br#"{"name":"a"#.to_vec();
        body.extend_from_slice(&[0xff, 0xfe]);
        body.extend_from_slice(br#"","count":1}"#);

        // Act
        let err = decode::<Counter>("counter.json", &body).unwrap_err();

        // Assert
        assert!(matches!(
            err,
            RequestError::DataCorrupted { ref source_name, .. } if source_name == "counter.json"
        ));
    }

    #[test]
    fn test_other_data_errors_are_decoding_error() {
        // Act
        let err = decode::<Counter>("counter.json", br#"{"name":"a","count":-1}"#).unwrap_err();

        // Assert
        match err {
            RequestError::DecodingError {
                path, description, ..
            } => {
                assert_eq!(path, "count");
                assert!(description.starts_with("invalid value"));
                assert!(!description.contains("at line"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_display_names_the_document_and_path() {
        // Arrange
        let missing = decode::<Counter>("status.json", br#"{"count":1}"#).unwrap_err();
        let mismatch = decode::<Status>("status", STATUS_WITH_NUMERIC_NAME.as_bytes()).unwrap_err();

        // Act
        let missing = missing.to_string();
        let mismatch = mismatch.to_string();

        // Assert
        assert!(missing.contains("status.json"));
        assert!(missing.contains("missing key 'name'"));
        assert!(mismatch.contains("at status.capetown.name"));
    }
}
