use jsonschema::error::ValidationErrorKind;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Crate-specific error enum.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A scratch path could not be turned into a `file://` url.
    #[error("cannot convert path to a file url: {}", .0.display())]
    FilePath(PathBuf),

    /// [std::io::Error]
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The schema for a document could not be fetched.
    #[error("cannot get schema {url}: {source}")]
    Schema {
        /// The url of the schema.
        url: Url,

        /// The underlying fetch error.
        #[source]
        source: stac_io::Error,
    },

    #[error(transparent)]
    /// [serde_json::Error]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    /// [stac_core::Error]
    StacCore(#[from] stac_core::Error),

    #[error(transparent)]
    /// [stac_io::Error]
    StacIo(#[from] stac_io::Error),

    #[error(transparent)]
    /// [url::ParseError]
    UrlParse(#[from] url::ParseError),
}

/// The kind of failure recorded in a validation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// The document is not valid JSON.
    #[serde(rename = "InvalidJSON")]
    InvalidJson,

    /// The document does not exist on the local filesystem.
    #[serde(rename = "FileNotFoundError")]
    FileNotFound,

    /// The schema could not be fetched, or is not a usable schema.
    SchemaError,

    /// A `$ref` in the schema could not be dereferenced.
    RefResolutionError,

    /// The document does not conform to the schema.
    ValidationError,
}

impl ErrorKind {
    /// Returns the name this kind is reported with.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidJson => "InvalidJSON",
            ErrorKind::FileNotFound => "FileNotFoundError",
            ErrorKind::SchemaError => "SchemaError",
            ErrorKind::RefResolutionError => "RefResolutionError",
            ErrorKind::ValidationError => "ValidationError",
        }
    }
}

/// A failure, as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// The kind of failure.
    pub kind: ErrorKind,

    /// A human-readable message.
    pub message: String,

    /// Path segments to the failing element of the document.
    ///
    /// Empty if the failure applies to the whole document.
    pub instance_path: Vec<String>,
}

impl ErrorRecord {
    /// Creates a new record that does not point into the document.
    pub fn new(kind: ErrorKind, message: impl ToString) -> ErrorRecord {
        ErrorRecord {
            kind,
            message: message.to_string(),
            instance_path: Vec::new(),
        }
    }

    /// Creates a record from an error raised while building a schema validator.
    pub(crate) fn from_build_error(error: &jsonschema::ValidationError<'_>) -> ErrorRecord {
        if let ValidationErrorKind::Referencing(ref source) = error.kind {
            tracing::warn!("reference resolution failed: {source}");
            ErrorRecord::new(ErrorKind::RefResolutionError, "JSON Reference Resolution Error.")
        } else {
            ErrorRecord::new(ErrorKind::SchemaError, format!("Invalid schema: {error}"))
        }
    }

    /// Creates a record from a validation error of the document.
    pub(crate) fn from_validation_error(error: &jsonschema::ValidationError<'_>) -> ErrorRecord {
        let instance_path = pointer_segments(&error.instance_path.to_string());
        let message = if instance_path.is_empty() {
            format!("{error} of the root of the STAC object")
        } else {
            format!("{error}. Error is in {}", instance_path.join(" -> "))
        };
        ErrorRecord {
            kind: ErrorKind::ValidationError,
            message,
            instance_path,
        }
    }
}

fn pointer_segments(pointer: &str) -> Vec<String> {
    pointer
        .split('/')
        .skip(1)
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect()
}
