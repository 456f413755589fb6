use thiserror::Error;

/// Error enum for crate-specific errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Returned when a STAC version tag is empty.
    #[error("empty STAC version")]
    EmptyVersion,

    /// This is not a JSON object.
    #[error("json value is not an object")]
    NotAnObject(serde_json::Value),

    /// [serde_json::Error]
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// Returned when the `type` field of a STAC object does not equal `"Feature"`, `"Catalog"`, or `"Collection"`.
    #[error("unknown \"type\": {0}")]
    UnknownType(String),

    /// Returned for STAC-adjacent objects that do not have a schema of their
    /// own, e.g. item collections.
    #[error("unsupported \"type\": {0}")]
    UnsupportedType(String),
}
