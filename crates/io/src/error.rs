use thiserror::Error;

/// Crate-specific error enum
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Returned when a local path does not exist.
    #[error("{path} cannot be found")]
    FileNotFound {
        /// The path.
        path: String,
    },

    /// Returned when unable to read a value from a path.
    #[error("{io}: {path}")]
    FromPath {
        /// The [std::io::Error]
        #[source]
        io: std::io::Error,

        /// The path.
        path: String,
    },

    /// Returned when the fetched bytes are not valid JSON.
    #[error("{href} is not valid JSON: {source}")]
    InvalidJson {
        /// The href that we read.
        href: String,

        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    /// [reqwest::Error]
    Reqwest(#[from] reqwest::Error),
}

impl Error {
    /// Returns true if this error means the content could not be parsed as
    /// JSON.
    pub fn is_invalid_json(&self) -> bool {
        matches!(self, Error::InvalidJson { .. })
    }

    /// Returns true if this error means the content does not exist on the
    /// local filesystem.
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, Error::FileNotFound { .. })
    }
}
