//! Read STAC documents and JSON Schemas from local paths and urls.
//!
//! ```no_run
//! let value = stac_io::read("https://stac.test/item.json").unwrap();
//! ```

mod error;
mod read;

pub use {
    error::Error,
    read::{Reader, read},
};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns a string suitable for use as a HTTP user agent.
pub fn user_agent() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
}
