//! Core data structures for validating [SpatioTemporal Asset Catalog
//! (STAC)](https://stacspec.org/) documents.
//!
//! This crate does not model the full STAC data structures. It knows just
//! enough about STAC to decide which schema a document should be validated
//! against:
//!
//! - [Type]: the kind of STAC object (item, catalog, or collection)
//! - [Version]: a normalized STAC version tag, e.g. `v1.0.0` or `master`
//! - [identify]: structural identification of a JSON value
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use stac_core::{Document, Type, Version};
//!
//! let document = Document::new(json!({
//!     "type": "Feature",
//!     "stac_version": "0.9.0",
//!     "id": "an-id",
//! }))
//! .unwrap();
//! assert_eq!(document.r#type(), Type::Item);
//! assert_eq!(document.version(), Some(&Version::new("v0.9.0")));
//! ```

#![deny(
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    meta_variable_misuse,
    missing_abi,
    missing_debug_implementations,
    missing_docs,
    non_ascii_idents,
    noop_method_call,
    rust_2021_incompatible_closure_captures,
    rust_2021_incompatible_or_patterns,
    rust_2021_prefixes_incompatible_syntax,
    rust_2021_prelude_collisions,
    single_use_lifetimes,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unsafe_op_in_unsafe_fn,
    unused_crate_dependencies,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

mod error;
pub mod href;
mod identify;
mod json;
mod r#type;
mod version;

pub use {
    error::Error,
    href::Href,
    identify::{Document, Identification, identify},
    json::ToJson,
    r#type::Type,
    version::Version,
};

/// Custom [Result](std::result::Result) type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
