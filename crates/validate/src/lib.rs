//! Validate STAC documents with [json-schema](https://json-schema.org/).
//!
//! Schemas are fetched from a schema host laid out as
//! `{spec_host}/{version}/{type}.json`, e.g.
//! `https://cdn.staclint.com/v1.0.0/item.json`.
//!
//! # Examples
//!
//! ```no_run
//! use stac_validate::{ValidationRequest, Validator};
//!
//! let validator = Validator::new().unwrap();
//! let request = ValidationRequest::new("data/simple-item.json").unwrap();
//! let message = validator.validate(&request).unwrap();
//! println!("{}", stac_validate::report(&[message]));
//! ```
//!
//! All fetched schemas are cached in a scratch directory, so if you're doing
//! multiple validations you should re-use the same [Validator]:
//!
//! ```no_run
//! use stac_validate::{ValidationRequest, Validator};
//!
//! let validator = Validator::new().unwrap();
//! for source in ["item-a.json", "item-b.json"] {
//!     let request = ValidationRequest::new(source).unwrap();
//!     let _ = validator.validate(&request).unwrap();
//! }
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

mod cache;
mod error;
mod message;
mod resolver;
mod validator;

pub use {
    cache::SchemaCache,
    error::{Error, ErrorKind, ErrorRecord},
    message::{Message, report},
    resolver::{SchemaBundle, resolve, schema_url},
    validator::{DEFAULT_SPEC_HOST, ValidationRequest, Validator, validate_document},
};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
pub(crate) mod tests {
    use mockito::{Mock, Server, ServerGuard};
    use std::path::Path;
    use url::Url;

    /// A mock schema host serving everything under `data/schemas`.
    pub(crate) struct SchemaHost {
        server: ServerGuard,
        mocks: Vec<(String, Mock)>,
    }

    impl SchemaHost {
        pub(crate) fn new() -> SchemaHost {
            let mut server = Server::new();
            let mut mocks = Vec::new();
            add_mocks(&mut server, &mut mocks, Path::new("data/schemas"), "");
            SchemaHost { server, mocks }
        }

        pub(crate) fn url(&self) -> Url {
            Url::parse(&self.server.url()).unwrap()
        }

        /// Asserts that no schema was requested more than once, and that the
        /// v1.0.0 item schema was requested at all.
        pub(crate) fn assert_fetched_at_most_once(&self) {
            for (path, mock) in &self.mocks {
                mock.assert();
                if path == "/v1.0.0/item.json" {
                    assert!(mock.matched(), "{path} was never requested");
                }
            }
        }
    }

    fn add_mocks(server: &mut Server, mocks: &mut Vec<(String, Mock)>, dir: &Path, prefix: &str) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_str().unwrap().to_string();
            let url_path = format!("{prefix}/{name}");
            if path.is_dir() {
                add_mocks(server, mocks, &path, &url_path);
            } else {
                let mock = server
                    .mock("GET", url_path.as_str())
                    .with_header("content-type", "application/json")
                    .with_body(std::fs::read(&path).unwrap())
                    .expect_at_most(1)
                    .create();
                mocks.push((url_path, mock));
            }
        }
    }
}
