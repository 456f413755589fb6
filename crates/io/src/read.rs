use crate::{Error, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use stac_core::Href;
use std::{io::ErrorKind, path::Path};
use url::Url;

/// Reads JSON from local paths and urls.
///
/// All requests are made once, with the client's default timeout and without
/// retries. [Reader] is cheap to clone.
#[derive(Debug, Clone)]
pub struct Reader {
    client: Client,
}

/// Reads a JSON value from an href.
///
/// If you're reading more than one value, create a [Reader] and re-use it.
///
/// # Examples
///
/// ```no_run
/// let value = stac_io::read("data/simple-item.json").unwrap();
/// ```
pub fn read(href: impl Into<Href>) -> Result<Value> {
    Reader::new()?.read_json(href)
}

impl Reader {
    /// Creates a new reader with a `stac-io` user agent.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_io::Reader;
    ///
    /// let reader = Reader::new().unwrap();
    /// ```
    pub fn new() -> Result<Reader> {
        let client = Client::builder().user_agent(crate::user_agent()).build()?;
        Ok(Reader { client })
    }

    /// Reads a JSON value from a local path or a url.
    ///
    /// The body of a url is parsed whatever the response status, so an error
    /// page is reported as [Error::InvalidJson]. Use [Reader::get_json] to
    /// treat error statuses as failures.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use stac_io::Reader;
    ///
    /// let reader = Reader::new().unwrap();
    /// let value = reader.read_json("data/simple-item.json").unwrap();
    /// ```
    pub fn read_json(&self, href: impl Into<Href>) -> Result<Value> {
        match href.into() {
            Href::Url(url) => {
                tracing::info!("loading STAC from url: {url}");
                let response = self.client.get(url.clone()).send()?;
                if !response.status().is_success() {
                    tracing::warn!("GET {url} returned {}", response.status());
                }
                let bytes = response.bytes()?;
                parse(&bytes, url.as_str())
            }
            Href::Path(path) => {
                tracing::info!("loading STAC from filesystem: {}", path.display());
                read_path(&path)
            }
        }
    }

    /// Gets a JSON value from a url.
    ///
    /// `file://` urls are read from the local filesystem. Error statuses are
    /// returned as [Error::Reqwest].
    pub fn get_json(&self, url: &Url) -> Result<Value> {
        if url.scheme() == "file" {
            if let Ok(path) = url.to_file_path() {
                return read_path(&path);
            }
        }
        tracing::debug!("GET {url}");
        let response = self.client.get(url.clone()).send()?.error_for_status()?;
        let bytes = response.bytes()?;
        parse(&bytes, url.as_str())
    }
}

fn read_path(path: &Path) -> Result<Value> {
    let bytes = std::fs::read(path).map_err(|io| {
        if io.kind() == ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.to_string_lossy().into_owned(),
            }
        } else {
            Error::FromPath {
                io,
                path: path.to_string_lossy().into_owned(),
            }
        }
    })?;
    parse(&bytes, &path.to_string_lossy())
}

fn parse(bytes: &[u8], href: &str) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|source| Error::InvalidJson {
        href: href.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::Reader;
    use crate::Error;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};
    use url::Url;

    #[test]
    fn read_path() {
        let reader = Reader::new().unwrap();
        let value = reader.read_json("data/simple-item.json").unwrap();
        assert_eq!(value["id"], "20201211_223832_CS2");
    }

    #[test]
    fn invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{\"type\": \"Feature\",").unwrap();
        let error = crate::read(file.path()).unwrap_err();
        assert!(error.is_invalid_json(), "{error:?}");
    }

    #[test]
    fn file_not_found() {
        let error = crate::read("data/not-a-file.json").unwrap_err();
        assert!(matches!(error, Error::FileNotFound { ref path } if path == "data/not-a-file.json"));
        assert_eq!(error.to_string(), "data/not-a-file.json cannot be found");
    }

    #[test]
    fn read_directory() {
        let tempdir = TempDir::new().unwrap();
        let error = crate::read(tempdir.path()).unwrap_err();
        assert!(matches!(error, Error::FromPath { .. }), "{error:?}");
    }

    #[test]
    fn read_file_url() {
        let path = std::env::current_dir()
            .unwrap()
            .join("data/simple-item.json");
        let url = Url::from_file_path(path).unwrap();
        let value = crate::read(url.as_str()).unwrap();
        assert_eq!(value["type"], "Feature");
    }

    #[test]
    fn read_url() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/item.json")
            .with_header("content-type", "application/json")
            .with_body(r#"{"type": "Feature", "id": "remote"}"#)
            .create();
        let value = crate::read(format!("{}/item.json", server.url())).unwrap();
        assert_eq!(value["id"], "remote");
        mock.assert();
    }

    #[test]
    fn read_url_with_invalid_json() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/item.json")
            .with_body("<html>not json</html>")
            .create();
        let error = crate::read(format!("{}/item.json", server.url())).unwrap_err();
        assert!(error.is_invalid_json(), "{error:?}");
    }

    #[test]
    fn read_url_not_found() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/item.json")
            .with_status(404)
            .with_body("<html>Not Found</html>")
            .create();
        let error = crate::read(format!("{}/item.json", server.url())).unwrap_err();
        assert!(error.is_invalid_json(), "{error:?}");
    }

    #[test]
    fn get_json_not_found() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("GET", "/schema.json").with_status(404).create();
        let url = Url::parse(&format!("{}/schema.json", server.url())).unwrap();
        let error = Reader::new().unwrap().get_json(&url).unwrap_err();
        assert!(matches!(error, Error::Reqwest(_)), "{error:?}");
    }

    #[test]
    fn read_other_scheme_as_path() {
        let error = crate::read("s3://bucket/item.json").unwrap_err();
        assert!(error.is_file_not_found(), "{error:?}");
    }
}
