//! Utilities and structures for working with hrefs.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};
use url::Url;

/// Where a STAC document or a schema lives.
///
/// An href is either a remote url or a path on the local filesystem. Only
/// `http` and `https` strings become urls, `file://` urls are realized to
/// paths, and anything else is treated as a path.
///
/// # Examples
///
/// ```
/// use stac_core::Href;
///
/// assert!(matches!(Href::from("https://stac.test/item.json"), Href::Url(_)));
/// assert!(matches!(Href::from("data/item.json"), Href::Path(_)));
/// assert!(matches!(Href::from("file:///data/item.json"), Href::Path(_)));
/// assert!(matches!(Href::from("s3://bucket/item.json"), Href::Path(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Href {
    /// A remote url.
    Url(Url),

    /// A local path.
    Path(PathBuf),
}

/// Returns `true` if the href is a syntactically valid `http` or `https` url.
///
/// # Examples
///
/// ```
/// assert!(stac_core::href::is_url("https://stac.test/item.json"));
/// assert!(!stac_core::href::is_url("s3://bucket/item.json"));
/// assert!(!stac_core::href::is_url("./item.json"));
/// ```
pub fn is_url(href: &str) -> bool {
    Url::parse(href)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

impl Href {
    /// Returns this href as a url, converting paths to `file://` urls.
    ///
    /// Returns `None` if a relative path cannot be made absolute.
    pub fn to_url(&self) -> Option<Url> {
        match self {
            Href::Url(url) => Some(url.clone()),
            Href::Path(path) => {
                let path = if path.is_absolute() {
                    path.clone()
                } else {
                    std::env::current_dir().ok()?.join(path)
                };
                Url::from_file_path(path).ok()
            }
        }
    }
}

impl From<&str> for Href {
    fn from(s: &str) -> Href {
        if is_url(s) {
            if let Ok(url) = Url::parse(s) {
                return Href::Url(url);
            }
        }
        match Url::parse(s) {
            Ok(url) if url.scheme() == "file" => Href::from(url),
            _ => Href::Path(PathBuf::from(s)),
        }
    }
}

impl From<String> for Href {
    fn from(s: String) -> Href {
        Href::from(s.as_str())
    }
}

impl From<Url> for Href {
    fn from(url: Url) -> Href {
        if url.scheme() == "file" {
            url.to_file_path()
                .map(Href::Path)
                .unwrap_or_else(|_| Href::Url(url))
        } else {
            Href::Url(url)
        }
    }
}

impl From<&Path> for Href {
    fn from(path: &Path) -> Href {
        Href::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Href {
    fn from(path: PathBuf) -> Href {
        Href::Path(path)
    }
}

impl Display for Href {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Href::Url(url) => write!(f, "{url}"),
            Href::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Href;
    use std::path::PathBuf;

    #[test]
    fn windows_drive_letter_is_a_path() {
        assert_eq!(
            Href::from("C:/data/item.json"),
            Href::Path(PathBuf::from("C:/data/item.json"))
        );
    }

    #[test]
    fn other_schemes_are_paths() {
        assert_eq!(
            Href::from("s3://bucket/item.json"),
            Href::Path(PathBuf::from("s3://bucket/item.json"))
        );
        assert_eq!(
            Href::from("ftp://stac.test/item.json"),
            Href::Path(PathBuf::from("ftp://stac.test/item.json"))
        );
    }

    #[test]
    fn file_url_is_a_path() {
        assert!(matches!(Href::from("file:///data/item.json"), Href::Path(_)));
    }

    #[test]
    fn display() {
        assert_eq!(
            Href::from("https://stac.test/item.json").to_string(),
            "https://stac.test/item.json"
        );
        assert_eq!(Href::from("data/item.json").to_string(), "data/item.json");
    }

    #[test]
    fn path_to_url() {
        let url = Href::from("/data/item.json").to_url().unwrap();
        assert_eq!(url.scheme(), "file");
        assert!(url.path().ends_with("/data/item.json"));
    }
}
