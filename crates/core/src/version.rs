use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// A normalized STAC version tag.
///
/// Schema hosts publish their schemas under directories named after the
/// version tag, e.g. `v1.0.0/item.json`. Released versions are prefixed with
/// a `v`, while branch names (`master`, `dev`) are used as-is.
///
/// Versions are ordered by comparing their normalized tags as strings. This
/// is not semantic ordering: `v0.10.0` sorts before `v0.9.0`.
///
/// # Examples
///
/// ```
/// use stac_core::Version;
///
/// assert_eq!(Version::new("0.9.0").as_str(), "v0.9.0");
/// assert_eq!(Version::new("v1.0.0").as_str(), "v1.0.0");
/// assert_eq!(Version::new("master").as_str(), "master");
/// assert!(Version::new("1.0.0") > Version::new("0.9.0"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Version(String);

impl Version {
    /// The `master` branch of the STAC specification.
    pub const MASTER: &'static str = "master";

    /// Creates a new version, normalizing the tag.
    ///
    /// A `v` is prefixed unless the tag already starts with `m` (master),
    /// `d` (dev), or `v`. Surrounding whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_core::Version;
    ///
    /// assert_eq!(Version::new("dev").as_str(), "dev");
    /// ```
    pub fn new(tag: impl AsRef<str>) -> Version {
        let tag = tag.as_ref().trim();
        if tag.starts_with(['m', 'd', 'v']) {
            Version(tag.to_string())
        } else {
            Version(format!("v{tag}"))
        }
    }

    /// Returns the normalized tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this version names a branch of the specification
    /// instead of a release.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_core::Version;
    ///
    /// assert!(Version::new("master").is_branch());
    /// assert!(!Version::new("1.0.0").is_branch());
    /// ```
    pub fn is_branch(&self) -> bool {
        self.0.starts_with(['m', 'd'])
    }
}

impl Default for Version {
    fn default() -> Self {
        Version(Version::MASTER.to_string())
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Version> {
        if s.trim().is_empty() {
            Err(Error::EmptyVersion)
        } else {
            Ok(Version::new(s))
        }
    }
}

impl From<String> for Version {
    fn from(value: String) -> Self {
        Version::new(value)
    }
}

impl From<Version> for String {
    fn from(value: Version) -> Self {
        value.0
    }
}

impl PartialEq<&str> for Version {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::Version;
    use rstest::rstest;

    #[rstest]
    #[case("0.9.0", "v0.9.0")]
    #[case("1.0.0-beta.2", "v1.0.0-beta.2")]
    #[case("v1.0.0", "v1.0.0")]
    #[case("master", "master")]
    #[case("dev", "dev")]
    #[case(" 0.8.1 ", "v0.8.1")]
    fn normalize(#[case] tag: &str, #[case] expected: &str) {
        assert_eq!(Version::new(tag), expected);
    }

    #[test]
    fn string_ordering() {
        assert!(Version::new("1.0.0") > Version::new("0.9.0"));
        assert!(Version::new("v1.0.0-rc.1") > Version::new("v0.9.0"));
        assert!(Version::new("0.9.0") <= Version::new("0.9.0"));
        assert!(Version::new("0.10.0") < Version::new("0.9.0"));
        assert!(Version::new("master") < Version::new("v0.9.0"));
        assert!(Version::new("dev") < Version::new("v0.9.0"));
    }

    #[test]
    fn parse_empty() {
        let _ = "".parse::<Version>().unwrap_err();
        let _ = "  ".parse::<Version>().unwrap_err();
    }

    #[test]
    fn default_is_master() {
        assert_eq!(Version::default(), Version::MASTER);
        assert!(Version::default().is_branch());
    }

    #[test]
    fn deserialize_normalizes() {
        let version: Version = serde_json::from_str("\"1.1.0\"").unwrap();
        assert_eq!(version, "v1.1.0");
    }
}
