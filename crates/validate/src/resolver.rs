use crate::{Error, Result, SchemaCache};
use serde_json::Value;
use stac_core::{Type, Version, href::is_url};
use std::path::PathBuf;
use url::Url;

/// Item schemas newer than this version share their common metadata through
/// `definitions.common_metadata.allOf`.
const COMMON_METADATA_AFTER: &str = "v0.9.0";

const COMMON_METADATA_POINTER: &str = "/definitions/common_metadata/allOf";

/// A root schema and the auxiliary schemas it references.
///
/// The auxiliary schemas live in the [SchemaCache]'s scratch directory, and
/// the root schema's references to them have been rewritten to `file://`
/// urls.
#[derive(Debug, Clone)]
pub struct SchemaBundle {
    url: Url,
    schema: Value,
    references: Vec<(Url, PathBuf)>,
}

/// Returns the url of the schema for a type at a version.
///
/// # Examples
///
/// ```
/// use stac_core::{Type, Version};
/// use url::Url;
///
/// let host = Url::parse("https://cdn.staclint.com/").unwrap();
/// let url = stac_validate::schema_url(&host, &Version::new("1.0.0"), Type::Item).unwrap();
/// assert_eq!(url.as_str(), "https://cdn.staclint.com/v1.0.0/item.json");
/// ```
pub fn schema_url(spec_host: &Url, version: &Version, r#type: Type) -> Result<Url> {
    let url = format!(
        "{}{}",
        version_base(spec_host, version)?,
        r#type.schema_file_name()
    );
    Url::parse(&url).map_err(Error::from)
}

/// Returns the directory url that relative common metadata references are
/// resolved against.
fn version_base(spec_host: &Url, version: &Version) -> Result<Url> {
    let host = spec_host.as_str().trim_end_matches('/');
    Url::parse(&format!("{host}/{version}/")).map_err(Error::from)
}

/// Resolves the schema for a type and version from a schema host.
///
/// If the root schema cannot be fetched, returns [Error::Schema]. For items
/// newer than v0.9.0, each entry of the schema's
/// `definitions.common_metadata.allOf` is fetched into the cache and its
/// `$ref` is rewritten to point at the scratch copy. Failures to fetch those
/// are returned as-is.
///
/// Resolving the same inputs twice with the same cache yields the same
/// bundle, without fetching anything the second time.
pub fn resolve(
    cache: &SchemaCache,
    r#type: Type,
    version: &Version,
    spec_host: &Url,
) -> Result<SchemaBundle> {
    let url = schema_url(spec_host, version, r#type)?;
    let mut schema = cache.get(&url).map_err(|err| match err {
        Error::StacIo(source) => Error::Schema {
            url: url.clone(),
            source,
        },
        err => err,
    })?;
    let mut references = Vec::new();
    if r#type == Type::Item && version.as_str() > COMMON_METADATA_AFTER {
        let base = version_base(spec_host, version)?;
        if let Some(entries) = schema
            .pointer_mut(COMMON_METADATA_POINTER)
            .and_then(Value::as_array_mut)
        {
            for entry in entries {
                if let Some(reference) = rewrite_reference(cache, &base, entry)? {
                    references.push(reference);
                }
            }
        } else {
            tracing::debug!("{url} has no common metadata to resolve");
        }
    }
    Ok(SchemaBundle {
        url,
        schema,
        references,
    })
}

fn rewrite_reference(
    cache: &SchemaCache,
    base: &Url,
    entry: &mut Value,
) -> Result<Option<(Url, PathBuf)>> {
    let Some(reference) = entry.get("$ref").and_then(Value::as_str) else {
        tracing::debug!("skipping common metadata entry without a $ref: {entry}");
        return Ok(None);
    };
    let (href, fragment) = match reference.split_once('#') {
        Some((href, fragment)) => (href.to_string(), Some(fragment.to_string())),
        None => (reference.to_string(), None),
    };
    if href.is_empty() {
        return Ok(None);
    }
    let remote = if is_url(&href) {
        Url::parse(&href)?
    } else {
        base.join(&href)?
    };
    let _ = cache.get(&remote)?;
    let local = cache.local_path(&remote);
    let mut local_url = Url::from_file_path(&local).map_err(|_| Error::FilePath(local.clone()))?;
    local_url.set_fragment(fragment.as_deref());
    tracing::debug!("rewrote {reference} to {local_url}");
    entry["$ref"] = Value::String(local_url.into());
    Ok(Some((remote, local)))
}

impl SchemaBundle {
    /// Returns the url of the root schema.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the root schema, with rewritten references.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Returns the remote url and scratch path of every rewritten reference.
    pub fn references(&self) -> &[(Url, PathBuf)] {
        &self.references
    }
}
