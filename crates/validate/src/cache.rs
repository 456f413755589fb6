use crate::{Error, Result};
use jsonschema::{Retrieve, Uri};
use serde_json::Value;
use stac_core::ToJson;
use stac_io::Reader;
use std::{
    collections::HashMap,
    fs::File,
    io::BufWriter,
    path::{Component, Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};
use tempfile::TempDir;
use url::Url;

/// A per-run scratch directory holding every schema fetched during
/// validation.
///
/// Schemas are stored under a path that mirrors their url:
/// `<scratch>/<scheme>/<host>[_<port>]/<path>`, e.g.
/// `https://cdn.staclint.com/v1.0.0/item.json` lives at
/// `<scratch>/https/cdn.staclint.com/v1.0.0/item.json`. Each url is fetched
/// at most once.
///
/// The scratch directory is removed when the last clone of the cache is
/// dropped.
#[derive(Debug, Clone)]
pub struct SchemaCache(Arc<Inner>);

#[derive(Debug)]
struct Inner {
    dir: TempDir,
    reader: Reader,
    paths: Mutex<HashMap<Url, PathBuf>>,
}

impl SchemaCache {
    /// Creates a new cache in a fresh temporary directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validate::SchemaCache;
    ///
    /// let cache = SchemaCache::new(stac_io::Reader::new().unwrap()).unwrap();
    /// assert!(cache.root().is_dir());
    /// ```
    pub fn new(reader: Reader) -> Result<SchemaCache> {
        let dir = tempfile::Builder::new()
            .prefix("stac-validator-")
            .tempdir()?;
        tracing::debug!("created scratch directory {}", dir.path().display());
        Ok(SchemaCache(Arc::new(Inner {
            dir,
            reader,
            paths: Mutex::new(HashMap::new()),
        })))
    }

    /// Returns the scratch directory.
    pub fn root(&self) -> &Path {
        self.0.dir.path()
    }

    /// Returns the scratch path for a url, whether or not it has been fetched.
    pub fn local_path(&self, url: &Url) -> PathBuf {
        local_path(self.root(), url)
    }

    /// Returns the scratch path of a url if it has already been fetched.
    pub fn cached(&self, url: &Url) -> Option<PathBuf> {
        self.paths().get(&without_fragment(url)).cloned()
    }

    /// Returns the number of schemas in the cache.
    pub fn len(&self) -> usize {
        self.paths().len()
    }

    /// Returns true if no schemas have been fetched.
    pub fn is_empty(&self) -> bool {
        self.paths().is_empty()
    }

    /// Gets a schema, fetching and persisting it on first access.
    ///
    /// Fetch failures are returned as [Error::StacIo].
    pub fn get(&self, url: &Url) -> Result<Value> {
        let url = without_fragment(url);
        if let Some(path) = self.cached(&url) {
            tracing::debug!("cache hit: {url}");
            return read_value(&path);
        }
        let path = self.local_path(&url);
        let value = if path.is_file() {
            read_value(&path)?
        } else {
            tracing::info!("fetching schema {url}");
            let value = self.0.reader.get_json(&url)?;
            persist(&path, &value)?;
            value
        };
        let _ = self.paths().insert(url, path);
        Ok(value)
    }

    fn paths(&self) -> std::sync::MutexGuard<'_, HashMap<Url, PathBuf>> {
        self.0.paths.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Retrieve for SchemaCache {
    fn retrieve(
        &self,
        uri: &Uri<String>,
    ) -> std::result::Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let url = Url::parse(uri.as_str())?;
        if url.scheme() == "file" {
            let path = url
                .to_file_path()
                .map_err(|_| format!("invalid file uri: {uri}"))?;
            if let Some(remote) = remote_url(self.root(), &path) {
                Ok(self.get(&remote)?)
            } else {
                Ok(read_value(&path)?)
            }
        } else {
            Ok(self.get(&url)?)
        }
    }
}

fn without_fragment(url: &Url) -> Url {
    let mut url = url.clone();
    url.set_fragment(None);
    url
}

fn authority(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) if !host.is_empty() => format!("{host}_{port}"),
        (Some(host), None) if !host.is_empty() => host.to_string(),
        _ => "localhost".to_string(),
    }
}

pub(crate) fn local_path(root: &Path, url: &Url) -> PathBuf {
    let mut path = root.join(url.scheme());
    path.push(authority(url));
    if let Some(segments) = url.path_segments() {
        for segment in segments.filter(|s| !s.is_empty() && *s != "." && *s != "..") {
            path.push(segment);
        }
    }
    path
}

/// Maps a scratch path back to the url it mirrors.
///
/// Returns `None` for paths outside of the scratch directory.
pub(crate) fn remote_url(root: &Path, path: &Path) -> Option<Url> {
    let relative = path.strip_prefix(root).ok()?;
    let mut components = relative.components().map(|component| match component {
        Component::Normal(s) => s.to_str(),
        _ => None,
    });
    let scheme = components.next()??;
    let authority = components.next()??;
    let segments = components.collect::<Option<Vec<_>>>()?;
    let authority = if scheme == "file" {
        String::new()
    } else {
        match authority.rsplit_once('_') {
            Some((host, port)) if port.parse::<u16>().is_ok() => format!("{host}:{port}"),
            _ => authority.to_string(),
        }
    };
    Url::parse(&format!("{scheme}://{authority}/{}", segments.join("/"))).ok()
}

fn read_value(path: &Path) -> Result<Value> {
    let file = File::open(path)?;
    serde_json::from_reader(std::io::BufReader::new(file)).map_err(Error::from)
}

fn persist(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    value.to_json_writer(BufWriter::new(file), false)?;
    tracing::debug!("saved schema to {}", path.display());
    Ok(())
}
