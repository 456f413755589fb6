use crate::{
    ErrorKind, ErrorRecord, Message, Result, SchemaBundle, SchemaCache, error::Error, resolve,
};
use serde_json::Value;
use stac_core::{Document, Version};
use stac_io::Reader;
use url::Url;

/// The default host of versioned STAC schemas.
pub const DEFAULT_SPEC_HOST: &str = "https://cdn.staclint.com";

/// What to validate, and against which schemas.
#[derive(Debug, Clone)]
pub struct ValidationRequest {
    source: String,
    version: Version,
    spec_host: Url,
}

/// A structure for validating STAC documents.
///
/// All fetched schemas are cached in a scratch directory, so if you're
/// validating multiple documents you should re-use the same [Validator]. The
/// scratch directory is removed when the validator is dropped.
#[derive(Debug)]
pub struct Validator {
    reader: Reader,
    cache: SchemaCache,
}

impl ValidationRequest {
    /// Creates a request to validate a local path or url against the
    /// `master` schemas on the [DEFAULT_SPEC_HOST].
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validate::ValidationRequest;
    ///
    /// let request = ValidationRequest::new("data/simple-item.json").unwrap();
    /// assert_eq!(request.version(), &"master");
    /// ```
    pub fn new(source: impl AsRef<str>) -> Result<ValidationRequest> {
        Ok(ValidationRequest {
            source: source.as_ref().trim().to_string(),
            version: Version::default(),
            spec_host: Url::parse(DEFAULT_SPEC_HOST)?,
        })
    }

    /// Sets the requested STAC version.
    pub fn with_version(mut self, version: Version) -> ValidationRequest {
        self.version = version;
        self
    }

    /// Sets the schema host.
    ///
    /// Schemas are expected at `{spec_host}/{version}/{type}.json`.
    pub fn with_spec_host(mut self, spec_host: Url) -> ValidationRequest {
        self.spec_host = spec_host;
        self
    }

    /// Returns the local path or url of the document.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the requested STAC version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Returns the schema host.
    pub fn spec_host(&self) -> &Url {
        &self.spec_host
    }
}

impl Validator {
    /// Creates a new validator with its own scratch directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validate::Validator;
    ///
    /// let validator = Validator::new().unwrap();
    /// ```
    pub fn new() -> Result<Validator> {
        Validator::with_reader(Reader::new()?)
    }

    /// Creates a new validator that fetches documents and schemas with the
    /// given reader.
    pub fn with_reader(reader: Reader) -> Result<Validator> {
        let cache = SchemaCache::new(reader.clone())?;
        Ok(Validator { reader, cache })
    }

    /// Validates a single document.
    ///
    /// Failures to read the document, to get its schema, or to validate it
    /// are recorded in the returned [Message]. Connection failures while
    /// reading the document, JSON that cannot be identified as a STAC
    /// object, and failures to get common metadata schemas are returned as
    /// errors.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use stac_validate::{ValidationRequest, Validator};
    ///
    /// let validator = Validator::new().unwrap();
    /// let request = ValidationRequest::new("data/simple-item.json").unwrap();
    /// let message = validator.validate(&request).unwrap();
    /// assert!(message.is_valid());
    /// ```
    pub fn validate(&self, request: &ValidationRequest) -> Result<Message> {
        let span = tracing::info_span!("validate", source = request.source());
        let _enter = span.enter();

        let message = Message::new(request.source());
        let value = match self.reader.read_json(request.source()) {
            Ok(value) => value,
            Err(err) if err.is_invalid_json() => {
                tracing::warn!("{err}");
                return Ok(message.with_error(ErrorRecord::new(
                    ErrorKind::InvalidJson,
                    format!("{} is not Valid JSON", request.source()),
                )));
            }
            Err(err) if err.is_file_not_found() => {
                tracing::warn!("{err}");
                return Ok(message.with_error(ErrorRecord::new(
                    ErrorKind::FileNotFound,
                    format!("{} cannot be found", request.source()),
                )));
            }
            Err(err) => return Err(err.into()),
        };

        let document = Document::new(value)?;
        let message = message.with_asset_type(document.r#type());
        let version = reconcile(request.version(), document.version());
        let bundle = match resolve(
            &self.cache,
            document.r#type(),
            &version,
            request.spec_host(),
        ) {
            Ok(bundle) => bundle,
            Err(Error::Schema { url, source }) => {
                tracing::warn!("cannot get schema {url}: {source}");
                return Ok(message.with_error(ErrorRecord::new(
                    ErrorKind::SchemaError,
                    "Cannot get schema to validate against",
                )));
            }
            Err(err) => return Err(err),
        };

        let message = message.with_schema(bundle.url().clone());
        match validate_document(&document, &bundle, &self.cache) {
            Some(record) => {
                tracing::info!("{} is not valid: {}", request.source(), record.message);
                Ok(message.with_error(record))
            }
            None => {
                tracing::info!("{} is valid against {}", request.source(), bundle.url());
                Ok(message)
            }
        }
    }
}

/// Validates a document against a resolved schema bundle.
///
/// References in the schema are retrieved through the cache. Returns the
/// first failure, or `None` if the document is valid.
pub fn validate_document(
    document: &Document,
    bundle: &SchemaBundle,
    cache: &SchemaCache,
) -> Option<ErrorRecord> {
    // Relative references resolve against the schema's own url.
    let mut schema = bundle.schema().clone();
    if let Value::Object(ref mut object) = schema {
        if !object.contains_key("$id") {
            let _ = object.insert("$id".to_string(), bundle.url().as_str().into());
        }
    }
    let validator = match jsonschema::options()
        .with_retriever(cache.clone())
        .build(&schema)
    {
        Ok(validator) => validator,
        Err(error) => return Some(ErrorRecord::from_build_error(&error)),
    };
    validator
        .iter_errors(document.value())
        .next()
        .map(|error| ErrorRecord::from_validation_error(&error))
}

/// Decides which version to validate against when the document declares a
/// different one than requested.
///
/// A requested branch (`master` or `dev`) gives way to the document's
/// version. An explicitly requested version wins.
fn reconcile(requested: &Version, derived: Option<&Version>) -> Version {
    match derived {
        Some(derived) if derived != requested => {
            if requested.is_branch() {
                tracing::warn!(
                    "STAC version {derived} is different than the {requested} branch, validating against {derived}"
                );
                derived.clone()
            } else {
                tracing::info!(
                    "the requested STAC version ({requested}) is different than the document's version ({derived})"
                );
                requested.clone()
            }
        }
        _ => requested.clone(),
    }
}
