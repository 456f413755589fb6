use crate::ErrorRecord;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use stac_core::Type;
use url::Url;

/// The outcome of validating one document.
///
/// A message is valid if and only if it carries no error.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    path: String,
    asset_type: Option<Type>,
    schema: Option<Url>,
    error: Option<ErrorRecord>,
}

impl Message {
    /// Creates a new, valid message for a document.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validate::Message;
    ///
    /// let message = Message::new("data/simple-item.json");
    /// assert!(message.is_valid());
    /// ```
    pub fn new(path: impl ToString) -> Message {
        Message {
            path: path.to_string(),
            asset_type: None,
            schema: None,
            error: None,
        }
    }

    pub(crate) fn with_asset_type(mut self, asset_type: Type) -> Message {
        self.asset_type = Some(asset_type);
        self
    }

    pub(crate) fn with_schema(mut self, schema: Url) -> Message {
        self.schema = Some(schema);
        self
    }

    /// Records a failure, which makes this message invalid.
    pub fn with_error(mut self, error: ErrorRecord) -> Message {
        self.error = Some(error);
        self
    }

    /// Returns the local path or url of the document.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the type of the document, if it was identified.
    pub fn asset_type(&self) -> Option<Type> {
        self.asset_type
    }

    /// Returns the url of the root schema, if it was resolved.
    pub fn schema(&self) -> Option<&Url> {
        self.schema.as_ref()
    }

    /// Returns the failure, if any.
    pub fn error(&self) -> Option<&ErrorRecord> {
        self.error.as_ref()
    }

    /// Returns true if the document is valid STAC.
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Converts this message into its reported JSON object.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validate::Message;
    ///
    /// let value = Message::new("item.json").to_json();
    /// assert_eq!(value["valid_stac"], true);
    /// assert!(value.get("error_type").is_none());
    /// ```
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        let _ = object.insert("path".into(), self.path.as_str().into());
        if let Some(asset_type) = self.asset_type {
            let _ = object.insert("asset_type".into(), asset_type.as_str().into());
        }
        if let Some(schema) = &self.schema {
            let _ = object.insert("schema".into(), schema.as_str().into());
        }
        let _ = object.insert("valid_stac".into(), self.is_valid().into());
        if let Some(error) = &self.error {
            let _ = object.insert("error_type".into(), error.kind.as_str().into());
            let _ = object.insert("error_message".into(), error.message.as_str().into());
        }
        Value::Object(object)
    }
}

impl Serialize for Message {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

/// Builds the report for a run, a JSON array with one object per message.
///
/// # Examples
///
/// ```
/// use stac_validate::Message;
///
/// let report = stac_validate::report(&[Message::new("item.json")]);
/// assert_eq!(report[0]["path"], "item.json");
/// ```
pub fn report(messages: &[Message]) -> Value {
    Value::Array(messages.iter().map(Message::to_json).collect())
}
