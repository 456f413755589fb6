use crate::{Error, Result};
use serde::Serialize;
use std::io::Write;

/// Writes a value to JSON.
pub trait ToJson: Serialize {
    /// Writes a value as JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use stac_core::ToJson;
    ///
    /// let mut buf = Vec::new();
    /// json!({"type": "object"}).to_json_writer(&mut buf, false).unwrap();
    /// assert_eq!(buf, br#"{"type":"object"}"#);
    /// ```
    fn to_json_writer(&self, writer: impl Write, pretty: bool) -> Result<()> {
        if pretty {
            serde_json::to_writer_pretty(writer, self).map_err(Error::from)
        } else {
            serde_json::to_writer(writer, self).map_err(Error::from)
        }
    }
}

impl<T: Serialize> ToJson for T {}
