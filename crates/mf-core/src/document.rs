//! Loosely-typed metadata documents produced by the external collaborators.
//!
//! Neither exiftool nor mediainfo guarantees a schema: field presence and
//! value types vary per file type and per tool version. Both documents are
//! therefore kept as raw JSON and read through safe getters that return
//! `None` on a missing key, a `null` value, or a type mismatch.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Render a JSON scalar the way a human would write it.
///
/// Strings are returned as-is, booleans as `true`/`false`, integers in
/// decimal, and floats without a fractional part when the value is integral
/// (`3.0` renders as `3`). Very small or very large floats use exponent form.
/// Arrays and objects render as compact JSON.
/// `null` has no text form.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i.to_string());
            }
            if let Some(u) = n.as_u64() {
                return Some(u.to_string());
            }
            n.as_f64().map(float_text)
        }
        other => Some(other.to_string()),
    }
}

/// Shortest round-trip form of `f`, switching to exponent notation
/// (`1e-05`, `1.5e+21`) when the decimal exponent is below -4 or at least 21.
fn float_text(f: f64) -> String {
    if f != 0.0 && f.is_finite() {
        let sci = format!("{f:e}");
        if let Some((mantissa, exp)) = sci.split_once('e') {
            if let Ok(exp) = exp.parse::<i32>() {
                if !(-4..21).contains(&exp) {
                    let sign = if exp < 0 { '-' } else { '+' };
                    return format!("{mantissa}e{sign}{:02}", exp.abs());
                }
            }
        }
    }
    f.to_string()
}

fn lookup<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

// ---------------------------------------------------------------------------
// Tag document
// ---------------------------------------------------------------------------

/// Flat, field-oriented description of a file's embedded tags.
///
/// Serializes transparently as the underlying JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagDocument(Map<String, Value>);

impl TagDocument {
    /// Wrap an already-parsed JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parse exiftool `-j` output.
    ///
    /// exiftool emits an array with one object per input file; the first
    /// element is taken. A bare object is accepted as well.
    pub fn from_json(source: &str, json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            Error::source_unavailable(source, format!("JSON parse error: {e}"))
        })?;

        match value {
            Value::Array(items) => match items.into_iter().next() {
                Some(Value::Object(fields)) => Ok(Self(fields)),
                Some(_) => Err(Error::source_unavailable(
                    source,
                    "first array element is not an object",
                )),
                None => Err(Error::source_unavailable(source, "no tag metadata found")),
            },
            Value::Object(fields) => {
                tracing::debug!(source, "tag output is a bare object");
                Ok(Self(fields))
            }
            _ => Err(Error::source_unavailable(
                source,
                "expected a JSON array or object",
            )),
        }
    }

    /// Raw value for `key`, treating `null` as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        lookup(&self.0, key)
    }

    /// Whether `key` carries a non-null value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Value for `key` if it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Value for `key` if it is a JSON number.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Natural string form of the value for `key`.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(value_text)
    }

    /// Borrow the underlying JSON object.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for TagDocument {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

// ---------------------------------------------------------------------------
// Track document
// ---------------------------------------------------------------------------

/// Hierarchical description of a file's tracks (`media.track[]`).
///
/// The raw value is kept verbatim for downstream consumers; only the two
/// fixed levels (root → track list → track fields) are interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackDocument(Value);

impl TrackDocument {
    /// Wrap an already-parsed JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse mediainfo `--Output=JSON` output.
    ///
    /// Only the top level must be a JSON object; a missing or malformed track
    /// list simply yields no tracks.
    pub fn from_json(source: &str, json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            Error::source_unavailable(source, format!("JSON parse error: {e}"))
        })?;

        if !value.is_object() {
            return Err(Error::source_unavailable(source, "expected a JSON object"));
        }

        Ok(Self(value))
    }

    /// Iterate over the track objects, skipping entries that are not objects.
    ///
    /// A `track` value holding a single object is read as a one-element list.
    pub fn tracks(&self) -> impl Iterator<Item = Track<'_>> {
        let list: &[Value] = match self.0.get("media").and_then(|m| m.get("track")) {
            Some(Value::Array(items)) => items.as_slice(),
            Some(single @ Value::Object(_)) => std::slice::from_ref(single),
            _ => &[],
        };

        list.iter().filter_map(|v| v.as_object().map(Track))
    }

    /// First track whose `@type` equals `kind`.
    pub fn first_of_kind(&self, kind: &str) -> Option<Track<'_>> {
        self.tracks().find(|t| t.kind() == Some(kind))
    }

    /// Borrow the raw JSON value.
    pub fn raw(&self) -> &Value {
        &self.0
    }
}

/// Borrowed view of a single track object.
#[derive(Debug, Clone, Copy)]
pub struct Track<'a>(&'a Map<String, Value>);

impl<'a> Track<'a> {
    /// The `@type` discriminator (`General`, `Video`, `Audio`, ...).
    pub fn kind(&self) -> Option<&'a str> {
        self.get_str("@type")
    }

    /// Raw value for `key`, treating `null` as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        lookup(self.0, key)
    }

    /// Value for `key` if it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Natural string form of the value for `key`.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(value_text)
    }
}
