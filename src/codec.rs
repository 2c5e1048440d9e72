//! Tagged JSON encoding for non-native config values
//!
//! Plain JSON cannot carry tuples, sets, or byte strings, so those ride in
//! tagged wrapper objects while everything else passes through structurally:
//!
//! | Value kind | JSON encoding |
//! |------------|---------------|
//! | Null       | `null` |
//! | Bool       | `true`/`false` |
//! | Int        | number |
//! | Float      | number (non-finite floats are rejected) |
//! | Str        | `"..."` |
//! | Bytes      | `{"__type__":"bytes","data":"<base64>"}` |
//! | List       | `[...]` |
//! | Tuple      | `{"__type__":"tuple","items":[...]}` |
//! | Set        | `{"__type__":"set","items":[...]}` |
//! | Map        | `{...}` |
//!
//! Both directions are pure and stateless, and decode descends into arrays
//! as well as objects, so tagged wrappers are recognized at any depth.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde_json::{Map, Value as Json};
use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::value::Value;

/// Marker key identifying a tagged wrapper object.
pub const TYPE_KEY: &str = "__type__";
const TAG_TUPLE: &str = "tuple";
const TAG_SET: &str = "set";
const TAG_BYTES: &str = "bytes";
const ITEMS_KEY: &str = "items";
const DATA_KEY: &str = "data";

/// Encode a value into a JSON-representable tree.
///
/// Identity on the JSON-native subset; tuples, sets, and byte strings become
/// tagged wrappers. Fails with [`ConfigError::UnsupportedType`] for the two
/// values this file format cannot carry faithfully: non-finite floats, and
/// maps whose keys collide with the wrapper marker.
pub fn encode(value: &Value) -> Result<Json, ConfigError> {
    match value {
        Value::Null => Ok(Json::Null),
        Value::Bool(b) => Ok(Json::Bool(*b)),
        Value::Int(i) => Ok(Json::Number((*i).into())),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Json::Number)
            .ok_or_else(|| {
                ConfigError::UnsupportedType(format!("float {f} has no JSON representation"))
            }),
        Value::Str(s) => Ok(Json::String(s.clone())),
        Value::Bytes(data) => {
            let mut wrapper = Map::with_capacity(2);
            wrapper.insert(TYPE_KEY.to_string(), Json::String(TAG_BYTES.to_string()));
            wrapper.insert(DATA_KEY.to_string(), Json::String(BASE64.encode(data)));
            Ok(Json::Object(wrapper))
        }
        Value::List(items) => Ok(Json::Array(encode_items(items)?)),
        Value::Tuple(items) => encode_tagged(TAG_TUPLE, items),
        Value::Set(items) => encode_tagged(TAG_SET, items),
        Value::Map(entries) => {
            if entries.contains_key(TYPE_KEY) {
                return Err(ConfigError::UnsupportedType(format!(
                    "map key '{TYPE_KEY}' collides with the tagged-wrapper marker"
                )));
            }
            let mut object = Map::with_capacity(entries.len());
            for (key, entry) in entries {
                object.insert(key.clone(), encode(entry)?);
            }
            Ok(Json::Object(object))
        }
    }
}

fn encode_items(items: &[Value]) -> Result<Vec<Json>, ConfigError> {
    items.iter().map(encode).collect()
}

fn encode_tagged(tag: &str, items: &[Value]) -> Result<Json, ConfigError> {
    let mut wrapper = Map::with_capacity(2);
    wrapper.insert(TYPE_KEY.to_string(), Json::String(tag.to_string()));
    wrapper.insert(ITEMS_KEY.to_string(), Json::Array(encode_items(items)?));
    Ok(Json::Object(wrapper))
}

/// Decode a JSON tree back into a value. Inverse of [`encode`].
///
/// Objects carrying the `__type__` marker dispatch on it; other objects and
/// arrays are walked recursively. Numbers that fit `i64` decode as `Int`,
/// everything else as `Float`.
pub fn decode(node: &Json) -> Result<Value, ConfigError> {
    match node {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else {
                n.as_f64().map(Value::Float).ok_or_else(|| {
                    ConfigError::CorruptConfig(format!("number {n} is out of range"))
                })
            }
        }
        Json::String(s) => Ok(Value::Str(s.clone())),
        Json::Array(items) => Ok(Value::List(decode_items(items)?)),
        Json::Object(object) => match object.get(TYPE_KEY) {
            Some(marker) => decode_tagged(marker, object),
            None => {
                let mut entries = BTreeMap::new();
                for (key, entry) in object {
                    entries.insert(key.clone(), decode(entry)?);
                }
                Ok(Value::Map(entries))
            }
        },
    }
}

fn decode_items(items: &[Json]) -> Result<Vec<Value>, ConfigError> {
    items.iter().map(decode).collect()
}

fn decode_tagged(marker: &Json, object: &Map<String, Json>) -> Result<Value, ConfigError> {
    let Some(tag) = marker.as_str() else {
        return Err(ConfigError::CorruptConfig(format!(
            "'{TYPE_KEY}' marker must be a string, got {marker}"
        )));
    };
    match tag {
        TAG_TUPLE | TAG_SET => {
            let items = object
                .get(ITEMS_KEY)
                .and_then(Json::as_array)
                .ok_or_else(|| {
                    ConfigError::CorruptConfig(format!(
                        "'{tag}' wrapper is missing its '{ITEMS_KEY}' array"
                    ))
                })?;
            let decoded = decode_items(items)?;
            if tag == TAG_TUPLE {
                Ok(Value::Tuple(decoded))
            } else {
                Ok(Value::set(decoded))
            }
        }
        TAG_BYTES => {
            let data = object.get(DATA_KEY).and_then(Json::as_str).ok_or_else(|| {
                ConfigError::CorruptConfig(format!(
                    "'{TAG_BYTES}' wrapper is missing its '{DATA_KEY}' string"
                ))
            })?;
            let bytes = BASE64.decode(data).map_err(|e| {
                ConfigError::CorruptConfig(format!("invalid base64 in '{TAG_BYTES}' wrapper: {e}"))
            })?;
            Ok(Value::Bytes(bytes))
        }
        other => Err(ConfigError::CorruptConfig(format!(
            "unrecognized '{TYPE_KEY}' marker '{other}'"
        ))),
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        encode(self)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}
