//! Collection protocol over list, map, and string values.
//!
//! Indexing is two explicit call shapes, `get` and `set`; there is no
//! read/write-ambiguous `[]` that resolves on later use.
//!
//! All mutating operations take `&self`: list and map payloads are shared
//! and mutate through their lock, so the change is visible through every
//! alias of the payload.

use crate::errors::{
    empty_collection, index_out_of_range, key_not_found, kind_mismatch, ValueError, ValueResult,
};
use crate::value::Value;

impl Value {
    /// Element count for lists and maps, character count for strings.
    ///
    /// Custom values delegate to the extension.
    pub fn size(&self) -> Result<usize, ValueError> {
        match self {
            Value::Str(s) => Ok(s.chars().count()),
            Value::List(items) => Ok(items.read().len()),
            Value::Map(map) => Ok(map.read().len()),
            Value::Custom(ext) => ext.size(),
            other => Err(kind_mismatch("collection", &other.type_name())),
        }
    }

    /// Whether `key` is present.
    ///
    /// On a list, true when the key coerces to an index in `0..len`; on a
    /// map, true when the key's text is a member. Never fails for a list or
    /// map receiver — a key of the wrong kind simply reports false.
    pub fn exists(&self, key: &Value) -> Result<bool, ValueError> {
        match self {
            Value::List(items) => {
                let Ok(index) = key.to_int() else {
                    return Ok(false);
                };
                let len = items.read().len();
                Ok(index >= 0 && (index as usize) < len)
            }
            Value::Map(map) => {
                let Ok(text) = key.to_text() else {
                    return Ok(false);
                };
                Ok(map.read().contains_key(&text))
            }
            Value::Custom(ext) => ext.exists(key),
            other => Err(kind_mismatch("collection", &other.type_name())),
        }
    }

    /// Read the element at `key`.
    ///
    /// The returned value aliases the stored payload (for composite kinds).
    /// Fails with IndexOutOfRange on a list and KeyNotFound on a map.
    pub fn get(&self, key: &Value) -> ValueResult {
        match self {
            Value::List(items) => {
                let index = key.to_int()?;
                let items = items.read();
                let len = items.len();
                usize::try_from(index)
                    .ok()
                    .and_then(|i| items.get(i))
                    .cloned()
                    .ok_or_else(|| index_out_of_range(index, len))
            }
            Value::Map(map) => {
                let text = key.to_text()?;
                map.read()
                    .get(&text)
                    .cloned()
                    .ok_or_else(|| key_not_found(&text))
            }
            Value::Custom(ext) => ext.get(key),
            other => Err(kind_mismatch("collection", &other.type_name())),
        }
    }

    /// Write `value` at `key`.
    ///
    /// Lists overwrite in place and require an in-range index (no auto-grow);
    /// maps insert-or-overwrite.
    pub fn set(&self, key: &Value, value: Value) -> Result<(), ValueError> {
        match self {
            Value::List(items) => {
                let index = key.to_int()?;
                let mut items = items.write();
                let len = items.len();
                match usize::try_from(index).ok().and_then(|i| items.get_mut(i)) {
                    Some(slot) => {
                        *slot = value;
                        Ok(())
                    }
                    None => Err(index_out_of_range(index, len)),
                }
            }
            Value::Map(map) => {
                let text = key.to_text()?;
                map.write().insert(text, value);
                Ok(())
            }
            Value::Custom(ext) => ext.set(key, value),
            other => Err(kind_mismatch("collection", &other.type_name())),
        }
    }

    /// Append `item` to a list's tail.
    pub fn push(&self, item: Value) -> Result<(), ValueError> {
        match self {
            Value::List(items) => {
                items.write().push(item);
                Ok(())
            }
            Value::Custom(ext) => ext.push(item),
            other => Err(kind_mismatch("list", &other.type_name())),
        }
    }

    /// Remove and return a list's head element.
    ///
    /// Fails with EmptyCollection when the list has none.
    pub fn shift(&self) -> ValueResult {
        match self {
            Value::List(items) => {
                let mut items = items.write();
                if items.is_empty() {
                    Err(empty_collection("shift"))
                } else {
                    Ok(items.remove(0))
                }
            }
            Value::Custom(ext) => ext.shift(),
            other => Err(kind_mismatch("list", &other.type_name())),
        }
    }

    /// Concatenate a list's elements' text with `delimiter` between.
    pub fn join(&self, delimiter: &Value) -> ValueResult {
        let Value::List(items) = self else {
            return Err(kind_mismatch("list", &self.type_name()));
        };
        let delimiter = delimiter.to_text()?;
        let items = items.read();
        let mut parts = Vec::with_capacity(items.len());
        for item in items.iter() {
            parts.push(item.to_text()?);
        }
        Ok(Value::string(parts.join(&delimiter)))
    }

    /// Split a string into a list of strings.
    ///
    /// An empty delimiter splits on runs of ASCII whitespace; any other
    /// delimiter splits on exact occurrences.
    pub fn split(&self, delimiter: &Value) -> ValueResult {
        let Value::Str(s) = self else {
            return Err(kind_mismatch("str", &self.type_name()));
        };
        let delimiter = delimiter.to_text()?;
        let parts: Vec<Value> = if delimiter.is_empty() {
            s.split_ascii_whitespace().map(Value::string).collect()
        } else {
            s.split(&delimiter).map(Value::string).collect()
        };
        Ok(Value::list(parts))
    }

    /// A map's keys as a list of strings, in unspecified order.
    pub fn keys(&self) -> ValueResult {
        let Value::Map(map) = self else {
            return Err(kind_mismatch("map", &self.type_name()));
        };
        let keys: Vec<Value> = map.read().keys().cloned().map(Value::string).collect();
        Ok(Value::list(keys))
    }
}
