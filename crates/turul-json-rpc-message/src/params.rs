use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::wire_value;
use crate::error::ParamError;

/// Parameters of a request or notification
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Params {
    /// No `params` member (or an explicit `null`)
    #[default]
    Null,
    /// Positional parameters as an array
    Array(Vec<Value>),
    /// Named parameters as an object
    Map(HashMap<String, Value>),
}

impl Params {
    /// Whether `value` may appear as a `params` member
    pub fn accepts(value: &Value) -> bool {
        matches!(value, Value::Null | Value::Array(_) | Value::Object(_))
    }

    /// Build from the raw `params` member. Elements are stored verbatim.
    pub(crate) fn from_member(value: Option<&Value>) -> Result<Self, &'static str> {
        match value {
            None | Some(Value::Null) => Ok(Params::Null),
            Some(Value::Array(items)) => Ok(Params::Array(items.clone())),
            Some(Value::Object(map)) => Ok(Params::Map(
                map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            )),
            Some(_) => Err("params must be an array, an object or null"),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Params::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Params::Array(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Params::Map(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Params::Null => 0,
            Params::Array(items) => items.len(),
            Params::Map(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check for a named parameter. Never fails; positional sets have no names.
    pub fn has(&self, key: &str) -> bool {
        match self {
            Params::Map(map) => map.contains_key(key),
            _ => false,
        }
    }

    /// Check for a positional parameter. Never fails; named sets have no positions.
    pub fn has_index(&self, index: usize) -> bool {
        match self {
            Params::Array(items) => index < items.len(),
            _ => false,
        }
    }

    /// Get a named parameter
    pub fn get(&self, key: &str) -> Result<&Value, ParamError> {
        let found = match self {
            Params::Map(map) => map.get(key),
            _ => None,
        };
        found.ok_or_else(|| ParamError::MissingKey(key.to_string()))
    }

    /// Get a positional parameter
    pub fn get_index(&self, index: usize) -> Result<&Value, ParamError> {
        let found = match self {
            Params::Array(items) => items.get(index),
            _ => None,
        };
        found.ok_or(ParamError::MissingIndex(index))
    }

    /// Get a named parameter coerced into `T`
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, ParamError> {
        let raw = self.get(key)?;
        T::deserialize(raw).map_err(|source| ParamError::TypeMismatch {
            key: key.to_string(),
            source,
        })
    }

    /// Get a positional parameter coerced into `T`
    pub fn get_index_as<T: DeserializeOwned>(&self, index: usize) -> Result<T, ParamError> {
        let raw = self.get_index(index)?;
        T::deserialize(raw).map_err(|source| ParamError::TypeMismatch {
            key: index.to_string(),
            source,
        })
    }

    /// Get a named parameter, or `default` when it is absent.
    /// A present value of the wrong type is still an error.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, ParamError> {
        if self.has(key) {
            self.get_as(key)
        } else {
            Ok(default)
        }
    }

    /// Get a positional parameter, or `default` when it is absent
    pub fn get_index_or<T: DeserializeOwned>(
        &self,
        index: usize,
        default: T,
    ) -> Result<T, ParamError> {
        if self.has_index(index) {
            self.get_index_as(index)
        } else {
            Ok(default)
        }
    }

    pub fn to_json(&self) -> Value {
        wire_value(self)
    }
}

impl From<HashMap<String, Value>> for Params {
    fn from(map: HashMap<String, Value>) -> Self {
        Params::Map(map)
    }
}

impl From<Vec<Value>> for Params {
    fn from(items: Vec<Value>) -> Self {
        Params::Array(items)
    }
}

impl<'de> Deserialize<'de> for Params {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Params::from_member(Some(&value)).map_err(serde::de::Error::custom)
    }
}
