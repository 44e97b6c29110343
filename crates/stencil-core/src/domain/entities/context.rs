use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::DomainError;
use crate::domain::options::FRONT_MATTER_KEY;
use crate::domain::value_objects::ValueKind;

/// Per-file side-channel metadata.
///
/// Owned by the pipeline and attached to each [`FileInfo`](super::FileInfo).
/// Values are untyped; the renderer only reads them through the typed
/// accessors [`Context::template_name`] and [`Context::front_matter`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(BTreeMap<String, Value>);

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Serialize `value` and store it under `key`.
    pub fn insert_serialized<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Option<Value>, serde_json::Error> {
        let value = serde_json::to_value(value)?;
        Ok(self.0.insert(key.into(), value))
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Template selected for this file under `keyword`.
    ///
    /// Absent and `null` both mean "no template". Any other non-string value
    /// is a [`DomainError::TypeMismatch`].
    pub fn template_name(&self, keyword: &str) -> Result<Option<&str>, DomainError> {
        match self.0.get(keyword) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(name)) => Ok(Some(name)),
            Some(other) => Err(DomainError::TypeMismatch {
                keyword: keyword.to_owned(),
                found: ValueKind::of(other).as_str(),
            }),
        }
    }

    /// Front matter of this file, if any. `null` counts as absent.
    pub fn front_matter(&self) -> Option<&Value> {
        self.0.get(FRONT_MATTER_KEY).filter(|v| !v.is_null())
    }

    pub fn set_front_matter(&mut self, front_matter: impl Into<Value>) -> Option<Value> {
        self.insert(FRONT_MATTER_KEY, front_matter)
    }
}

impl From<BTreeMap<String, Value>> for Context {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
