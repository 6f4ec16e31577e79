//! Colaborador de persistencia clave-valor (blobs JSON).
//!
//! Equivale al almacenamiento local del navegador que usan los flujos tipo
//! checkout. El core sólo necesita `load`/`save`/`remove`; las
//! implementaciones en disco viven en `drive-adapters`.
use std::sync::Arc;

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::FlowError;

pub trait Storage: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<Value>, FlowError>;
    fn save(&self, key: &str, value: &Value) -> Result<(), FlowError>;
    fn remove(&self, key: &str) -> Result<(), FlowError>;
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn load(&self, key: &str) -> Result<Option<Value>, FlowError> {
        (**self).load(key)
    }
    fn save(&self, key: &str, value: &Value) -> Result<(), FlowError> {
        (**self).save(key, value)
    }
    fn remove(&self, key: &str) -> Result<(), FlowError> {
        (**self).remove(key)
    }
}

/// Lectura tipada: `None` si la clave no existe.
pub fn load_as<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>, FlowError> {
    match storage.load(key)? {
        Some(v) => Ok(Some(serde_json::from_value(v)?)),
        None => Ok(None),
    }
}

pub fn save_as<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) -> Result<(), FlowError> {
    storage.save(key, &serde_json::to_value(value)?)
}

#[derive(Debug, Default)]
pub struct InMemoryStorage {
    inner: DashMap<String, Value>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Storage for InMemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Value>, FlowError> {
        Ok(self.inner.get(key).map(|v| v.value().clone()))
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), FlowError> {
        self.inner.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), FlowError> {
        self.inner.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Cart {
        items: Vec<String>,
    }

    #[test]
    fn typed_roundtrip_and_missing_key() {
        let storage = InMemoryStorage::new();
        assert_eq!(load_as::<Cart>(&storage, "cart").unwrap(), None);
        save_as(&storage, "cart", &Cart { items: vec!["spoiler".into()] }).unwrap();
        assert_eq!(load_as::<Cart>(&storage, "cart").unwrap(), Some(Cart { items: vec!["spoiler".into()] }));
        storage.remove("cart").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn mismatched_shape_is_internal_error() {
        let storage = InMemoryStorage::new();
        storage.save("cart", &serde_json::json!(42)).unwrap();
        assert!(matches!(load_as::<Cart>(&storage, "cart"), Err(FlowError::Internal(_))));
    }
}
