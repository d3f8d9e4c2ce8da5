//! Contrato `DataProvider` y su implementación en memoria.
//!
//! El core trata keys y paths como strings opacos; la política de
//! resolución es responsabilidad del proveedor concreto.

use dashmap::DashMap;
use serde_json::Value;

use crate::errors::DataError;

pub trait DataProvider: Send + Sync {
    /// Carga un valor por key.
    fn load(&self, key: &str) -> Result<Value, DataError>;

    /// Persiste un valor bajo una key.
    fn save(&self, key: &str, value: &Value) -> Result<(), DataError>;

    /// Lee un valor desde un path.
    fn read(&self, path: &str) -> Result<Value, DataError>;

    /// Escribe un valor en un path.
    fn write(&self, path: &str, value: &Value) -> Result<(), DataError>;
}

/// Proveedor en memoria: keys y paths comparten el mismo espacio de
/// nombres dentro de un mapa concurrente.
#[derive(Debug, Default)]
pub struct InMemoryDataProvider {
    entries: DashMap<String, Value>,
}

impl InMemoryDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DataProvider for InMemoryDataProvider {
    fn load(&self, key: &str) -> Result<Value, DataError> {
        self.entries
            .get(key)
            .map(|v| v.clone())
            .ok_or_else(|| DataError::KeyNotFound(key.to_string()))
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), DataError> {
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn read(&self, path: &str) -> Result<Value, DataError> {
        self.load(path)
    }

    fn write(&self, path: &str, value: &Value) -> Result<(), DataError> {
        self.save(path, value)
    }
}
