//! `JsonDirProvider`: persistencia de salidas de nodos como archivos
//! JSON bajo un directorio raíz.
//!
//! Resolución key → path: cada segmento separado por `/` en la key se
//! vuelve un nivel de directorio y el último segmento recibe extensión
//! `.json`. Así la key de checkpoint `"pipeline/nodo"` termina en
//! `<root>/pipeline/nodo.json`, navegable a mano entre corridas.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use dag_core::{DataError, DataProvider};

#[derive(Debug, Clone)]
pub struct JsonDirProvider {
    root: PathBuf,
}

impl JsonDirProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let mut path = self.root.clone();
        let mut segments = key.split('/').peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                path.push(format!("{segment}.json"));
            } else {
                path.push(segment);
            }
        }
        path
    }

    fn read_file(&self, path: &Path) -> Result<Value, DataError> {
        let bytes = fs::read(path).map_err(|source| DataError::Io { path: path.display().to_string(),
                                                                    source })?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn write_file(&self, path: &Path, value: &Value) -> Result<(), DataError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| DataError::Io { path: parent.display().to_string(),
                                                                        source })?;
        }
        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(path, bytes).map_err(|source| DataError::Io { path: path.display().to_string(),
                                                                source })?;
        debug!(path = %path.display(), "wrote json file");
        Ok(())
    }
}

impl DataProvider for JsonDirProvider {
    /// Un archivo ausente se reporta como `KeyNotFound`, no como error
    /// de IO: para el orquestador es el mismo caso que una key nunca
    /// guardada en memoria.
    fn load(&self, key: &str) -> Result<Value, DataError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Err(DataError::KeyNotFound(key.to_string()));
        }
        self.read_file(&path)
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), DataError> {
        self.write_file(&self.key_path(key), value)
    }

    /// `read`/`write` operan sobre paths literales relativos a la raíz,
    /// sin la convención `.json` de las keys.
    fn read(&self, path: &str) -> Result<Value, DataError> {
        self.read_file(&self.root.join(path))
    }

    fn write(&self, path: &str, value: &Value) -> Result<(), DataError> {
        self.write_file(&self.root.join(path), value)
    }
}
