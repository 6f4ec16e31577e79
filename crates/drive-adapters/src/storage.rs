//! `JsonFileStorage`: un archivo `<clave>.json` por clave dentro de un
//! directorio. Es el equivalente en disco del almacenamiento local del
//! navegador para borradores y carritos.
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use drive_core::{FlowError, Storage};
use log::debug;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ruta del archivo para `key`. Cada byte fuera de `[A-Za-z0-9-]` (incluido
    /// `_`) se escribe como `_XX` en hex: ninguna clave escapa del directorio y
    /// dos claves distintas nunca comparten archivo.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut safe = String::with_capacity(key.len());
        for b in key.bytes() {
            if b.is_ascii_alphanumeric() || b == b'-' {
                safe.push(char::from(b));
            } else {
                safe.push_str(&format!("_{b:02x}"));
            }
        }
        self.dir.join(format!("{safe}.json"))
    }
}

fn io_err(action: &str, path: &Path, err: std::io::Error) -> FlowError {
    FlowError::Storage(format!("{action} {}: {err}", path.display()))
}

impl Storage for JsonFileStorage {
    fn load(&self, key: &str) -> Result<Option<Value>, FlowError> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_err("read", &path, e)),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), FlowError> {
        fs::create_dir_all(&self.dir).map_err(|e| io_err("create", &self.dir, e))?;
        let path = self.path_for(key);
        // escribir a un temporal y renombrar: un lector nunca ve un archivo a medias
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(value)?).map_err(|e| io_err("write", &tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| io_err("rename", &path, e))?;
        debug!("[storage] saved {}", path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), FlowError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err("remove", &path, e)),
        }
    }
}
