//! JSON save/load helpers
//!
//! Small wrappers shared by anything that keeps a document on disk:
//! missing or corrupt files become defaults on read, and writes create the
//! parent directory before touching the file.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read a JSON document, falling back to `T::default()` when the file is
/// missing or its content does not parse. Corruption is logged, not
/// propagated.
pub fn load_json_or_default<T: Default + DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("ignoring malformed {}: {err}", path.display());
                T::default()
            }
        },
        Err(_) => T::default(),
    }
}

/// Serialize `data` as pretty-printed JSON and write it to `path`,
/// creating the parent directory if needed.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    fs::write(path, json)
}
