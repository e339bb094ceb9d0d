//! JSON-file token storage so a `login` survives across invocations.
//!
//! The file holds a flat JSON object of string values keyed like browser
//! `localStorage`. A missing or unreadable file reads as empty; write failures
//! are logged and otherwise ignored, matching the `TokenStorage` contract.

#[cfg(test)]
#[path = "token_file_test.rs"]
mod token_file_test;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fleet::TokenStorage;
use serde_json::{Map, Value};

const DEFAULT_FILE_NAME: &str = ".billun-token.json";

#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.billun-token.json`, or the working directory without `HOME`.
    pub fn default_path() -> PathBuf {
        std::env::var_os("HOME")
            .map_or_else(|| PathBuf::from(DEFAULT_FILE_NAME), |home| PathBuf::from(home).join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Map<String, Value> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Map::new();
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "token file is not a JSON object; ignoring");
                Map::new()
            }
        }
    }

    fn write(&self, map: &Map<String, Value>) {
        if map.is_empty() {
            if let Err(error) = fs::remove_file(&self.path) {
                if error.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), %error, "token file removal failed");
                }
            }
            return;
        }
        let result = serde_json::to_string_pretty(map)
            .map_err(io::Error::from)
            .and_then(|raw| {
                if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                write_private(&self.path, &raw)
            });
        if let Err(error) = result {
            tracing::warn!(path = %self.path.display(), %error, "token file write failed");
        }
    }
}

/// Owner-only (0600 on Unix), also when the file already existed.
fn write_private(path: &Path, raw: &str) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(raw.as_bytes())
}

impl TokenStorage for FileStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.read().get(key).and_then(Value::as_str).map(str::to_owned)
    }

    fn store(&self, key: &str, value: &str) {
        let mut map = self.read();
        map.insert(key.to_owned(), Value::String(value.to_owned()));
        self.write(&map);
    }

    fn remove(&self, key: &str) {
        let mut map = self.read();
        if map.remove(key).is_some() {
            self.write(&map);
        }
    }
}
