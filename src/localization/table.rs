use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::warn;

use super::LocalizationService;

#[derive(Debug, Error)]
pub enum LocalizationError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog line {line}: {text:?}")]
    Malformed { line: usize, text: String },
}

/// In-memory localization catalog.
///
/// Catalog files are line-oriented: `key = value`, with `#` comments and
/// blank lines ignored. Values keep everything after the first `=`, so text
/// may contain further equals signs.
#[derive(Debug, Clone, Default)]
pub struct TableLocalization {
    entries: HashMap<String, String>,
}

impl TableLocalization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new();
        for (key, text) in pairs {
            table.insert(key, text);
        }
        table
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LocalizationError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LocalizationError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn parse(content: &str) -> Result<Self, LocalizationError> {
        let mut table = Self::new();
        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, text)) = line.split_once('=') else {
                return Err(LocalizationError::Malformed {
                    line: index + 1,
                    text: raw.to_string(),
                });
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(LocalizationError::Malformed {
                    line: index + 1,
                    text: raw.to_string(),
                });
            }
            table.insert(key, text.trim());
        }
        Ok(table)
    }

    fn substitute(template: &str, args: &[String]) -> String {
        let mut text = template.to_string();
        for (index, arg) in args.iter().enumerate() {
            text = text.replace(&format!("{{{index}}}"), arg);
        }
        text
    }
}

impl LocalizationService for TableLocalization {
    fn get(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(text) => text.clone(),
            None => {
                warn!(key, "missing localization key");
                key.to_string()
            }
        }
    }

    fn get_args(&self, key: &str, args: &[String]) -> String {
        Self::substitute(&self.get(key), args)
    }
}
