use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::core::error::AppError;

/// Raw `KEY=VALUE` pairs read from a dotenv-style file.
///
/// Lines that do not look like an assignment are skipped without complaint,
/// so comments, blank lines and stray text never fail a run. One leading and
/// one trailing double quote are stripped from each value, independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    values: HashMap<String, String>,
}

impl EnvFile {
    /// Reads `path`; a missing file is treated as an empty configuration.
    pub fn read(path: &Path) -> Result<Self, AppError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "env file not found");
                Ok(Self::default())
            }
            Err(err) => Err(AppError::configuration(format!(
                "failed to read {}: {err}",
                path.display()
            ))),
        }
    }

    pub fn parse(content: &str) -> Self {
        let values = content
            .lines()
            .filter_map(parse_line)
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    let key_len = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(line.len());
    if key_len == 0 {
        return None;
    }

    let (key, rest) = line.split_at(key_len);
    let value = rest.trim_start().strip_prefix('=')?.trim_start();

    Some((key, strip_quotes(value)))
}

fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}
