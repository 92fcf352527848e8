use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::LoadError;
use crate::schema::ActivityRecord;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the activities document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Source::Url(trimmed.to_string())
        } else {
            Source::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{url}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Loader {
    timeout: Duration,
    use_proxy: bool,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl Loader {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            use_proxy: true,
        }
    }

    /// Ignore proxy settings from the environment and connect directly.
    pub fn direct(self) -> Self {
        Self {
            use_proxy: false,
            ..self
        }
    }

    /// Single fetch and parse. No retry.
    pub fn load(&self, source: &Source) -> Result<Vec<ActivityRecord>, LoadError> {
        let body = match source {
            Source::File(path) => fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.display().to_string(),
                source,
            })?,
            Source::Url(url) => self.fetch(url)?,
        };
        parse_document(&body)
    }

    fn fetch(&self, url: &str) -> Result<String, LoadError> {
        let http = |source| LoadError::Http {
            url: url.to_string(),
            source,
        };
        let mut builder = reqwest::blocking::Client::builder().timeout(self.timeout);
        if !self.use_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(http)?;
        let resp = client.get(url).send().map_err(http)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        resp.text().map_err(http)
    }
}

/// Parse a JSON array of activity entries, keeping every entry.
pub fn parse_document(body: &str) -> Result<Vec<ActivityRecord>, LoadError> {
    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::Array(entries) => Ok(entries.into_iter().map(ActivityRecord::from_value).collect()),
        other => Err(LoadError::NotAnArray {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
