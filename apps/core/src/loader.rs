//! Named JSON resources and the fail-soft loading policy shared by every view.
//!
//! Fetching is platform specific (browser `fetch` in the web crate, Tokio file
//! reads in the terminal previewer); both hand the raw body to [`parse`] and
//! collapse any failure with [`or_default`], which logs and falls back to an
//! empty value. There is no retry.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::{HistoryDocument, Sign, Version};

/// Static documents served next to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Versions,
    Signs,
    History,
}

impl Resource {
    pub const ALL: [Self; 3] = [Self::Versions, Self::Signs, Self::History];

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Versions => "versions.json",
            Self::Signs => "signs.json",
            Self::History => "history.json",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {resource}: {message}")]
    Network { resource: String, message: String },

    #[error("failed to fetch {resource}: HTTP {status}")]
    Status { resource: String, status: u16 },

    #[error("failed to parse {resource}: {source}")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode {resource}: {message}")]
    Decode { resource: String, message: String },

    #[error("failed to read {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub fn network(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            resource: resource.into(),
            message: message.into(),
        }
    }

    pub fn decode(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            resource: resource.into(),
            message: message.into(),
        }
    }
}

/// Parse a fetched body as JSON.
pub fn parse<T: DeserializeOwned>(resource: &str, body: &str) -> Result<T, LoadError> {
    serde_json::from_str(body).map_err(|source| LoadError::Parse {
        resource: resource.to_string(),
        source,
    })
}

/// Collapse a load result into its value, logging and substituting the empty
/// default on failure.
pub fn or_default<T: Default>(result: Result<T, LoadError>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            log::error!("{error}");
            T::default()
        }
    }
}

pub fn parse_versions(body: &str) -> Result<Vec<Version>, LoadError> {
    parse(Resource::Versions.file_name(), body)
}

pub fn parse_signs(body: &str) -> Result<Vec<Sign>, LoadError> {
    parse(Resource::Signs.file_name(), body)
}

pub fn parse_history(body: &str) -> Result<HistoryDocument, LoadError> {
    parse(Resource::History.file_name(), body)
}
