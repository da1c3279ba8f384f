use serde::{Deserialize, Serialize};

/// One downloadable release of the world archive, as listed in `versions.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub checksum: Option<String>,
    #[serde(default)]
    pub magnet_link: Option<String>,
    #[serde(default)]
    pub https_link: Option<String>,
}

/// Gallery manifest entry: either a bare filename or a described file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MemoryImage {
    File(String),
    Described {
        file: String,
        #[serde(default)]
        author: Option<String>,
        #[serde(default)]
        timestamp: Option<Timestamp>,
    },
}

impl MemoryImage {
    pub fn file(&self) -> &str {
        match self {
            Self::File(file) | Self::Described { file, .. } => file,
        }
    }

    pub fn author(&self) -> Option<&str> {
        match self {
            Self::File(_) => None,
            Self::Described { author, .. } => author.as_deref().filter(|a| !a.is_empty()),
        }
    }

    pub const fn timestamp(&self) -> Option<&Timestamp> {
        match self {
            Self::File(_) => None,
            Self::Described { timestamp, .. } => timestamp.as_ref(),
        }
    }
}

/// Explicit capture time: a date string or milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
}

/// A placard on the sign wall. Coordinates are raw world coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Sign {
    #[serde(default)]
    pub col: Option<i64>,
    #[serde(default)]
    pub row: Option<i64>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub glow: Option<bool>,
}

impl Sign {
    pub fn col(&self) -> i64 {
        self.col.unwrap_or(0)
    }

    pub fn row(&self) -> i64 {
        self.row.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryEvent {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThanksEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub trusted: Option<bool>,
    #[serde(default)]
    pub contribution: Option<String>,
}

/// `history.json` comes in two shapes: the legacy bare event list, or an
/// object carrying events and acknowledgements side by side.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum HistoryDocument {
    Legacy(Vec<HistoryEvent>),
    Full {
        #[serde(default)]
        events: Vec<HistoryEvent>,
        #[serde(default)]
        thanks: Vec<ThanksEntry>,
    },
}

impl Default for HistoryDocument {
    fn default() -> Self {
        Self::Legacy(Vec::new())
    }
}

impl HistoryDocument {
    pub fn into_parts(self) -> (Vec<HistoryEvent>, Vec<ThanksEntry>) {
        match self {
            Self::Legacy(events) => (events, Vec::new()),
            Self::Full { events, thanks } => (events, thanks),
        }
    }
}
