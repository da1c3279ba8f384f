//! Version picker: choosing the latest release, ordering the dropdown and
//! deriving what the download panel shows for a selection.

use chrono::NaiveDateTime;

use crate::dates::parse_date;
use crate::model::Version;

/// Reserved id for the pre-rendered seed build, always listed right after the
/// latest release.
pub const PINNED_VERSION_ID: &str = "seed-pre-render";

pub const CHECKSUM_PREVIEW_LENGTH: usize = 4;

pub const LOAD_FAILURE_MESSAGE: &str = "⚠️ Failed to load version data";

/// Feedback shown on the copy button after the checksum reached the clipboard.
pub mod copy_feedback {
    pub const DURATION_MS: u32 = 1500;
    pub const TEXT: &str = "✓";
    pub const BACKGROUND: &str = "#3c8527";
    pub const COLOR: &str = "#fff";
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

/// Identity used as the dropdown value: id, else date, else label.
pub fn version_key(version: &Version) -> &str {
    non_empty(version.id.as_ref())
        .or_else(|| non_empty(version.date.as_ref()))
        .or_else(|| non_empty(version.label.as_ref()))
        .unwrap_or("")
}

pub fn version_date(version: &Version) -> Option<NaiveDateTime> {
    version.date.as_deref().and_then(parse_date)
}

fn is_pinned(version: &Version) -> bool {
    version.id.as_deref() == Some(PINNED_VERSION_ID)
}

fn latest_index(versions: &[Version]) -> Option<usize> {
    let mut latest: Option<(usize, NaiveDateTime)> = None;
    for (index, date) in versions
        .iter()
        .enumerate()
        .filter_map(|(index, version)| version_date(version).map(|date| (index, date)))
    {
        // Strictly greater keeps the first of equal dates.
        if latest.map_or(true, |(_, best)| date > best) {
            latest = Some((index, date));
        }
    }

    latest
        .map(|(index, _)| index)
        .or_else(|| (!versions.is_empty()).then_some(0))
}

/// The release with the newest parseable date, or the first entry when no
/// date parses.
pub fn latest_version(versions: &[Version]) -> Option<&Version> {
    latest_index(versions).map(|index| &versions[index])
}

/// One dropdown entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionOption<'a> {
    pub version: &'a Version,
    pub is_latest: bool,
}

impl<'a> VersionOption<'a> {
    /// The option's key, borrowed from the version rather than the option.
    pub fn value(&self) -> &'a str {
        version_key(self.version)
    }

    pub fn label(&self) -> String {
        let date = non_empty(self.version.date.as_ref());
        let label = non_empty(self.version.label.as_ref());
        let base = match (date, label) {
            (Some(date), Some(label)) => format!("{date} - {label}"),
            (Some(date), None) => date.to_string(),
            (None, Some(label)) => label.to_string(),
            (None, None) => "Untitled".to_string(),
        };

        if self.is_latest {
            format!("{base} - Latest")
        } else {
            base
        }
    }
}

/// Dropdown order: latest, pinned builds, remaining dated releases newest
/// first, then undated entries in source order. Every entry appears once.
pub fn ordered_versions(versions: &[Version]) -> Vec<VersionOption<'_>> {
    let Some(latest) = latest_index(versions) else {
        return Vec::new();
    };

    let rest = || {
        versions
            .iter()
            .enumerate()
            .filter(move |(index, _)| *index != latest)
    };

    let pinned = rest().filter(|(_, version)| is_pinned(version));

    let mut dated: Vec<_> = rest()
        .filter(|(_, version)| !is_pinned(version) && version_date(version).is_some())
        .map(|(index, version)| (index, version, version_date(version)))
        .collect();
    dated.sort_by(|a, b| b.2.cmp(&a.2));

    let unparsed = rest().filter(|(_, version)| {
        !is_pinned(version)
            && non_empty(version.date.as_ref()).is_some()
            && version_date(version).is_none()
    });

    let undated = rest().filter(|(_, version)| {
        !is_pinned(version) && non_empty(version.date.as_ref()).is_none()
    });

    std::iter::once((latest, &versions[latest]))
        .chain(pinned)
        .chain(dated.into_iter().map(|(index, version, _)| (index, version)))
        .chain(unparsed)
        .chain(undated)
        .map(|(index, version)| VersionOption {
            version,
            is_latest: index == latest,
        })
        .collect()
}

/// First entry whose identity key matches.
pub fn find_version<'a>(versions: &'a [Version], key: &str) -> Option<&'a Version> {
    versions.iter().find(|version| version_key(version) == key)
}

/// `abcd...wxyz` for checksums of at least eight characters, verbatim when
/// shorter, `-` when absent.
pub fn format_checksum(checksum: Option<&str>) -> String {
    let Some(checksum) = checksum.filter(|c| !c.is_empty()) else {
        return "-".to_string();
    };

    let chars: Vec<char> = checksum.chars().collect();
    if chars.len() < CHECKSUM_PREVIEW_LENGTH * 2 {
        return checksum.to_string();
    }

    let start: String = chars[..CHECKSUM_PREVIEW_LENGTH].iter().collect();
    let end: String = chars[chars.len() - CHECKSUM_PREVIEW_LENGTH..].iter().collect();
    format!("{start}...{end}")
}

pub fn valid_link(link: Option<&str>) -> Option<&str> {
    link.filter(|link| !link.trim().is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperMessage {
    SeedReminder,
    NoLinks,
}

impl HelperMessage {
    pub const fn text(self) -> &'static str {
        match self {
            Self::SeedReminder => "💚 Please seed after downloading via torrent",
            Self::NoLinks => "⚠️ Oops! No download links available for this version",
        }
    }

    pub const fn is_error(self) -> bool {
        matches!(self, Self::NoLinks)
    }
}

/// Everything the download panel displays for one selected release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPanel {
    pub file_size: String,
    pub checksum_display: String,
    pub checksum_full: String,
    pub magnet_link: Option<String>,
    pub https_link: Option<String>,
}

impl DownloadPanel {
    pub fn for_version(version: &Version) -> Self {
        Self {
            file_size: non_empty(version.size.as_ref())
                .unwrap_or("-")
                .to_string(),
            checksum_display: format_checksum(version.checksum.as_deref()),
            checksum_full: version.checksum.clone().unwrap_or_default(),
            magnet_link: valid_link(version.magnet_link.as_deref()).map(str::to_string),
            https_link: valid_link(version.https_link.as_deref()).map(str::to_string),
        }
    }

    pub const fn has_any_link(&self) -> bool {
        self.magnet_link.is_some() || self.https_link.is_some()
    }

    pub const fn helper(&self) -> HelperMessage {
        if self.has_any_link() {
            HelperMessage::SeedReminder
        } else {
            HelperMessage::NoLinks
        }
    }
}
