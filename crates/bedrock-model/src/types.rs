use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    Regular,
    Preview,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Regular, Channel::Preview];

    /// Name of the ledger section that holds this channel's versions.
    #[must_use]
    pub fn section_name(self) -> &'static str {
        match self {
            Self::Regular => "release",
            Self::Preview => "preview",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regular => write!(f, "Regular"),
            Self::Preview => write!(f, "Preview"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Linux,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::Linux => write!(f, "linux"),
        }
    }
}

/// The `downloadType` values the links API publishes for the dedicated server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkCategory {
    Windows,
    Linux,
    PreviewWindows,
    PreviewLinux,
}

impl LinkCategory {
    pub const REQUIRED: [LinkCategory; 4] = [
        LinkCategory::Windows,
        LinkCategory::Linux,
        LinkCategory::PreviewWindows,
        LinkCategory::PreviewLinux,
    ];

    #[must_use]
    pub fn new(channel: Channel, platform: Platform) -> Self {
        match (channel, platform) {
            (Channel::Regular, Platform::Windows) => Self::Windows,
            (Channel::Regular, Platform::Linux) => Self::Linux,
            (Channel::Preview, Platform::Windows) => Self::PreviewWindows,
            (Channel::Preview, Platform::Linux) => Self::PreviewLinux,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "serverBedrockWindows",
            Self::Linux => "serverBedrockLinux",
            Self::PreviewWindows => "serverBedrockPreviewWindows",
            Self::PreviewLinux => "serverBedrockPreviewLinux",
        }
    }
}

impl fmt::Display for LinkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Download links returned by a single API call, keyed by `downloadType`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLinkSet {
    links: HashMap<String, String>,
}

impl RawLinkSet {
    /// Later pairs with the same download type replace earlier ones.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            links: pairs
                .into_iter()
                .map(|(kind, url)| (kind.into(), url.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, download_type: impl Into<String>, url: impl Into<String>) {
        self.links.insert(download_type.into(), url.into());
    }

    pub fn remove(&mut self, download_type: &str) -> Option<String> {
        self.links.remove(download_type)
    }

    /// Returns the URL for a download type, treating an empty URL as absent.
    #[must_use]
    pub fn get(&self, download_type: &str) -> Option<&str> {
        self.links
            .get(download_type)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }

    #[must_use]
    pub fn category(&self, category: LinkCategory) -> Option<&str> {
        self.get(category.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// A server version reduced to two or three numeric segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServerVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: Option<u64>,
}

impl ServerVersion {
    #[must_use]
    pub fn new(major: u64, minor: u64, patch: Option<u64>) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
    #[error("invalid version format: {input}")]
    InvalidFormat { input: String },
    #[error("invalid version format: segment {segment:?} of {input} is not a number")]
    InvalidSegment { input: String, segment: String },
}

impl VersionParseError {
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::InvalidFormat { input } | Self::InvalidSegment { input, .. } => input,
        }
    }
}

impl FromStr for ServerVersion {
    type Err = VersionParseError;

    /// Parses a dotted numeric version, keeping at most the first three
    /// segments. Anything past the third segment is validated but dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut segments = Vec::with_capacity(4);
        for part in s.split('.') {
            let value = part
                .parse::<u64>()
                .ok()
                .filter(|_| part.bytes().all(|b| b.is_ascii_digit()))
                .ok_or_else(|| VersionParseError::InvalidSegment {
                    input: s.to_string(),
                    segment: part.to_string(),
                })?;
            segments.push(value);
        }

        match segments.as_slice() {
            [major, minor] => Ok(Self::new(*major, *minor, None)),
            [major, minor, patch, ..] => Ok(Self::new(*major, *minor, Some(*patch))),
            _ => Err(VersionParseError::InvalidFormat {
                input: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformLink {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub windows: PlatformLink,
    pub linux: PlatformLink,
}

impl VersionRecord {
    #[must_use]
    pub fn new(windows_url: impl Into<String>, linux_url: impl Into<String>) -> Self {
        Self {
            windows: PlatformLink {
                url: windows_url.into(),
            },
            linux: PlatformLink {
                url: linux_url.into(),
            },
        }
    }

    #[must_use]
    pub fn link(&self, platform: Platform) -> &PlatformLink {
        match platform {
            Platform::Windows => &self.windows,
            Platform::Linux => &self.linux,
        }
    }
}

pub type LedgerSection = BTreeMap<String, VersionRecord>;

/// Every known server version per channel, keyed by normalized version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub release: LedgerSection,
    #[serde(default)]
    pub preview: LedgerSection,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn section(&self, channel: Channel) -> &LedgerSection {
        match channel {
            Channel::Regular => &self.release,
            Channel::Preview => &self.preview,
        }
    }

    pub fn section_mut(&mut self, channel: Channel) -> &mut LedgerSection {
        match channel {
            Channel::Regular => &mut self.release,
            Channel::Preview => &mut self.preview,
        }
    }

    #[must_use]
    pub fn get(&self, channel: Channel, version: &str) -> Option<&VersionRecord> {
        self.section(channel).get(version)
    }

    #[must_use]
    pub fn contains(&self, channel: Channel, version: &str) -> bool {
        self.section(channel).contains_key(version)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.release.len() + self.preview.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.release.is_empty() && self.preview.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Added,
    AlreadyKnown,
}
