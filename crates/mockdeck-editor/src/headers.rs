//! Ordered response-header mapping with copy-on-write editing.
//!
//! Every editing method takes `&self` and returns a new [`HeaderMap`], so a
//! draft never aliases the mapping it was derived from. Keys are unique and
//! insertion order is kept for display.

use crate::error::EditorError;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Ordered mapping of header name to header value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from pairs. A repeated key replaces the earlier value and
    /// keeps the earlier position.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (k, v) in pairs {
            map.insert(k.into(), v.into());
        }
        map
    }

    /// Build the fixed four-entry mapping for a content-type preset.
    pub fn preset(kind: HeaderPreset) -> Self {
        Self::from_pairs([
            ("pragma", "no-cache".to_string()),
            ("content-type", kind.content_type()),
            ("cache-control", "no-cache".to_string()),
            ("expires", "-1".to_string()),
        ])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.entries[i].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Add a blank row. Keys are unique, so repeated calls collapse into a
    /// single empty-key entry whose value is reset to `""`.
    #[must_use]
    pub fn add_header(&self) -> Self {
        let mut next = self.clone();
        next.insert(String::new(), String::new());
        next
    }

    /// Remove `key`. No-op if absent.
    #[must_use]
    pub fn remove_header(&self, key: &str) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(k, _)| k != key)
                .cloned()
                .collect(),
        }
    }

    /// Rename `old_key` to `new_key`, keeping the entry's position.
    ///
    /// A different entry already named `new_key` is overwritten (last write
    /// wins). Renaming an absent key is a no-op.
    #[must_use]
    pub fn change_key(&self, old_key: &str, new_key: &str) -> Self {
        if old_key == new_key || !self.contains_key(old_key) {
            return self.clone();
        }

        let entries = self
            .entries
            .iter()
            .filter(|(k, _)| k != new_key)
            .map(|(k, v)| {
                if k == old_key {
                    (new_key.to_string(), v.clone())
                } else {
                    (k.clone(), v.clone())
                }
            })
            .collect();

        Self { entries }
    }

    /// Replace the value stored under `key`. No-op if absent.
    #[must_use]
    pub fn change_value(&self, key: &str, value: &str) -> Self {
        let mut next = self.clone();
        if let Some(i) = next.position(key) {
            next.entries[i].1 = value.to_string();
        }
        next
    }

    /// Replace the whole mapping with the preset's headers. Prior edits are
    /// discarded.
    #[must_use]
    pub fn apply_preset(&self, kind: HeaderPreset) -> Self {
        Self::preset(kind)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn insert(&mut self, key: String, value: String) {
        match self.position(&key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl Serialize for HeaderMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HeaderMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HeaderMapVisitor;

        impl<'de> Visitor<'de> for HeaderMapVisitor {
            type Value = HeaderMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of header names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<HeaderMap, A::Error> {
                let mut map = HeaderMap::new();
                while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
                    // Older captures store numbers such as `expires: -1`.
                    let value = match value {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(HeaderMapVisitor)
    }
}

/// Content-type header presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderPreset {
    Html,
    Xml,
    Json,
    Text,
}

impl HeaderPreset {
    pub const ALL: [HeaderPreset; 4] = [
        HeaderPreset::Json,
        HeaderPreset::Xml,
        HeaderPreset::Html,
        HeaderPreset::Text,
    ];

    /// Short name used on the command line and in settings.
    pub fn name(&self) -> &'static str {
        match self {
            HeaderPreset::Html => "html",
            HeaderPreset::Xml => "xml",
            HeaderPreset::Json => "json",
            HeaderPreset::Text => "text",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            HeaderPreset::Html => "text/html",
            HeaderPreset::Xml => "text/xml",
            HeaderPreset::Json => "application/json",
            HeaderPreset::Text => "text/plain",
        }
    }

    /// Full `content-type` value, e.g. `application/json; charset=utf-8`.
    pub fn content_type(&self) -> String {
        format!("{}; charset=utf-8", self.mime())
    }
}

impl fmt::Display for HeaderPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for HeaderPreset {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(HeaderPreset::Html),
            "xml" => Ok(HeaderPreset::Xml),
            "json" => Ok(HeaderPreset::Json),
            "text" => Ok(HeaderPreset::Text),
            _ => Err(EditorError::UnknownPreset(s.to_string())),
        }
    }
}

/// Standard HTTP response header names offered as completions.
pub const STANDARD_RESPONSE_HEADERS: &[&str] = &[
    "Accept-Patch",
    "Accept-Ranges",
    "Access-Control-Allow-Credentials",
    "Access-Control-Allow-Headers",
    "Access-Control-Allow-Methods",
    "Access-Control-Allow-Origin",
    "Access-Control-Expose-Headers",
    "Access-Control-Max-Age",
    "Age",
    "Allow",
    "Alt-Svc",
    "Cache-Control",
    "Connection",
    "Content-Disposition",
    "Content-Encoding",
    "Content-Language",
    "Content-Length",
    "Content-Location",
    "Content-MD5",
    "Content-Range",
    "Content-Security-Policy",
    "Content-Type",
    "Date",
    "ETag",
    "Expires",
    "Last-Modified",
    "Link",
    "Location",
    "P3P",
    "Pragma",
    "Proxy-Authenticate",
    "Public-Key-Pins",
    "Refresh",
    "Retry-After",
    "Server",
    "Set-Cookie",
    "Status",
    "Strict-Transport-Security",
    "Trailer",
    "Transfer-Encoding",
    "Upgrade",
    "Vary",
    "Via",
    "Warning",
    "WWW-Authenticate",
    "X-Content-Type-Options",
    "X-Frame-Options",
    "X-XSS-Protection",
];

/// Standard header names starting with `prefix`, compared case-insensitively.
pub fn suggest_header_names(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.to_ascii_lowercase();
    STANDARD_RESPONSE_HEADERS
        .iter()
        .copied()
        .filter(|name| name.to_ascii_lowercase().starts_with(&prefix))
        .collect()
}

pub fn is_standard_response_header(name: &str) -> bool {
    STANDARD_RESPONSE_HEADERS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(name))
}
