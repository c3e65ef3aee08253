//! # Package Metadata
//!
//! Identity and discovery metadata carried by every theme package, plus the
//! timestamp helpers shared by the registry, factory and loader.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// The closed set of categories a theme package can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeCategory {
    /// Light backgrounds with dark text.
    Light,
    /// Dark backgrounds with light text.
    Dark,
    /// Saturated, playful palettes.
    Colorful,
    /// Reduced, low-ornament palettes.
    Minimal,
    /// Conservative business palettes.
    Professional,
}

impl ThemeCategory {
    /// Every category, in declaration order.
    pub const ALL: [ThemeCategory; 5] = [
        ThemeCategory::Light,
        ThemeCategory::Dark,
        ThemeCategory::Colorful,
        ThemeCategory::Minimal,
        ThemeCategory::Professional,
    ];

    /// The lowercase name used in serialised packages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeCategory::Light => "light",
            ThemeCategory::Dark => "dark",
            ThemeCategory::Colorful => "colorful",
            ThemeCategory::Minimal => "minimal",
            ThemeCategory::Professional => "professional",
        }
    }
}

impl fmt::Display for ThemeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(ThemeCategory::as_str).collect();
                format!("Theme package category must be one of: {}", names.join(", "))
            })
    }
}

/// Identity and discovery metadata of a theme package.
///
/// String fields default to empty when absent from a serialised package so
/// that the validator, not the parser, reports which ones are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePackageMeta {
    /// Unique, identifier-safe id (`[a-zA-Z0-9_-]+`).
    #[serde(default)]
    pub id: String,
    /// Machine-friendly name.
    #[serde(default)]
    pub name: String,
    /// Human-friendly name.
    #[serde(default)]
    pub display_name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Semantic version string.
    #[serde(default)]
    pub version: String,
    /// Author or team name.
    #[serde(default)]
    pub author: String,
    /// Search tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Category of the package.
    pub category: ThemeCategory,
    /// Opaque preview image reference (URL or data URI).
    #[serde(default)]
    pub preview: String,
    /// Creation timestamp (ISO-8601).
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp (ISO-8601).
    #[serde(default)]
    pub updated_at: String,
}

impl ThemePackageMeta {
    /// Create metadata with the given identity and fresh timestamps.
    ///
    /// `name` and `display_name` both start as `id`; everything else is
    /// empty apart from version `1.0.0`.
    pub fn new(id: impl Into<String>, category: ThemeCategory) -> Self {
        let id = id.into();
        let now = now_timestamp();
        Self {
            name: id.clone(),
            display_name: id.clone(),
            id,
            description: String::new(),
            version: "1.0.0".to_string(),
            author: String::new(),
            tags: Vec::new(),
            category,
            preview: String::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Set the human-readable names.
    pub fn with_names(mut self, name: impl Into<String>, display_name: impl Into<String>) -> Self {
        self.name = name.into();
        self.display_name = display_name.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Whether any tag equals `tag` exactly.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive substring match over name, display name, description and tags.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.display_name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
    }

    /// The parsed `updated_at`, if it is a valid timestamp.
    pub fn updated_at_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.updated_at)
    }

    /// Stamp both timestamps with the current time.
    pub fn touch_all(&mut self) {
        let now = now_timestamp();
        self.created_at = now.clone();
        self.updated_at = now;
    }
}

/// Partial metadata used to overlay individual fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaPatch {
    /// Replacement `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Replacement `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement `display_name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Replacement `description`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement `version`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Replacement `author`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Replacement `tags`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Replacement `category`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ThemeCategory>,
    /// Replacement `preview`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    /// Replacement `created_at`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Replacement `updated_at`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl MetaPatch {
    /// Overlay every field present in the patch onto `meta`.
    pub fn apply_to(&self, meta: &mut ThemePackageMeta) {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if let Some(value) = &self.$field {
                    meta.$field = value.clone();
                })*
            };
        }
        overlay!(id, name, display_name, description, version, author, tags, category, preview, created_at, updated_at);
    }
}

impl From<&ThemePackageMeta> for MetaPatch {
    fn from(meta: &ThemePackageMeta) -> Self {
        Self {
            id: Some(meta.id.clone()),
            name: Some(meta.name.clone()),
            display_name: Some(meta.display_name.clone()),
            description: Some(meta.description.clone()),
            version: Some(meta.version.clone()),
            author: Some(meta.author.clone()),
            tags: Some(meta.tags.clone()),
            category: Some(meta.category),
            preview: Some(meta.preview.clone()),
            created_at: Some(meta.created_at.clone()),
            updated_at: Some(meta.updated_at.clone()),
        }
    }
}

/// The current time as an RFC 3339 string with millisecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts full RFC 3339 strings, zone-less date-times (read as UTC) and plain
/// dates (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        for category in ThemeCategory::ALL {
            assert_eq!(category.as_str().parse::<ThemeCategory>(), Ok(category));
        }
        assert!("neon".parse::<ThemeCategory>().is_err());
    }

    #[test]
    fn timestamps_parse_in_common_shapes() {
        assert!(parse_timestamp("2024-01-01T00:00:00.000Z").is_some());
        assert!(parse_timestamp("2024-01-01T08:30:00+08:00").is_some());
        assert!(parse_timestamp("2024-01-01T00:00:00").is_some());
        assert!(parse_timestamp("2024-01-01").is_some());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp(&now_timestamp()).is_some());
    }

    #[test]
    fn query_matches_any_text_field() {
        let meta = ThemePackageMeta::new("ocean", ThemeCategory::Colorful)
            .with_names("ocean-theme", "Ocean Breeze")
            .with_description("Cool blues")
            .with_tags(["Marine", "calm"]);
        assert!(meta.matches_query("BREEZE"));
        assert!(meta.matches_query("marine"));
        assert!(meta.matches_query("cool"));
        assert!(!meta.matches_query("sunset"));
    }

    #[test]
    fn patch_overlays_only_present_fields() {
        let mut meta = ThemePackageMeta::new("ocean", ThemeCategory::Colorful).with_author("Team");
        let patch = MetaPatch {
            author: Some("Someone".into()),
            category: Some(ThemeCategory::Dark),
            ..MetaPatch::default()
        };
        patch.apply_to(&mut meta);
        assert_eq!(meta.author, "Someone");
        assert_eq!(meta.category, ThemeCategory::Dark);
        assert_eq!(meta.id, "ocean");
    }
}
