//! Front-matter parsing

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::error::{ContentError, Result};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> std::result::Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter data from a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "lastUpdated", alias = "last_updated")]
    pub last_updated: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    pub slug: Option<String>,
    /// Drafts are excluded from catalog listings but loadable by path
    pub draft: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from raw file content
    ///
    /// Returns `(front_matter, body)`. A file without an opening `---` marker
    /// on its first line has no front-matter: the result is a default
    /// `FrontMatter` and a body identical to the input. An opening marker
    /// without a closing one is an error, as is YAML that fails to parse.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let Some(after_open) = content.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };

        // The marker must be a whole line; "---like this" is just body text
        let rest = match after_open
            .strip_prefix("\r\n")
            .or_else(|| after_open.strip_prefix('\n'))
        {
            Some(rest) => rest,
            None if after_open.is_empty() => {
                return Err(ContentError::MalformedFrontmatter(
                    "front-matter block opened but never closed".to_string(),
                ))
            }
            None => return Ok((FrontMatter::default(), content)),
        };

        // A close marker on the very next line is a well-formed empty block
        if let Some(after_close) = rest.strip_prefix("---") {
            if after_close.is_empty()
                || after_close.starts_with('\n')
                || after_close.starts_with("\r\n")
            {
                let remaining = after_close.trim_start_matches(['\n', '\r']);
                return Ok((FrontMatter::default(), remaining));
            }
        }

        let Some(end_pos) = rest.find("\n---") else {
            return Err(ContentError::MalformedFrontmatter(
                "front-matter block opened but never closed".to_string(),
            ));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..]; // Skip \n---
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)
            .map_err(|e| ContentError::MalformedFrontmatter(e.to_string()))?;

        Ok((fm, remaining))
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_ref().and_then(|s| parse_date_string(s))
    }

    /// Parse the lastUpdated string into a DateTime
    pub fn parse_last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated.as_ref().and_then(|s| parse_date_string(s))
    }
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
        // Try parsing date only
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
    }

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}
