//! Front matter parsing for Markdown documents.
use crate::error::FrontMatterError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use gray_matter::{Matter, engine::YAML};
use serde::{Deserialize, Deserializer, de};

/// Per-document metadata, read from the YAML block at the top of a Markdown file.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Metadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "desc")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<DateTime<FixedOffset>>,
    /// Documents are only rendered when `status: true` (or `yes`/`on`).
    #[serde(default, rename = "status", deserialize_with = "deserialize_flag")]
    pub published: bool,
    /// Overrides the stylesheet theme for this page.
    #[serde(default, rename = "css")]
    pub css_theme: Option<String>,
    /// Raw script text, injected into the page unescaped.
    #[serde(default, rename = "js")]
    pub inline_js: Option<String>,
}

const DELIMITER: &str = "---";

/// Splits `raw` into its metadata and the Markdown body that follows the front matter.
///
/// A document without front matter (or with an empty block) gets `Metadata::default()`,
/// which means it is not published. The body is returned exactly as it appears in `raw`.
pub fn parse(raw: &str) -> Result<(Metadata, String), FrontMatterError> {
    let Some(body_start) = body_offset(raw)? else {
        return Ok((Metadata::default(), raw.to_string()));
    };

    let matter = Matter::<YAML>::new();
    let parsed = matter.parse(raw);

    // gray_matter swallows YAML errors, so the raw block is deserialized again strictly.
    let value: serde_yaml::Value = serde_yaml::from_str(&parsed.matter)?;
    let metadata = match value {
        serde_yaml::Value::Null => Metadata::default(),
        value => serde_yaml::from_value(value)?,
    };

    Ok((metadata, raw[body_start..].to_string()))
}

/// Byte offset just past the closing delimiter line, or `None` when `raw` has no front matter.
fn body_offset(raw: &str) -> Result<Option<usize>, FrontMatterError> {
    let mut lines = raw.split_inclusive('\n');
    match lines.next() {
        Some(first) if is_delimiter(first) => {
            let mut offset = first.len();
            for line in lines {
                offset += line.len();
                if is_delimiter(line) {
                    return Ok(Some(offset));
                }
            }
            Err(FrontMatterError::Unterminated)
        }
        _ => Ok(None),
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Accepts YAML 1.1 style booleans (`yes`, `on`, ...) as well as `true`/`false`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Word(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Flag::Bool(flag)) => Ok(flag),
        Some(Flag::Word(word)) => match word.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "on" => Ok(true),
            "false" | "no" | "n" | "off" => Ok(false),
            _ => Err(de::Error::custom(format!(
                "invalid status `{word}`, expected a boolean"
            ))),
        },
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_date(raw.trim()).map(Some).ok_or_else(|| {
            de::Error::custom(format!(
                "invalid date `{raw}`, expected RFC 3339, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`"
            ))
        }),
        None => Ok(None),
    }
}

fn parse_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date);
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    Some(naive.and_utc().fixed_offset())
}
