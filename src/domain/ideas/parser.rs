//! Turns free-form oracle output into idea records.
//!
//! Strategies are tried in order: a JSON array anywhere in the text, then
//! `TITLE: .. | DESC: .. | PLATFORMS: .. | TAGS: ..` lines, then a batch of
//! placeholder ideas built from the form. Every strategy produces `RawIdea`s
//! that go through [`normalize`], so callers always get the same shape.

use super::model::{FormInput, Idea};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use uuid::Uuid;

/// Number of placeholder ideas produced when nothing could be extracted
pub const FALLBACK_BATCH_SIZE: usize = 8;

const DEFAULT_DESCRIPTION: &str = "Engaging content idea for your audience";
const DEFAULT_PLATFORM: &str = "Social Media";
const DEFAULT_HASHTAG: &str = "#content";

const PLACEHOLDER_ANGLES: [&str; FALLBACK_BATCH_SIZE] = [
    "Behind the scenes",
    "Customer success story",
    "Quick tips",
    "Myth vs. fact",
    "Frequently asked questions",
    "A day in the life",
    "Trend spotlight",
    "Limited-time offer",
];

static TITLE_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bTITLE:").unwrap());
static TITLE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bTITLE:\s*([^|]*)").unwrap());
static DESC_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bDESC(?:RIPTION)?:\s*([^|]*)").unwrap());
static PLATFORMS_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bPLATFORMS?:\s*([^|]*)").unwrap());
static TAGS_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:HASH)?TAGS:\s*([^|]*)").unwrap());

/// Idea fields as extracted, before defaults are applied
#[derive(Debug, Default)]
struct RawIdea {
    title: Option<String>,
    description: Option<String>,
    platforms: Vec<String>,
    hashtags: Vec<String>,
}

/// Parse oracle output into at most `batch_size` ideas. Never empty.
pub fn parse_ideas(text: &str, form: &FormInput, batch_size: usize) -> Vec<Idea> {
    parse_ideas_at(text, form, batch_size, Utc::now())
}

/// Same as [`parse_ideas`] with an explicit creation time
pub fn parse_ideas_at(
    text: &str,
    form: &FormInput,
    batch_size: usize,
    now: DateTime<Utc>,
) -> Vec<Idea> {
    let batch_size = batch_size.max(1);

    let (strategy, raw) = match extract_json_ideas(text) {
        Some(raw) if !raw.is_empty() => ("json", raw),
        _ => {
            let raw = extract_line_ideas(text);
            if raw.is_empty() {
                ("placeholder", placeholder_ideas(form))
            } else {
                ("lines", raw)
            }
        }
    };

    tracing::debug!(
        strategy = strategy,
        extracted = raw.len(),
        batch_size = batch_size,
        "Parsed oracle response"
    );

    raw.into_iter()
        .take(batch_size)
        .enumerate()
        .map(|(index, raw)| normalize(raw, index, form, now))
        .collect()
}

/// Single funnel every strategy goes through
fn normalize(raw: RawIdea, index: usize, form: &FormInput, now: DateTime<Utc>) -> Idea {
    // Ids are always minted here; whatever the oracle numbered its ideas is ignored
    let id = Uuid::new_v4().to_string();

    let title = raw
        .title
        .map(|t| clean_field(&t))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("Idea {}", index + 1));

    let description = raw
        .description
        .map(|d| clean_field(&d))
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    let platforms = raw
        .platforms
        .iter()
        .map(|p| clean_field(p))
        .filter(|p| !p.is_empty())
        .collect();

    let hashtags = raw
        .hashtags
        .iter()
        .map(|h| clean_field(h))
        .filter(|h| !h.is_empty() && h != "#")
        .map(|h| if h.starts_with('#') { h } else { format!("#{}", h) })
        .collect();

    Idea {
        id,
        title,
        description,
        platforms,
        hashtags,
        content_type: form.content_type,
        timestamp: now,
    }
}

/// Trim whitespace, quotes and markdown emphasis around a field value
fn clean_field(value: &str) -> String {
    value
        .trim()
        .trim_matches(|c: char| c == '*' || c == '"' || c == '`' || c.is_whitespace())
        .to_string()
}

// --- JSON strategy ---

fn extract_json_ideas(text: &str) -> Option<Vec<RawIdea>> {
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find('[') {
        let start = search_from + offset;
        let candidate = &text[start..];

        match matching_close(candidate, '[', ']') {
            Some(end) => {
                if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&candidate[..=end]) {
                    let ideas: Vec<RawIdea> = items.iter().filter_map(raw_from_value).collect();
                    if !ideas.is_empty() {
                        return Some(ideas);
                    }
                }
            }
            None => {
                // Array cut off (usually the token limit): keep the complete objects
                let salvaged = salvage_objects(&candidate[1..]);
                if !salvaged.is_empty() {
                    tracing::warn!(
                        salvaged = salvaged.len(),
                        "Oracle returned a truncated JSON array"
                    );
                    return Some(salvaged);
                }
            }
        }

        search_from = start + 1;
    }

    None
}

/// Byte offset of the bracket closing the one `s` starts with.
/// Brackets inside JSON strings are ignored.
fn matching_close(s: &str, open: char, close: char) -> Option<usize> {
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if c == '"' {
            in_string = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(i);
            }
        }
    }

    None
}

/// Decode each complete `{...}` object at the top of an unterminated array body
fn salvage_objects(body: &str) -> Vec<RawIdea> {
    let mut ideas = Vec::new();
    let mut rest = body;

    while let Some(offset) = rest.find('{') {
        let candidate = &rest[offset..];
        let Some(end) = matching_close(candidate, '{', '}') else {
            break;
        };

        if let Ok(value) = serde_json::from_str::<Value>(&candidate[..=end]) {
            if let Some(raw) = raw_from_value(&value) {
                ideas.push(raw);
            }
        }
        rest = &candidate[end + 1..];
    }

    ideas
}

fn raw_from_value(value: &Value) -> Option<RawIdea> {
    let object = value.as_object()?;

    Some(RawIdea {
        title: object.get("title").and_then(Value::as_str).map(str::to_string),
        description: object
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        platforms: string_list(object.get("platforms")),
        hashtags: string_list(object.get("hashtags")),
    })
}

/// Accept a JSON array of strings or a single comma-separated string
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => split_list(s),
        _ => Vec::new(),
    }
}

// --- Line strategy ---

fn extract_line_ideas(text: &str) -> Vec<RawIdea> {
    text.lines()
        .filter(|line| TITLE_MARKER.is_match(line))
        .map(|line| {
            let title = capture(&TITLE_FIELD, line);
            let description = capture(&DESC_FIELD, line);

            let platforms = capture(&PLATFORMS_FIELD, line)
                .map(|p| split_list(&p))
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| vec![DEFAULT_PLATFORM.to_string()]);

            let hashtags = capture(&TAGS_FIELD, line)
                .map(|t| split_list(&t))
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| vec![DEFAULT_HASHTAG.to_string()]);

            RawIdea {
                title,
                description,
                platforms,
                hashtags,
            }
        })
        .collect()
}

fn capture(pattern: &Regex, line: &str) -> Option<String> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| clean_field(m.as_str()))
        .filter(|s| !s.is_empty())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(clean_field)
        .filter(|s| !s.is_empty())
        .collect()
}

// --- Placeholder strategy ---

fn placeholder_ideas(form: &FormInput) -> Vec<RawIdea> {
    let industry = form.industry.trim();
    let audience = form.target_audience.trim();
    let kind = form.content_type.label().to_lowercase();

    let industry_tag: String = industry.chars().filter(|c| c.is_alphanumeric()).collect();
    let mut hashtags = Vec::new();
    if !industry_tag.is_empty() {
        hashtags.push(format!("#{}", industry_tag));
    }
    hashtags.push(DEFAULT_HASHTAG.to_string());

    PLACEHOLDER_ANGLES
        .iter()
        .map(|angle| RawIdea {
            title: Some(format!("{}: {}", angle, industry)),
            description: Some(format!(
                "{} {} for {} businesses reaching {}.",
                angle, kind, industry, audience
            )),
            platforms: form.content_type.default_platforms(),
            hashtags: hashtags.clone(),
        })
        .collect()
}
