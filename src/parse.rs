//! Line-oriented `KEY<delimiter>value` parsing for file-based sources.
//!
//! The format is deliberately minimal:
//!
//! - One assignment per line, split on the **first** delimiter occurrence.
//! - The key is trimmed and upper-cased; the value is kept verbatim.
//! - Lines without a delimiter, or with an empty value, are skipped.
//! - Lines starting (after optional whitespace) with a comment prefix are skipped,
//!   even if they contain the delimiter.
//!
//! There is no quoting, escaping or multi-line value syntax. Lines are split with
//! [`str::lines`], so a trailing `\r` from CRLF files never ends up in a value.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TierconfError};

/// How a delimited text source is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFormat {
    /// Separator between key and value (default `=`).
    pub delimiter: String,
    /// Literal prefixes marking comment lines. Empty means no line is a comment.
    pub comment_prefixes: Vec<String>,
}

impl Default for FileFormat {
    fn default() -> Self {
        Self {
            delimiter: "=".to_string(),
            comment_prefixes: Vec::new(),
        }
    }
}

impl FileFormat {
    pub fn new(delimiter: &str) -> Self {
        Self {
            delimiter: delimiter.to_string(),
            comment_prefixes: Vec::new(),
        }
    }

    /// Add one comment prefix. Prefixes are literal text, not regex fragments.
    pub fn comment_prefix(mut self, prefix: &str) -> Self {
        self.comment_prefixes.push(prefix.to_string());
        self
    }

    pub fn comment_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comment_prefixes
            .extend(prefixes.into_iter().map(Into::into));
        self
    }
}

/// Build the comment matcher: `^\s*(?:p1|p2|...)` with every prefix escaped.
///
/// Empty prefixes are ignored (they would match every line). Returns `None`
/// when no usable prefix remains. Since every prefix is escaped, compilation
/// only fails when the pattern exceeds the regex size limit.
fn comment_matcher(prefixes: &[String]) -> Result<Option<Regex>> {
    let escaped: Vec<String> = prefixes
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| regex::escape(p))
        .collect();
    if escaped.is_empty() {
        return Ok(None);
    }

    let pattern = format!(r"^\s*(?:{})", escaped.join("|"));
    Regex::new(&pattern)
        .map(Some)
        .map_err(|source| TierconfError::InvalidCommentPrefix { pattern, source })
}

/// Parse `text` into an UPPERCASE key → raw value map.
///
/// Fails only when the format itself is unusable (empty delimiter, comment
/// pattern that does not compile). Malformed lines are skipped, never errors.
/// When a key appears on several lines the last one wins.
pub fn parse(text: &str, format: &FileFormat) -> Result<HashMap<String, String>> {
    if format.delimiter.is_empty() {
        return Err(TierconfError::EmptyDelimiter);
    }
    let comments = comment_matcher(&format.comment_prefixes)?;

    let mut entries = HashMap::new();
    for line in text.lines() {
        if let Some(re) = &comments
            && re.is_match(line)
        {
            continue;
        }

        let Some((key, value)) = line.split_once(format.delimiter.as_str()) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        entries.insert(key.trim().to_uppercase(), value.to_string());
    }
    Ok(entries)
}
