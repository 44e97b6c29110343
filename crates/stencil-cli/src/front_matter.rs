//! TOML front matter.
//!
//! A file may open with a TOML table fenced by `+++` lines:
//!
//! ```text
//! +++
//! template = "page.tmpl"
//! title = "Home"
//! +++
//! body starts here
//! ```
//!
//! The fences and table are stripped from the body handed to the template.

use serde_json::Value;
use thiserror::Error;

const FENCE: &str = "+++";

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front matter opened with '+++' is never closed")]
    Unterminated,

    #[error("invalid TOML in front matter: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("front matter cannot be represented as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A file split into its front matter and body.
#[derive(Debug, PartialEq)]
pub struct Document<'a> {
    pub front_matter: Option<Value>,
    pub body: &'a [u8],
}

/// Split `content` into front matter and body.
///
/// Content that does not start with a fence line, or is not UTF-8 up to the
/// closing fence, is returned whole as the body.
pub fn split(content: &[u8]) -> Result<Document<'_>, FrontMatterError> {
    let whole = Document {
        front_matter: None,
        body: content,
    };

    let Some(after_open) = strip_fence_line(content) else {
        return Ok(whole);
    };

    let mut offset = 0;
    for line in after_open.split_inclusive(|&b| b == b'\n') {
        if is_fence(line) {
            let Ok(table) = std::str::from_utf8(&after_open[..offset]) else {
                return Ok(whole);
            };
            let table: toml::Table = toml::from_str(table)?;
            return Ok(Document {
                front_matter: Some(serde_json::to_value(table)?),
                body: &after_open[offset + line.len()..],
            });
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

/// The rest of `content` after an opening fence line.
fn strip_fence_line(content: &[u8]) -> Option<&[u8]> {
    let line_end = content.iter().position(|&b| b == b'\n')?;
    is_fence(&content[..=line_end]).then(|| &content[line_end + 1..])
}

fn is_fence(line: &[u8]) -> bool {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    line == FENCE.as_bytes()
}
