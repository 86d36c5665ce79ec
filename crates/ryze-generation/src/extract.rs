// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Artifact extraction from raw model output.
//!
//! Model answers may be fenced, may open with prose, or may be exactly the
//! document. Extraction is total: it never fails, it only reports how much
//! it had to guess through [`ExtractionQuality`].

use std::sync::LazyLock;

use regex::Regex;

/// First fenced block tagged as HTML; the interior is captured lazily.
static HTML_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```html\s?([\s\S]*?)```").unwrap());

const FENCE_OPEN: &str = "```html";
const FENCE_CLOSE: &str = "```";

/// Confidence in an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionQuality {
    /// After unfencing and trimming, the text began with markup.
    Clean,
    /// Leading prose was discarded, or no markup was found at all.
    Degraded,
}

/// Result of [`extract_with_quality`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub html: String,
    pub quality: ExtractionQuality,
}

impl Extraction {
    /// True when the payload can be shown as a page: non-empty and starting with `<`.
    pub fn is_usable(&self) -> bool {
        self.html.starts_with('<')
    }
}

/// Cleans raw model output into an HTML string.
pub fn extract(raw: &str) -> String {
    extract_with_quality(raw).html
}

/// Cleans raw model output and reports how confident the result is.
pub fn extract_with_quality(raw: &str) -> Extraction {
    let fenced = HTML_FENCE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|interior| !interior.is_empty());

    let candidate = match fenced {
        Some(interior) => interior.trim(),
        None => raw.trim(),
    };
    let candidate = strip_residual_fences(candidate);

    if candidate.starts_with('<') {
        return Extraction {
            html: candidate.to_string(),
            quality: ExtractionQuality::Clean,
        };
    }

    // Best effort: cut to the first tag, or hand back the text as is.
    let html = candidate.find('<').map_or(candidate, |idx| &candidate[idx..]);
    Extraction {
        html: html.to_string(),
        quality: ExtractionQuality::Degraded,
    }
}

/// Peels leading "```html" and trailing "```" markers until none remain,
/// trimming after each pass.
fn strip_residual_fences(text: &str) -> &str {
    let mut text = text.trim();
    loop {
        let before = text.len();
        if text
            .get(..FENCE_OPEN.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(FENCE_OPEN))
        {
            text = text[FENCE_OPEN.len()..].trim();
        }
        if let Some(stripped) = text.strip_suffix(FENCE_CLOSE) {
            text = stripped.trim();
        }
        if text.len() == before {
            return text;
        }
    }
}
