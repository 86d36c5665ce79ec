// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Preview sandbox for untrusted generated HTML.
//!
//! [`to_render_document`] strips base-URL declarations and injects the
//! navigation shield. It is pure and total, and is recomputed from the
//! current artifact whenever it is needed; the result is never stored.
//!
//! Script isolation itself is the rendering host's job: load the document
//! into a frame sandboxed with [`RenderDocument::IFRAME_SANDBOX`].

pub mod host;
pub mod shield;

use std::sync::LazyLock;

use regex::Regex;

pub use host::{Device, escape_html, host_page};
pub use shield::NAVIGATION_SHIELD;

/// A base tag, or an unterminated one running to the end of input, which
/// would otherwise swallow the appended shield as its attributes.
static BASE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<base[^>]*(?:>|\z)").unwrap());

const BODY_CLOSE: &str = "</body>";

/// A render-safe document derived from an artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderDocument {
    html: String,
}

impl RenderDocument {
    /// Sandbox token set the rendering host must apply to the frame.
    pub const IFRAME_SANDBOX: &'static str = "allow-scripts";

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

impl std::fmt::Display for RenderDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.html)
    }
}

/// Produces the render-safe form of `html`. Empty input stays empty.
pub fn to_render_document(html: &str) -> RenderDocument {
    if html.is_empty() {
        return RenderDocument::default();
    }

    let stripped = strip_base_tags(html);
    let html = match find_last_body_close(&stripped) {
        Some(idx) => {
            let mut out = String::with_capacity(stripped.len() + NAVIGATION_SHIELD.len());
            out.push_str(&stripped[..idx]);
            out.push_str(NAVIGATION_SHIELD);
            out.push_str(&stripped[idx..]);
            out
        }
        None => format!("{stripped}{NAVIGATION_SHIELD}"),
    };
    RenderDocument { html }
}

/// Removes `<base ...>` tags until none remain, so removals cannot splice
/// a new tag together.
fn strip_base_tags(html: &str) -> String {
    let mut current = html.to_string();
    while BASE_TAG.is_match(&current) {
        current = BASE_TAG.replace_all(&current, "").into_owned();
    }
    current
}

/// Byte offset of the last `</body>`, matched case-insensitively.
fn find_last_body_close(html: &str) -> Option<usize> {
    html.to_ascii_lowercase().rfind(BODY_CLOSE)
}
