// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Standalone host page that frames a render document in an isolated iframe.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::RenderDocument;

/// Preview frame width preset.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Device {
    /// Maximum frame width in CSS pixels; `None` means full width.
    pub fn max_width_px(self) -> Option<u32> {
        match self {
            Device::Desktop => None,
            Device::Tablet => Some(768),
            Device::Mobile => Some(375),
        }
    }

    fn max_width_css(self) -> String {
        self.max_width_px()
            .map_or_else(|| "100%".to_string(), |px| format!("{px}px"))
    }
}

/// Builds an HTML page embedding `doc` through `srcdoc`.
///
/// The frame only gets `allow-scripts`: no top-level navigation, no forms,
/// no popups, no same-origin storage.
pub fn host_page(doc: &RenderDocument, title: &str, device: Device) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
  html, body {{ margin: 0; height: 100%; background: #000; }}
  .frame {{ box-sizing: border-box; height: 100%; margin: 0 auto; max-width: {width}; }}
  iframe {{ width: 100%; height: 100%; border: none; background: #fff; }}
</style>
</head>
<body>
<div class="frame" data-device="{device}">
<iframe title="{title}" sandbox="{sandbox}" srcdoc="{srcdoc}"></iframe>
</div>
</body>
</html>
"#,
        title = escape_html(title),
        width = device.max_width_css(),
        device = device,
        sandbox = RenderDocument::IFRAME_SANDBOX,
        srcdoc = escape_html(doc.as_str()),
    )
}

/// Escapes text for use in element content or a double-quoted attribute.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}
