// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Navigation shield injected into every preview document.
//!
//! Listeners run in the capture phase so they see events before any handler
//! the artifact installs. Anchor clicks never navigate; fragment links scroll
//! to the element with the matching id or name. Form submissions are
//! cancelled and the unload prompt is suppressed.

/// Marker attribute identifying the injected block.
pub const SHIELD_MARKER: &str = "data-ryze-shield";

pub const NAVIGATION_SHIELD: &str = r#"
<style data-ryze-shield>
  a { cursor: pointer !important; }
  ::-webkit-scrollbar { width: 0px; background: transparent; }
</style>
<script data-ryze-shield>
  document.addEventListener('click', function(e) {
    const link = e.target.closest('a');
    if (link) {
      e.preventDefault();
      e.stopPropagation();
      const href = link.getAttribute('href');
      if (href && href.startsWith('#')) {
        const targetId = href.substring(1);
        const targetEl = document.getElementById(targetId) || document.getElementsByName(targetId)[0];
        if (targetEl) targetEl.scrollIntoView({ behavior: 'smooth', block: 'start' });
      }
    }
  }, true);
  document.addEventListener('submit', function(e) { e.preventDefault(); e.stopPropagation(); }, true);
  window.onbeforeunload = function() { return false; };
</script>"#;
