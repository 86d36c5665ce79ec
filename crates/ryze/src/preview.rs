// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ryze preview` command implementation.

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use ryze_sandbox::{Device, host_page, to_render_document};

use crate::error::CliError;
use crate::generate::{read_file, write_file};

/// Wraps an HTML file in a sandboxed host page.
pub fn run_preview(file: &Path, out: Option<&Path>, device: Device) -> Result<(), CliError> {
    let html = read_file(file)?;
    let page = preview_page(&html, &title_for(file), device);
    match out {
        Some(path) => {
            write_file(path, &page)?;
            eprintln!("{} {}", "preview".green(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(page.as_bytes())
                .map_err(|e| CliError::io("failed to write", "<stdout>", e))?;
        }
    }
    Ok(())
}

pub fn preview_page(html: &str, title: &str, device: Device) -> String {
    host_page(&to_render_document(html), title, device)
}

fn title_for(file: &Path) -> String {
    file.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ryze".to_string())
}
