// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ryze - describe a web page, get runnable HTML, refine it turn by turn.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod app;
mod config_cmd;
mod error;
mod generate;
mod preview;
mod projects;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use ryze_sandbox::Device;

use crate::error::CliError;

/// Ryze - describe a web page, get runnable HTML.
#[derive(Parser, Debug)]
#[command(name = "ryze", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a page from a description (one turn).
    Generate {
        /// What to build, or what to change when refining.
        description: String,
        /// Refine this HTML file instead of starting from scratch.
        #[arg(long, value_name = "FILE")]
        refine: Option<PathBuf>,
        /// Write the HTML here instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Also write a sandboxed preview page here.
        #[arg(long, value_name = "FILE")]
        preview: Option<PathBuf>,
        /// Personal API key used instead of the shared default.
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,
    },
    /// Launch an interactive builder session.
    Shell,
    /// Wrap an HTML file in a sandboxed preview page.
    Preview {
        /// HTML file to preview.
        file: PathBuf,
        /// Write the preview page here instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Frame width preset: desktop, tablet or mobile.
        #[arg(long, default_value = "desktop")]
        device: Device,
    },
    /// Manage saved projects.
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },
    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ProjectsAction {
    /// List saved projects, newest first.
    List,
    /// Show one project's details and turn history.
    Show { id: String },
    /// Delete a project.
    Delete { id: String },
    /// Write a project's HTML to a file.
    Export { id: String, file: PathBuf },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Load and validate the configuration.
    Check,
    /// Print the effective configuration with secrets redacted.
    Show,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => ryze_config::load_and_validate_path(path),
        None => ryze_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            ryze_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    let result = match cli.command {
        Some(Commands::Generate {
            description,
            refine,
            out,
            preview,
            api_key,
        }) => {
            generate::run_generate(
                &config,
                generate::GenerateArgs {
                    description,
                    refine,
                    out,
                    preview,
                    api_key,
                },
            )
            .await
        }
        Some(Commands::Shell) => shell::run_shell(&config).await,
        Some(Commands::Preview { file, out, device }) => {
            preview::run_preview(&file, out.as_deref(), device)
        }
        Some(Commands::Projects { action }) => projects::run_projects(&config, action).await,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Check => config_cmd::run_check(&config),
            ConfigAction::Show => config_cmd::run_show(&config),
        },
        None => {
            println!("ryze: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }
}

fn report(err: &CliError) {
    eprintln!("{}: {}", "error".red(), err.user_message());
    if let Some(detail) = err.detail() {
        eprintln!("{}", detail.dimmed());
    }
}

/// Initialize the tracing subscriber. Logs go to stderr so HTML can be piped
/// from stdout.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ryze={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
