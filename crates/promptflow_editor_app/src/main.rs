// SPDX-License-Identifier: MIT OR Apache-2.0
//! `PromptFlow` Editor - headless front end.
//!
//! Replays a recorded interaction session against the workflow graph core:
//! - Drag-and-drop node placement
//! - Validated connections with error notifications
//! - Field edits
//! - Run / Deploy actions
//!
//! ## Usage
//!
//! ```text
//! promptflow_editor [--settings editor.ron] session.ron
//! ```
//!
//! Logging is controlled through `RUST_LOG`.

mod app;

use app::Options;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,promptflow_editor_app=debug,promptflow_editor_graph=debug")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting PromptFlow Editor v{}", env!("CARGO_PKG_VERSION"));

    let options = Options::parse();
    match app::run(&options) {
        Ok((report, editor)) => app::log_summary(&report, editor.graph()),
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }
}
