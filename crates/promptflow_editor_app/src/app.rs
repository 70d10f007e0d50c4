// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless editor application: option parsing and session replay.

use clap::Parser;
use promptflow_editor_graph::{
    EditorSettings, Graph, ReplayReport, Session, SessionError, SettingsError, WorkflowEditor,
};
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;

/// Editor application errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Settings could not be loaded
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Session could not be loaded
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Result type for application operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Command line options
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "promptflow_editor")]
#[command(about = "Replay a recorded PromptFlow editing session")]
#[command(version)]
pub struct Options {
    /// Settings file (RON); defaults apply when absent
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Session script (RON) to replay
    #[arg(value_name = "SESSION")]
    pub session: PathBuf,
}

/// Load the settings and session named by `options` and replay the session
pub fn run(options: &Options) -> Result<(ReplayReport, WorkflowEditor)> {
    let settings = match &options.settings {
        Some(path) => {
            tracing::info!("Loading settings from {}", path.display());
            EditorSettings::load(path)?
        }
        None => EditorSettings::default(),
    };

    tracing::info!("Replaying session {}", options.session.display());
    let session = Session::load(&options.session)?;

    let mut editor = WorkflowEditor::new(settings);
    let report = session.replay(&mut editor, Instant::now());
    Ok((report, editor))
}

/// Log a summary of the replay and the resulting graph
pub fn log_summary(report: &ReplayReport, graph: &Graph) {
    tracing::info!(
        "Replay finished: {} nodes placed ({} drops ignored), {} edges added ({} refused), \
         {} field changes",
        report.nodes_placed,
        report.drops_ignored,
        report.edges_added,
        report.connections_refused,
        report.fields_changed,
    );

    for (kind, message) in &report.notifications {
        tracing::info!("Notification [{kind:?}]: {message}");
    }

    for node in graph.nodes() {
        let fields: Vec<String> = node
            .data
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        tracing::debug!(
            "{} at ({}, {}): {}",
            node.id,
            node.position[0],
            node.position[1],
            fields.join(", ")
        );
    }

    for edge in graph.edges() {
        tracing::debug!("{} -> {}", edge.source, edge.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session_only() {
        let options = Options::try_parse_from(["promptflow_editor", "flow.ron"]).unwrap();
        assert_eq!(options.session, PathBuf::from("flow.ron"));
        assert!(options.settings.is_none());
    }

    #[test]
    fn test_parse_with_settings() {
        let options =
            Options::try_parse_from(["promptflow_editor", "--settings", "editor.ron", "flow.ron"])
                .unwrap();
        assert_eq!(options.settings, Some(PathBuf::from("editor.ron")));
        assert_eq!(options.session, PathBuf::from("flow.ron"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Options::try_parse_from(["promptflow_editor"]).is_err());
        assert!(Options::try_parse_from(["promptflow_editor", "--settings"]).is_err());
        assert!(Options::try_parse_from(["promptflow_editor", "--verbose", "a.ron"]).is_err());
        assert!(Options::try_parse_from(["promptflow_editor", "a.ron", "b.ron"]).is_err());
    }

    #[test]
    fn test_run_missing_session() {
        let options = Options {
            settings: None,
            session: PathBuf::from("/nonexistent/session.ron"),
        };
        assert!(matches!(run(&options), Err(AppError::Session(SessionError::Io(_)))));
    }

    #[test]
    fn test_run_replays_session() {
        let path = std::env::temp_dir()
            .join(format!("promptflow-session-{}.ron", std::process::id()));
        std::fs::write(
            &path,
            r#"[
                Drop(kind: Some("input"), x: 100.0, y: 50.0),
                Drop(kind: Some("llm"), x: 400.0, y: 50.0),
                Connect(source: "input-1", target: "llm-2"),
            ]"#,
        )
        .unwrap();

        let options = Options {
            settings: None,
            session: path.clone(),
        };
        let (report, editor) = run(&options).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(report.nodes_placed, 2);
        assert_eq!(report.edges_added, 1);
        assert_eq!(editor.graph().edge_count(), 1);
    }
}
