// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scripted interaction sessions.
//!
//! A session is a recorded list of gestures (drops, connections, field
//! edits, toolbar actions and pauses) written in RON. Replaying it drives a
//! [`WorkflowEditor`] exactly as the interactive canvas would, against a
//! virtual clock that only advances on `Wait` events.

use crate::connection::ConnectRequest;
use crate::editor::WorkflowEditor;
use crate::field::FieldValue;
use crate::graph::FieldEdit;
use crate::notification::{NotificationKind, NotificationToken};
use crate::placement::{DragPayload, DropEvent};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Failed to parse session: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// One recorded gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Palette item dropped on the canvas
    Drop {
        /// Kind identifier carried by the drag, if any
        kind: Option<String>,
        /// Pointer x in window coordinates
        x: f32,
        /// Pointer y in window coordinates
        y: f32,
    },
    /// Edge drawn between two nodes
    Connect {
        /// Source node id
        source: String,
        /// Target node id
        target: String,
        /// Source handle id
        #[serde(default)]
        source_handle: Option<String>,
        /// Target handle id
        #[serde(default)]
        target_handle: Option<String>,
    },
    /// Field widget changed
    Edit {
        /// Node id
        node: String,
        /// Field name
        field: String,
        /// New value
        value: FieldValue,
    },
    /// Run button pressed
    Run,
    /// Deploy button pressed
    Deploy,
    /// Time passing between gestures
    Wait {
        /// Pause length in milliseconds
        millis: u64,
    },
}

/// Outcome of a replay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    /// Drops that created a node
    pub nodes_placed: usize,
    /// Drops without a known kind
    pub drops_ignored: usize,
    /// Connections that created an edge
    pub edges_added: usize,
    /// Connections refused by the rules or naming a missing node
    pub connections_refused: usize,
    /// Edits that changed a node
    pub fields_changed: usize,
    /// Every notification shown, in order
    pub notifications: Vec<(NotificationKind, String)>,
}

/// A recorded list of gestures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    /// Gestures in the order they happened
    pub events: Vec<SessionEvent>,
}

impl Session {
    /// Parse a session from RON
    pub fn from_ron(source: &str) -> Result<Self, SessionError> {
        Ok(ron::from_str(source)?)
    }

    /// Load a session from a RON file
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Replay every gesture against `editor`, with the virtual clock starting at `start`
    pub fn replay(&self, editor: &mut WorkflowEditor, start: Instant) -> ReplayReport {
        let mut report = ReplayReport::default();
        let mut now = start;
        let mut last_seen: Option<NotificationToken> = None;

        for event in &self.events {
            match event {
                SessionEvent::Drop { kind, x, y } => {
                    let payload = kind.as_deref().map(DragPayload::new);
                    let drop = DropEvent::with_payload(payload, *x, *y);
                    match editor.drop_node(&drop) {
                        Some(_) => report.nodes_placed += 1,
                        None => report.drops_ignored += 1,
                    }
                }
                SessionEvent::Connect {
                    source,
                    target,
                    source_handle,
                    target_handle,
                } => {
                    let request = ConnectRequest::new(source.as_str(), target.as_str())
                        .with_handles(source_handle.clone(), target_handle.clone());
                    match editor.connect(request, now) {
                        Some(_) => report.edges_added += 1,
                        None => report.connections_refused += 1,
                    }
                }
                SessionEvent::Edit { node, field, value } => {
                    let edit = FieldEdit::new(node.as_str(), field.as_str(), value.clone());
                    if editor.edit_field(&edit) {
                        report.fields_changed += 1;
                    }
                }
                SessionEvent::Run => editor.run(now),
                SessionEvent::Deploy => editor.deploy(now),
                SessionEvent::Wait { millis } => now += Duration::from_millis(*millis),
            }

            if let Some(notification) = editor.notification() {
                if last_seen != Some(notification.token) {
                    last_seen = Some(notification.token);
                    report
                        .notifications
                        .push((notification.kind, notification.message.clone()));
                }
            }
            editor.tick(now);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;

    const SCRIPT: &str = r#"[
        Drop(kind: Some("input"), x: 150.0, y: 80.0),
        Drop(kind: Some("llm"), x: 450.0, y: 80.0),
        Drop(kind: Some("output"), x: 750.0, y: 80.0),
        Drop(kind: None, x: 10.0, y: 10.0),
        Connect(source: "input-1", target: "llm-2"),
        Connect(source: "input-1", target: "output-3"),
        Wait(millis: 1000),
        Connect(source: "llm-2", target: "output-3", source_handle: Some("out")),
        Edit(node: "input-1", field: "query", value: "What is the definition of science?"),
        Edit(node: "llm-2", field: "maxTokens", value: 512),
        Edit(node: "missing-9", field: "query", value: "x"),
        Wait(millis: 3000),
        Run,
        Deploy,
    ]"#;

    #[test]
    fn test_replay_script() {
        let session = Session::from_ron(SCRIPT).unwrap();
        let mut editor = WorkflowEditor::default();

        let report = session.replay(&mut editor, Instant::now());

        assert_eq!(report.nodes_placed, 3);
        assert_eq!(report.drops_ignored, 1);
        assert_eq!(report.edges_added, 2);
        assert_eq!(report.connections_refused, 1);
        assert_eq!(report.fields_changed, 2);
        assert_eq!(
            report.notifications,
            vec![
                (
                    NotificationKind::Error,
                    "Input nodes can only connect to LLM nodes".to_string()
                ),
                (NotificationKind::Success, "Flow ran successfully".to_string()),
                (
                    NotificationKind::Success,
                    "Your workflow is ready to be deployed".to_string()
                ),
            ]
        );

        let input = editor.graph().node(&NodeId::from("input-1")).unwrap();
        assert_eq!(input.position, [50.0, 30.0]);
        let llm = editor.graph().node(&NodeId::from("llm-2")).unwrap();
        assert_eq!(llm.field("maxTokens"), Some(&FieldValue::Integer(512)));
    }

    #[test]
    fn test_wait_dismisses_notification() {
        let session = Session::from_ron("[Run, Wait(millis: 2999)]").unwrap();
        let mut editor = WorkflowEditor::default();
        session.replay(&mut editor, Instant::now());
        assert!(editor.notification().is_some());

        let session = Session::from_ron("[Wait(millis: 1)]").unwrap();
        let start = Instant::now();
        let mut editor = WorkflowEditor::default();
        editor.run(start);
        session.replay(&mut editor, start + Duration::from_millis(2999));
        assert!(editor.notification().is_none());
    }

    #[test]
    fn test_invalid_script() {
        let err = Session::from_ron("[Explode]").unwrap_err();
        assert!(matches!(err, SessionError::Parse(_)));
    }
}
