// SPDX-License-Identifier: MIT OR Apache-2.0
//! Workflow editor: the entry point the interaction layer calls into.
//!
//! Every gesture maps to one method. Methods run to completion and never
//! fail; refused gestures leave the graph untouched and, where the user
//! should know, display a notification.

use crate::connection::{ConnectRequest, EdgeId};
use crate::graph::{ConnectError, FieldEdit, Graph};
use crate::node::NodeId;
use crate::notification::{Notification, NotificationKind, Notifier};
use crate::placement::{self, DropEvent};
use crate::registry::NodeRegistry;
use crate::settings::EditorSettings;
use std::time::Instant;

/// Message shown by the Run action
pub const RUN_MESSAGE: &str = "Flow ran successfully";
/// Message shown by the Deploy action
pub const DEPLOY_MESSAGE: &str = "Your workflow is ready to be deployed";

/// Editor state for one workflow
#[derive(Debug)]
pub struct WorkflowEditor {
    registry: NodeRegistry,
    graph: Graph,
    notifier: Notifier,
    settings: EditorSettings,
}

impl WorkflowEditor {
    /// Create an editor with an empty graph
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            registry: NodeRegistry::new(),
            graph: Graph::new(),
            notifier: Notifier::new(settings.notification_timeout(), settings.dismiss_policy),
            settings,
        }
    }

    /// Handle a drop on the canvas
    pub fn drop_node(&mut self, event: &DropEvent) -> Option<NodeId> {
        placement::place_drop(
            &mut self.graph,
            &self.registry,
            event,
            self.settings.drop_offset,
        )
    }

    /// Handle a connect gesture
    pub fn connect(&mut self, request: ConnectRequest, now: Instant) -> Option<EdgeId> {
        match self.graph.connect(request) {
            Ok(id) => Some(id),
            Err(ConnectError::Rejected(violation)) => {
                self.notifier
                    .show(violation.to_string(), NotificationKind::Error, now);
                None
            }
            Err(err @ ConnectError::NodeNotFound(_)) => {
                tracing::warn!("Ignoring connection: {err}");
                None
            }
        }
    }

    /// Handle a field widget change
    pub fn edit_field(&mut self, edit: &FieldEdit) -> bool {
        self.graph.set_field(edit)
    }

    /// Run the flow.
    ///
    /// Nothing is executed yet; the action only reports success.
    pub fn run(&mut self, now: Instant) {
        self.notifier.show(RUN_MESSAGE, NotificationKind::Success, now);
    }

    /// Prepare the flow for deployment.
    ///
    /// Nothing is deployed yet; the action only reports success.
    pub fn deploy(&mut self, now: Instant) {
        self.notifier
            .show(DEPLOY_MESSAGE, NotificationKind::Success, now);
    }

    /// Apply notification dismissals due at `now`
    pub fn tick(&mut self, now: Instant) {
        self.notifier.expire(now);
    }

    /// The notification currently displayed
    pub fn notification(&self) -> Option<&Notification> {
        self.notifier.current()
    }

    /// The workflow graph
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The node type registry
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Active settings
    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }
}

impl Default for WorkflowEditor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValue;
    use std::time::Duration;

    fn editor_with_pipeline() -> WorkflowEditor {
        let mut editor = WorkflowEditor::default();
        editor.drop_node(&DropEvent::new("input", 100.0, 100.0));
        editor.drop_node(&DropEvent::new("llm", 400.0, 100.0));
        editor.drop_node(&DropEvent::new("output", 700.0, 100.0));
        editor
    }

    #[test]
    fn test_connect_input_to_llm() {
        let mut editor = editor_with_pipeline();

        let id = editor.connect(ConnectRequest::new("input-1", "llm-2"), Instant::now());

        assert!(id.is_some());
        assert_eq!(editor.graph().edge_count(), 1);
        assert!(editor.notification().is_none());
    }

    #[test]
    fn test_rejected_connection_notifies() {
        let mut editor = editor_with_pipeline();
        let now = Instant::now();

        let id = editor.connect(ConnectRequest::new("input-1", "output-3"), now);

        assert!(id.is_none());
        assert_eq!(editor.graph().edge_count(), 0);
        let notification = editor.notification().unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.message, "Input nodes can only connect to LLM nodes");

        editor.tick(now + Duration::from_secs(3));
        assert!(editor.notification().is_none());
    }

    #[test]
    fn test_connect_unknown_node_is_silent() {
        let mut editor = editor_with_pipeline();

        assert!(editor
            .connect(ConnectRequest::new("input-1", "llm-7"), Instant::now())
            .is_none());
        assert!(editor.notification().is_none());
        assert_eq!(editor.graph().edge_count(), 0);
    }

    #[test]
    fn test_run_and_deploy_notify_success() {
        let mut editor = editor_with_pipeline();
        let now = Instant::now();

        editor.run(now);
        let run = editor.notification().unwrap();
        assert_eq!(run.kind, NotificationKind::Success);
        assert_eq!(run.message, RUN_MESSAGE);

        editor.deploy(now);
        assert_eq!(editor.notification().unwrap().message, DEPLOY_MESSAGE);
        assert_eq!(editor.graph().edge_count(), 0);
        assert_eq!(editor.graph().node_count(), 3);
    }

    #[test]
    fn test_edit_field_through_editor() {
        let mut editor = editor_with_pipeline();

        assert!(editor.edit_field(&FieldEdit::new("llm-2", "model", "gpt-4")));

        let node = editor.graph().node(&NodeId::from("llm-2")).unwrap();
        assert_eq!(node.field("model"), Some(&FieldValue::from("gpt-4")));
    }

    #[test]
    fn test_custom_drop_offset() {
        let mut editor = WorkflowEditor::new(EditorSettings {
            drop_offset: [0.0, 0.0],
            ..EditorSettings::default()
        });

        let id = editor.drop_node(&DropEvent::new("input", 150.0, 80.0)).unwrap();

        assert_eq!(editor.graph().node(&id).unwrap().position, [150.0, 80.0]);
    }
}
