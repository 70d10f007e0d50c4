// SPDX-License-Identifier: MIT OR Apache-2.0
//! Workflow graph model for the `PromptFlow` editor.
//!
//! This crate holds the decision logic behind a three-stage
//! `Input -> LLM Engine -> Output` pipeline editor:
//! - Node kinds and their field schemas
//! - The graph store with placement-ordered nodes and directed edges
//! - Connection rules between node kinds
//! - Node placement from drag-and-drop gestures
//! - Field edits that only replace the node they touch
//! - Auto-dismissing notifications
//!
//! ## Architecture
//!
//! Rendering is left to the caller. The interaction layer forwards each
//! gesture to a [`WorkflowEditor`], which updates the [`Graph`] and the
//! current notification. Recorded gestures can be replayed with a
//! [`Session`].

pub mod node;
pub mod field;
pub mod registry;
pub mod connection;
pub mod graph;
pub mod placement;
pub mod notification;
pub mod settings;
pub mod editor;
pub mod session;

pub use node::{Node, NodeId, NodeKind, NodeType, UnknownKindError};
pub use field::{FieldDefinition, FieldType, FieldValue, NodeData};
pub use registry::NodeRegistry;
pub use connection::{validate, ConnectRequest, Edge, EdgeId, RuleViolation};
pub use graph::{ConnectError, FieldEdit, Graph};
pub use placement::{DragPayload, DropEvent};
pub use notification::{DismissPolicy, Notification, NotificationKind, Notifier};
pub use settings::{EditorSettings, SettingsError};
pub use editor::WorkflowEditor;
pub use session::{ReplayReport, Session, SessionError, SessionEvent};
