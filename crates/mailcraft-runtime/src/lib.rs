#![forbid(unsafe_code)]

//! Mailcraft Runtime
//!
//! The stateful half of the email editor core. `mailcraft-core` defines what
//! a document is; this crate edits it.
//!
//! # Key Components
//!
//! - [`History`] - Snapshot undo/redo with a bounded past
//! - [`DragCoordinator`] - Drag-and-drop state machine and drop index math
//! - [`EditorSession`] - One open document with history, drag and factory
//! - [`EditorConfig`] - Tunables loadable from TOML or JSON
//! - [`stream_text`] - Cancellable, paced reveal of generated text
//!
//! # Logging
//! Every module emits `tracing` events under `mailcraft.*` targets. With the
//! `logging` feature, [`logging::init_logging`] installs a `fmt` subscriber
//! configured from [`LoggingConfig`].

pub mod cancellation;
pub mod config;
pub mod drag;
#[cfg(feature = "logging")]
pub mod logging;
pub mod session;
pub mod stream;
pub mod undo;

pub use cancellation::{CancellationSource, CancellationToken};
pub use config::{ConfigError, EditorConfig, LoggingConfig, PreviewConfig};
pub use drag::{
    DragConfig, DragCoordinator, DragKind, DragSession, DropOutcome, DropTarget, IgnoreReason,
    IndexStrategy, apply_drop, drop_index, move_to_slot, reorder_index,
};
pub use session::{EditorSession, SessionError};
pub use stream::{StreamConfig, StreamOutcome, chunk_words, stream_text};
pub use undo::{History, HistoryConfig, HistoryState};
