#![forbid(unsafe_code)]

//! Mailcraft public facade crate.
//!
//! Re-exports the document model from `mailcraft-core` and, with the default
//! `runtime` feature, the history, drag-and-drop and session machinery from
//! `mailcraft-runtime`. Most hosts only need the [`prelude`].
//!
//! ```
//! use mailcraft::prelude::*;
//!
//! let mut session = EditorSession::new(EditorConfig::default());
//! let id = session.add_block("heading")?;
//! session.drag_start(DragPayload::palette_for(BlockKind::Text));
//! session.drag_to_index(DropZone::Root, 0);
//! session.drop()?;
//! assert_eq!(session.document().blocks[1].id, id);
//! assert!(session.undo());
//! # Ok::<(), mailcraft::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use mailcraft_core::{
    Block, BlockContent, BlockFactory, BlockId, BlockKind, BlockStyle, Breakpoint, Column,
    DefaultBlockFactory, Document, DragPayload, DropZone, EmailSettings, FactoryError,
    PaletteCategory, Spacing, Styling, TextAlign, VerticalSpan,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use mailcraft_runtime::{
    CancellationSource, CancellationToken, ConfigError, DragCoordinator, DragKind, DragSession,
    DropOutcome, EditorConfig, EditorSession, History, HistoryConfig, IgnoreReason,
    IndexStrategy, SessionError, StreamConfig, StreamOutcome, stream_text,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Mailcraft hosts.
#[derive(Debug)]
pub enum Error {
    /// A block could not be created.
    Factory(FactoryError),
    /// A session operation failed.
    #[cfg(feature = "runtime")]
    Session(SessionError),
    /// The configuration could not be loaded.
    #[cfg(feature = "runtime")]
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factory(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Session(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Factory(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Session(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Config(err) => Some(err),
        }
    }
}

impl From<FactoryError> for Error {
    fn from(err: FactoryError) -> Self {
        Self::Factory(err)
    }
}

#[cfg(feature = "runtime")]
impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

#[cfg(feature = "runtime")]
impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for Mailcraft APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Block, BlockContent, BlockFactory, BlockId, BlockKind, Breakpoint, Document,
        DragPayload, DropZone, Error, Result, Styling,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{DropOutcome, EditorConfig, EditorSession, History};

    pub use crate::core;
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use mailcraft_core as core;
#[cfg(feature = "runtime")]
pub use mailcraft_runtime as runtime;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn factory_error_converts() {
        let err: Error = FactoryError::UnknownBlockType("poll".into()).into();
        assert_eq!(err.to_string(), "unknown block type 'poll'");
        assert!(err.source().is_some());
    }

    #[cfg(feature = "runtime")]
    #[test]
    fn session_error_propagates_with_question_mark() {
        fn add(session: &mut EditorSession) -> Result<BlockId> {
            Ok(session.add_block("carousel")?)
        }
        let mut session = EditorSession::new(EditorConfig::default());
        let err = add(&mut session).unwrap_err();
        assert!(matches!(err, Error::Session(SessionError::Factory(_))));
    }

    #[cfg(feature = "runtime")]
    #[test]
    fn config_error_converts() {
        let err: Error = EditorConfig::from_toml_str("history = 3").unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
    }
}
