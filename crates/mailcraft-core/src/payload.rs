#![forbid(unsafe_code)]

//! Drag payloads.
//!
//! The browser hands drag data over as a string. [`DragPayload::decode`]
//! turns it into a typed payload and treats anything it cannot read as
//! "no payload": drag-and-drop implementations differ enough between
//! browsers that a bad payload must never abort the gesture handler.
//!
//! Wire format:
//!
//! ```json
//! {"source":"block","id":"block-7"}
//! {"source":"palette","type":"columns","category":"layout"}
//! ```

use serde::{Deserialize, Serialize};

use crate::block::{BlockId, BlockKind};

/// Palette section an item comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteCategory {
    #[default]
    Content,
    Layout,
}

impl PaletteCategory {
    /// The section a built-in kind is listed under.
    #[must_use]
    pub fn of(kind: BlockKind) -> Self {
        if kind.is_layout() {
            Self::Layout
        } else {
            Self::Content
        }
    }
}

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum DragPayload {
    /// A block already placed in the document.
    Block { id: BlockId },
    /// An insertable item from the palette.
    Palette {
        #[serde(rename = "type")]
        type_id: String,
        #[serde(default)]
        category: PaletteCategory,
    },
}

impl DragPayload {
    #[must_use]
    pub fn existing(id: impl Into<BlockId>) -> Self {
        Self::Block { id: id.into() }
    }

    #[must_use]
    pub fn palette(type_id: impl Into<String>, category: PaletteCategory) -> Self {
        Self::Palette {
            type_id: type_id.into(),
            category,
        }
    }

    /// Palette payload for a built-in kind, with its natural category.
    #[must_use]
    pub fn palette_for(kind: BlockKind) -> Self {
        Self::palette(kind.as_str(), PaletteCategory::of(kind))
    }

    /// Block id for existing blocks, type identifier for palette items.
    #[must_use]
    pub fn dragged_id(&self) -> &str {
        match self {
            Self::Block { id } => id.as_str(),
            Self::Palette { type_id, .. } => type_id,
        }
    }

    /// Decode a raw payload. Empty or malformed input yields `None`.
    #[must_use]
    pub fn decode(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "mailcraft.drag", "missing drag payload");
            return None;
        }
        match serde_json::from_str::<Self>(raw) {
            Ok(payload) if payload.dragged_id().is_empty() => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "mailcraft.drag", "drag payload carries an empty id");
                None
            }
            Ok(payload) => Some(payload),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    target: "mailcraft.drag",
                    error = %_err,
                    raw_len = raw.len(),
                    "malformed drag payload"
                );
                None
            }
        }
    }

    /// Encode to the wire format.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
