#![forbid(unsafe_code)]

//! The editor document: the unit of undo/redo.
//!
//! A [`Document`] is small (a few dozen blocks at most) and compared
//! structurally, so the history manager can version it by value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockId};

/// Email-wide presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    pub background_color: String,
    pub content_width_px: u32,
    pub font_family: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            background_color: "#f4f4f5".to_string(),
            content_width_px: 600,
            font_family: "Arial, Helvetica, sans-serif".to_string(),
        }
    }
}

/// Which block list a drop or insertion addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "zone", rename_all = "lowercase")]
pub enum DropZone {
    /// The document's top-level list.
    #[default]
    Root,
    /// Child list of one column of a `columns` block.
    Column { parent: BlockId, column: usize },
}

impl fmt::Display for DropZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("root"),
            Self::Column { parent, column } => write!(f, "{parent}[{column}]"),
        }
    }
}

/// A complete email template.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub subject: String,
    pub preheader: String,
    pub settings: EmailSettings,
    pub blocks: Vec<Block>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    #[must_use]
    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    /// Total number of blocks, nested ones included.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.iter().map(Block::subtree_len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find_map(|block| block.find(id))
    }

    pub fn find_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find_map(|block| block.find_mut(id))
    }

    #[must_use]
    pub fn contains(&self, id: &BlockId) -> bool {
        self.find(id).is_some()
    }

    /// All ids in depth-first pre-order.
    #[must_use]
    pub fn ids(&self) -> Vec<&BlockId> {
        let mut out = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            block.visit_ids(&mut out);
        }
        out
    }

    /// The block list addressed by `zone`.
    ///
    /// `None` if the parent does not exist, is not a `columns` block, or the
    /// column index is out of range.
    #[must_use]
    pub fn list(&self, zone: &DropZone) -> Option<&Vec<Block>> {
        match zone {
            DropZone::Root => Some(&self.blocks),
            DropZone::Column { parent, column } => self
                .find(parent)?
                .columns()
                .get(*column)
                .map(|col| &col.blocks),
        }
    }

    /// Mutable variant of [`list`](Self::list).
    pub fn list_mut(&mut self, zone: &DropZone) -> Option<&mut Vec<Block>> {
        match zone {
            DropZone::Root => Some(&mut self.blocks),
            DropZone::Column { parent, column } => self
                .find_mut(parent)?
                .columns_mut()?
                .get_mut(*column)
                .map(|col| &mut col.blocks),
        }
    }

    /// The zone and index holding `id`.
    #[must_use]
    pub fn locate(&self, id: &BlockId) -> Option<(DropZone, usize)> {
        locate_in(&self.blocks, DropZone::Root, id)
    }

    /// Remove `id` from wherever it lives in the tree.
    pub fn remove(&mut self, id: &BlockId) -> Option<Block> {
        let (zone, index) = self.locate(id)?;
        let list = self.list_mut(&zone)?;
        Some(list.remove(index))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON. Missing top-level fields take their defaults.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

fn locate_in(blocks: &[Block], zone: DropZone, id: &BlockId) -> Option<(DropZone, usize)> {
    if let Some(index) = blocks.iter().position(|b| &b.id == id) {
        return Some((zone, index));
    }
    blocks.iter().find_map(|block| {
        block
            .columns()
            .iter()
            .enumerate()
            .find_map(|(column, col)| {
                let zone = DropZone::Column {
                    parent: block.id.clone(),
                    column,
                };
                locate_in(&col.blocks, zone, id)
            })
    })
}
