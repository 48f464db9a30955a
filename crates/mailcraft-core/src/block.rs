#![forbid(unsafe_code)]

//! Content blocks.
//!
//! A [`Block`] is one unit of an email document. Its payload is a
//! [`BlockContent`] variant, so every consumer matches exhaustively on the
//! block type instead of probing loosely typed properties.
//!
//! # Serialized shape
//!
//! The content is flattened into the block, with the type tag alongside the
//! id:
//!
//! ```json
//! { "id": "block-3", "type": "button", "label": "Shop now", "href": "https://…" }
//! ```
//!
//! # Ownership
//!
//! Blocks are owned by the list that contains them. A `columns` block owns
//! its [`Column`]s, which own their child blocks, so the whole document is
//! a tree with a single owner per node.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::style::Styling;

/// Unique identifier of a block within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Type tag of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Heading,
    Image,
    Button,
    Divider,
    Spacer,
    Columns,
}

impl BlockKind {
    /// Every block kind, in palette order.
    pub const ALL: [BlockKind; 7] = [
        Self::Text,
        Self::Heading,
        Self::Image,
        Self::Button,
        Self::Divider,
        Self::Spacer,
        Self::Columns,
    ];

    /// The palette type identifier, e.g. `"text"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Heading => "heading",
            Self::Image => "image",
            Self::Button => "button",
            Self::Divider => "divider",
            Self::Spacer => "spacer",
            Self::Columns => "columns",
        }
    }

    /// Parse a palette type identifier. Matching is exact.
    #[must_use]
    pub fn from_type_id(type_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == type_id)
    }

    /// Layout kinds structure other blocks rather than carry content.
    #[must_use]
    pub const fn is_layout(self) -> bool {
        matches!(self, Self::Columns)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column of a `columns` block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Column {
    #[must_use]
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

/// Typed payload of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockContent {
    Text {
        html: String,
    },
    Heading {
        text: String,
        /// 1..=6
        level: u8,
    },
    Image {
        src: String,
        alt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        href: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width_px: Option<u32>,
    },
    Button {
        label: String,
        href: String,
    },
    Divider {
        thickness_px: u16,
        color: String,
    },
    Spacer {
        height_px: u16,
    },
    Columns {
        columns: Vec<Column>,
    },
}

impl BlockContent {
    #[must_use]
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Text { .. } => BlockKind::Text,
            Self::Heading { .. } => BlockKind::Heading,
            Self::Image { .. } => BlockKind::Image,
            Self::Button { .. } => BlockKind::Button,
            Self::Divider { .. } => BlockKind::Divider,
            Self::Spacer { .. } => BlockKind::Spacer,
            Self::Columns { .. } => BlockKind::Columns,
        }
    }
}

/// A single content unit of an email document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(flatten)]
    pub content: BlockContent,
    #[serde(default)]
    pub styling: Styling,
}

impl Block {
    /// Create a block with default styling.
    #[must_use]
    pub fn new(id: impl Into<BlockId>, content: BlockContent) -> Self {
        Self {
            id: id.into(),
            content,
            styling: Styling::default(),
        }
    }

    #[must_use]
    pub fn with_styling(mut self, styling: Styling) -> Self {
        self.styling = styling;
        self
    }

    #[must_use]
    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }

    /// Child columns of a layout block; empty for content blocks.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        match &self.content {
            BlockContent::Columns { columns } => columns,
            _ => &[],
        }
    }

    /// Mutable child columns, or `None` for content blocks.
    pub fn columns_mut(&mut self) -> Option<&mut Vec<Column>> {
        match &mut self.content {
            BlockContent::Columns { columns } => Some(columns),
            _ => None,
        }
    }

    /// This block or a descendant with the given id.
    #[must_use]
    pub fn find(&self, id: &BlockId) -> Option<&Block> {
        if &self.id == id {
            return Some(self);
        }
        self.columns()
            .iter()
            .flat_map(|col| col.blocks.iter())
            .find_map(|child| child.find(id))
    }

    /// Mutable lookup of this block or a descendant.
    pub fn find_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        if &self.id == id {
            return Some(self);
        }
        self.columns_mut()?
            .iter_mut()
            .flat_map(|col| col.blocks.iter_mut())
            .find_map(|child| child.find_mut(id))
    }

    /// Number of blocks in this subtree, including `self`.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self
            .columns()
            .iter()
            .flat_map(|col| col.blocks.iter())
            .map(Block::subtree_len)
            .sum::<usize>()
    }

    /// Visit ids of this subtree in depth-first pre-order.
    pub fn visit_ids<'a>(&'a self, out: &mut Vec<&'a BlockId>) {
        out.push(&self.id);
        for child in self.columns().iter().flat_map(|col| col.blocks.iter()) {
            child.visit_ids(out);
        }
    }

    /// Give this block and every descendant a new id from `next_id`.
    pub fn reassign_ids(&mut self, next_id: &mut impl FnMut() -> BlockId) {
        self.id = next_id();
        if let Some(columns) = self.columns_mut() {
            for child in columns.iter_mut().flat_map(|col| col.blocks.iter_mut()) {
                child.reassign_ids(next_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(id: &str) -> Block {
        Block::new(
            id,
            BlockContent::Text {
                html: format!("<p>{id}</p>"),
            },
        )
    }

    fn columns(id: &str, cols: Vec<Vec<Block>>) -> Block {
        Block::new(
            id,
            BlockContent::Columns {
                columns: cols.into_iter().map(Column::new).collect(),
            },
        )
    }

    #[test]
    fn kind_round_trips_through_type_id() {
        for kind in BlockKind::ALL {
            assert_eq!(BlockKind::from_type_id(kind.as_str()), Some(kind));
        }
        assert_eq!(BlockKind::from_type_id("Text"), None);
        assert_eq!(BlockKind::from_type_id("video"), None);
    }

    #[test]
    fn only_columns_is_layout() {
        let layouts: Vec<_> = BlockKind::ALL.into_iter().filter(|k| k.is_layout()).collect();
        assert_eq!(layouts, vec![BlockKind::Columns]);
    }

    #[test]
    fn find_descends_into_columns() {
        let block = columns("row", vec![vec![text("a")], vec![text("b"), text("c")]]);
        assert_eq!(block.find(&"c".into()).map(|b| b.kind()), Some(BlockKind::Text));
        assert!(block.find(&"row".into()).is_some());
        assert!(block.find(&"zzz".into()).is_none());
    }

    #[test]
    fn find_mut_edits_nested_block() {
        let mut block = columns("row", vec![vec![text("a")]]);
        if let Some(inner) = block.find_mut(&"a".into()) {
            inner.content = BlockContent::Spacer { height_px: 8 };
        }
        assert_eq!(block.columns()[0].blocks[0].kind(), BlockKind::Spacer);
    }

    #[test]
    fn subtree_len_counts_nested() {
        let nested = columns("inner", vec![vec![text("x")]]);
        let block = columns("outer", vec![vec![text("a"), nested], vec![]]);
        assert_eq!(block.subtree_len(), 4);
    }

    #[test]
    fn reassign_ids_touches_every_node() {
        let mut block = columns("row", vec![vec![text("a")], vec![text("b")]]);
        let mut n = 0;
        block.reassign_ids(&mut || {
            n += 1;
            BlockId::new(format!("copy-{n}"))
        });
        let mut ids = Vec::new();
        block.visit_ids(&mut ids);
        let ids: Vec<_> = ids.into_iter().map(BlockId::as_str).collect();
        assert_eq!(ids, vec!["copy-1", "copy-2", "copy-3"]);
    }

    #[test]
    fn json_shape_is_flat_with_type_tag() {
        let block = Block::new(
            "b1",
            BlockContent::Button {
                label: "Go".into(),
                href: "https://example.com".into(),
            },
        );
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["id"], "b1");
        assert_eq!(value["type"], "button");
        assert_eq!(value["label"], "Go");

        let back: Block = serde_json::from_value(value).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn unknown_type_tag_fails_to_deserialize() {
        let raw = r#"{"id":"x","type":"marquee","text":"hi"}"#;
        assert!(serde_json::from_str::<Block>(raw).is_err());
    }
}
