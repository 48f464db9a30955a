#![forbid(unsafe_code)]

//! Block construction from palette type identifiers.
//!
//! The factory is an explicitly owned value: each editor session holds its
//! own instance, and with it its own id sequence. Nothing here is global.

use std::fmt;

use crate::block::{Block, BlockContent, BlockId, BlockKind, Column};
use crate::style::{BlockStyle, Spacing, Styling, TextAlign};

/// Errors raised while constructing blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// The palette asked for a type this factory does not know.
    UnknownBlockType(String),
}

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBlockType(type_id) => write!(f, "unknown block type '{type_id}'"),
        }
    }
}

impl std::error::Error for FactoryError {}

/// Creates blocks with default content and styling.
pub trait BlockFactory {
    /// Build a new block for a palette type identifier such as `"text"`.
    fn create_block(&mut self, type_id: &str) -> Result<Block, FactoryError>;

    /// Allocate a fresh id, e.g. for duplicating an existing subtree.
    fn fresh_id(&mut self) -> BlockId;

    /// Note ids already in use (a freshly loaded document) so later
    /// allocations avoid them where the factory can tell. No-op by default.
    fn reserve_ids(&mut self, _existing: &[&BlockId]) {}
}

impl<F: BlockFactory + ?Sized> BlockFactory for &mut F {
    fn create_block(&mut self, type_id: &str) -> Result<Block, FactoryError> {
        (**self).create_block(type_id)
    }

    fn fresh_id(&mut self) -> BlockId {
        (**self).fresh_id()
    }

    fn reserve_ids(&mut self, existing: &[&BlockId]) {
        (**self).reserve_ids(existing);
    }
}

impl<F: BlockFactory + ?Sized> BlockFactory for Box<F> {
    fn create_block(&mut self, type_id: &str) -> Result<Block, FactoryError> {
        (**self).create_block(type_id)
    }

    fn fresh_id(&mut self) -> BlockId {
        (**self).fresh_id()
    }

    fn reserve_ids(&mut self, existing: &[&BlockId]) {
        (**self).reserve_ids(existing);
    }
}

/// Factory for the built-in block kinds.
///
/// Ids are `<prefix>-<n>` with a per-factory counter starting at 1.
#[derive(Debug, Clone)]
pub struct DefaultBlockFactory {
    prefix: String,
    next: u64,
    column_count: usize,
}

impl Default for DefaultBlockFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultBlockFactory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefix: "block".to_string(),
            next: 1,
            column_count: 2,
        }
    }

    /// Use a different id prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Number of empty columns in a new `columns` block (at least 1).
    #[must_use]
    pub fn with_column_count(mut self, count: usize) -> Self {
        self.column_count = count.max(1);
        self
    }

    /// Continue numbering after `last`, e.g. when reopening a saved document.
    #[must_use]
    pub fn starting_after(mut self, last: u64) -> Self {
        self.next = last.saturating_add(1);
        self
    }

    /// Number the next id would carry.
    #[must_use]
    pub fn peek_next(&self) -> u64 {
        self.next
    }

    /// Default payload for `kind`.
    #[must_use]
    pub fn default_content(&self, kind: BlockKind) -> BlockContent {
        match kind {
            BlockKind::Text => BlockContent::Text {
                html: "<p>Write something great.</p>".to_string(),
            },
            BlockKind::Heading => BlockContent::Heading {
                text: "Your headline".to_string(),
                level: 2,
            },
            BlockKind::Image => BlockContent::Image {
                src: String::new(),
                alt: String::new(),
                href: None,
                width_px: None,
            },
            BlockKind::Button => BlockContent::Button {
                label: "Click here".to_string(),
                href: "#".to_string(),
            },
            BlockKind::Divider => BlockContent::Divider {
                thickness_px: 1,
                color: "#e4e4e7".to_string(),
            },
            BlockKind::Spacer => BlockContent::Spacer { height_px: 24 },
            BlockKind::Columns => BlockContent::Columns {
                columns: vec![Column::default(); self.column_count],
            },
        }
    }
}

/// Default styling for `kind`.
#[must_use]
pub fn default_styling(kind: BlockKind) -> Styling {
    let desktop = match kind {
        BlockKind::Text => BlockStyle::default()
            .with_padding(Spacing::symmetric(12, 24))
            .with_font_size(16),
        BlockKind::Heading => BlockStyle::default()
            .with_padding(Spacing::symmetric(16, 24))
            .with_font_size(28),
        BlockKind::Image => BlockStyle::default().with_align(TextAlign::Center),
        BlockKind::Button => BlockStyle::default()
            .with_padding(Spacing::symmetric(16, 24))
            .with_align(TextAlign::Center),
        BlockKind::Divider => BlockStyle::default().with_padding(Spacing::symmetric(8, 24)),
        BlockKind::Spacer => BlockStyle::default(),
        BlockKind::Columns => BlockStyle::default().with_padding(Spacing::symmetric(0, 12)),
    };
    let mut styling = Styling::new(desktop);
    match kind {
        BlockKind::Heading => {
            let mobile = styling.desktop.clone().with_font_size(22);
            styling.mobile = Some(mobile);
        }
        BlockKind::Text | BlockKind::Button => {
            let mobile = styling
                .desktop
                .clone()
                .with_padding(Spacing::symmetric(12, 16));
            styling.mobile = Some(mobile);
        }
        _ => {}
    }
    styling
}

impl BlockFactory for DefaultBlockFactory {
    fn create_block(&mut self, type_id: &str) -> Result<Block, FactoryError> {
        let kind = BlockKind::from_type_id(type_id)
            .ok_or_else(|| FactoryError::UnknownBlockType(type_id.to_string()))?;
        let id = self.fresh_id();
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "mailcraft.factory", block_id = %id, kind = %kind, "block created");
        Ok(Block::new(id, self.default_content(kind)).with_styling(default_styling(kind)))
    }

    fn fresh_id(&mut self) -> BlockId {
        let id = BlockId::new(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }

    /// Continue numbering past the highest `<prefix>-<n>` among `existing`.
    fn reserve_ids(&mut self, existing: &[&BlockId]) {
        let last = existing
            .iter()
            .filter_map(|id| {
                id.as_str()
                    .strip_prefix(self.prefix.as_str())?
                    .strip_prefix('-')?
                    .parse::<u64>()
                    .ok()
            })
            .max();
        if let Some(last) = last {
            self.next = self.next.max(last.saturating_add(1));
        }
    }
}
