#![forbid(unsafe_code)]

//! Mailcraft Core
//!
//! This crate holds the data model shared by every part of the Mailcraft
//! email editor: strongly typed content blocks, per-breakpoint styling, the
//! document snapshot that the editor versions, and the block factory that
//! turns palette type identifiers into fresh blocks.
//!
//! # Key Components
//!
//! - [`Block`] / [`BlockContent`] - a block and its typed payload
//! - [`Styling`] - per-[`Breakpoint`] style overrides with a fallback cascade
//! - [`Document`] - subject, settings and the ordered block tree
//! - [`BlockFactory`] - creates blocks from palette type identifiers
//! - [`DragPayload`] - the data carried by a drag gesture
//! - [`VerticalSpan`] - the vertical extent of a rendered list item
//!
//! # Role in Mailcraft
//! `mailcraft-core` has no notion of time, history or input. The runtime
//! crate builds the history manager, drag coordinator and editor session on
//! top of these types.

pub mod block;
pub mod document;
pub mod factory;
pub mod geometry;
pub mod payload;
pub mod style;

pub use block::{Block, BlockContent, BlockId, BlockKind, Column};
pub use document::{Document, DropZone, EmailSettings};
pub use factory::{BlockFactory, DefaultBlockFactory, FactoryError};
pub use geometry::VerticalSpan;
pub use payload::{DragPayload, PaletteCategory};
pub use style::{BlockStyle, Breakpoint, Spacing, Styling, TextAlign};
