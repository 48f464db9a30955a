#![forbid(unsafe_code)]

//! Drag/reorder coordination for a vertical list of blocks.
//!
//! [`DragCoordinator`] interprets pointer drag gestures over the block list
//! and over the palette, and turns a drop into either a reorder or an
//! insertion.
//!
//! # State Machine
//!
//! ```text
//!              start(payload)              drag_over(y)
//!   ┌──────┐ ─────────────────► ┌──────────┐ ◄────────┐
//!   │ Idle │                    │ Dragging │ ─────────┘
//!   └──────┘ ◄───────────────── └──────────┘
//!             drop / cancel        │    ▲
//!                       drag_leave │    │ drag_over(y)
//!                                  ▼    │
//!                            (target cleared)
//! ```
//!
//! # Invariants
//!
//! 1. A session is either [`DragSession::Idle`] or carries a payload; there
//!    is no half-populated state.
//! 2. A recorded target index is always within `[0, list_len]` for the span
//!    list it was computed from.
//! 3. Drop and cancel always return the coordinator to `Idle`, whatever the
//!    outcome of the drop.
//!
//! # Reorder convention
//!
//! A target index is an insertion slot in the list *before* the dragged
//! block is removed: slot `i` means "in front of the block currently at
//! `i`", slot `len` means "at the end". When the source sits above the slot,
//! removing it shifts the slot up by one, so the block lands at `slot - 1`.
//!
//! ```text
//! [A, B, C]  drag A, slot 2 (in front of C)  ->  [B, A, C]
//! [A, B, C]  drag A, slot 3 (end)            ->  [B, C, A]
//! [A, B, C]  drag C, slot 0                  ->  [C, A, B]
//! ```
//!
//! # Failure Modes
//!
//! - Dropping while idle, or with a source id that is not in the target
//!   list, leaves the list untouched and reports [`DropOutcome::Ignored`].
//! - An unknown palette type surfaces as [`FactoryError`]; the session is
//!   still cleared.

use std::fmt;
use std::mem;

use mailcraft_core::{
    Block, BlockFactory, BlockId, DragPayload, DropZone, FactoryError, PaletteCategory,
    VerticalSpan,
};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How the pointer position maps to an insertion slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexStrategy {
    /// First item whose bottom edge the pointer has not passed.
    #[default]
    Edge,
    /// First item whose vertical midpoint the pointer has not crossed.
    Midpoint,
}

/// Drag behavior knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    pub strategy: IndexStrategy,
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// What kind of drop a session will perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragKind {
    /// Palette content block.
    Block,
    /// Palette layout block.
    Layout,
    /// Existing block moving within the document.
    Reorder,
}

impl DragKind {
    #[must_use]
    pub fn of(payload: &DragPayload) -> Self {
        match payload {
            DragPayload::Block { .. } => Self::Reorder,
            DragPayload::Palette {
                category: PaletteCategory::Content,
                ..
            } => Self::Block,
            DragPayload::Palette {
                category: PaletteCategory::Layout,
                ..
            } => Self::Layout,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Layout => "layout",
            Self::Reorder => "reorder",
        }
    }
}

impl fmt::Display for DragKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a drop would land.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DropTarget {
    pub zone: DropZone,
    pub index: usize,
}

/// Transient state of an in-progress drag gesture.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging {
        payload: DragPayload,
        kind: DragKind,
        /// Cleared when the pointer leaves the droppable region.
        target: Option<DropTarget>,
    },
}

impl DragSession {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Block id or palette type identifier being dragged.
    #[must_use]
    pub fn dragged_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Dragging { payload, .. } => Some(payload.dragged_id()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Option<DragKind> {
        match self {
            Self::Idle => None,
            Self::Dragging { kind, .. } => Some(*kind),
        }
    }

    #[must_use]
    pub fn target(&self) -> Option<&DropTarget> {
        match self {
            Self::Idle => None,
            Self::Dragging { target, .. } => target.as_ref(),
        }
    }

    #[must_use]
    pub fn target_index(&self) -> Option<usize> {
        self.target().map(|t| t.index)
    }
}

// ---------------------------------------------------------------------------
// Drop results
// ---------------------------------------------------------------------------

/// Why a drop left the document untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Drop arrived without a drag in progress.
    NoActiveDrag,
    /// The dragged block is not in the addressed list.
    SourceNotFound(BlockId),
    /// The drop zone does not resolve to a block list.
    ZoneNotFound(DropZone),
    /// A layout block was dropped into one of its own columns.
    DropIntoSelf(BlockId),
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActiveDrag => f.write_str("no active drag"),
            Self::SourceNotFound(id) => write!(f, "dragged block '{id}' not found"),
            Self::ZoneNotFound(zone) => write!(f, "drop zone '{zone}' not found"),
            Self::DropIntoSelf(id) => write!(f, "block '{id}' dropped into itself"),
        }
    }
}

/// Result of a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// An existing block changed position within one list.
    Reordered { id: BlockId, from: usize, to: usize },
    /// An existing block moved to a different list.
    Moved {
        id: BlockId,
        from: DropZone,
        to: DropZone,
        index: usize,
    },
    /// A new block was created from the palette.
    Inserted { id: BlockId, index: usize },
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl DropOutcome {
    /// Whether the drop modified a block list.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}

// ---------------------------------------------------------------------------
// Index arithmetic
// ---------------------------------------------------------------------------

/// Insertion slot for a pointer at `pointer_y` over items laid out as `spans`.
///
/// Scans in list order and stops at the first item the pointer has not yet
/// passed; a pointer below every item yields `spans.len()`. The result is
/// always within `[0, spans.len()]`.
#[must_use]
pub fn drop_index(pointer_y: f64, spans: &[VerticalSpan], strategy: IndexStrategy) -> usize {
    spans
        .iter()
        .position(|span| match strategy {
            IndexStrategy::Edge => pointer_y < span.bottom,
            IndexStrategy::Midpoint => pointer_y < span.midpoint(),
        })
        .unwrap_or(spans.len())
}

/// Final index of a block moved from `from` to insertion slot `slot`.
#[must_use]
pub fn reorder_index(from: usize, slot: usize) -> usize {
    if from < slot { slot - 1 } else { slot }
}

/// Move `list[from]` to insertion slot `slot` (`None` = end of list).
///
/// Returns the block's final index, or `None` if `from` is out of range.
pub fn move_to_slot<T>(list: &mut Vec<T>, from: usize, slot: Option<usize>) -> Option<usize> {
    let len = list.len();
    if from >= len {
        return None;
    }
    let to = match slot {
        Some(slot) => reorder_index(from, slot.min(len)),
        None => len - 1,
    };
    let item = list.remove(from);
    list.insert(to, item);
    Some(to)
}

/// Execute `session` against `list`.
///
/// This is the single-list drop used by [`DragCoordinator::drop_into`]; the
/// editor session layers cross-list moves on top of it.
pub fn apply_drop<F>(
    session: DragSession,
    list: &mut Vec<Block>,
    factory: &mut F,
) -> Result<DropOutcome, FactoryError>
where
    F: BlockFactory + ?Sized,
{
    let DragSession::Dragging {
        payload, target, ..
    } = session
    else {
        return Ok(DropOutcome::Ignored(IgnoreReason::NoActiveDrag));
    };
    let slot = target.map(|t| t.index);

    match payload {
        DragPayload::Block { id } => {
            let Some(from) = list.iter().position(|b| b.id == id) else {
                return Ok(DropOutcome::Ignored(IgnoreReason::SourceNotFound(id)));
            };
            match move_to_slot(list, from, slot) {
                Some(to) => Ok(DropOutcome::Reordered { id, from, to }),
                None => Ok(DropOutcome::Ignored(IgnoreReason::SourceNotFound(id))),
            }
        }
        DragPayload::Palette { type_id, .. } => {
            let block = factory.create_block(&type_id)?;
            let id = block.id.clone();
            let index = match slot {
                Some(slot) if slot <= list.len() => slot,
                _ => list.len(),
            };
            list.insert(index, block);
            Ok(DropOutcome::Inserted { id, index })
        }
    }
}

// ---------------------------------------------------------------------------
// DragCoordinator
// ---------------------------------------------------------------------------

/// Tracks one drag gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct DragCoordinator {
    session: DragSession,
    config: DragConfig,
}

impl DragCoordinator {
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self {
            session: DragSession::Idle,
            config,
        }
    }

    #[must_use]
    pub fn session(&self) -> &DragSession {
        &self.session
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_active()
    }

    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Begin a drag. A drag already in progress is replaced.
    pub fn start(&mut self, payload: DragPayload) -> DragKind {
        let kind = DragKind::of(&payload);
        if self.session.is_active() {
            tracing::debug!(target: "mailcraft.drag", "drag restarted before drop");
        }
        tracing::debug!(
            target: "mailcraft.drag",
            dragged_id = payload.dragged_id(),
            kind = %kind,
            "drag started"
        );
        self.session = DragSession::Dragging {
            payload,
            kind,
            target: None,
        };
        kind
    }

    /// Begin a drag from a raw browser payload. Malformed payloads leave the
    /// coordinator unchanged.
    pub fn start_raw(&mut self, raw: &str) -> Option<DragKind> {
        let payload = DragPayload::decode(raw)?;
        Some(self.start(payload))
    }

    /// Recompute the target from the pointer position over `spans`.
    ///
    /// Returns the new target index, or `None` when no drag is active.
    pub fn drag_over(
        &mut self,
        zone: DropZone,
        pointer_y: f64,
        spans: &[VerticalSpan],
    ) -> Option<usize> {
        let index = drop_index(pointer_y, spans, self.config.strategy);
        self.set_target(zone, index, spans.len())
    }

    /// Set the target directly (keyboard dragging), clamped to `list_len`.
    pub fn set_target(&mut self, zone: DropZone, index: usize, list_len: usize) -> Option<usize> {
        let DragSession::Dragging { target, .. } = &mut self.session else {
            tracing::trace!(target: "mailcraft.drag", "drag_over ignored: idle");
            return None;
        };
        let index = index.min(list_len);
        if target.as_ref().map(|t| (&t.zone, t.index)) != Some((&zone, index)) {
            tracing::trace!(target: "mailcraft.drag", zone = %zone, index, "drop target changed");
        }
        *target = Some(DropTarget { zone, index });
        Some(index)
    }

    /// Pointer left the droppable region: forget the target, keep the drag.
    pub fn drag_leave(&mut self) {
        if let DragSession::Dragging { target, .. } = &mut self.session {
            *target = None;
        }
    }

    /// Abandon the drag without touching any list. Returns whether a drag
    /// was in progress.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.session.is_active();
        if was_active {
            tracing::debug!(target: "mailcraft.drag", "drag cancelled");
        }
        self.session = DragSession::Idle;
        was_active
    }

    /// End the drag and hand back its final state.
    pub fn finish(&mut self) -> DragSession {
        mem::take(&mut self.session)
    }

    /// Drop into `list`, creating palette blocks with `factory`.
    pub fn drop_into<F>(
        &mut self,
        list: &mut Vec<Block>,
        factory: &mut F,
    ) -> Result<DropOutcome, FactoryError>
    where
        F: BlockFactory + ?Sized,
    {
        let session = self.finish();
        let outcome = apply_drop(session, list, factory);
        log_outcome(&outcome);
        outcome
    }
}

pub(crate) fn log_outcome<E: fmt::Display>(outcome: &Result<DropOutcome, E>) {
    match outcome {
        Ok(DropOutcome::Ignored(IgnoreReason::NoActiveDrag)) => {
            tracing::debug!(target: "mailcraft.drag", "drop ignored: no active drag");
        }
        Ok(DropOutcome::Ignored(reason)) => {
            tracing::warn!(target: "mailcraft.drag", reason = %reason, "drop ignored");
        }
        Ok(applied) => {
            tracing::debug!(target: "mailcraft.drag", outcome = ?applied, "drop applied");
        }
        Err(err) => {
            tracing::warn!(target: "mailcraft.drag", error = %err, "drop failed");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
