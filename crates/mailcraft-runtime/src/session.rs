#![forbid(unsafe_code)]

//! The editor session: one open document and everything that edits it.
//!
//! [`EditorSession`] owns the undo/redo [`History`] of the [`Document`], the
//! [`DragCoordinator`], the block factory and the configuration. The
//! document itself is the history's present snapshot; every edit clones
//! it, mutates the clone and pushes the result, so undo covers every change
//! and edits that change nothing leave no trace in the history.

use std::collections::HashSet;
use std::fmt;

use mailcraft_core::{
    Block, BlockFactory, BlockId, Breakpoint, DefaultBlockFactory, Document, DragPayload,
    DropZone, EmailSettings, FactoryError, VerticalSpan,
};

use crate::config::EditorConfig;
use crate::drag::{
    self, DragCoordinator, DragKind, DragSession, DropOutcome, IgnoreReason, apply_drop,
};
use crate::undo::History;

/// Errors surfaced by session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The factory could not build the requested block.
    Factory(FactoryError),
    /// The addressed block list does not exist.
    ZoneNotFound(DropZone),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factory(e) => write!(f, "{e}"),
            Self::ZoneNotFound(zone) => write!(f, "drop zone '{zone}' not found"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Factory(e) => Some(e),
            Self::ZoneNotFound(_) => None,
        }
    }
}

impl From<FactoryError> for SessionError {
    fn from(err: FactoryError) -> Self {
        Self::Factory(err)
    }
}

/// Factory view that never hands out an id already in the document.
///
/// Blocks whose ids clash are renumbered from `fresh_id`, which skips every
/// id seen so far. The wrapped factory must eventually produce unseen ids.
struct UniqueIds<'a, F: ?Sized> {
    inner: &'a mut F,
    taken: HashSet<BlockId>,
}

impl<'a, F: BlockFactory + ?Sized> UniqueIds<'a, F> {
    fn new(inner: &'a mut F, document: &Document) -> Self {
        let taken = document.ids().into_iter().cloned().collect();
        Self { inner, taken }
    }
}

impl<F: BlockFactory + ?Sized> BlockFactory for UniqueIds<'_, F> {
    fn create_block(&mut self, type_id: &str) -> Result<Block, FactoryError> {
        let mut block = self.inner.create_block(type_id)?;
        let mut ids = Vec::new();
        block.visit_ids(&mut ids);
        if ids.iter().any(|id| self.taken.contains(*id)) {
            tracing::debug!(
                target: "mailcraft.session",
                block_id = %block.id,
                "factory id already in use, renumbering"
            );
            block.reassign_ids(&mut || self.fresh_id());
        } else {
            self.taken.extend(ids.into_iter().cloned());
        }
        Ok(block)
    }

    fn fresh_id(&mut self) -> BlockId {
        loop {
            let id = self.inner.fresh_id();
            if self.taken.insert(id.clone()) {
                return id;
            }
        }
    }
}

/// An editing session over one document.
pub struct EditorSession<F = DefaultBlockFactory> {
    history: History<Document>,
    drag: DragCoordinator,
    factory: F,
    config: EditorConfig,
}

impl<F> fmt::Debug for EditorSession<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("blocks", &self.history.present().block_count())
            .field("history", &self.history)
            .field("drag", self.drag.session())
            .finish()
    }
}

impl EditorSession<DefaultBlockFactory> {
    /// Session over an empty document with the built-in block factory.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self::with_factory(config, DefaultBlockFactory::new())
    }
}

impl<F: BlockFactory> EditorSession<F> {
    /// Session over an empty document with a custom factory.
    #[must_use]
    pub fn with_factory(config: EditorConfig, factory: F) -> Self {
        Self {
            history: History::new(Document::new(), config.history),
            drag: DragCoordinator::new(config.drag),
            factory,
            config,
        }
    }

    // ====================================================================
    // Accessors
    // ====================================================================

    /// The current document.
    #[must_use]
    pub fn document(&self) -> &Document {
        self.history.present()
    }

    #[must_use]
    pub fn history(&self) -> &History<Document> {
        &self.history
    }

    #[must_use]
    pub fn drag_session(&self) -> &DragSession {
        self.drag.session()
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Preview width for `breakpoint`.
    #[must_use]
    pub fn preview_width(&self, breakpoint: Breakpoint) -> u32 {
        self.config.preview.width(breakpoint)
    }

    // ====================================================================
    // Document lifecycle
    // ====================================================================

    /// Replace the document and forget all history. Any drag is cancelled.
    pub fn load(&mut self, document: Document) {
        tracing::debug!(
            target: "mailcraft.session",
            blocks = document.block_count(),
            "document loaded"
        );
        self.drag.cancel();
        self.factory.reserve_ids(&document.ids());
        self.history.reset(document);
    }

    /// The factory, guarded against ids already in the current document.
    fn unique_ids(&mut self) -> UniqueIds<'_, F> {
        UniqueIds::new(&mut self.factory, self.history.present())
    }

    /// Apply `edit` to a copy of the document and record the result.
    fn edit<R>(&mut self, edit: impl FnOnce(&mut Document) -> R) -> R {
        let mut next = self.history.present().clone();
        let result = edit(&mut next);
        self.history.push(next);
        result
    }

    // ====================================================================
    // Block editing
    // ====================================================================

    /// Append a new block of `type_id` to the end of the document.
    pub fn add_block(&mut self, type_id: &str) -> Result<BlockId, SessionError> {
        let block = self.unique_ids().create_block(type_id)?;
        let id = block.id.clone();
        self.edit(|doc| doc.blocks.push(block));
        tracing::debug!(target: "mailcraft.session", block_id = %id, "block added");
        Ok(id)
    }

    /// Insert a new block of `type_id` at `index` in `zone` (clamped to the
    /// list length).
    pub fn insert_block(
        &mut self,
        zone: &DropZone,
        index: usize,
        type_id: &str,
    ) -> Result<BlockId, SessionError> {
        if self.document().list(zone).is_none() {
            return Err(SessionError::ZoneNotFound(zone.clone()));
        }
        let block = self.unique_ids().create_block(type_id)?;
        let id = block.id.clone();
        self.edit(|doc| {
            if let Some(list) = doc.list_mut(zone) {
                let index = index.min(list.len());
                list.insert(index, block);
            }
        });
        Ok(id)
    }

    /// Remove a block (and its children) from anywhere in the tree.
    pub fn remove_block(&mut self, id: &BlockId) -> Option<Block> {
        if !self.document().contains(id) {
            return None;
        }
        let removed = self.edit(|doc| doc.remove(id));
        tracing::debug!(target: "mailcraft.session", block_id = %id, "block removed");
        removed
    }

    /// Mutate a block in place. Returns `false` if `id` does not exist.
    pub fn update_block(&mut self, id: &BlockId, update: impl FnOnce(&mut Block)) -> bool {
        if !self.document().contains(id) {
            return false;
        }
        self.edit(|doc| {
            if let Some(block) = doc.find_mut(id) {
                update(block);
            }
        });
        true
    }

    /// Insert a deep copy of `id` right after it, with fresh ids throughout.
    pub fn duplicate_block(&mut self, id: &BlockId) -> Option<BlockId> {
        let (zone, index) = self.document().locate(id)?;
        let mut copy = self.document().find(id)?.clone();
        let mut ids = self.unique_ids();
        copy.reassign_ids(&mut || ids.fresh_id());
        let new_id = copy.id.clone();
        self.edit(|doc| {
            if let Some(list) = doc.list_mut(&zone) {
                list.insert(index + 1, copy);
            }
        });
        Some(new_id)
    }

    /// Move a block one position up or down within its list.
    pub fn nudge_block(&mut self, id: &BlockId, up: bool) -> bool {
        let Some((zone, index)) = self.document().locate(id) else {
            return false;
        };
        let len = self.document().list(&zone).map_or(0, Vec::len);
        let slot = match (up, index) {
            (true, 0) => return false,
            (true, i) => i - 1,
            (false, i) if i + 1 >= len => return false,
            (false, i) => i + 2,
        };
        self.edit(|doc| {
            if let Some(list) = doc.list_mut(&zone) {
                drag::move_to_slot(list, index, Some(slot));
            }
        });
        true
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        let subject = subject.into();
        self.edit(|doc| doc.subject = subject);
    }

    pub fn set_preheader(&mut self, preheader: impl Into<String>) {
        let preheader = preheader.into();
        self.edit(|doc| doc.preheader = preheader);
    }

    pub fn update_settings(&mut self, update: impl FnOnce(&mut EmailSettings)) {
        self.edit(|doc| update(&mut doc.settings));
    }

    // ====================================================================
    // Undo / redo
    // ====================================================================

    /// Returns whether the document changed.
    pub fn undo(&mut self) -> bool {
        self.history.undo().is_some()
    }

    /// Returns whether the document changed.
    pub fn redo(&mut self) -> bool {
        self.history.redo().is_some()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ====================================================================
    // Drag and drop
    // ====================================================================

    pub fn drag_start(&mut self, payload: DragPayload) -> DragKind {
        self.drag.start(payload)
    }

    /// Start from a raw browser payload; malformed payloads are ignored.
    pub fn drag_start_raw(&mut self, raw: &str) -> Option<DragKind> {
        self.drag.start_raw(raw)
    }

    /// Update the drop target from the pointer position over `spans`,
    /// the rendered items of the list addressed by `zone`.
    pub fn drag_over(
        &mut self,
        zone: DropZone,
        pointer_y: f64,
        spans: &[VerticalSpan],
    ) -> Option<usize> {
        self.drag.drag_over(zone, pointer_y, spans)
    }

    /// Set the drop target by index (keyboard dragging).
    pub fn drag_to_index(&mut self, zone: DropZone, index: usize) -> Option<usize> {
        let len = self.document().list(&zone).map_or(0, Vec::len);
        self.drag.set_target(zone, index, len)
    }

    pub fn drag_leave(&mut self) {
        self.drag.drag_leave();
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel()
    }

    /// Complete the drag.
    ///
    /// Reorders within one list, moves a block between lists, or inserts a
    /// palette block. Applied drops are recorded in history; ignored drops
    /// change nothing. The drag always ends.
    pub fn drop(&mut self) -> Result<DropOutcome, SessionError> {
        let session = self.drag.finish();
        let outcome = self.execute_drop(session);
        drag::log_outcome(&outcome);
        outcome
    }

    fn execute_drop(&mut self, session: DragSession) -> Result<DropOutcome, SessionError> {
        let zone = match session.target() {
            Some(target) => target.zone.clone(),
            None if session.is_active() => DropZone::Root,
            None => return Ok(DropOutcome::Ignored(IgnoreReason::NoActiveDrag)),
        };
        if self.document().list(&zone).is_none() {
            return Ok(DropOutcome::Ignored(IgnoreReason::ZoneNotFound(zone)));
        }

        if let DragSession::Dragging {
            payload: DragPayload::Block { id },
            target,
            ..
        } = &session
        {
            if let Some((from_zone, _)) = self.document().locate(id) {
                if from_zone != zone {
                    let slot = target.as_ref().map(|t| t.index);
                    return Ok(self.move_across(id, from_zone, zone, slot));
                }
            }
        }

        let mut next = self.history.present().clone();
        let Some(list) = next.list_mut(&zone) else {
            return Ok(DropOutcome::Ignored(IgnoreReason::ZoneNotFound(zone)));
        };
        let mut factory = UniqueIds::new(&mut self.factory, self.history.present());
        let outcome = apply_drop(session, list, &mut factory)?;
        if outcome.is_applied() {
            self.history.push(next);
        }
        Ok(outcome)
    }

    /// Move `id` from `from` into `to` at `slot` (end of list if `None`).
    fn move_across(
        &mut self,
        id: &BlockId,
        from: DropZone,
        to: DropZone,
        slot: Option<usize>,
    ) -> DropOutcome {
        if let DropZone::Column { parent, .. } = &to {
            let into_self = self
                .document()
                .find(id)
                .is_some_and(|moved| moved.find(parent).is_some());
            if into_self {
                return DropOutcome::Ignored(IgnoreReason::DropIntoSelf(id.clone()));
            }
        }

        let mut next = self.history.present().clone();
        let Some(block) = next.remove(id) else {
            return DropOutcome::Ignored(IgnoreReason::SourceNotFound(id.clone()));
        };
        let Some(list) = next.list_mut(&to) else {
            return DropOutcome::Ignored(IgnoreReason::ZoneNotFound(to));
        };
        let index = slot.map_or(list.len(), |slot| slot.min(list.len()));
        list.insert(index, block);
        self.history.push(next);
        DropOutcome::Moved {
            id: id.clone(),
            from,
            to,
            index,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
