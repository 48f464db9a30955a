#![forbid(unsafe_code)]

//! Snapshot-based undo/redo.
//!
//! The editor versions whole snapshots rather than reversible commands. A
//! push that is structurally equal to the present is discarded.
//!
//! ```text
//! reset(s0); push(s1); push(s2); push(s3)
//! ┌──────────────────────────────────────────┐
//! │ past:    [s0, s1, s2]                    │
//! │ present: s3                              │
//! │ future:  []                              │
//! └──────────────────────────────────────────┘
//!
//! undo() x2
//! ┌──────────────────────────────────────────┐
//! │ past:    [s0]                            │
//! │ present: s1                              │
//! │ future:  [s2, s3]                        │
//! └──────────────────────────────────────────┘
//!
//! push(s4), new branch
//! ┌──────────────────────────────────────────┐
//! │ past:    [s0, s1]                        │
//! │ present: s4                              │
//! │ future:  []                              │
//! └──────────────────────────────────────────┘
//! ```

pub mod history;

pub use history::{History, HistoryConfig, HistoryState};
