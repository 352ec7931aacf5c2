//! Saving and loading diagrams.
//!
//! # Organization
//!
//! - [`document`] - The JSON document shape and the codec between it and a
//!   [`DiagramManager`](crate::DiagramManager)
//! - [`storage`] - A directory of saved diagrams, its catalog, and the
//!   active-file session state

pub mod document;
pub mod storage;

pub use document::{
    Document, LoadReport, SkipReason, SkippedRecord, deserialize, from_json, serialize, to_json,
};
pub use storage::{NO_ACTIVE_FILE, SessionContext, Storage};
