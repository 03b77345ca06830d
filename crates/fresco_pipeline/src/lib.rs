//! Content generation pipeline for Fresco.
//!
//! The [`Orchestrator`] expands a campaign's settings into the cartesian
//! product of platforms × content categories × media types, drives the
//! [`ContentGenerator`] for each cell with bounded concurrency, persists
//! successful cells through the [`ContentStore`] seam, and returns an
//! aggregate outcome. Cells fail independently; a provider outage for one
//! media type never aborts the rest of the matrix.

mod generator;
mod orchestrator;
pub mod prompt;
mod store;

pub use generator::{ContentGenerator, GeneratedDraft, MediaFailurePolicy};
pub use orchestrator::{CellFailure, CellPreview, GenerationOutcome, Orchestrator};
pub use store::{ContentStore, MemoryContentStore};
