//! In-memory note search and list projections.
//!
//! # Responsibility
//! - Filter notes by a free-text term without mutating the store.
//! - Shape list items for rendering.

pub mod note_search;
