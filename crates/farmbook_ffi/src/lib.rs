//! Flutter-facing binding layer for Farmbook core.

pub mod api;
