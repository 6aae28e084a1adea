//! HTTP handlers for hardware items and categories.

pub mod category;
pub mod hardware;
