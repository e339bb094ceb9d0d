//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic so the rest of the crate stays testable natively.

pub mod auth;
pub mod dialog;
pub mod storage;
