//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the dashboard chrome and the per-entity forms. Form
//! state lives in a component-local `RwSignal<EntityForm<_>>`; `crud` holds
//! the async glue shared by the three forms.

pub mod apk_section;
pub mod crud;
pub mod fields;
pub mod material_form;
pub mod profile_panel;
pub mod sidebar;
pub mod signal_form;
pub mod user_form;
