//! Shared fleet-administration core used by both `client` and `cli`.
//!
//! This crate owns the REST data model, the bearer-token session, the API
//! client, the entity-form state machine and the Materials freshness poller.
//! Transport and token storage are traits so each host (browser, terminal,
//! tests) plugs in its own I/O.

pub mod api;
pub mod config;
pub mod form;
pub mod model;
pub mod poll;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{ApiClient, ApiError, Body, HttpRequest, HttpResponse, Method, Transport, TransportError};
pub use config::{ClientConfig, ConfigError};
pub use form::{Confirm, DeleteOutcome, EntityForm, FormError, FormPhase, Resource};
pub use model::{
    Count, LastUpdate, Material, MaterialDraft, MaterialKind, MaterialStatus, Signal, SignalDraft, Stats, User,
    UserDraft, UserRole,
};
pub use poll::{FreshnessPoller, MarkerWatch, TickOutcome};
pub use session::{MemoryStorage, Session, TOKEN_KEY, TokenStorage};
