//! Typed REST client for the fleet backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Hosts supply a [`Transport`] (`gloo-net` in the browser, `reqwest` in the
//! CLI, an in-memory fake in tests) and a [`TokenStorage`]. The client owns
//! the [`Session`] and injects its bearer token into every request.
//!
//! ERROR HANDLING
//! ==============
//! A 401 from any endpoint clears the session first and then runs the
//! unauthorized hook (the browser navigates to the login view). The call
//! still returns [`ApiError::Unauthorized`] so the initiating form can log it.
//! Login is the exception for the hook: a rejected login is reported inline
//! by the caller, which is already on the login view.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::form::{Resource, Submission, item_path};
use crate::model::{Count, LastUpdate, Stats};
use crate::session::{Session, TokenStorage};

/// HTTP verbs used by the backend surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Request body encoding.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    /// `application/x-www-form-urlencoded` pairs.
    Form(Vec<(String, String)>),
}

/// Outbound request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub bearer: Option<String>,
    pub body: Body,
}

/// Raw response: status code plus the undecoded body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn json(status: u16, value: &Value) -> Self {
        Self::new(status, value.to_string())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network-level failure: the request never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

/// Executes HTTP requests for an [`ApiClient`].
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Error returned by [`ApiClient`] calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The server answered 401. The session has already been cleared.
    #[error("unauthorized")]
    Unauthorized,
    /// Any other non-2xx answer, with the server's `detail` when it sent one.
    #[error("server rejected request ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Server-provided explanation, when available.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Callback run after a 401 has cleared the session.
pub type UnauthorizedHook = Rc<dyn Fn()>;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// REST client bound to one backend and one session.
#[derive(Clone)]
pub struct ApiClient<T, S> {
    transport: T,
    session: Session<S>,
    base_url: String,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl<T: Transport, S: TokenStorage> ApiClient<T, S> {
    pub fn new(transport: T, storage: S, base_url: &str) -> Self {
        Self {
            transport,
            session: Session::new(storage),
            base_url: base_url.trim_end_matches('/').to_owned(),
            on_unauthorized: None,
        }
    }

    /// Install the callback run after a 401 has cleared the session.
    #[must_use]
    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn fire_unauthorized(&self) {
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }

    async fn execute(&self, method: Method, path: &str, body: Body, redirect_on_401: bool) -> Result<HttpResponse, ApiError> {
        let request = HttpRequest { method, url: self.url(path), bearer: self.session.token(), body };
        let response = self.transport.send(request).await?;

        if response.status == 401 {
            tracing::warn!(path, "unauthorized response; clearing session");
            self.session.clear();
            if redirect_on_401 {
                self.fire_unauthorized();
            }
            return Err(ApiError::Unauthorized);
        }
        if !response.is_success() {
            return Err(ApiError::Rejected { status: response.status, detail: extract_detail(&response.body) });
        }
        Ok(response)
    }

    async fn fetch<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.execute(Method::Get, path, Body::Empty, true).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Exchange credentials for a bearer token via `POST /auth/token`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for wrong credentials; the session is
    /// left without a token in every failure case.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let form = vec![("username".to_owned(), username.to_owned()), ("password".to_owned(), password.to_owned())];
        let response = self.execute(Method::Post, "/auth/token", Body::Form(form), false).await?;
        let token: TokenResponse = serde_json::from_str(&response.body)?;
        self.session.set_token(&token.access_token);
        tracing::info!(username, "logged in");
        Ok(())
    }

    /// Drop the session and hand control to the unauthorized hook.
    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("logged out");
        self.fire_unauthorized();
    }

    /// Fetch every record of `R`.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and decode failures.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        self.fetch(R::COLLECTION).await
    }

    /// Create a record from `draft`. The response body is not used.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and encode failures.
    pub async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<(), ApiError> {
        let payload = R::payload(draft)?;
        self.execute(Method::Post, R::COLLECTION, Body::Json(payload), true).await?;
        tracing::info!(resource = R::NOUN, "record created");
        Ok(())
    }

    /// Replace the fields of record `id` with `draft`.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and encode failures.
    pub async fn update<R: Resource>(&self, id: u32, draft: &R::Draft) -> Result<(), ApiError> {
        let payload = R::payload(draft)?;
        self.execute(Method::Put, &item_path::<R>(id), Body::Json(payload), true).await?;
        tracing::info!(resource = R::NOUN, id, "record updated");
        Ok(())
    }

    /// Create or update depending on whether the submission targets a record.
    ///
    /// # Errors
    ///
    /// See [`Self::create`] and [`Self::update`].
    pub async fn submit<R: Resource>(&self, submission: &Submission<R::Draft>) -> Result<(), ApiError> {
        match submission.target_id {
            Some(id) => self.update::<R>(id, &submission.draft).await,
            None => self.create::<R>(&submission.draft).await,
        }
    }

    /// Delete record `id`. Confirmation is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures.
    pub async fn delete<R: Resource>(&self, id: u32) -> Result<(), ApiError> {
        self.execute(Method::Delete, &item_path::<R>(id), Body::Empty, true).await?;
        tracing::info!(resource = R::NOUN, id, "record deleted");
        Ok(())
    }

    /// Fetch the Materials change marker from `/materiels/events`.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and decode failures.
    pub async fn last_update(&self) -> Result<LastUpdate, ApiError> {
        self.fetch("/materiels/events").await
    }

    /// Ask the backend to email the APK download link to `email`.
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures.
    pub async fn send_apk_link(&self, email: &str, apk_link: &str) -> Result<(), ApiError> {
        let payload = serde_json::json!({ "email": email, "apk_link": apk_link });
        self.execute(Method::Post, "/contact/send-apk-link", Body::Json(payload), true).await?;
        tracing::info!(email, "apk link sent");
        Ok(())
    }

    /// Backend health probe (`GET /health`).
    ///
    /// # Errors
    ///
    /// Propagates transport, status and decode failures.
    pub async fn health(&self) -> Result<Value, ApiError> {
        self.fetch("/health").await
    }

    /// Fleet totals (`GET /stats/`).
    ///
    /// # Errors
    ///
    /// Propagates transport, status and decode failures.
    pub async fn stats(&self) -> Result<Stats, ApiError> {
        self.fetch("/stats/").await
    }

    /// Number of materials (`GET /materiels/count`).
    ///
    /// # Errors
    ///
    /// Propagates transport, status and decode failures.
    pub async fn material_count(&self) -> Result<Count, ApiError> {
        self.fetch("/materiels/count").await
    }
}

/// Pull FastAPI's `detail` out of an error body.
///
/// `detail` is either a string or, for validation errors, a list of objects
/// carrying a `msg`.
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items.iter().filter_map(|item| item.get("msg").and_then(Value::as_str)).collect();
            if messages.is_empty() { None } else { Some(messages.join("; ")) }
        }
        _ => None,
    }
}
