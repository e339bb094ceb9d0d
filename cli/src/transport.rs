//! `reqwest` implementation of the `fleet` transport seam.

use async_trait::async_trait;
use fleet::{Body, HttpRequest, HttpResponse, Method, Transport, TransportError};

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Fails when the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(concat!("fleet-cli/", env!("CARGO_PKG_VERSION"))).build()?;
        Ok(Self { client })
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(to_reqwest(request.method), &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Form(pairs) => builder.form(pairs),
        };

        let response = builder.send().await.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| TransportError(e.to_string()))?;
        tracing::debug!(url = %request.url, status, "response");
        Ok(HttpResponse::new(status, body))
    }
}
