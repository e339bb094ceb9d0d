//! `fetch`-backed transport for the browser build.
//!
//! ERROR HANDLING
//! ==============
//! Network and request-construction failures map to `TransportError` with the
//! `gloo-net` message. Non-2xx statuses are not errors here; `fleet::api`
//! classifies them.

use async_trait::async_trait;
use fleet::{HttpRequest, HttpResponse, Transport, TransportError};

/// Zero-sized `gloo-net` transport. Outside `csr` every send fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            use fleet::{Body, Method};
            use gloo_net::http::Request;

            let to_transport = |e: gloo_net::Error| TransportError(e.to_string());

            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Put => Request::put(&request.url),
                Method::Delete => Request::delete(&request.url),
            };
            if let Some(token) = &request.bearer {
                builder = builder.header("Authorization", &format!("Bearer {token}"));
            }
            let prepared = match request.body {
                Body::Empty => builder.build(),
                Body::Json(value) => builder.json(&value),
                Body::Form(pairs) => {
                    let params = web_sys::UrlSearchParams::new().map_err(|e| TransportError(format!("{e:?}")))?;
                    for (key, value) in &pairs {
                        params.append(key, value);
                    }
                    builder.header("Content-Type", "application/x-www-form-urlencoded").body(params)
                }
            }
            .map_err(to_transport)?;

            let response = prepared.send().await.map_err(to_transport)?;
            let status = response.status();
            let body = response.text().await.map_err(to_transport)?;
            Ok(HttpResponse::new(status, body))
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(TransportError(format!("no browser transport for {}", request.url)))
        }
    }
}
