//! In-memory stand-in for the fleet REST backend.
//!
//! Emulates the three collections, `/auth/token`, the change marker, the
//! contact endpoint and the scalar stats routes closely enough to exercise
//! `ApiClient`, `EntityForm` and `FreshnessPoller` end to end. Every request is
//! recorded so tests can assert on exactly what was (or was not) sent.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::api::{ApiClient, Body, HttpRequest, HttpResponse, Method, Transport, TransportError};
use crate::session::MemoryStorage;

pub const BASE_URL: &str = "http://fleet.test";
pub const EMAIL: &str = "admin@billun.fr";
pub const PASSWORD: &str = "secret";
pub const ISSUED_TOKEN: &str = "tok-1";

const COLLECTIONS: [&str; 3] = ["/users/", "/materiels/", "/anomalies/"];

#[derive(Default)]
struct Inner {
    collections: HashMap<&'static str, Vec<Value>>,
    next_id: u32,
    markers: VecDeque<Option<String>>,
    forced: VecDeque<Result<HttpResponse, TransportError>>,
    requests: Vec<HttpRequest>,
    require_auth: bool,
}

#[derive(Clone, Default)]
pub struct FakeServer {
    inner: Rc<RefCell<Inner>>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(&self) -> ApiClient<FakeServer, MemoryStorage> {
        self.client_with_storage(MemoryStorage::default())
    }

    pub fn client_with_storage(&self, storage: MemoryStorage) -> ApiClient<FakeServer, MemoryStorage> {
        ApiClient::new(self.clone(), storage, BASE_URL)
    }

    /// Reject collection requests that do not carry [`ISSUED_TOKEN`].
    pub fn require_auth(&self) {
        self.inner.borrow_mut().require_auth = true;
    }

    /// Insert a record directly, assigning the next id. Returns the id.
    pub fn seed(&self, collection: &'static str, mut record: Value) -> u32 {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        record["id"] = json!(id);
        inner.collections.entry(collection).or_default().push(record);
        id
    }

    pub fn push_marker(&self, marker: &str) {
        self.inner.borrow_mut().markers.push_back(Some(marker.to_owned()));
    }

    /// Make the next marker fetch answer 500.
    pub fn push_marker_failure(&self) {
        self.inner.borrow_mut().markers.push_back(None);
    }

    /// Answer the next request with `status` / `body`, whatever it is.
    pub fn force_next(&self, status: u16, body: Value) {
        self.inner.borrow_mut().forced.push_back(Ok(HttpResponse::json(status, &body)));
    }

    /// Fail the next request at the transport level.
    pub fn fail_next_transport(&self) {
        self.inner.borrow_mut().forced.push_back(Err(TransportError("connection refused".to_owned())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.borrow().requests.len()
    }

    /// Number of recorded requests with `method` on `path`.
    pub fn count(&self, method: Method, path: &str) -> usize {
        let url = format!("{BASE_URL}{path}");
        self.inner.borrow().requests.iter().filter(|r| r.method == method && r.url == url).count()
    }

    fn handle(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut inner = self.inner.borrow_mut();
        inner.requests.push(request.clone());
        if let Some(forced) = inner.forced.pop_front() {
            return forced;
        }

        let path = request.url.strip_prefix(BASE_URL).unwrap_or(&request.url).to_owned();
        let response = match (request.method, path.as_str()) {
            (Method::Post, "/auth/token") => login(&request.body),
            (Method::Get, "/materiels/events") => match inner.markers.pop_front() {
                Some(Some(marker)) => HttpResponse::json(200, &json!({ "last_update": marker, "status": "updated" })),
                Some(None) => HttpResponse::json(500, &json!({ "detail": "marker unavailable" })),
                None => HttpResponse::json(503, &json!({ "detail": "no marker scripted" })),
            },
            (Method::Get, "/materiels/count") => {
                let count = inner.collections.get("/materiels/").map_or(0, Vec::len);
                HttpResponse::json(200, &json!({ "count": count }))
            }
            (Method::Get, "/stats/") => {
                let materiels = inner.collections.get("/materiels/").map_or(0, Vec::len);
                let anomalies = inner.collections.get("/anomalies/").map_or(0, Vec::len);
                HttpResponse::json(200, &json!({ "materiels_total": materiels, "anomalies_total": anomalies }))
            }
            (Method::Get, "/health") => HttpResponse::json(200, &json!({ "status": "healthy" })),
            (Method::Post, "/contact/send-apk-link") => match &request.body {
                Body::Json(body) if body.get("email").is_some() => {
                    HttpResponse::json(200, &json!({ "message": "Lien envoyé" }))
                }
                _ => HttpResponse::json(422, &json!({ "detail": [{ "msg": "field required" }] })),
            },
            _ => match COLLECTIONS.into_iter().find(|c| path.starts_with(c)) {
                Some(collection) => {
                    if inner.require_auth && request.bearer.as_deref() != Some(ISSUED_TOKEN) {
                        HttpResponse::json(401, &json!({ "detail": "Not authenticated" }))
                    } else {
                        collection_route(&mut inner, collection, &path[collection.len()..], &request)
                    }
                }
                None => HttpResponse::json(404, &json!({ "detail": "Not Found" })),
            },
        };
        Ok(response)
    }
}

fn login(body: &Body) -> HttpResponse {
    let Body::Form(pairs) = body else {
        return HttpResponse::json(422, &json!({ "detail": "expected form body" }));
    };
    let field = |name: &str| pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str());
    if field("username") == Some(EMAIL) && field("password") == Some(PASSWORD) {
        HttpResponse::json(200, &json!({ "access_token": ISSUED_TOKEN, "token_type": "bearer" }))
    } else {
        HttpResponse::json(401, &json!({ "detail": "Identifiants incorrects" }))
    }
}

fn collection_route(inner: &mut Inner, collection: &'static str, rest: &str, request: &HttpRequest) -> HttpResponse {
    if rest.is_empty() {
        return match (request.method, &request.body) {
            (Method::Get, _) => {
                let items = inner.collections.get(collection).cloned().unwrap_or_default();
                HttpResponse::json(200, &Value::Array(items))
            }
            (Method::Post, Body::Json(body)) => {
                inner.next_id += 1;
                let mut record = body.clone();
                record["id"] = json!(inner.next_id);
                inner.collections.entry(collection).or_default().push(record.clone());
                HttpResponse::json(200, &record)
            }
            _ => HttpResponse::json(405, &json!({ "detail": "Method Not Allowed" })),
        };
    }

    let Ok(id) = rest.parse::<u32>() else {
        return HttpResponse::json(422, &json!({ "detail": "invalid id" }));
    };
    let items = inner.collections.entry(collection).or_default();
    let Some(index) = items.iter().position(|item| item["id"] == json!(id)) else {
        return HttpResponse::json(404, &json!({ "detail": "Not Found" }));
    };
    match (request.method, &request.body) {
        (Method::Put, Body::Json(body)) => {
            let mut record = body.clone();
            record["id"] = json!(id);
            items[index] = record.clone();
            HttpResponse::json(200, &record)
        }
        (Method::Delete, _) => {
            items.remove(index);
            HttpResponse::json(200, &json!({ "message": "supprimé" }))
        }
        _ => HttpResponse::json(405, &json!({ "detail": "Method Not Allowed" })),
    }
}

#[async_trait(?Send)]
impl Transport for FakeServer {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.handle(request)
    }
}

/// A valid material body as the backend would store it.
pub fn material_json(identifiant: &str) -> Value {
    json!({
        "identifiant": identifiant,
        "plaque": format!("{identifiant}-PL"),
        "type_materiel": "camion",
        "statut": "disponible",
        "kilometrage": 0,
        "date_controle_technique": null,
        "options": null,
        "responsable_id": null,
    })
}
