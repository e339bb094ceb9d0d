//! Browser-bound API client construction.
//!
//! DESIGN
//! ======
//! `ApiClient` holds an `Rc` hook and so cannot live in a Leptos signal.
//! Components keep only the base URL and build a client per action; both the
//! transport and the storage are zero-sized, so this costs nothing.

use fleet::ApiClient;

use crate::net::transport::BrowserTransport;
use crate::util::storage::BrowserStorage;

pub type BrowserApi = ApiClient<BrowserTransport, BrowserStorage>;

/// Landing route for signed-out operators.
pub const LOGIN_ROUTE: &str = "/";

/// Client for `base_url` whose 401 hook sends the browser to the login view.
pub fn browser_api(base_url: &str) -> BrowserApi {
    ApiClient::new(BrowserTransport, BrowserStorage, base_url).with_unauthorized_hook(redirect_to_login)
}

/// Hard navigation to [`LOGIN_ROUTE`], dropping all in-memory page state.
pub fn redirect_to_login() {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(LOGIN_ROUTE);
        }
    }
}
