//! Browser session extractor.
//!
//! Reads the signed session cookie. A missing, malformed or forged cookie
//! yields a freshly generated id, and the response then carries a
//! `Set-Cookie` for it. Handlers return the extractor alongside their body so
//! the header is attached:
//!
//! ```ignore
//! async fn handler(session: BrowserSession) -> (BrowserSession, Json<Value>)
//! ```

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponseParts, ResponseParts};

use lexchat_infra::crypto::SessionSigner;
use lexchat_types::chat::SessionId;

use crate::state::AppState;

/// The session a request belongs to.
#[derive(Debug, Clone)]
pub struct BrowserSession {
    pub id: SessionId,
    set_cookie: Option<String>,
}

impl BrowserSession {
    /// Resolve the session from request headers, minting a new one when no
    /// valid cookie is present.
    pub fn resolve(headers: &HeaderMap, cookie_name: &str, signer: &SessionSigner) -> Self {
        if let Some(id) =
            cookie_value(headers, cookie_name).and_then(|value| signer.verify(value))
        {
            return Self {
                id,
                set_cookie: None,
            };
        }

        let id = SessionId::generate();
        let set_cookie = format!(
            "{cookie_name}={}; Path=/; HttpOnly; SameSite=Lax",
            signer.sign(&id)
        );
        tracing::debug!(session_id = %id, "new browser session");
        Self {
            id,
            set_cookie: Some(set_cookie),
        }
    }
}

/// First value of cookie `name` across all `Cookie` headers.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim_matches('"'))
}

impl FromRequestParts<AppState> for BrowserSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::resolve(&parts.headers, &state.cookie_name, &state.signer))
    }
}

impl IntoResponseParts for BrowserSession {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(cookie) = self.set_cookie {
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    res.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => tracing::error!(error = %e, "unencodable session cookie"),
            }
        }
        Ok(res)
    }
}
