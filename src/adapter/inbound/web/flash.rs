//! One-shot messages carried across a redirect.
//!
//! The messages travel in a `flash` cookie as base64url-encoded JSON. The
//! next rendered page reads them and sends back a removal cookie.

use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

impl Level {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

#[must_use]
pub fn encode(flashes: &[Flash]) -> String {
    // Serializing plain structs of strings cannot fail.
    let json = serde_json::to_vec(flashes).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode a cookie value; anything malformed yields no messages.
#[must_use]
pub fn decode(value: &str) -> Vec<Flash> {
    URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_else(|| {
            debug!("discarding malformed flash cookie");
            Vec::new()
        })
}

/// `303 See Other` to `location`, carrying `flash` for the next page.
#[must_use]
pub fn redirect(location: &str, flash: Flash) -> HttpResponse {
    let cookie = Cookie::build(FLASH_COOKIE, encode(&[flash]))
        .path("/")
        .http_only(true)
        .finish();
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .cookie(cookie)
        .finish()
}

/// Pending messages on this request.
#[must_use]
pub fn take(req: &HttpRequest) -> Vec<Flash> {
    req.cookie(FLASH_COOKIE)
        .map(|cookie| decode(cookie.value()))
        .unwrap_or_default()
}

/// Cookie that clears consumed messages.
#[must_use]
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn encoded_messages_decode() {
        let flashes = vec![
            Flash::success("Record created successfully."),
            Flash::error("UNIQUE constraint failed: Stocks.Symbol"),
        ];
        assert_eq!(decode(&encode(&flashes)), flashes);
    }

    #[test]
    fn malformed_cookie_is_ignored() {
        assert!(decode("%%%").is_empty());
        assert!(decode(&URL_SAFE_NO_PAD.encode(b"not json")).is_empty());
    }

    #[test]
    fn redirect_sets_location_and_cookie() {
        let response = redirect("/tables/Stocks", Flash::success("done"));
        assert_eq!(response.status(), 303);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/tables/Stocks"
        );

        let cookie = response.cookies().find(|c| c.name() == FLASH_COOKIE).unwrap();
        assert_eq!(decode(cookie.value()), vec![Flash::success("done")]);
    }

    #[test]
    fn take_reads_request_cookie() {
        let value = encode(&[Flash::error("nope")]);
        let req = TestRequest::default()
            .cookie(Cookie::new(FLASH_COOKIE, value))
            .to_http_request();
        assert_eq!(take(&req), vec![Flash::error("nope")]);

        assert!(take(&TestRequest::default().to_http_request()).is_empty());
    }
}
