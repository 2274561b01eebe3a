//! Cookie-held session tokens and the login gate.
//!
//! A successful login stores an HS256 JWT in an HttpOnly cookie. Protected
//! handlers take a [`CurrentUser`] argument; extracting it fails with a
//! `303 See Other` to the login page when the cookie is missing, expired or
//! forged.

use std::future::{ready, Ready};

use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::WebState;
use crate::domain::User;
use crate::error::AuthError;

/// Cookie name for the session token.
pub const SESSION_COOKIE: &str = "tradedesk_session";

/// Where anonymous requests to protected pages are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// JWT claims for a logged-in admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
}

/// Signing keys and cookie policy for sessions.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime_hours: i64,
    secure: bool,
}

impl SessionKeys {
    #[must_use]
    pub fn new(secret: &str, lifetime_hours: i64, secure: bool) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_hours,
            secure,
        }
    }

    /// Sign a token for `user`.
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidToken`] if encoding fails.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(self.lifetime_hours)).timestamp() as usize,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::InvalidToken(format!("encoding failed: {e}")))
    }

    /// Check signature and expiry.
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidToken`] for a bad signature, malformed
    /// token, or expired session.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// HttpOnly cookie carrying `token`.
    #[must_use]
    pub fn login_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::hours(self.lifetime_hours))
            .finish()
    }

    /// Cookie that clears the session.
    #[must_use]
    pub fn logout_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .finish();
        cookie.make_removal();
        cookie
    }
}

/// The logged-in admin, extracted from the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
}

impl CurrentUser {
    fn from_request_cookie(req: &HttpRequest) -> Option<Self> {
        let state = req.app_data::<web::Data<WebState>>()?;
        let cookie = req.cookie(SESSION_COOKIE)?;

        let claims = state
            .sessions
            .verify(cookie.value())
            .inspect_err(|err| debug!(error = %err, "session rejected"))
            .ok()?;
        let id = claims.sub.parse().ok()?;

        Some(Self {
            id,
            username: claims.username,
        })
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_request_cookie(req).ok_or_else(login_redirect))
    }
}

fn login_redirect() -> actix_web::Error {
    let response = HttpResponse::SeeOther()
        .insert_header((header::LOCATION, LOGIN_PATH))
        .finish();
    InternalError::from_response("login required", response).into()
}
