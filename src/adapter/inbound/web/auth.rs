//! Register, log in, log out.

use actix_web::{get, http::header, post, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::{info, warn};

use super::flash::{self, Flash};
use super::render;
use super::session::CurrentUser;
use super::state::WebState;
use super::view::Page;
use crate::error::{Error, Result};

/// Username/password form body.
#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[get("/register")]
pub async fn register_form(req: HttpRequest, user: Option<CurrentUser>) -> HttpResponse {
    render::page(&req, user.as_ref(), &Page::Register { username: "" })
}

#[post("/register")]
pub async fn register(
    req: HttpRequest,
    state: web::Data<WebState>,
    form: web::Form<Credentials>,
) -> Result<HttpResponse> {
    let Credentials { username, password } = form.into_inner();
    let auth = state.auth.clone();
    let name = username.clone();

    match web::block(move || auth.register(&name, &password)).await? {
        Ok(_) => Ok(flash::redirect(
            "/auth/login",
            Flash::success("Registration complete. Please log in."),
        )),
        Err(err) if err.is_user_facing() => Ok(render::form_error(
            &req,
            None,
            err.to_string(),
            &Page::Register { username: &username },
        )),
        Err(err) => Err(Error::from(err)),
    }
}

#[get("/login")]
pub async fn login_form(req: HttpRequest, user: Option<CurrentUser>) -> HttpResponse {
    render::page(&req, user.as_ref(), &Page::Login { username: "" })
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    state: web::Data<WebState>,
    form: web::Form<Credentials>,
) -> Result<HttpResponse> {
    let Credentials { username, password } = form.into_inner();
    let auth = state.auth.clone();
    let name = username.clone();

    match web::block(move || auth.login(&name, &password)).await? {
        Ok(user) => {
            let token = state.sessions.issue(&user)?;
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/"))
                .cookie(state.sessions.login_cookie(token))
                .finish())
        }
        Err(err) if err.is_user_facing() => {
            warn!(username = %username, reason = %err, "login failed");
            Ok(render::form_error(
                &req,
                None,
                err.to_string(),
                &Page::Login { username: &username },
            ))
        }
        Err(err) => Err(Error::from(err)),
    }
}

#[get("/logout")]
pub async fn logout(state: web::Data<WebState>, user: Option<CurrentUser>) -> HttpResponse {
    if let Some(user) = user {
        info!(user_id = user.id, "user logged out");
    }
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(state.sessions.logout_cookie())
        .finish()
}
