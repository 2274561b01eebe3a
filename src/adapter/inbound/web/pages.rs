//! Pages outside the table admin.

use actix_web::{get, HttpRequest, HttpResponse, Responder};

use super::render;
use super::session::CurrentUser;
use super::view::Page;

#[get("/")]
pub async fn index(req: HttpRequest, user: Option<CurrentUser>) -> HttpResponse {
    render::page(&req, user.as_ref(), &Page::Home)
}

#[get("/hello")]
pub async fn hello() -> impl Responder {
    "Hello, World!"
}
