//! Turning a [`Page`] into an HTTP response.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::flash::{self, Flash, FLASH_COOKIE};
use super::session::CurrentUser;
use super::view::{render, Chrome, Page};

/// Layout data for this request: the user plus any pending flash messages.
#[must_use]
pub fn chrome(req: &HttpRequest, user: Option<&CurrentUser>) -> Chrome {
    Chrome::new(user.map(|u| u.username.clone()), flash::take(req))
}

/// `200 OK` page with the pending messages consumed.
#[must_use]
pub fn page(req: &HttpRequest, user: Option<&CurrentUser>, page: &Page<'_>) -> HttpResponse {
    page_with(req, StatusCode::OK, chrome(req, user), page)
}

/// Render with an explicit status and chrome.
///
/// The flash cookie is cleared whenever the request carried one.
#[must_use]
pub fn page_with(
    req: &HttpRequest,
    status: StatusCode,
    chrome: Chrome,
    page: &Page<'_>,
) -> HttpResponse {
    let mut builder = HttpResponse::build(status);
    builder.content_type("text/html; charset=utf-8");
    if req.cookie(FLASH_COOKIE).is_some() {
        builder.cookie(flash::removal_cookie());
    }
    builder.body(render(page, &chrome))
}

/// Redisplay a form with an error message and no redirect.
#[must_use]
pub fn form_error(
    req: &HttpRequest,
    user: Option<&CurrentUser>,
    message: String,
    page: &Page<'_>,
) -> HttpResponse {
    let mut chrome = chrome(req, user);
    chrome.push(Flash::error(message));
    page_with(req, StatusCode::OK, chrome, page)
}
