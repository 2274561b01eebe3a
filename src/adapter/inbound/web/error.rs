//! HTTP mapping for crate errors.
//!
//! Only unknown tables become a `404`; user-facing failures are handled in
//! the handlers before they reach this point. Everything else is logged and
//! answered with a bare `500`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use super::view::{render, Chrome, Page};
use crate::error::{CrudError, Error};

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Crud(CrudError::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status == StatusCode::NOT_FOUND {
            "The requested table does not exist.".to_string()
        } else {
            error!(error = %self, "request failed");
            "Something went wrong on our side.".to_string()
        };

        let page = Page::Error {
            status: status.as_u16(),
            message: &message,
        };
        HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(render(&page, &Chrome::default()))
    }
}
