//! Route table.

use actix_web::web;

use super::{auth, pages, tables};

/// Register every route of the admin.
///
/// - `GET /`, `GET /hello`
/// - `/auth/register`, `/auth/login`, `/auth/logout`
/// - `/tables/`, `/tables/{table}`, `/tables/{table}/create`,
///   `/tables/{table}/edit/{id}`, `POST /tables/{table}/delete/{id}`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::index)
        .service(pages::hello)
        .service(
            web::scope("/auth")
                .service(auth::register_form)
                .service(auth::register)
                .service(auth::login_form)
                .service(auth::login)
                .service(auth::logout),
        )
        .service(
            web::scope("/tables")
                .route("", web::get().to(tables::index))
                .route("/", web::get().to(tables::index))
                .route("/{table}", web::get().to(tables::view))
                .route("/{table}/create", web::get().to(tables::create_form))
                .route("/{table}/create", web::post().to(tables::create))
                .route("/{table}/edit/{id}", web::get().to(tables::edit_form))
                .route("/{table}/edit/{id}", web::post().to(tables::edit))
                .route("/{table}/delete/{id}", web::post().to(tables::delete)),
        );
}
