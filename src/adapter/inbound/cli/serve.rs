//! Handler for the `serve` command.

use actix_web::{middleware, App, HttpServer};
use tracing::info;

use crate::adapter::inbound::cli::command::ServeArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::web;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Verify the database, then serve until interrupted.
pub async fn execute(args: &ServeArgs, config: &Config) -> Result<()> {
    let bind = args
        .bind
        .clone()
        .unwrap_or_else(|| config.server.bind.clone());
    let state = actix_web::web::Data::new(bootstrap::build_web_state(config)?);

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Listening", &bind);
    output::field("Database", config.database.path.display());
    output::field("Tables", state.crud.tables().len());

    info!(bind = %bind, "starting http server");
    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(web::configure)
    });
    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    server.bind(&bind)?.run().await?;
    info!("http server stopped");
    Ok(())
}
