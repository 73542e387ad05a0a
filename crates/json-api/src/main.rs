//! BoltPromo JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use boltpromo_app::context::AppContext;

use crate::{config::ServerConfig, state::State};

mod categories;
mod config;
mod contact;
mod extensions;
mod healthcheck;
mod home;
mod hot;
mod logging;
mod pages;
mod promo;
mod search;
mod seo;
mod showcases;
mod shutdown;
mod sitemap;
mod state;
mod stores;
#[cfg(test)]
mod test_helpers;
mod views;

/// BoltPromo JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    // Initialize logging
    if let Err(init_error) = logging::init_subscriber(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let app = AppContext::from_api_url(&config.upstream.api_url);

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::shared(app, config.site)))
        .get(home::handler)
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("sitemap.xml").get(sitemap::handler))
        .push(
            Router::with_path("stores")
                .get(stores::index::handler)
                .push(Router::with_path("{slug}").get(stores::get::handler)),
        )
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .push(Router::with_path("{slug}").get(categories::get::handler)),
        )
        .push(Router::with_path("hot").get(hot::handler))
        .push(
            Router::with_path("search")
                .get(search::index::handler)
                .push(Router::with_path("suggestions").get(search::suggestions::handler)),
        )
        .push(
            Router::with_path("showcases")
                .get(showcases::index::handler)
                .push(Router::with_path("{slug}").get(showcases::get::handler)),
        )
        .push(Router::with_path("promo/{id}").get(promo::handler))
        .push(Router::with_path("pages/{slug}").get(pages::handler))
        .push(Router::with_path("contact").post(contact::handler));

    let doc = OpenApi::new("BoltPromo API", "0.3.0").merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
