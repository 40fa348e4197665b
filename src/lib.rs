//! Orders admin: a remote-backed pagination controller and the orders list
//! page built on top of it.

pub mod domain;
pub mod dto;
pub mod forms;
pub mod pagination;

#[cfg(feature = "server")]
pub mod controller;
#[cfg(feature = "server")]
mod error_conversions;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod views;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use std::sync::Arc;
    use std::time::Duration;

    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::models::config::ServerConfig;
    use crate::repository::{HttpOrderRepository, OrderRepository};
    use crate::routes::{configure, orders::not_found};
    use crate::views::orders::OrderListView;

    /// Minimum length of the secret used to sign cookies.
    const MIN_SECRET_LEN: usize = 64;

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        if server_config.secret.len() < MIN_SECRET_LEN {
            return Err(std::io::Error::other(format!(
                "Secret must be at least {MIN_SECRET_LEN} bytes long"
            )));
        }

        // Keys and stores for sessions and flash messages.
        let secret_key = Key::from(server_config.secret.as_bytes());
        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let repo = HttpOrderRepository::new(
            &server_config.orders_api_url,
            Duration::from_secs(server_config.request_timeout_secs),
        )
        .map_err(|e| std::io::Error::other(format!("Failed to build order client: {e}")))?;
        let repo: Arc<dyn OrderRepository> = Arc::new(repo);

        // A single list view shared by every worker, so a later request
        // supersedes the fetch of an earlier one. Dialog state lives in the
        // session.
        let view = web::Data::new(OrderListView::mount(
            repo,
            server_config.default_query(),
            server_config.sort_switch,
        ));

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!(
            "Serving orders from {} on {}:{}",
            server_config.orders_api_url,
            bind_address.0,
            bind_address.1
        );

        HttpServer::new(move || {
            App::new()
                .wrap(message_framework.clone())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(false) // set to true in prod
                        .build(),
                )
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .configure(configure)
                .default_service(web::to(not_found))
                .app_data(web::Data::new(tera.clone()))
                .app_data(view.clone())
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
