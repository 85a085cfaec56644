//! Main entry point for the jukwaa_server backend.
//!
//! Sets up the Actix Web server, runs migrations and the default-admin
//! bootstrap, registers the admin API routes, and launches the async runtime
//! with tracing. Uses dotenv for config.

use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenv::dotenv;
use jukwaa_server::auth::bootstrap::ensure_default_admin;
use jukwaa_server::{AppState, get_subscriber, handlers, init_subscriber};
use tracing_actix_web::TracingLogger;

/// Main entry point. Configures and runs the Actix Web server.
///
/// - Loads environment variables from `.env`.
/// - Initializes tracing before anything that may emit warnings.
/// - Connects to Postgres, runs migrations, and ensures a default admin.
/// - Registers the health and admin routes with middleware.
/// - Launches the server with graceful shutdown on ctrl-c.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let subscriber = get_subscriber("jukwaa".to_string(), "info".to_string(), std::io::stdout);
    init_subscriber(subscriber);

    let app_state = AppState::new().await?;

    ensure_default_admin(app_state.store.as_ref(), &app_state.config).await?;

    let addr = (app_state.config.host.clone(), app_state.config.port);
    tracing::info!(host = %addr.0, port = addr.1, "starting server");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(TracingLogger::default())
            .wrap(Logger::default())
            .route(
                "/api/health",
                web::get().to(handlers::health::health_check),
            )
            .configure(handlers::admin::configure_admin_routes)
    })
    .bind(addr)?
    .run();

    let srv_handle = server.handle();

    let server_task = tokio::spawn(server);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Shutdown signal received");
            srv_handle.stop(true).await;
        }
        res = server_task => {
            if let Err(e) = res {
                tracing::error!("Server task failed: {}", e);
            }
        }
    }

    Ok(())
}
