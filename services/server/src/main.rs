use sea_orm::Database;
use tracing::info;

use chemtrack_core::tracing::init_tracing;
use chemtrack_server::config::ServerConfig;
use chemtrack_server::infra::mailer::HttpMailer;
use chemtrack_server::router::build_router;
use chemtrack_server::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ServerConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = HttpMailer::new(config.mail_api_url, config.mail_api_key, config.mail_from);

    let state = AppState { db, mailer };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("chemtrack server listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
