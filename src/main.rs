use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use triplab::auth::HttpIdentityProvider;
use triplab::config::db::db_url;
use triplab::config::identity::IdentityConfig;
use triplab::config::inference::InferenceConfig;
use triplab::inference::OllamaClient;
use triplab::middleware::cors::cors_middleware;
use triplab::middleware::request_trace::RequestTrace;
use triplab::routes;
use triplab::state::app_state::AppState;
use triplab::{infra, telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("TRIPLAB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("TRIPLAB_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ TRIPLAB_PORT must be a valid port number");
            std::process::exit(1);
        });

    println!("🚀 Starting triplab backend on http://{}:{}", host, port);

    let identity_config = match IdentityConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let inference_config = match InferenceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let url = match db_url() {
        Ok(url) => url,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let db = match infra::db::connect_db(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = infra::db::ensure_schema(&db).await {
        eprintln!("❌ Failed to prepare schema: {e}");
        std::process::exit(1);
    }

    println!("✅ Database connected");

    let http = reqwest::Client::new();
    let identity = Arc::new(HttpIdentityProvider::new(http.clone(), identity_config));
    let inference = Arc::new(OllamaClient::new(http, inference_config));

    let app_state = AppState::new(db, identity, inference);

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
