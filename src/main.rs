use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use portfolio_admin::{
    constants::START_TIME,
    db::postgres::create_pool,
    graceful_shutdown::shutdown_signal,
    middlewares::auth::AuthMiddleware,
    routes::configure_routes,
    settings::{AppConfig, StoreBackend},
    shared_repos::SharedStores,
    AppState,
};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        cors.allow_any_origin()
    } else {
        origins.iter().fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            init_tracing(false);
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.is_production());
    once_cell::sync::Lazy::force(&START_TIME);
    tracing::info!("Loaded configuration: {:?}", config);

    let stores = match config.store_backend {
        StoreBackend::Postgres => match create_pool(&config.database_url).await {
            Ok(pool) => SharedStores::new(pool),
            Err(e) => {
                tracing::error!("Failed to create database connection pool: {}", e);
                std::process::exit(1);
            }
        },
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; content is lost on restart");
            SharedStores::in_memory()
        }
    };

    let app_state = web::Data::new(AppState::new(&config, stores));
    let origins = config.cors_origins();
    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "Starting {} v{} on {} ({} store)",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr,
        config.store_backend
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(AuthMiddleware)
            .wrap(cors(&origins))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
