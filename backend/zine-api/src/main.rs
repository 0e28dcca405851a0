use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use auth_core::jwt;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zine_api::routes::configure_routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // RUST_LOG overrides the default filter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Settings come from the environment; a bad setup is fatal
    let config = match zine_api::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Could not read configuration: {:#}", e);
            eprintln!("ERROR: Unable to read configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting zine-api v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Running in {} mode", config.app.env);

    // This service issues tokens, so it needs the full signing keypair;
    // refuse to start without it
    let (private_key, public_key) = jwt::load_keys_from_env().map_err(|err| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("JWT keys not configured: {err}"),
        )
    })?;
    jwt::initialize_jwt_keys(&private_key, &public_key).map_err(|err| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to initialize JWT keys: {err}"),
        )
    })?;

    // Connect and apply embedded migrations
    let db_pool =
        match zine_api::db::init_pool(&config.database.url, config.database.max_connections).await
        {
            Ok(pool) => pool,
            Err(e) => {
                tracing::error!("Database initialization failed: {:#}", e);
                eprintln!("ERROR: Failed to initialize database: {}", e);
                std::process::exit(1);
            }
        };

    tracing::info!("Connected to database, migrations applied");

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let app_config = web::Data::new(config.clone());
    let pool_data = web::Data::new(db_pool);

    HttpServer::new(move || {
        // Cross-origin policy from config
        let mut cors = Cors::default();
        for origin in &config.cors.allowed_origins {
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(pool_data.clone())
            .app_data(app_config.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
