use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use blog_service::config::Config;
use blog_service::db::{ensure_schema, ContentStore, PgContentStore};
use blog_service::handlers;
use blog_service::error;
use blog_service::middleware::JwtAuthMiddleware;
use blog_service::services::{
    GeminiClient, GenerationBackend, GenerationService, ImageKitClient, MediaPublisher,
};
use sqlx::postgres::PgPoolOptions;
use std::io;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn index() -> HttpResponse {
    HttpResponse::Ok().body("API is working")
}

async fn health(pool: web::Data<sqlx::PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "blog-service",
            "version": env!("CARGO_PKG_VERSION"),
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "blog-service",
        })),
    }
}

fn build_cors(config: &Config) -> Cors {
    if config.cors.allowed_origins.trim() == "*" {
        Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600)
    } else {
        let mut cors = Cors::default().allow_any_method().allow_any_header();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }
        cors.max_age(3600)
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    if let Err(e) = auth_core::initialize_token_secret(&config.auth.jwt_secret) {
        tracing::error!("Failed to initialize token secret: {}", e);
        std::process::exit(1);
    }

    let pool = match PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = ensure_schema(&pool).await {
        tracing::error!("Failed to ensure database schema: {}", e);
        std::process::exit(1);
    }
    tracing::info!(
        "Database pool created with {} max connections",
        config.database.max_connections
    );

    let store: Arc<dyn ContentStore> = Arc::new(PgContentStore::new(pool.clone()));
    let media: Arc<dyn MediaPublisher> = Arc::new(ImageKitClient::new(config.media.clone()));
    let generation_backend: Arc<dyn GenerationBackend> =
        Arc::new(GeminiClient::new(config.generation.clone()));
    let generation = GenerationService::new(generation_backend);

    let bind_addr = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Listening on {}", bind_addr);

    let app_config = config.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&app_config))
            .wrap(Logger::default())
            .wrap(TracingLogger::default())
            // Malformed request bodies and path segments report in the same
            // body shape as every other error
            .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
            .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
            .app_data(web::Data::new(app_config.clone()))
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(media.clone()))
            .app_data(web::Data::new(generation.clone()))
            .route("/", web::get().to(index))
            .route("/health", web::get().to(health))
            .service(
                web::scope("/api/admin")
                    .route("/login", web::post().to(handlers::login))
                    .service(
                        web::scope("")
                            .wrap(JwtAuthMiddleware)
                            .route("/blogs", web::get().to(handlers::list_all_blogs))
                            .route("/comments", web::get().to(handlers::list_comments))
                            .route("/dashboard", web::get().to(handlers::dashboard))
                            .route(
                                "/approve-comment",
                                web::post().to(handlers::approve_comment),
                            )
                            .route("/delete-comment", web::post().to(handlers::delete_comment)),
                    ),
            )
            .service(
                web::scope("/api/blog")
                    .service(
                        web::resource("/add")
                            .wrap(JwtAuthMiddleware)
                            .route(web::post().to(handlers::add_blog)),
                    )
                    .service(
                        web::resource("/delete")
                            .wrap(JwtAuthMiddleware)
                            .route(web::post().to(handlers::delete_blog)),
                    )
                    .service(
                        web::resource("/toggle-publish")
                            .wrap(JwtAuthMiddleware)
                            .route(web::post().to(handlers::toggle_publish)),
                    )
                    .service(
                        web::resource("/generate")
                            .wrap(JwtAuthMiddleware)
                            .route(web::post().to(handlers::generate_content)),
                    )
                    .route("/all", web::get().to(handlers::list_published_blogs))
                    .route("/add-comment", web::post().to(handlers::add_comment))
                    .route("/comments", web::post().to(handlers::get_blog_comments))
                    .route("/{blogId}", web::get().to(handlers::get_blog)),
            )
    })
    .bind(&bind_addr)?
    .run()
    .await
}
