mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::{Config, StorageMode};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::cities::repositories::PgCityRepository;
use crate::features::cities::{routes as cities_routes, CityService};
use crate::features::countries::repositories::PgCountryRepository;
use crate::features::countries::{routes as countries_routes, CountryService};
use crate::features::landmarks::repositories::PgLandmarkRepository;
use crate::features::landmarks::{routes as landmarks_routes, LandmarkService};
use crate::features::photos::repositories::PgPhotoRepository;
use crate::features::photos::{routes as photos_routes, PhotoService};
use crate::features::regions::repositories::{PgGeoJsonRepository, PgRegionRepository};
use crate::features::regions::{routes as regions_routes, GeoJsonService, RegionService};
use crate::features::reviews::repositories::PgReviewRepository;
use crate::features::reviews::{routes as reviews_routes, ReviewService};
use crate::modules::storage::{LocalPhotoStorage, MinIOClient, PhotoStorage};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn_with_state, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // Repositories
    let country_repository = Arc::new(PgCountryRepository::new(pool.clone()));
    let region_repository = Arc::new(PgRegionRepository::new(pool.clone()));
    let geojson_repository = Arc::new(PgGeoJsonRepository::new(pool.clone()));
    let city_repository = Arc::new(PgCityRepository::new(pool.clone()));
    let landmark_repository = Arc::new(PgLandmarkRepository::new(pool.clone()));
    let review_repository = Arc::new(PgReviewRepository::new(pool.clone()));
    let photo_repository = Arc::new(PgPhotoRepository::new(pool.clone()));

    // Photo storage is fixed per deployment
    let photo_storage: Arc<dyn PhotoStorage> = match config.photos.mode {
        StorageMode::Local => {
            let storage = LocalPhotoStorage::new(config.photos.upload_dir.clone());
            tracing::info!("Photo storage: local directory {}", storage.root().display());
            Arc::new(storage)
        }
        StorageMode::MinIO => Arc::new(
            MinIOClient::new(config.minio.clone())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to initialize MinIO client: {}", e))?,
        ),
    };

    // Services
    let region_service = Arc::new(RegionService::new(region_repository.clone()));
    let geojson_service = Arc::new(GeoJsonService::new(
        region_repository.clone(),
        geojson_repository,
        config.geojson.touch_region,
    ));
    let country_service = Arc::new(CountryService::new(
        country_repository,
        region_repository.clone(),
        Arc::clone(&geojson_service),
    ));
    let city_service = Arc::new(CityService::new(
        city_repository.clone(),
        region_repository.clone(),
    ));
    let photo_service = Arc::new(PhotoService::new(photo_repository, photo_storage));
    let landmark_service = Arc::new(LandmarkService::new(
        landmark_repository.clone(),
        city_repository,
        region_repository,
        review_repository.clone(),
        Arc::clone(&photo_service),
    ));
    let review_service = Arc::new(ReviewService::new(
        review_repository,
        landmark_repository,
        Arc::clone(&photo_service),
    ));
    tracing::info!(
        "Services initialized (geojson touch_region={})",
        config.geojson.touch_region
    );

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn_with_state(
                Arc::new(credentials),
                middleware::basic_auth_middleware,
            ))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let api_routes = Router::new()
        .merge(countries_routes::routes(country_service))
        .merge(regions_routes::routes(region_service, geojson_service))
        .merge(cities_routes::routes(city_service))
        .merge(landmarks_routes::routes(landmark_service))
        .merge(reviews_routes::routes(review_service))
        .merge(photos_routes::routes(photo_service))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size));

    let mut app = Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(health_route);

    if config.photos.mode == StorageMode::Local {
        app = app.nest_service("/uploads", ServeDir::new(&config.photos.upload_dir));
    }

    let app = app
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
