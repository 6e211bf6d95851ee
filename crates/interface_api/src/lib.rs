//! HTTP API Layer
//!
//! This crate provides the REST API for the accident back office using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each domain
//! - **Middleware**: Authentication, authorization, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(pool, config).await;
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod settings;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use domain_workshop::Geocoder;
use infra_geo::KakaoGeocoder;

use crate::config::ApiConfig;
use crate::handlers::{accidents, health, settlements, users, vehicles, workshops};
use crate::middleware::{audit_middleware, auth_middleware, require_admin};
use crate::settings::LaborCostStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
    pub labor_costs: LaborCostStore,
    /// Unset when no Kakao REST key is configured
    pub geocoder: Option<Arc<dyn Geocoder>>,
}

/// Creates the main API router
///
/// Loads the labor cost table from disk and wires the geocoder if a Kakao
/// key is configured.
pub async fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    let labor_costs = LaborCostStore::open(config.labor_costs_path.clone()).await;

    let geocoder: Option<Arc<dyn Geocoder>> = match &config.kakao_rest_key {
        Some(key) => match KakaoGeocoder::new(key.clone()) {
            Ok(geocoder) => Some(Arc::new(geocoder)),
            Err(e) => {
                warn!(error = %e, "Could not build Kakao geocoder, geocoding disabled");
                None
            }
        },
        None => None,
    };

    let state = AppState {
        pool,
        config,
        labor_costs,
        geocoder,
    };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Accident record routes
    let record_routes = Router::new()
        .route("/", post(accidents::save_record))
        .route("/", get(accidents::list_records))
        .route("/stats", get(accidents::dashboard_stats))
        .route("/statuses", get(accidents::list_statuses))
        .route("/parse", post(accidents::parse_intake))
        .route("/by-case/:case_no", get(accidents::get_by_case_no))
        .route("/:id", get(accidents::get_record))
        .route("/:id", delete(accidents::delete_record))
        .route("/:id/status", put(accidents::update_status));

    // Settlement routes
    let settlement_routes = Router::new()
        .route("/records", get(settlements::settlement_records))
        .route("/workshops", get(settlements::workshop_report))
        .route("/monthly", get(settlements::monthly_report))
        .route("/settle", post(settlements::settle))
        .route("/settle-workshop", post(settlements::settle_workshop_month))
        .route("/labor-costs", get(settlements::get_labor_costs))
        .route("/labor-costs", put(settlements::put_labor_costs));

    // Vehicle catalog routes
    let vehicle_routes = Router::new()
        .route("/", get(vehicles::list_vehicles))
        .route("/", post(vehicles::upsert_vehicle))
        .route("/import", post(vehicles::import_sheet))
        .route("/export", get(vehicles::export_sheet))
        .route("/:id", delete(vehicles::delete_vehicle));

    // Installer location routes; the geocoding pass is admin-only
    let workshop_routes = Router::new()
        .route("/", get(workshops::list_workshops))
        .route("/", post(workshops::upsert_workshop))
        .route("/import", post(workshops::import_sheet))
        .route("/export", get(workshops::export_sheet))
        .route("/:id", delete(workshops::delete_workshop))
        .route(
            "/regenerate-coordinates",
            post(workshops::regenerate_coordinates)
                .layer(axum_middleware::from_fn(require_admin)),
        );

    // Account management, admin-only
    let user_routes = Router::new()
        .route("/", get(users::list_users))
        .route("/invite", post(users::invite_user))
        .route("/:id/role", put(users::set_role))
        .route("/:id", delete(users::deactivate_user))
        .layer(axum_middleware::from_fn(require_admin));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/records", record_routes)
        .nest("/settlements", settlement_routes)
        .nest("/vehicles", vehicle_routes)
        .nest("/workshops", workshop_routes)
        .nest("/users", user_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
