use actix_web::{web, HttpResponse};
use log::warn;
use utoipa::OpenApi;

use crate::errors::ApiError;
use crate::handlers;
use crate::models::HealthResponse;
use crate::openapi::ApiDoc;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health_check))
        .route("/api-docs/openapi.json", web::get().to(openapi_spec))
        .service(
            web::scope("/users")
                .route("", web::get().to(handlers::get_users))
                .route("", web::post().to(handlers::create_user))
                .route("/{id}", web::get().to(handlers::get_user))
                .route("/{id}", web::put().to(handlers::update_user))
                .route("/{id}", web::delete().to(handlers::delete_user)),
        );
}

/// Undecodable bodies get the same `{ "error": ... }` shape as every other
/// failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        warn!("Rejected request body for {}: {}", req.path(), err);
        ApiError::BadRequest(err.to_string()).into()
    })
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
    })
}

async fn openapi_spec() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
