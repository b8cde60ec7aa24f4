//! User handlers for the CRUD operations.

use actix_web::{web, HttpResponse};
use log::{debug, error, info, warn};

use crate::constants::ERR_USER_NOT_FOUND;
use crate::errors::ApiError;
use crate::models::{UserPayload, UserResponse};
use crate::repositories::StoreError;
use crate::services::UserService;

fn store_failure(operation: &str, err: StoreError) -> ApiError {
    error!("Failed to {}: {}", operation, err);
    err.into()
}

fn not_found(user_id: &str) -> ApiError {
    warn!("User not found with id: {}", user_id);
    ApiError::NotFound(ERR_USER_NOT_FOUND.to_string())
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All stored users", body = [UserResponse]),
        (status = 500, description = "Database error", body = crate::models::ErrorResponse)
    )
)]
pub async fn get_users(user_service: web::Data<UserService>) -> Result<HttpResponse, ApiError> {
    let users = user_service
        .get_all_users()
        .await
        .map_err(|e| store_failure("list users", e))?;

    Ok(HttpResponse::Ok().json(users))
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found", body = crate::models::ErrorResponse),
        (status = 500, description = "Database error or malformed ID", body = crate::models::ErrorResponse)
    )
)]
pub async fn get_user(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    debug!("Fetching user with id: {}", user_id);

    let user = user_service
        .get_user_by_id(&user_id)
        .await
        .map_err(|e| store_failure("fetch user", e))?
        .ok_or_else(|| not_found(&user_id))?;

    Ok(HttpResponse::Ok().json(user))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Name or email missing", body = crate::models::ErrorResponse),
        (status = 500, description = "Database error", body = crate::models::ErrorResponse)
    )
)]
pub async fn create_user(
    user_service: web::Data<UserService>,
    body: web::Json<UserPayload>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner().validated()?;

    let user = user_service
        .create_user(input)
        .await
        .map_err(|e| store_failure("create user", e))?;

    info!("Successfully created user: {}", user.id);
    Ok(HttpResponse::Created().json(user))
}

/// Update a user
///
/// `name` and `email` are required even when only other fields change.
/// Errors reported by the database are returned as 400.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Name or email missing, or the database rejected the update", body = crate::models::ErrorResponse),
        (status = 404, description = "User not found", body = crate::models::ErrorResponse)
    )
)]
pub async fn update_user(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
    body: web::Json<UserPayload>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let input = body.into_inner().validated()?;

    let user = user_service
        .update_user(&user_id, input)
        .await
        .map_err(|e| {
            warn!("Update of user {} rejected: {}", user_id, e);
            ApiError::BadRequest(e.to_string())
        })?
        .ok_or_else(|| not_found(&user_id))?;

    info!("Successfully updated user: {}", user_id);
    Ok(HttpResponse::Ok().json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = crate::models::ErrorResponse),
        (status = 500, description = "Database error or malformed ID", body = crate::models::ErrorResponse)
    )
)]
pub async fn delete_user(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();

    let deleted = user_service
        .delete_user(&user_id)
        .await
        .map_err(|e| store_failure("delete user", e))?;
    if !deleted {
        return Err(not_found(&user_id));
    }

    info!("Successfully deleted user: {}", user_id);
    Ok(HttpResponse::NoContent().finish())
}
