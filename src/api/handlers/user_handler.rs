//! User CRUD handlers.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{User, UserFilter, UserPatch, UserRef};
use crate::errors::{AppError, AppResult};

/// User creation request: all three attributes are required
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Given name
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "John")]
    pub first_name: String,
    /// Family name
    #[validate(length(min = 1, message = "Second name is required"))]
    #[schema(example = "Doe")]
    pub second_name: String,
    /// Birth date, `YYYY-MM-DD`
    #[validate(custom(
        function = "crate::domain::validate_birth_date",
        message = "Birth date must be formatted as YYYY-MM-DD"
    ))]
    #[schema(example = "1990-05-17")]
    pub birth_date: String,
}

impl From<CreateUserRequest> for User {
    fn from(req: CreateUserRequest) -> Self {
        User::new(req.first_name, req.second_name, req.birth_date)
    }
}

/// User update request: attributes left out are not changed
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// New given name
    #[validate(length(min = 1, message = "First name must not be empty"))]
    #[schema(example = "Jane")]
    pub first_name: Option<String>,
    /// New family name
    #[validate(length(min = 1, message = "Second name must not be empty"))]
    #[schema(example = "Roe")]
    pub second_name: Option<String>,
    /// New birth date, `YYYY-MM-DD`
    #[validate(custom(
        function = "crate::domain::validate_birth_date",
        message = "Birth date must be formatted as YYYY-MM-DD"
    ))]
    #[schema(example = "1985-11-02")]
    pub birth_date: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        UserPatch {
            first_name: req.first_name,
            second_name: req.second_name,
            birth_date: req.birth_date,
        }
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user).get(list_users))
        .route(
            "/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserRef,
         headers(("Location" = String, description = "URI of the new user"))),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<UserRef>)> {
    let id = state.user_service.create_user(payload.into()).await?;

    let user_ref = UserRef::new(id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, user_ref.href.clone())],
        Json(user_ref),
    ))
}

/// List user ids, optionally filtered by attribute values
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(UserFilter),
    responses(
        (status = 200, description = "Matching user references", body = [UserRef])
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> AppResult<Json<Vec<UserRef>>> {
    let ids = state.user_service.list_users(filter).await?;
    Ok(Json(ids.into_iter().map(UserRef::new).collect()))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = u32, Path, description = "Record id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "No such user")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<User>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(user))
}

/// Partially update a user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = u32, Path, description = "Record id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Empty or invalid update"),
        (status = 404, description = "No such user")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<User>> {
    let patch = UserPatch::from(payload);
    if patch.is_empty() {
        return Err(AppError::bad_request(
            "At least one attribute must be supplied",
        ));
    }

    let user = state.user_service.update_user(id, patch).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = u32, Path, description = "Record id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "No such user")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<StatusCode> {
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
