//! OpenAPI documentation definition.

use utoipa::OpenApi;

use crate::api::handlers::user_handler;
use crate::domain::{User, UserRef};

/// API documentation served at `/swagger-ui`
#[derive(OpenApi)]
#[openapi(
    paths(
        user_handler::create_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(schemas(
        User,
        UserRef,
        user_handler::CreateUserRequest,
        user_handler::UpdateUserRequest,
    )),
    tags(
        (name = "Users", description = "User records persisted to a normalized flat file")
    )
)]
pub struct ApiDoc;
