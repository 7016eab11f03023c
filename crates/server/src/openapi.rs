use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

/// Create/update body. Every field is optional.
#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct UserBodyDoc {
    pub firstName: Option<String>,
    pub lastName: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub city: Option<String>,
}

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct UserDoc {
    pub id: String,
    pub firstName: Option<String>,
    pub lastName: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub city: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::list_users,
        crate::routes::users::create_user,
        crate::routes::users::view_user,
        crate::routes::users::delete_all_users,
        crate::routes::users::delete_user,
        crate::routes::users::update_user,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            UserBodyDoc,
            UserDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users")
    )
)]
pub struct ApiDoc;
