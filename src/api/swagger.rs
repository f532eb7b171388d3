use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scoreboard API",
        version = "1.0.0",
        description = "CRUD over users and their scores, plus a top-10 leaderboard. \n\nEvery `/user` and `/users` response is wrapped as `{\"data\": ...}`; on errors `data` is the message string."
    ),
    paths(
        crate::api::health::health_check,

        crate::api::users::create_user,
        crate::api::users::get_user,
        crate::api::users::edit_user,
        crate::api::users::delete_user,
        crate::api::users::list_users,
        crate::api::users::list_top_users,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::UserPayload,
            crate::models::UserResponse,
            crate::models::CreatedUser,
        )
    ),
    tags(
        (name = "Users", description = "Create, read, update and delete users; list all or the top 10 by score."),
        (name = "Health", description = "Liveness and database connectivity."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/health", "/user", "/user/{userId}", "/users", "/users/top"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
