use actix_web::{web, HttpResponse};

use crate::{
    models::{parse_user_id, CreatedUser, Envelope, User, UserPayload, UserResponse},
    services::UserService,
    utils::AppError,
};

type HandlerResult = Result<HttpResponse, AppError>;

fn into_responses(users: Vec<User>) -> Vec<UserResponse> {
    users.into_iter().map(UserResponse::from).collect()
}

/// POST /user - Creates a user with a server-minted id
#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created, `data` holds the inserted id", body = CreatedUser),
        (status = 400, description = "Malformed body or missing name/score"),
        (status = 500, description = "Database failure or timeout")
    )
)]
pub async fn create_user(
    service: web::Data<UserService>,
    body: web::Json<UserPayload>,
) -> HandlerResult {
    let fields = body.into_inner().validate()?;

    log::info!("📝 POST /user - Creating user {}", fields.name);

    let id = service.create(fields).await?;

    log::info!("✅ User created: {}", id);
    Ok(HttpResponse::Created().json(Envelope::new(CreatedUser { inserted_id: id.to_hex() })))
}

/// GET /user/{userId} - Fetches a single user
#[utoipa::path(
    get,
    path = "/user/{userId}",
    tag = "Users",
    params(("userId" = String, Path, description = "24-char hex ObjectId")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Invalid user id"),
        (status = 404, description = "No user with this id"),
        (status = 500, description = "Database failure or timeout")
    )
)]
pub async fn get_user(service: web::Data<UserService>, path: web::Path<String>) -> HandlerResult {
    let id = parse_user_id(&path)?;
    let user = service.get(id).await?;

    Ok(HttpResponse::Ok().json(Envelope::new(UserResponse::from(user))))
}

/// PUT /user/{userId} - Replaces name and score
#[utoipa::path(
    put,
    path = "/user/{userId}",
    tag = "Users",
    params(("userId" = String, Path, description = "24-char hex ObjectId")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Updated user, as re-read after the write", body = UserResponse),
        (status = 400, description = "Invalid id, malformed body or missing name/score"),
        (status = 404, description = "No user with this id"),
        (status = 500, description = "Database failure or timeout")
    )
)]
pub async fn edit_user(
    service: web::Data<UserService>,
    path: web::Path<String>,
    body: web::Json<UserPayload>,
) -> HandlerResult {
    let id = parse_user_id(&path)?;
    let fields = body.into_inner().validate()?;

    log::info!("🔧 PUT /user/{} - Updating user", id);

    let user = service.update(id, fields).await?;

    Ok(HttpResponse::Ok().json(Envelope::new(UserResponse::from(user))))
}

/// DELETE /user/{userId} - Hard-deletes a user
#[utoipa::path(
    delete,
    path = "/user/{userId}",
    tag = "Users",
    params(("userId" = String, Path, description = "24-char hex ObjectId")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Invalid user id"),
        (status = 404, description = "No user with this id"),
        (status = 500, description = "Database failure or timeout")
    )
)]
pub async fn delete_user(
    service: web::Data<UserService>,
    path: web::Path<String>,
) -> HandlerResult {
    let id = parse_user_id(&path)?;

    log::info!("🗑️  DELETE /user/{} - Removing user", id);

    service.delete(id).await?;

    Ok(HttpResponse::Ok().json(Envelope::new("User successfully deleted!")))
}

/// GET /users - Every user, in storage order
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 500, description = "Database failure or timeout")
    )
)]
pub async fn list_users(service: web::Data<UserService>) -> HandlerResult {
    let users = service.list_all().await?;

    log::debug!("📋 GET /users - Listed {} users", users.len());
    Ok(HttpResponse::Ok().json(Envelope::new(into_responses(users))))
}

/// GET /users/top - The ten highest scores
#[utoipa::path(
    get,
    path = "/users/top",
    tag = "Users",
    responses(
        (status = 200, description = "At most 10 users, highest score first", body = [UserResponse]),
        (status = 500, description = "Database failure or timeout")
    )
)]
pub async fn list_top_users(service: web::Data<UserService>) -> HandlerResult {
    let users = service.list_top().await?;

    Ok(HttpResponse::Ok().json(Envelope::new(into_responses(users))))
}
